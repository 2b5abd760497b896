//! # Core Application Logic
//!
//! RoutePick's root-container logic. It knows nothing about any specific
//! UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (planner flag) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Planner   │
//!             │  Adapter   │          │  backend   │
//!             │ (ratatui)  │          │  (reqwest) │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, owner of `is_planner_open`
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`trip`]: Trip planner form data and validation
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod state;
pub mod trip;
