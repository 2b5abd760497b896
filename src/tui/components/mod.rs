//! # TUI Components
//!
//! Every piece of the RoutePick screen.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Sections over static content, plus the status line. Each implements
//! ratatui's `Widget` (so it can be drawn into a scroll view canvas) and
//! `Component`, and reports `height(width)` so the page can lay it out
//! without drawing it first:
//! - `Hero`, `Features` (built from `FeatureCard`s), `Gallery`, `Cta`, `Footer`
//! - `StatusBar`
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `*State` lives in `TuiState`; a transient wrapper borrows it
//! each frame to render. Events come back out of `handle_event` as a typed
//! enum, and the owner decides what they mean:
//! - `Navbar` / `NavbarState`: mobile menu flag, emits `PlanTripRequested`
//! - `LandingPage` / `LandingPageState`: scroll position, Hero CTA hits
//! - `TripPlanner` / `TripPlannerState`: the trip request form
//! - `CourseView` / `CourseViewState`: finished course plus planner chat
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── text.rs          (wrapping and centering helpers)
//! ├── icon.rs          (glyphs for the icon set)
//! ├── navbar.rs        (brand, Plan Trip, mobile menu)
//! ├── page.rs          (scrollable section stack)
//! ├── hero.rs
//! ├── feature_card.rs
//! ├── features.rs
//! ├── gallery.rs
//! ├── cta.rs
//! ├── footer.rs
//! ├── status_bar.rs
//! ├── course_view.rs   (overlay: course details + chat)
//! └── trip_planner/    (overlay form + single-line text field)
//! ```

pub mod course_view;
pub mod cta;
pub mod feature_card;
pub mod features;
pub mod footer;
pub mod gallery;
pub mod hero;
pub mod icon;
pub mod navbar;
pub mod page;
pub mod status_bar;
pub mod text;
pub mod trip_planner;

pub use course_view::{CourseView, CourseViewEvent, CourseViewState};
pub use navbar::{Navbar, NavbarEvent, NavbarState};
pub use page::{LandingPage, LandingPageState, PageEvent};
pub use status_bar::StatusBar;
pub use trip_planner::{TripPlanner, TripPlannerEvent, TripPlannerState};
