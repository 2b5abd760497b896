//! RoutePick library exports for testing

pub mod core;
pub mod planner;
pub mod tui;

#[cfg(test)]
pub mod test_support;
