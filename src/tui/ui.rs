use crate::core::state::{App, TripStatus};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::navbar::NAVBAR_HEIGHT;
use crate::tui::components::{CourseView, LandingPage, Navbar, StatusBar, TripPlanner};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

const HINTS: &str = " ↑↓ scroll  p plan  c course  m menu  q quit ";
const OVERLAY_HINTS: &str = " Esc close ";

/// Draw one frame: navbar, page, status bar, then the overlays on top.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [navbar_area, page_area, status_area] =
        Layout::vertical([Length(NAVBAR_HEIGHT), Min(0), Length(1)]).areas(frame.area());
    let compact = tui.is_compact(frame.area().width);

    let mut navbar = Navbar::new(&mut tui.navbar, compact);
    navbar.render(frame, navbar_area);

    LandingPage::new(&mut tui.page, compact).render(frame, page_area);

    // Drawn after the page so it covers it.
    navbar.render_mobile_menu(frame, page_area);

    let route = match &app.trip {
        TripStatus::Ready {
            course: Some(course),
            ..
        } if !course.places.is_empty() => Some(course.route_line()),
        _ => None,
    };
    StatusBar {
        status_message: &app.status_message,
        route,
        pending: app.trip.is_pending(),
        spinner_frame: tui.spinner_frame,
        hints: if app.is_planner_open || app.is_course_open {
            OVERLAY_HINTS
        } else {
            HINTS
        },
    }
    .render(frame, status_area);

    let full = frame.area();
    CourseView::new(&mut tui.course_view, &app.trip, app.is_course_open).render(frame, full);
    TripPlanner::new(&mut tui.trip_planner, app.is_planner_open).render(frame, full);
}
