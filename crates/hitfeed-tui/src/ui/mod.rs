//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.

mod badge;
mod feed;
mod input;
mod status;

use hitfeed_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(input::HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, app.form(), *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (activity feed + badge snippets).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const FEED_WIDTH_PERCENT: u16 = 40;
    const BADGE_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(FEED_WIDTH_PERCENT),
            Constraint::Min(BADGE_AREA_MIN_WIDTH),
        ])
        .split(area);

    let [feed_area, badge_area] = chunks.as_ref() else {
        return;
    };

    feed::render(frame, app.feed(), *feed_area);
    badge::render(frame, app.badge(), *badge_area);
}
