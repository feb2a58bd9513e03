//! Status bar
//!
//! Displays connection status, the service origin and the last form
//! message.

use hitfeed_app::{App, ConnectionStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.connection_status();
    let style = match status {
        ConnectionStatus::Idle => Style::default().fg(Color::Gray),
        ConnectionStatus::Connecting | ConnectionStatus::Subscribing => {
            Style::default().fg(Color::Yellow)
        },
        ConnectionStatus::Live => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    };

    let mut info = format!(" | {}", app.origin());
    if app.attempt() > 1 {
        info.push_str(&format!(" | Reconnects: {}", app.attempt() - 1));
    }
    if let Some(message) = app.status_message() {
        info.push_str(" | ");
        info.push_str(message);
    }

    let status_line =
        Line::from(vec![Span::raw(" "), Span::styled(status.label(), style), Span::raw(info)]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
