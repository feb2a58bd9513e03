//! Activity pane
//!
//! Displays recent activity, newest first.

use hitfeed_app::ActivityFeed;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the activity pane.
pub fn render(frame: &mut Frame, feed: &ActivityFeed, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Activity ");

    let items: Vec<ListItem> = if feed.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Waiting for activity...",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        // Same order and fields as `ActivityFeed::render`, with the time dimmed.
        feed.events()
            .rev()
            .map(|event| {
                ListItem::new(Line::from(vec![
                    Span::styled(event.timestamp(), Style::default().fg(Color::DarkGray)),
                    Span::raw(" "),
                    Span::raw(event.text.as_str()),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}
