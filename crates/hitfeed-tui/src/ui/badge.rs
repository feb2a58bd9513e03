//! Badge pane
//!
//! Displays the generated image URL and the snippets to copy.

use hitfeed_app::BadgeGenerator;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the badge pane.
pub fn render(frame: &mut Frame, badge: &BadgeGenerator, area: Rect) {
    let output = badge.output();
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled("Image", heading)),
        Line::from(output.image_url.as_str()),
        Line::default(),
        Line::from(Span::styled("Markdown", heading)),
        Line::from(output.markdown.as_str()),
        Line::default(),
        Line::from(Span::styled("HTML", heading)),
        Line::from(output.html_source()),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Badge ");
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
