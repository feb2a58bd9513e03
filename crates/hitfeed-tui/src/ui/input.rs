//! Badge form
//!
//! Displays the username and repository fields with a cursor in the focused
//! one.

use hitfeed_app::{BadgeField, BadgeForm};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Height of the form including borders.
pub const HEIGHT: u16 = 4;

const FIELDS: [BadgeField; 2] = [BadgeField::Username, BadgeField::Repository];
const LABEL_WIDTH: u16 = 12; // "Repository: "
const BORDER_OFFSET: u16 = 1; // inside left and top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the badge form.
pub fn render(frame: &mut Frame, form: &BadgeForm, area: Rect) {
    let lines: Vec<Line> = FIELDS
        .iter()
        .map(|&field| {
            let style = if field == form.focus() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = format!("{}:", field.label());
            let label = format!("{label:<width$}", width = usize::from(LABEL_WIDTH));
            Line::from(vec![Span::styled(label, style), Span::raw(form.field(field).text())])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tab: switch field | Enter: apply | Esc: quit ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let row = FIELDS.iter().position(|&f| f == form.focus()).unwrap_or_default();
    let available_width = area.width.saturating_sub(BORDER_OFFSET + LABEL_WIDTH + RIGHT_PADDING);
    let cursor_offset = u16::try_from(form.field(form.focus()).cursor())
        .unwrap_or(u16::MAX)
        .min(available_width);

    let cursor_x = area.x.saturating_add(BORDER_OFFSET + LABEL_WIDTH).saturating_add(cursor_offset);
    #[allow(clippy::cast_possible_truncation)]
    let cursor_y = area.y.saturating_add(BORDER_OFFSET + row as u16);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
