// File: src/tui/view.rs
use crate::tui::ModalSurface;
use crate::tui::input::InputLine;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn draw(f: &mut Frame, surface: &ModalSurface, input: &InputLine) {
    let area = centered_rect(60, 9, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", surface.title()));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let field = Paragraph::new(input.text()).block(Block::default().borders(Borders::ALL));
    f.render_widget(field, rows[0]);

    let preview = Paragraph::new(surface.preview()).style(Style::default().fg(Color::Cyan));
    f.render_widget(preview, rows[1]);

    let help = Paragraph::new("↵:Save Esc:Cancel")
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[2]);

    f.set_cursor_position((cursor_x(rows[0], input.cursor_column()), rows[0].y + 1));
}

// Pinned to the last cell inside the field's border.
fn cursor_x(field: Rect, column: usize) -> u16 {
    let last = usize::from(field.width.saturating_sub(3));
    field.x + 1 + column.min(last) as u16
}

/// Horizontally centered by percentage, vertically centered with a fixed height.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
