//! Reusable UI pieces shared by the main screen and the popups

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// One of the four counters above the table
pub fn stat_card(f: &mut Frame, area: Rect, theme: &Theme, label: &str, value: String, color: Color) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", label), Style::default().fg(theme.text_dim)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.inactive));

    let content = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(content, area);
}

/// Single-line text input with a cursor when focused
pub fn input_field(f: &mut Frame, area: Rect, theme: &Theme, label: &str, value: &str, focused: bool) {
    let border = if focused { theme.accent } else { theme.inactive };
    let title = if focused { theme.accent } else { theme.header };
    let cursor = if focused { "_" } else { "" };

    let input = Paragraph::new(format!("{}{}", value, cursor))
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", label), Style::default().fg(title)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(input, area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
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

/// Popup of a fixed height, horizontally sized by percentage
pub fn centered_fixed(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let y = r.y + (r.height - height) / 2;
    let horizontal = centered_rect(percent_x, 100, r);
    Rect::new(horizontal.x, y, horizontal.width, height)
}
