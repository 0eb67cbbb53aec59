use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// Rect of `width` x `height` centred in `area`, clamped to it.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// Clears `rect` and draws a popup frame, returning the inner area.
pub fn popup(frame: &mut Frame<'_>, rect: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.panel).fg(theme.text));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    inner
}

/// Yes/no question over the current view.
pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, title: &str, message: &str, theme: &Theme) {
    let rect = centered_box(46, 7, area);
    let inner = popup(frame, rect, title, theme);

    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled(" confirm   ", Style::default().fg(theme.text_muted)),
            Span::styled("n", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(theme.text_muted)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
