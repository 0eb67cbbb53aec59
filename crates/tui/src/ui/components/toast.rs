use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{ToastLevel, ToastState},
    ui::theme::Theme,
};

/// Bottom-right notification.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let height = 3u16;
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height: height.min(area.height),
    };

    let color = match toast.level {
        ToastLevel::Info => theme.text,
        ToastLevel::Success => theme.positive,
        ToastLevel::Error => theme.error,
    };
    let style = Style::default().fg(color).bg(theme.panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(toast.message.as_str()))
            .style(style)
            .block(block),
        rect,
    );
}
