use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Horizontal tab row; the active label is bracketed and bold.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, labels: &[&str], active: usize, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        if i == active {
            let style = Style::default().fg(theme.accent);
            spans.push(Span::styled("[", style));
            spans.push(Span::styled(
                label.to_string(),
                style.add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", style));
        } else {
            spans.push(Span::styled(
                label.to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// `key label` pairs for the bottom bar.
pub fn hints(pairs: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, label)) in pairs.iter().enumerate() {
        let gap = if i == 0 { "" } else { "  " };
        spans.push(Span::styled(
            format!("{gap}{key}"),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(theme.text_muted),
        ));
    }
    spans
}
