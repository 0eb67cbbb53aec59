use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel used for every section of the main view.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.surface_bright).fg(self.theme.text));
        if self.title.is_empty() {
            block
        } else {
            block.title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
        }
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// Headline figure with a caption, e.g. the dashboard totals.
pub fn render_stat(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: Span<'static>,
    caption: &str,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(value.patch_style(Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            caption.to_string(),
            Style::default().fg(theme.dim),
        )),
    ];
    Card::new(title, theme).render_with(frame, area, Paragraph::new(lines));
}
