use api_types::settings::Theme as ThemeMode;
use engine::Currency;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, SettingsField},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let settings = &state.settings;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Currency::ALL.len() as u16 + 2),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let currency_lines: Vec<Line> = Currency::ALL
        .iter()
        .map(|currency| {
            option_line(
                &format!("{}  {}", currency.symbol(), currency.label()),
                *currency == settings.currency,
                theme,
            )
        })
        .collect();
    Card::new("Currency", theme)
        .focused(settings.focus == SettingsField::Currency)
        .render_with(frame, layout[0], Paragraph::new(currency_lines));

    let theme_lines = vec![
        option_line("Dark", settings.theme == ThemeMode::Dark, theme),
        option_line("Light", settings.theme == ThemeMode::Light, theme),
    ];
    Card::new("Theme", theme)
        .focused(settings.focus == SettingsField::Theme)
        .render_with(frame, layout[1], Paragraph::new(theme_lines));

    let dirty = settings.currency != state.currency || settings.theme != state.theme;
    let mut footer = Vec::new();
    if dirty {
        footer.push(Line::from(Span::styled(
            "Unsaved changes, press Enter to save or Esc to discard.",
            Style::default().fg(theme.warning),
        )));
    }
    if let Some(message) = &settings.message {
        footer.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        )));
    }
    frame.render_widget(Paragraph::new(footer), layout[2]);
}

fn option_line(label: &str, selected: bool, theme: &Theme) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("● {label}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("○ {label}"),
            Style::default().fg(theme.text_muted),
        ))
    }
}
