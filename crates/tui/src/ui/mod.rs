pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Overlay, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::for_mode(state.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    match state.screen {
        Screen::SignIn => screens::sign_in::render(frame, area, state, &theme),
        Screen::Main => render_shell(frame, area, state, &theme),
    }

    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, theme);

    let labels: Vec<&str> = Section::ALL.iter().map(|s| s.label()).collect();
    let active = Section::ALL
        .iter()
        .position(|s| *s == state.section)
        .unwrap_or(0);
    components::tabs::render_tabs(frame, layout[1], &labels, active, theme);

    let content = layout[2];
    match state.section {
        Section::Expenses => screens::dashboard::render(frame, content, state, theme),
        Section::Reports => screens::reports::render(frame, content, state, theme),
        Section::Settings => screens::settings::render(frame, content, state, theme),
    }

    render_bottom_bar(frame, layout[3], state, theme);

    match &state.overlay {
        Overlay::None => {}
        Overlay::Form(form) => screens::expense_form::render(frame, area, form, theme),
        Overlay::Details => screens::expense_details::render(frame, area, state, theme),
        Overlay::ConfirmClear => components::dialog::render_confirm(
            frame,
            area,
            "Clear all expenses",
            "Delete every expense? This cannot be undone.",
            theme,
        ),
        Overlay::ConfirmDelete(_) => components::dialog::render_confirm(
            frame,
            area,
            "Delete expense",
            "Delete this expense?",
            theme,
        ),
    }
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state
        .user
        .as_ref()
        .map(|u| format!("{} <{}>", u.name, u.email))
        .unwrap_or_else(|| "-".to_string());
    let muted = Style::default().fg(theme.text_muted);

    let line = Line::from(vec![
        Span::styled(" Spendly", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("User", muted),
        Span::raw(format!(": {user}  ")),
        Span::styled("Currency", muted),
        Span::raw(format!(": {}  ", state.currency.symbol())),
        Span::styled("Server", muted),
        Span::raw(format!(": {}", state.base_url)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::hints(&[("Tab/1-3", "section")], theme);
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));

    let context: &[(&str, &str)] = match state.section {
        Section::Expenses => &[
            ("a", "add"),
            ("Enter", "details"),
            ("j/k", "move"),
            ("S", "seed"),
            ("C", "clear"),
            ("R", "reload"),
        ],
        Section::Reports => &[("←/→", "tab"), ("r", "reload")],
        Section::Settings => &[("↑/↓", "field"), ("←/→", "change"), ("Enter", "save")],
    };
    parts.extend(components::tabs::hints(context, theme));

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.extend(components::tabs::hints(&[("L", "logout"), ("q", "quit")], theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
