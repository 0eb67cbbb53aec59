use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{dialog, tabs::hints},
        theme::Theme,
    },
};

/// Long tokens are shown as their head and length only.
const TOKEN_PREVIEW: usize = 16;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card_area = dialog::centered_box(60, 11, area);
    let inner = dialog::popup(frame, card_area, "Sign in with Google", theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Paste a Google ID token to continue.",
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled(
                format!("Server: {}", state.base_url),
                Style::default().fg(theme.dim),
            )),
        ]),
        rows[0],
    );

    let sign_in = &state.sign_in;
    let input = if sign_in.pending {
        Span::styled("Signing in…", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            format!("{}│", token_preview(&sign_in.input)),
            Style::default().fg(theme.accent),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("token ", Style::default().fg(theme.text_muted)),
            input,
        ])),
        rows[2],
    );

    if let Some(message) = &sign_in.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            rows[4],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(hints(
            &[("Enter", "sign in"), ("Esc", "clear"), ("Ctrl+C", "quit")],
            theme,
        )))
        .alignment(Alignment::Center),
        rows[5],
    );
}

fn token_preview(token: &str) -> String {
    let len = token.chars().count();
    if len <= TOKEN_PREVIEW {
        return token.to_string();
    }
    let head: String = token.chars().take(TOKEN_PREVIEW).collect();
    format!("{head}… ({len} chars)")
}
