use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{ExpenseForm, FormField},
    ui::{
        components::{dialog, tabs::hints},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &ExpenseForm, theme: &Theme) {
    let title = if form.editing.is_some() {
        "Edit expense"
    } else {
        "Add expense"
    };
    let rect = dialog::centered_box(56, 13, area);
    let inner = dialog::popup(frame, rect, title, theme);

    let category = format!("‹ {} {} ›", form.category.emoji(), form.category);
    let suggestions = form.category.suggested_titles().join(", ");

    let mut lines = vec![
        field_line("Title", &form.title, form.focus == FormField::Title, theme),
        field_line("Amount", &form.amount, form.focus == FormField::Amount, theme),
        field_line(
            "Category",
            &category,
            form.focus == FormField::Category,
            theme,
        ),
        field_line("Date", &form.date, form.focus == FormField::Date, theme),
        Line::from(""),
        Line::from(Span::styled(
            format!("e.g. {suggestions}"),
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(hints(
        &[
            ("Tab", "next"),
            ("←/→", "category"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        theme,
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let (value_style, cursor) = if focused {
        (Style::default().fg(theme.accent), "│")
    } else {
        (Style::default().fg(theme.text), "")
    };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.text_muted)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}
