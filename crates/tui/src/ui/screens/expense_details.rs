use engine::Category;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, amount_of, expense_date, format_date},
    ui::{
        components::{dialog, money::amount_span, tabs::hints},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(expense) = state.expenses.selected_expense() else {
        return;
    };
    let category = Category::lookup(&expense.category);
    let rect = dialog::centered_box(52, 12, area);
    let inner = dialog::popup(frame, rect, "Expense details", theme);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.text_muted));
    let created = expense
        .created_at
        .with_timezone(&state.tz)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", category.emoji(), expense.title),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            label("Amount    "),
            amount_span(amount_of(expense), state.currency, theme),
        ]),
        Line::from(vec![
            label("Category  "),
            Span::styled(
                category.as_str(),
                Style::default().fg(theme.category_color(category.color())),
            ),
        ]),
        Line::from(vec![
            label("Date      "),
            Span::raw(format_date(expense_date(expense, state.tz))),
        ]),
        Line::from(vec![label("Created   "), Span::raw(created)]),
        Line::from(vec![label("Id        "), Span::raw(expense.id.to_string())]),
        Line::from(""),
        Line::from(hints(&[("e", "edit"), ("d", "delete"), ("Esc", "close")], theme)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
