use api_types::expense::ExpenseView;
use chrono_tz::Tz;
use engine::{Category, Currency};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::{
    app::{amount_of, expense_date, format_date},
    ui::{
        components::money::amount_span,
        theme::Theme,
    },
};

/// One expense as two lines: emoji, title and amount on top, category and
/// date underneath.
pub fn expense_card(
    expense: &ExpenseView,
    selected: bool,
    currency: Currency,
    tz: Tz,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let category = Category::lookup(&expense.category);
    let marker = if selected { "▌" } else { " " };
    let title_style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::raw(format!("{} ", category.emoji())),
            Span::styled(expense.title.clone(), title_style),
            Span::raw("  "),
            amount_span(amount_of(expense), currency, theme),
        ]),
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::raw("   "),
            Span::styled(
                category.as_str(),
                Style::default().fg(theme.category_color(category.color())),
            ),
            Span::styled(
                format!(" · {}", format_date(expense_date(expense, tz))),
                Style::default().fg(theme.dim),
            ),
        ]),
    ]
}
