//! The `Expenses` section: totals on top, the list underneath.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::render_stat,
            money::{total_span, whole_span},
        },
        screens::expense_list,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stats = state.expenses.stats();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout[0]);

    render_stat(
        frame,
        cards[0],
        "Total spent",
        total_span(stats.total, state.currency, theme),
        "all expenses",
        theme,
    );
    render_stat(
        frame,
        cards[1],
        "Expenses",
        Span::raw(stats.count.to_string()),
        "recorded",
        theme,
    );
    render_stat(
        frame,
        cards[2],
        "Average",
        whole_span(stats.average, state.currency, theme),
        "per expense",
        theme,
    );

    expense_list::render(frame, layout[1], state, theme);
}
