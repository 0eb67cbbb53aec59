use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, expense_card::expense_card},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let expenses = &state.expenses;
    let title = format!("Recent expenses ({})", expenses.items.len());
    let card = Card::new(&title, theme).focused(true);

    if let Some(error) = &expenses.error {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error)))
                .wrap(Wrap { trim: true }),
        );
        return;
    }

    if expenses.items.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                "No expenses yet.",
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled(
                "Press a to add one or S to load sample data.",
                Style::default().fg(theme.dim),
            )),
        ];
        card.render_with(frame, area, Paragraph::new(lines));
        return;
    }

    let items: Vec<ListItem> = expenses
        .items
        .iter()
        .enumerate()
        .map(|(idx, expense)| {
            ListItem::new(expense_card(
                expense,
                idx == expenses.selected,
                state.currency,
                state.tz,
                theme,
            ))
        })
        .collect();

    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let mut list_state = ListState::default().with_selected(Some(expenses.selected));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}
