use api_types::report::CategoryReport;
use engine::Category;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
};

use crate::{
    app::{AppState, ReportTab},
    ui::{
        components::{
            card::{Card, render_stat},
            charts::{month_label, percentage_bar, render_monthly_chart},
            money::{from_wire, total_span},
            tabs::render_tabs,
        },
        theme::Theme,
    },
};

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let labels: Vec<&str> = ReportTab::ALL.iter().map(|tab| tab.label()).collect();
    let active = ReportTab::ALL
        .iter()
        .position(|tab| *tab == state.reports.tab)
        .unwrap_or(0);
    render_tabs(frame, layout[0], &labels, active, theme);

    let content = layout[1];
    if let Some(error) = &state.reports.error {
        Card::new("Reports", theme).render_with(
            frame,
            content,
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error)))
                .wrap(Wrap { trim: true }),
        );
        return;
    }
    if !state.reports.loaded {
        Card::new("Reports", theme).render_with(
            frame,
            content,
            Paragraph::new(Span::styled("Loading…", Style::default().fg(theme.dim))),
        );
        return;
    }

    match state.reports.tab {
        ReportTab::Overview => render_overview(frame, content, state, theme),
        ReportTab::Categories => {
            let card = Card::new("By category", theme);
            let inner = card.inner(content);
            frame.render_widget(card.block(), content);
            render_category_table(frame, inner, &state.reports.categories, state, theme);
        }
        ReportTab::Monthly => render_monthly(frame, content, state, theme),
    }
}

fn render_overview(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(summary) = &state.reports.summary else {
        return;
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);
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
        "Total",
        total_span(from_wire(summary.total_amount), state.currency, theme),
        "spent overall",
        theme,
    );
    render_stat(
        frame,
        cards[1],
        "Count",
        Span::raw(summary.total_count.to_string()),
        "expenses",
        theme,
    );
    render_stat(
        frame,
        cards[2],
        "Average",
        total_span(from_wire(summary.average_amount), state.currency, theme),
        "per expense",
        theme,
    );

    let card = Card::new("Top categories", theme);
    let inner = card.inner(layout[1]);
    frame.render_widget(card.block(), layout[1]);
    render_category_table(frame, inner, &summary.categories, state, theme);
}

fn render_category_table(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[CategoryReport],
    state: &AppState,
    theme: &Theme,
) {
    if rows.is_empty() {
        frame.render_widget(empty_hint(theme), area);
        return;
    }

    let header = Row::new(["Category", "Total", "Count", "Share"])
        .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD));
    let body = rows.iter().map(|row| {
        let category = Category::lookup(&row.category);
        Row::new([
            Cell::from(Span::styled(
                format!("{} {}", category.emoji(), row.category),
                Style::default().fg(theme.category_color(category.color())),
            )),
            Cell::from(from_wire(row.total_amount).format(state.currency.symbol())),
            Cell::from(row.count.to_string()),
            Cell::from(Span::styled(
                percentage_bar(row.percentage, BAR_WIDTH),
                Style::default().fg(theme.accent),
            )),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Min(BAR_WIDTH as u16 + 7),
        ],
    )
    .header(header)
    .style(Style::default().fg(theme.text));
    frame.render_widget(table, area);
}

fn render_monthly(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = &state.reports.monthly;
    if rows.is_empty() {
        Card::new("Monthly spending", theme).render_with(frame, area, empty_hint(theme));
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Min(0)])
        .split(area);
    render_monthly_chart(frame, layout[0], rows, theme);

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<8}", month_label(&row.month)),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(format!(
                    "{:>14}",
                    from_wire(row.total_amount).format(state.currency.symbol())
                )),
                Span::styled(
                    format!("  {} expenses", row.count),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();
    Card::new("Months", theme).render_with(frame, layout[1], Paragraph::new(lines));
}

fn empty_hint(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        "No data yet. Add some expenses first.",
        Style::default().fg(theme.dim),
    ))
}
