use api_types::report::MonthlyReport;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::BarChart,
};

use crate::ui::{
    components::{card::Card, money::from_wire},
    theme::Theme,
};

/// Returns a bar like `████████░░░░` for `value` out of `max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Bar plus label for a share already expressed in percent, e.g. `██░░ 13.2%`.
#[must_use]
pub fn percentage_bar(percentage: f64, width: usize) -> String {
    let tenths = (percentage.clamp(0.0, 100.0) * 10.0).round() as u64;
    format!("{} {percentage:>5.1}%", ascii_bar(tenths, 1000, width))
}

/// Short month label for `YYYY-MM`, e.g. `Mar 24`.
#[must_use]
pub fn month_label(month: &str) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let Some((year, month_num)) = month.split_once('-') else {
        return month.to_string();
    };
    match month_num.parse::<usize>() {
        Ok(m @ 1..=12) => format!("{} {}", NAMES[m - 1], year.get(2..).unwrap_or(year)),
        _ => month.to_string(),
    }
}

/// Monthly spending in whole currency units, one bar per month.
pub fn render_monthly_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[MonthlyReport],
    theme: &Theme,
) {
    let labels: Vec<String> = rows.iter().map(|row| month_label(&row.month)).collect();
    let data: Vec<(&str, u64)> = rows
        .iter()
        .zip(labels.iter())
        .map(|(row, label)| {
            let whole = from_wire(row.total_amount).round_to_unit().minor() / 100;
            (label.as_str(), whole.max(0) as u64)
        })
        .collect();

    let chart = BarChart::default()
        .data(data.as_slice())
        .bar_width(6)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(theme.dim));

    Card::new("Monthly spending", theme).render_with(frame, area, chart);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(ascii_bar(0, 0, 4), "░░░░");
        assert_eq!(ascii_bar(5, 10, 4), "██░░");
        assert_eq!(ascii_bar(20, 10, 4), "████");
    }

    #[test]
    fn percentage_bar_keeps_one_decimal() {
        assert_eq!(percentage_bar(13.2, 10), "█░░░░░░░░░  13.2%");
        assert_eq!(percentage_bar(100.0, 4), "████ 100.0%");
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label("2024-03"), "Mar 24");
        assert_eq!(month_label("2024-13"), "2024-13");
        assert_eq!(month_label("garbage"), "garbage");
    }
}
