use engine::{Currency, Money};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Expense amount with the user's currency symbol, e.g. `₹1,234.50`.
#[must_use]
pub fn amount_span(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format(currency.symbol()),
        Style::default().fg(theme.negative),
    )
}

/// Totals are shown bold in the main text colour.
#[must_use]
pub fn total_span(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format(currency.symbol()),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

/// Whole-unit figure, used for the dashboard average.
#[must_use]
pub fn whole_span(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format_whole(currency.symbol()),
        Style::default().fg(theme.text),
    )
}

/// Converts a wire amount for display. Report totals may exceed the
/// single-amount bound, so those are taken to the nearest minor unit.
#[must_use]
pub fn from_wire(amount: f64) -> Money {
    Money::from_major(amount).unwrap_or_else(|_| Money::new((amount * 100.0).round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_totals_beyond_single_amount_bound_still_render() {
        assert_eq!(from_wire(12.5).minor(), 1250);
        assert_eq!(from_wire(2e13).minor(), 2 * Money::MAX.minor());
        assert_eq!(from_wire(f64::NAN), Money::ZERO);
    }
}
