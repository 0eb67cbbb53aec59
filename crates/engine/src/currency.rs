use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Display currency chosen by a user.
///
/// The currency is only a presentation preference: amounts are never
/// converted, the symbol is just prefixed to them. Every currency uses two
/// minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Supported currencies in picker order.
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Canonical ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Human readable label, e.g. `Indian Rupee (INR)`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Currency::Inr => "Indian Rupee (INR)",
            Currency::Usd => "US Dollar (USD)",
            Currency::Eur => "Euro (EUR)",
            Currency::Gbp => "British Pound (GBP)",
        }
    }

    /// Looks a currency up by symbol or ISO code.
    #[must_use]
    pub fn from_symbol(value: &str) -> Option<Currency> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.symbol() == value || c.code().eq_ignore_ascii_case(value))
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_symbol(value).ok_or_else(|| {
            EngineError::InvalidSettings(format!("unsupported currency: {}", value.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_symbols_and_codes() {
        assert_eq!(Currency::try_from("₹").unwrap(), Currency::Inr);
        assert_eq!(Currency::try_from(" $ ").unwrap(), Currency::Usd);
        assert_eq!(Currency::try_from("eur").unwrap(), Currency::Eur);
        assert!(Currency::try_from("¥").is_err());
        assert_eq!(Currency::default().symbol(), "₹");
    }
}
