//! The closed set of expense categories and their presentation hints.

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Entertainment,
    Health,
    Utilities,
    Transport,
    Shopping,
    Other,
}

/// Palette slot for a category. Front-ends map it to a concrete colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryColor {
    Orange,
    Purple,
    Green,
    Blue,
    Yellow,
    Pink,
    Gray,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Transport,
        Category::Shopping,
        Category::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Utilities => "Utilities",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Exact (case-sensitive) lookup after trimming.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Category> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Lookup that falls back to [`Category::Other`] for unknown names.
    #[must_use]
    pub fn lookup(name: &str) -> Category {
        Self::from_name(name).unwrap_or(Category::Other)
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Category::Food => "🍕",
            Category::Entertainment => "🎬",
            Category::Health => "💪",
            Category::Utilities => "📄",
            Category::Transport => "🚗",
            Category::Shopping => "🛍️",
            Category::Other => "📦",
        }
    }

    #[must_use]
    pub const fn color(self) -> CategoryColor {
        match self {
            Category::Food => CategoryColor::Orange,
            Category::Entertainment => CategoryColor::Purple,
            Category::Health => CategoryColor::Green,
            Category::Utilities => CategoryColor::Blue,
            Category::Transport => CategoryColor::Yellow,
            Category::Shopping => CategoryColor::Pink,
            Category::Other => CategoryColor::Gray,
        }
    }

    /// Typical titles for the category, used for demo data and form hints.
    #[must_use]
    pub const fn suggested_titles(self) -> &'static [&'static str] {
        match self {
            Category::Food => &[
                "Groceries",
                "Restaurant",
                "Coffee",
                "Lunch",
                "Dinner",
                "Snacks",
                "Takeout",
            ],
            Category::Entertainment => &[
                "Movie Night",
                "Netflix",
                "Concert",
                "Theme Park",
                "Gaming",
                "Books",
                "Music",
            ],
            Category::Health => &[
                "Gym Membership",
                "Medical Checkup",
                "Pharmacy",
                "Dental Visit",
                "Vitamins",
                "Fitness",
            ],
            Category::Utilities => &[
                "Internet Bill",
                "Phone Bill",
                "Electricity Bill",
                "Water Bill",
                "Gas Bill",
                "Maintenance",
            ],
            Category::Transport => &[
                "Uber Ride",
                "Gas Station",
                "Bus Ticket",
                "Train Pass",
                "Car Maintenance",
                "Parking",
                "Taxi",
            ],
            Category::Shopping => &[
                "Clothing",
                "Electronics",
                "Home Decor",
                "Books",
                "Accessories",
                "Beauty",
            ],
            Category::Other => &[
                "Miscellaneous",
                "Office Supplies",
                "Gift",
                "Donation",
                "Insurance",
                "Taxes",
            ],
        }
    }

    /// Next category in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Category {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous category in display order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Category {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_name(value)
            .ok_or_else(|| EngineError::InvalidCategory(format!("unknown category: {}", value.trim())))
    }
}

pub fn is_valid_category(name: &str) -> bool {
    Category::from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_trims_and_falls_back() {
        assert_eq!(Category::lookup("  Food "), Category::Food);
        assert_eq!(Category::lookup("food"), Category::Other);
        assert_eq!(Category::lookup(""), Category::Other);
        assert_eq!(Category::lookup("Crypto").emoji(), "📦");
    }

    #[test]
    fn validity_matches_closed_set() {
        for category in Category::ALL {
            assert!(is_valid_category(category.as_str()));
            assert!(!category.suggested_titles().is_empty());
        }
        assert!(!is_valid_category("Travel"));
        assert!(Category::try_from("Travel").is_err());
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(Category::Other.next(), Category::Food);
        assert_eq!(Category::Food.prev(), Category::Other);
        assert_eq!(Category::Health.next(), Category::Utilities);
    }
}
