//! Domain core of the expense tracker.
//!
//! Every operation goes through [`Engine`], which owns the database
//! connection and scopes all reads and writes to a single user.

pub use category::{Category, CategoryColor, is_valid_category};
pub use currency::Currency;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseDraft, ExpenseQuery};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use reports::{CategoryTotal, MonthTotal, SUMMARY_TOP_CATEGORIES, Summary};
pub use settings::{SettingsPatch, Theme, UserSettings};
pub use sea_orm::DbErr;
pub use users::{GoogleIdentity, User};

mod category;
mod currency;
mod error;
pub mod expenses;
mod money;
mod ops;
pub mod reports;
pub mod settings;
pub mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
