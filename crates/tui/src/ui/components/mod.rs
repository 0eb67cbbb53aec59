pub mod card;
pub mod charts;
pub mod dialog;
pub mod expense_card;
pub mod money;
pub mod tabs;
pub mod toast;
