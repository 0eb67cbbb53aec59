pub mod dashboard;
pub mod expense_details;
pub mod expense_form;
pub mod expense_list;
pub mod reports;
pub mod settings;
pub mod sign_in;
