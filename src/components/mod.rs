//! UI Components
//!
//! Reusable Leptos components.

mod date_filter;
mod delete_confirm_button;
mod form_dialog;
mod form_fields;
mod login;
mod navigation;
mod stats_card;
mod toast;

pub use date_filter::DateFilterBar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use form_dialog::FormDialog;
pub use form_fields::{CheckboxField, DateField, SelectField, TextField};
pub use login::LoginForm;
pub use navigation::Navigation;
pub use stats_card::StatsCard;
pub use toast::ToastStack;
