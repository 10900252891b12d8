mod account_handler;

pub use account_handler::{login, login_form, logout};
