mod user_handler;

pub use user_handler::{create_user, create_user_form, list_users};
