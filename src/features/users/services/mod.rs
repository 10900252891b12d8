pub mod password;
pub mod user_service;
mod user_store;

pub use user_service::UserService;
pub use user_store::{PgUserStore, UserStore};
