pub mod account;
pub mod categories;
pub mod home;
pub mod tickets;
pub mod users;
