//! Support tickets: filtered, paginated list, creation, details with
//! comments, status changes and soft delete.
//!
//! A ticket whose status is "Closed" (any ASCII case) accepts no new comments.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
