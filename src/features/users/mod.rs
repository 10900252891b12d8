//! User administration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/Users` | All users ordered by full name |
//! | GET | `/Users/Create` | Empty create form |
//! | POST | `/Users/Create` | Create an active user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
