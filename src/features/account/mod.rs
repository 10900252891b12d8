//! Login and logout.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/Account/Login` | Login form |
//! | POST | `/Account/Login` | Check credentials, start a session, redirect home |
//! | POST | `/Account/Logout` | End the session, redirect to the login form |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
