pub mod ticket_service;
mod ticket_store;

pub use ticket_service::TicketService;
pub use ticket_store::{PgTicketStore, TicketStore};
