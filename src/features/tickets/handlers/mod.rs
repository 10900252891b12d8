mod ticket_handler;

pub use ticket_handler::{
    add_comment, create_ticket, create_ticket_form, delete_ticket, list_tickets, ticket_details,
    update_status,
};
