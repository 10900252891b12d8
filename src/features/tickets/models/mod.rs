mod ticket;

pub use ticket::{
    is_closed_status, NewComment, NewTicket, TicketComment, TicketDetails, TicketFilter,
    TicketListItem,
};
