mod ticket_dto;

pub use ticket_dto::{
    AddCommentDto, CreateTicketDto, DeleteTicketDto, TicketDetailsView, TicketListQuery,
    TicketListView, UpdateStatusDto,
};
