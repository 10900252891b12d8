mod user_dto;

pub use user_dto::{CreateUserDto, UserFormValues, UserListItemDto};
