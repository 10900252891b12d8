mod login_dto;

pub use login_dto::LoginDto;
