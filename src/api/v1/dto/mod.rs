pub mod principal;
pub mod users;
