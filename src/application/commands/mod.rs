pub mod configuration;
pub mod records;
pub mod users;
