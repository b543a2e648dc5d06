pub mod logs;
pub mod records;
pub mod reports;
pub mod scaffold;
pub mod users;
