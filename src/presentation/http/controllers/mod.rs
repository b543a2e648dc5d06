// src/presentation/http/controllers/mod.rs
pub mod admin;
pub mod auth;
pub mod logs;
pub mod records;
pub mod reports;
pub mod scaffold;
