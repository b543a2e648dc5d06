// src/lib.rs
pub mod application;
pub mod apps;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
