mod access;
mod actions;
mod fields;
mod forms;
mod navigation;
mod service;

pub use service::{ModelContext, ScaffoldQueryService};
