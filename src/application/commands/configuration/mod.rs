mod service;
mod sync;
mod update;

pub use service::ConfigurationCommandService;
pub use update::{UpdateFieldConfigurationCommand, UpdateModelConfigurationCommand};
