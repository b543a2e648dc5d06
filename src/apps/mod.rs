// src/apps/mod.rs
//! Entities shipped with the service, registered under their app labels.
pub mod frame;
pub mod inventory;

use crate::domain::{entity::EntityRegistry, errors::DomainResult};

pub fn registry() -> DomainResult<EntityRegistry> {
    let builder = EntityRegistry::builder()
        .app(frame::APP_LABEL, "Frame")?
        .entity(frame::log_message())?
        .app(inventory::APP_LABEL, "Inventory")?
        .entity(inventory::part())?
        .entity(inventory::part_vendor())?;
    Ok(builder.build())
}
