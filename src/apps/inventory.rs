// src/apps/inventory.rs
use crate::domain::entity::{EntityDefinition, FieldDescriptor};
use serde_json::{Map, Value, json};

pub const APP_LABEL: &str = "inventory";

pub const CATEGORIES: [&str; 4] = ["hardware", "electrical", "consumable", "tooling"];

pub fn part() -> EntityDefinition {
    EntityDefinition::new(APP_LABEL, "Part")
        .with_field(FieldDescriptor::text("name").required())
        .with_field(FieldDescriptor::text("description"))
        .with_field(FieldDescriptor::decimal("price"))
        .with_field(FieldDescriptor::integer("stock_quantity"))
        .with_field(FieldDescriptor::choice("category", CATEGORIES))
        .with_computed("stock_value", stock_value)
        .with_child("PartVendor")
}

pub fn part_vendor() -> EntityDefinition {
    EntityDefinition::new(APP_LABEL, "PartVendor")
        .with_field(FieldDescriptor::foreign_key("part", "Part").required())
        .with_field(FieldDescriptor::text("vendor_name").required())
        .with_field(FieldDescriptor::integer("lead_time_days"))
}

/// `price * stock_quantity`, absent until both are set.
fn stock_value(values: &Map<String, Value>) -> Option<Value> {
    let price = values.get("price").and_then(Value::as_f64)?;
    let quantity = values
        .get("stock_quantity")
        .filter(|v| v.is_i64())
        .and_then(Value::as_f64)?;
    let total = (price * quantity * 100.0).round() / 100.0;
    Some(json!(total))
}
