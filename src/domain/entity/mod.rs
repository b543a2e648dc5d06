pub mod definition;
pub mod descriptor;
pub mod registry;

pub use definition::{ConfigurableEntity, EntityDefinition, ComputeFn};
pub use descriptor::{FieldDescriptor, FieldKind, humanize};
pub use registry::{EntityRegistry, EntityRegistryBuilder, RegisteredApp};
