use crate::domain::entity::definition::ConfigurableEntity;
use crate::domain::errors::{DomainError, DomainResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct RegisteredApp {
    pub label: String,
    pub verbose_name: String,
    pub models: Vec<Arc<dyn ConfigurableEntity>>,
}

/// Every entity the service knows about, grouped by app in registration order.
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct EntityRegistry {
    apps: Vec<RegisteredApp>,
}

impl EntityRegistry {
    pub fn builder() -> EntityRegistryBuilder {
        EntityRegistryBuilder::default()
    }

    pub fn apps(&self) -> &[RegisteredApp] {
        &self.apps
    }

    pub fn app(&self, label: &str) -> Option<&RegisteredApp> {
        self.apps.iter().find(|a| a.label == label)
    }

    pub fn get(&self, app: &str, model: &str) -> Option<Arc<dyn ConfigurableEntity>> {
        self.app(app)?
            .models
            .iter()
            .find(|m| m.model_name() == model)
            .cloned()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Arc<dyn ConfigurableEntity>> {
        self.apps.iter().flat_map(|a| a.models.iter())
    }
}

#[derive(Default)]
pub struct EntityRegistryBuilder {
    apps: Vec<RegisteredApp>,
}

impl EntityRegistryBuilder {
    pub fn app(mut self, label: impl Into<String>, verbose_name: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        if self.apps.iter().any(|a| a.label == label) {
            return Err(DomainError::Conflict(format!("app '{label}' already registered")));
        }
        self.apps.push(RegisteredApp {
            label,
            verbose_name: verbose_name.into(),
            models: Vec::new(),
        });
        Ok(self)
    }

    pub fn entity<E>(mut self, entity: E) -> DomainResult<Self>
    where
        E: ConfigurableEntity + 'static,
    {
        let app_label = entity.app_label().to_string();
        let app = self
            .apps
            .iter_mut()
            .find(|a| a.label == app_label)
            .ok_or_else(|| DomainError::Validation(format!("app '{app_label}' is not registered")))?;
        if app.models.iter().any(|m| m.model_name() == entity.model_name()) {
            return Err(DomainError::Conflict(format!(
                "model '{}.{}' already registered",
                app_label,
                entity.model_name()
            )));
        }
        app.models.push(Arc::new(entity));
        Ok(self)
    }

    pub fn build(self) -> EntityRegistry {
        EntityRegistry { apps: self.apps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{EntityDefinition, FieldDescriptor};

    #[test]
    fn registry_keeps_registration_order() -> DomainResult<()> {
        let registry = EntityRegistry::builder()
            .app("shop", "Shop")?
            .app("crm", "CRM")?
            .entity(EntityDefinition::new("crm", "Lead").with_field(FieldDescriptor::text("email")))?
            .entity(EntityDefinition::new("shop", "Order"))?
            .build();
        let labels: Vec<_> = registry.apps().iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["shop", "crm"]);
        assert!(registry.get("crm", "Lead").is_some());
        assert!(registry.get("crm", "Order").is_none());
        Ok(())
    }

    #[test]
    fn duplicate_and_orphan_entities_are_rejected() -> DomainResult<()> {
        let builder = EntityRegistry::builder()
            .app("shop", "Shop")?
            .entity(EntityDefinition::new("shop", "Order"))?;
        let dup = builder.entity(EntityDefinition::new("shop", "Order"));
        assert!(matches!(dup, Err(DomainError::Conflict(_))));
        let orphan = EntityRegistry::builder().entity(EntityDefinition::new("nope", "Thing"));
        assert!(matches!(orphan, Err(DomainError::Validation(_))));
        Ok(())
    }
}
