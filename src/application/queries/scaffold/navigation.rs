use super::ScaffoldQueryService;
use crate::{
    application::{
        dto::{NavigationApp, NavigationIndex, NavigationModel},
        error::ApplicationResult,
    },
    domain::entity::ConfigurableEntity,
};
use std::collections::HashMap;

impl ScaffoldQueryService {
    /// Navigable models grouped by app, recomputed from configuration on every
    /// call. Apps left without navigable models are omitted.
    pub async fn build_navigation(&self) -> ApplicationResult<NavigationIndex> {
        let flags: HashMap<(String, String), bool> = self
            .config_repo
            .navigation_flags()
            .await?
            .into_iter()
            .map(|(app, model, navigation)| ((app, model), navigation))
            .collect();

        let mut index = NavigationIndex::default();
        for app in self.registry.apps() {
            let models: Vec<NavigationModel> = app
                .models
                .iter()
                .filter(|entity| {
                    flags
                        .get(&(app.label.clone(), entity.model_name().to_string()))
                        .copied()
                        .unwrap_or(false)
                })
                .map(|entity| navigation_entry(entity.as_ref()))
                .collect();
            if !models.is_empty() {
                index.push(
                    app.label.clone(),
                    NavigationApp {
                        name: app.verbose_name.clone(),
                        models,
                    },
                );
            }
        }
        Ok(index)
    }
}

fn navigation_entry(entity: &dyn ConfigurableEntity) -> NavigationModel {
    NavigationModel {
        name: entity.model_name().to_string(),
        plural: entity.verbose_name_plural(),
        url: format!("{}-list", entity.model_name().to_lowercase()),
    }
}
