use super::ConfigurationCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, SyncReport},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        configuration::{
            AppConfiguration, ModelAction, ModelConfigId, NewAppConfiguration,
            NewFieldConfiguration, NewModelAction, NewModelConfiguration,
        },
        entity::ConfigurableEntity,
    },
};
use std::collections::HashSet;
use tracing::{debug, info};

impl ConfigurationCommandService {
    /// Create configuration rows for every registered app, model and field that
    /// has none yet. Existing rows are left exactly as they are.
    pub async fn sync(&self) -> ApplicationResult<SyncReport> {
        let mut report = SyncReport::default();
        let actions = self.ensure_default_actions(&mut report).await?;

        for app in self.registry.apps() {
            let app_config = self.ensure_app(&app.label, &mut report).await?;
            for entity in &app.models {
                self.sync_model(&app_config, entity.as_ref(), &actions, &mut report)
                    .await?;
            }
        }

        if report.is_empty() {
            debug!("configuration already up to date");
        } else {
            info!(
                apps = report.apps_added.len(),
                models = report.models_added.len(),
                fields = report.fields_added.len(),
                actions = report.actions_added.len(),
                "configuration synced"
            );
        }
        Ok(report)
    }

    pub async fn sync_as(&self, actor: &AuthenticatedUser) -> ApplicationResult<SyncReport> {
        Self::ensure_superuser(actor)?;
        self.sync().await
    }

    async fn ensure_default_actions(
        &self,
        report: &mut SyncReport,
    ) -> ApplicationResult<Vec<ModelAction>> {
        let mut actions = Vec::new();
        for action in NewModelAction::defaults() {
            let existing = self.read_repo.find_action_by_list_name(&action.list_name).await?;
            let action = match existing {
                Some(action) => action,
                None => {
                    let created = self.write_repo.insert_action(action).await?;
                    report.actions_added.push(created.list_name.clone());
                    created
                }
            };
            actions.push(action);
        }
        Ok(actions)
    }

    async fn ensure_app(
        &self,
        label: &str,
        report: &mut SyncReport,
    ) -> ApplicationResult<AppConfiguration> {
        if let Some(app) = self.read_repo.find_app_by_name(label).await? {
            return Ok(app);
        }
        let app = self
            .write_repo
            .insert_app(NewAppConfiguration::with_defaults(label))
            .await?;
        report.apps_added.push(app.name.clone());
        Ok(app)
    }

    async fn sync_model(
        &self,
        app: &AppConfiguration,
        entity: &dyn ConfigurableEntity,
        actions: &[ModelAction],
        report: &mut SyncReport,
    ) -> ApplicationResult<()> {
        let model_name = entity.model_name();
        let label = format!("{}.{model_name}", app.name);

        let (model_id, known): (ModelConfigId, HashSet<String>) =
            match self.read_repo.find_model(&app.name, model_name).await? {
                Some(existing) => (
                    existing.id,
                    existing.fields.into_iter().map(|f| f.field_name).collect(),
                ),
                None => {
                    let id = self
                        .write_repo
                        .insert_model(NewModelConfiguration::with_defaults(
                            app.id,
                            model_name,
                            self.slugger.list_route(model_name),
                        ))
                        .await?;
                    for action in actions {
                        self.write_repo.link_action(id, action.id).await?;
                    }
                    report.models_added.push(label.clone());
                    (id, HashSet::new())
                }
            };

        for (position, field) in entity
            .fields()
            .into_iter()
            .filter(|f| f.is_configurable())
            .enumerate()
        {
            if known.contains(&field.name) {
                continue;
            }
            let position = i64::try_from(position).map_err(|_| {
                ApplicationError::infrastructure(format!("too many fields on {label}"))
            })?;
            self.write_repo
                .insert_field(NewFieldConfiguration::with_defaults(
                    model_id,
                    &field.name,
                    &field.verbose_name,
                    position,
                ))
                .await?;
            report.fields_added.push(format!("{label}.{}", field.name));
        }
        Ok(())
    }
}
