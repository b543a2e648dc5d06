use super::{ModelContext, ScaffoldQueryService};
use crate::{
    application::{dto::FieldView, error::ApplicationResult},
    domain::{
        configuration::{ViewType, visibility::resolve_enabled_fields},
        entity::humanize,
        user::Principal,
    },
};

impl ScaffoldQueryService {
    /// Field names `principal` may see in `view`; empty when the model or its
    /// configuration is missing.
    pub async fn resolve_fields(
        &self,
        app: &str,
        model: &str,
        principal: &Principal,
        view: ViewType,
        include_computed: bool,
    ) -> ApplicationResult<Vec<String>> {
        Ok(match self.find_context(app, model).await? {
            Some(ctx) => ctx.resolve(principal, view, include_computed),
            None => Vec::new(),
        })
    }

    pub async fn describe_fields(
        &self,
        app: &str,
        model: &str,
        principal: &Principal,
        view: ViewType,
        include_computed: bool,
    ) -> ApplicationResult<Vec<FieldView>> {
        Ok(match self.find_context(app, model).await? {
            Some(ctx) => ctx.describe(principal, view, include_computed),
            None => Vec::new(),
        })
    }
}

impl ModelContext {
    pub fn resolve(&self, principal: &Principal, view: ViewType, include_computed: bool) -> Vec<String> {
        resolve_enabled_fields(
            self.entity.as_ref(),
            &self.config,
            principal,
            view,
            include_computed,
        )
    }

    pub fn describe(&self, principal: &Principal, view: ViewType, include_computed: bool) -> Vec<FieldView> {
        let descriptors = self.entity.fields();
        self.resolve(principal, view, include_computed)
            .into_iter()
            .map(|name| {
                let descriptor = descriptors.iter().find(|d| d.name == name);
                let label = self
                    .config
                    .field(&name)
                    .map(|f| f.label().to_string())
                    .or_else(|| descriptor.map(|d| d.verbose_name.clone()))
                    .unwrap_or_else(|| humanize(&name));
                FieldView {
                    kind: descriptor.map(|d| d.kind),
                    computed: descriptor.is_none(),
                    label,
                    name,
                }
            })
            .collect()
    }
}
