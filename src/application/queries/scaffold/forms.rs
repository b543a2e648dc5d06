use super::{ModelContext, ScaffoldQueryService};
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        forms::{DynamicForm, InlineFormset},
    },
    domain::{
        configuration::ViewType,
        entity::{ConfigurableEntity, FieldKind},
        user::Principal,
    },
};
use std::sync::Arc;

impl ScaffoldQueryService {
    pub async fn build_form(&self, app: &str, model: &str, principal: &Principal) -> ApplicationResult<DynamicForm> {
        let ctx = self.require_context(app, model).await?;
        Ok(ctx.form(principal))
    }

    /// Registered child entities declared by `model`, in declaration order.
    pub fn child_models(&self, app: &str, model: &str) -> ApplicationResult<Vec<Arc<dyn ConfigurableEntity>>> {
        let entity = self
            .registry
            .get(app, model)
            .ok_or_else(|| ApplicationError::not_found(format!("model {app}.{model}")))?;
        entity
            .children()
            .into_iter()
            .map(|child| {
                self.registry.get(app, &child).ok_or_else(|| {
                    ApplicationError::infrastructure(format!(
                        "child model {app}.{child} of {model} is not registered"
                    ))
                })
            })
            .collect()
    }

    pub async fn build_inline_formset(
        &self,
        app: &str,
        parent: &str,
        child: &str,
        principal: &Principal,
    ) -> ApplicationResult<InlineFormset> {
        let parent_ctx = self.require_context(app, parent).await?;
        if !parent_ctx.entity.children().iter().any(|c| c == child) {
            return Err(ApplicationError::validation(format!(
                "{child} is not an inline child of {parent}"
            )));
        }
        let child_ctx = self.require_context(app, child).await?;
        child_ctx.formset(parent, principal)
    }

    /// Formsets for every configured child of `parent`.
    pub async fn build_inline_formsets(
        &self,
        app: &str,
        parent: &str,
        principal: &Principal,
    ) -> ApplicationResult<Vec<InlineFormset>> {
        let mut formsets = Vec::new();
        for child in self.child_models(app, parent)? {
            if let Some(ctx) = self.find_context(app, child.model_name()).await? {
                formsets.push(ctx.formset(parent, principal)?);
            }
        }
        Ok(formsets)
    }
}

impl ModelContext {
    pub fn form(&self, principal: &Principal) -> DynamicForm {
        let names = self.resolve(principal, ViewType::Form, false);
        DynamicForm::from_resolved(self.entity.as_ref(), &self.config, &names)
    }

    /// Name of this entity's foreign key to `parent`.
    pub fn fk_to(&self, parent: &str) -> ApplicationResult<String> {
        self.entity
            .fields()
            .into_iter()
            .find(|f| f.kind == FieldKind::ForeignKey && f.related_model.as_deref() == Some(parent))
            .map(|f| f.name)
            .ok_or_else(|| {
                ApplicationError::infrastructure(format!(
                    "{} has no foreign key to {parent}",
                    self.entity.model_name()
                ))
            })
    }

    pub fn formset(&self, parent: &str, principal: &Principal) -> ApplicationResult<InlineFormset> {
        let fk_name = self.fk_to(parent)?;
        Ok(InlineFormset::new(
            parent,
            self.entity.model_name(),
            fk_name,
            self.form(principal),
        ))
    }
}
