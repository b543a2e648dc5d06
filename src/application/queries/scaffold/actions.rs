use super::ScaffoldQueryService;
use crate::{
    application::error::ApplicationResult,
    domain::configuration::{ActionView, ResolvedActions},
};

impl ScaffoldQueryService {
    /// Actions are configuration-driven only; no permission filtering here.
    pub async fn resolve_actions(
        &self,
        app: &str,
        model: &str,
        view: ActionView,
    ) -> ApplicationResult<ResolvedActions> {
        let actions = match self.find_context(app, model).await? {
            Some(ctx) => ctx.config.actions,
            None => Vec::new(),
        };
        Ok(match view {
            ActionView::List => ResolvedActions::for_list(&actions),
            ActionView::Detail => ResolvedActions::for_detail(&actions),
        })
    }
}
