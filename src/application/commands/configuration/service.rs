use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::util::SlugGenerator,
    },
    domain::{
        configuration::{ConfigurationReadRepository, ConfigurationWriteRepository},
        entity::EntityRegistry,
    },
};

pub struct ConfigurationCommandService {
    pub(super) registry: Arc<EntityRegistry>,
    pub(super) read_repo: Arc<dyn ConfigurationReadRepository>,
    pub(super) write_repo: Arc<dyn ConfigurationWriteRepository>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
}

impl ConfigurationCommandService {
    pub fn new(
        registry: Arc<EntityRegistry>,
        read_repo: Arc<dyn ConfigurationReadRepository>,
        write_repo: Arc<dyn ConfigurationWriteRepository>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            registry,
            read_repo,
            write_repo,
            slugger,
        }
    }

    pub(super) fn ensure_superuser(actor: &AuthenticatedUser) -> ApplicationResult<()> {
        if actor.is_superuser() {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(
                "configuration changes require a superuser",
            ))
        }
    }
}
