// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;

    /// Route name of a model's list page, e.g. `PartVendor` -> `partvendor-list`.
    fn list_route(&self, model_name: &str) -> String {
        format!("{}-list", self.slugify(&model_name.to_lowercase()))
    }
}
