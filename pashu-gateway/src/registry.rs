//! Module registry
//!
//! Fixed mapping from module name to [`PredictionModule`], built once at
//! startup. The registry only routes; it performs no business logic.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GatewayError, GatewayResult};
use crate::modules::{reference, PredictionModule};

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn PredictionModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the classifier, snake, and emotion reference modules
    pub fn with_reference_modules() -> Self {
        Self::new()
            .register(Arc::new(reference::classifier()))
            .register(Arc::new(reference::snake()))
            .register(Arc::new(reference::emotion()))
    }

    /// Add a module under its own name, replacing any previous entry
    pub fn register(mut self, module: Arc<dyn PredictionModule>) -> Self {
        self.modules.insert(module.name().to_string(), module);
        self
    }

    /// Look up a module by name
    pub fn get(&self, name: &str) -> GatewayResult<Arc<dyn PredictionModule>> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::UnknownModule(name.to_string()))
    }

    /// Registered module names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::KeywordModule;
    use crate::upload::UploadedFile;
    use axum::body::Bytes;
    use pashu_common::Prediction;

    #[test]
    fn test_reference_modules_registered() {
        let registry = ModuleRegistry::with_reference_modules();
        assert_eq!(registry.names(), vec!["classifier", "emotion", "snake"]);
        assert_eq!(registry.get("snake").unwrap().name(), "snake");
    }

    #[test]
    fn test_unknown_module_rejected() {
        let registry = ModuleRegistry::with_reference_modules();
        match registry.get("llama") {
            Err(GatewayError::UnknownModule(name)) => assert_eq!(name, "llama"),
            _ => panic!("Expected UnknownModule"),
        }
    }

    #[tokio::test]
    async fn test_register_replaces_same_name() {
        let replacement = KeywordModule::new("emotion", vec![Prediction::new("Sleepy", 0.5)]);
        let registry = ModuleRegistry::with_reference_modules().register(Arc::new(replacement));

        assert_eq!(registry.names().len(), 3);

        let file = UploadedFile::new("happy_dog.jpg", "image/jpeg", Bytes::new());
        let predictions = registry.get("emotion").unwrap().predict(&file).await.unwrap();
        assert_eq!(predictions, vec![Prediction::new("Sleepy", 0.5)]);
    }
}
