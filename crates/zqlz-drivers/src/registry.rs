//! Registry of metadata models keyed by driver id

use std::collections::HashMap;
use std::sync::Arc;
use zqlz_core::{ConnectionConfig, MetaIntrospector, MetaModel, Result, SessionProvider, ZqlzError};

/// Registry of available metadata models
pub struct MetaModelRegistry {
    models: HashMap<String, Arc<dyn MetaModel>>,
}

impl MetaModelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Create a registry with all built-in models registered
    pub fn with_defaults() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(feature = "vertica")]
        registry.register(Arc::new(crate::vertica::VerticaMetaModel::new()));

        registry
    }

    /// Register a model under its driver id, replacing any previous one
    pub fn register(&mut self, model: Arc<dyn MetaModel>) {
        let name = model.driver_id().to_ascii_lowercase();
        tracing::info!(driver = %name, "registering metadata model");
        self.models.insert(name, model);
    }

    /// Get a model by driver id
    pub fn get(&self, name: &str) -> Option<Arc<dyn MetaModel>> {
        let model = self.models.get(&name.to_ascii_lowercase()).cloned();
        if model.is_none() {
            tracing::warn!(driver = %name, "metadata model not found in registry");
        }
        model
    }

    /// List all registered driver ids
    pub fn list(&self) -> Vec<&str> {
        self.models.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a model is registered
    pub fn has(&self, name: &str) -> bool {
        self.models.contains_key(&name.to_ascii_lowercase())
    }

    /// Register a data source with the model matching `config.driver`
    pub fn introspector(
        &self,
        config: ConnectionConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<MetaIntrospector> {
        let model = self.get(&config.driver).ok_or_else(|| {
            ZqlzError::NotSupported(format!("no metadata model for driver '{}'", config.driver))
        })?;
        MetaIntrospector::new(model, config, sessions)
    }
}

impl Default for MetaModelRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
