//! Vertica metadata configuration
//!
//! Settings can come from a TOML document or from connection parameters
//! prefixed with `vertica.` (e.g. `vertica.system_schema_prefix`).

use serde::{Deserialize, Serialize};
use zqlz_core::{ConnectionConfig, Result, ZqlzError};

const PARAM_PREFIX: &str = "vertica.";

/// Catalog conventions used by the Vertica metadata model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticaMetaConfig {
    /// Schemas whose name starts with this prefix belong to the engine itself
    /// and are enumerated through the generic path.
    pub system_schema_prefix: String,
    /// Schema holding the catalog views (`tables`, `views`, `comments`, ...)
    pub catalog_schema: String,
    /// Schema used when a request names none
    pub default_schema: String,
    /// Drop `SELECT MARK_DESIGN_KSAFE(...)` statements from exported DDL
    pub strip_ksafe_marks: bool,
}

impl Default for VerticaMetaConfig {
    fn default() -> Self {
        Self {
            system_schema_prefix: "v_".to_string(),
            catalog_schema: "v_catalog".to_string(),
            default_schema: "public".to_string(),
            strip_ksafe_marks: true,
        }
    }
}

impl VerticaMetaConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ZqlzError::Configuration(format!("invalid Vertica settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `vertica.*` connection parameters on top of these settings
    pub fn with_connection_params(&self, config: &ConnectionConfig) -> Result<Self> {
        let mut settings = self.clone();
        let param = |key: &str| config.get_string(&format!("{}{}", PARAM_PREFIX, key));

        if let Some(prefix) = param("system_schema_prefix") {
            settings.system_schema_prefix = prefix;
        }
        if let Some(schema) = param("catalog_schema") {
            settings.catalog_schema = schema;
        }
        if let Some(schema) = param("default_schema") {
            settings.default_schema = schema;
        }
        if let Some(raw) = param("strip_ksafe_marks") {
            settings.strip_ksafe_marks = config
                .get_bool(&format!("{}strip_ksafe_marks", PARAM_PREFIX))
                .ok_or_else(|| {
                    ZqlzError::Configuration(format!(
                        "vertica.strip_ksafe_marks must be a boolean, got '{}'",
                        raw
                    ))
                })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.system_schema_prefix.is_empty() {
            return Err(ZqlzError::Configuration(
                "system_schema_prefix must not be empty".into(),
            ));
        }
        if self.catalog_schema.trim().is_empty() {
            return Err(ZqlzError::Configuration(
                "catalog_schema must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether `schema` is one of the engine's internal schemas
    pub fn is_system_schema(&self, schema: &str) -> bool {
        schema.starts_with(&self.system_schema_prefix)
    }
}
