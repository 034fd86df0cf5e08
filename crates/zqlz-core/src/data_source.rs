//! Connection configuration and the data source handle given to metadata models

use crate::SessionProvider;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Connection configuration
///
/// Holds no credentials; the execution layer behind `SessionProvider`
/// authenticates.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Unique identifier
    pub id: uuid::Uuid,
    /// Display name
    pub name: String,
    /// Driver ID (e.g., "vertica", "postgres")
    pub driver: String,
    /// Host address
    pub host: String,
    /// Port number (0 for default)
    pub port: u16,
    /// Database name
    pub database: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Additional connection parameters
    pub params: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Create a new configuration with default values
    pub fn new(driver: &str, name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            driver: driver.to_string(),
            host: String::new(),
            port: 0,
            database: None,
            username: None,
            params: HashMap::new(),
        }
    }

    /// Set a connection parameter
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let val = value.into();
        let str_val = match val {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        self.params.insert(key.to_string(), str_val);
        self
    }

    /// Get a string parameter
    pub fn get_string(&self, key: &str) -> Option<String> {
        // First check params
        if let Some(val) = self.params.get(key) {
            return Some(val.clone());
        }
        // Check known fields
        match key {
            "host" => Some(self.host.clone()),
            "database" => self.database.clone(),
            "username" | "user" => self.username.clone(),
            _ => None,
        }
    }

    /// Get a boolean parameter ("true"/"false", "1"/"0", "yes"/"no")
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.params
            .get(key)
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            })
    }
}

/// A registered data source: configuration plus the sessions used to read
/// its catalog.
#[derive(Clone)]
pub struct DataSource {
    config: ConnectionConfig,
    default_schema: Option<String>,
    sessions: Arc<dyn SessionProvider>,
}

impl DataSource {
    pub fn new(config: ConnectionConfig, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            config,
            default_schema: None,
            sessions,
        }
    }

    /// Schema used when a request does not name one
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Data source name, used as the context of data access errors
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    pub fn sessions(&self) -> &dyn SessionProvider {
        self.sessions.as_ref()
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("name", &self.config.name)
            .field("driver", &self.config.driver)
            .field("default_schema", &self.default_schema)
            .finish_non_exhaustive()
    }
}
