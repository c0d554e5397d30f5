use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::registry::SV_NAMESPACE_URI;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Relational layout of the node store, as far as compilation needs it. The
/// schema itself is bootstrapped elsewhere; these knobs only have to agree
/// with it.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Table holding one row per repository node
    #[validate(length(min = 1, message = "Nodes table name cannot be empty"))]
    pub nodes_table: String,

    /// Column holding the packed properties blob
    #[validate(length(min = 1, message = "Props column name cannot be empty"))]
    pub props_column: String,

    /// Shadow column holding the numeric rendering of the blob, used for
    /// numeric-cast ordering
    #[validate(length(min = 1, message = "Numeric props column name cannot be empty"))]
    pub numeric_props_column: String,

    /// XML namespace URI of the property micro-format elements
    #[validate(length(min = 1, message = "Blob namespace URI cannot be empty"))]
    pub sv_namespace_uri: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            nodes_table: "repo_nodes".to_string(),
            props_column: "props".to_string(),
            numeric_props_column: "numerical_props".to_string(),
            sv_namespace_uri: SV_NAMESPACE_URI.to_string(),
        }
    }
}

impl StorageConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            nodes_table: env::var("REPOQL_NODES_TABLE").unwrap_or(defaults.nodes_table),
            props_column: env::var("REPOQL_PROPS_COLUMN").unwrap_or(defaults.props_column),
            numeric_props_column: env::var("REPOQL_NUMERIC_PROPS_COLUMN")
                .unwrap_or(defaults.numeric_props_column),
            sv_namespace_uri: env::var("REPOQL_SV_NAMESPACE_URI")
                .unwrap_or(defaults.sv_namespace_uri),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_configuration_is_valid() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nodes_table, "repo_nodes");
    }

    #[test]
    #[serial]
    fn from_env_overrides_the_table_name() {
        env::set_var("REPOQL_NODES_TABLE", "content_nodes");
        let config = StorageConfig::from_env().unwrap();
        env::remove_var("REPOQL_NODES_TABLE");

        assert_eq!(config.nodes_table, "content_nodes");
        assert_eq!(config.props_column, "props");
    }

    #[test]
    #[serial]
    fn empty_env_value_fails_validation() {
        env::set_var("REPOQL_NODES_TABLE", "");
        let result = StorageConfig::from_env();
        env::remove_var("REPOQL_NODES_TABLE");

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
