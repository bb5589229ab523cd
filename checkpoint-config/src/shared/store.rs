use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Schema holding the pipeline metadata tables.
const DEFAULT_SCHEMA: &str = "checkpoint";

/// Table holding one row per pipeline position.
const DEFAULT_POSITION_TABLE: &str = "pipeline_positions";

/// Historical position table dropped during store bootstrap.
const DEFAULT_LEGACY_POSITION_TABLE: &str = "wal_positions";

/// Naming configuration for the position store backing tables.
///
/// The configured names end up inside DDL statements, where they cannot be
/// bound as parameters, so [`PositionStoreConfig::validate`] restricts them
/// to plain SQL identifiers. The names are fixed for the lifetime of a
/// store instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PositionStoreConfig {
    /// Schema the position tables live in.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Name of the position table, without the schema.
    #[serde(default = "default_position_table")]
    pub table: String,
    /// Name of the legacy position table, without the schema.
    #[serde(default = "default_legacy_position_table")]
    pub legacy_table: String,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_owned()
}

fn default_position_table() -> String {
    DEFAULT_POSITION_TABLE.to_owned()
}

fn default_legacy_position_table() -> String {
    DEFAULT_LEGACY_POSITION_TABLE.to_owned()
}

impl Default for PositionStoreConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            table: default_position_table(),
            legacy_table: default_legacy_position_table(),
        }
    }
}

impl PositionStoreConfig {
    /// Returns the schema-qualified position table name.
    pub fn position_table(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Returns the schema-qualified legacy position table name.
    pub fn legacy_position_table(&self) -> String {
        format!("{}.{}", self.schema, self.legacy_table)
    }

    /// Returns whether `schema` and `table` refer to the store's own backing
    /// table.
    ///
    /// A pipeline replicating a whole database uses this to skip changes the
    /// position store itself generates.
    pub fn is_position_table(&self, schema: &str, table: &str) -> bool {
        self.schema == schema && self.table == table
    }

    /// Validates that every configured name is usable as a SQL identifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for name in [&self.schema, &self.table, &self.legacy_table] {
            if !is_sql_identifier(name) {
                return Err(ValidationError::InvalidIdentifier(name.clone()));
            }
        }

        Ok(())
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PositionStoreConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.position_table(), "checkpoint.pipeline_positions");
        assert_eq!(config.legacy_position_table(), "checkpoint.wal_positions");
    }

    #[test]
    fn validate_rejects_non_identifier_names() {
        let mut config = PositionStoreConfig::default();
        config.table = "pipeline positions".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidIdentifier(_))
        ));

        let mut config = PositionStoreConfig::default();
        config.schema = String::new();
        assert!(config.validate().is_err());

        let mut config = PositionStoreConfig::default();
        config.legacy_table = "1wal".to_owned();
        assert!(config.validate().is_err());

        let mut config = PositionStoreConfig::default();
        config.table = "positions; drop table users".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn is_position_table_matches_only_the_backing_table() {
        let config = PositionStoreConfig::default();

        assert!(config.is_position_table("checkpoint", "pipeline_positions"));
        assert!(!config.is_position_table("checkpoint", "wal_positions"));
        assert!(!config.is_position_table("public", "pipeline_positions"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PositionStoreConfig = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(config.schema, "checkpoint");
        assert_eq!(config.table, "pipeline_positions");
        assert_eq!(config.legacy_table, "wal_positions");
    }
}
