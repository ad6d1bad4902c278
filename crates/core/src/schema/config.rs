//! Declarative schema configuration
//!
//! Schemas can be declared in TOML instead of code and fed through the
//! same two-phase builder. Converters and nested-type references are
//! code-only options and cannot be expressed in a config file.
//!
//! # Example
//!
//! ```
//! use protoclass_core::schema::SchemaConfig;
//!
//! let config = SchemaConfig::from_toml_str(r#"
//!     name = "Envelope"
//!
//!     [[fields]]
//!     key = "id"
//!     id = 1
//!     type = "uint32"
//!     required = true
//!
//!     [[fields]]
//!     key = "payload"
//!     id = 2
//! "#)?;
//!
//! let schema = config.into_builder().finalize().unwrap();
//! assert_eq!(schema.local_name(), "Envelope");
//! # Ok::<(), protoclass_core::schema::ConfigError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::SchemaBuilder;
use super::decl::{DefaultValue, FieldOptions};

/// Schema configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One field declaration in a schema config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// The field's own identifier (table key)
    pub key: String,
    /// Numeric field id
    pub id: u32,
    /// Wire type tag; defaults to `"bytes"`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub wire_type: Option<String>,
    /// Wire-level name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field must be present exactly once
    #[serde(default)]
    pub required: bool,
    /// Field may repeat
    #[serde(default)]
    pub repeated: bool,
    /// Untyped default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl FieldConfig {
    fn into_options(self) -> FieldOptions {
        let mut options = FieldOptions::new(self.id);
        options.wire_type = self.wire_type;
        options.name = self.name;
        options.required = self.required;
        options.repeated = self.repeated;
        options.default_value = self.default;
        options
    }
}

/// A schema declared in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Wire-level schema name
    pub name: String,
    /// Field declarations, in declaration order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    /// Parse a schema config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a schema config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded schema config {} from {:?}",
            config.name,
            path.as_ref()
        );
        Ok(config)
    }

    /// Feed the declarations into a schema builder.
    ///
    /// The resulting builder behaves exactly as if `declare_field` had been
    /// called once per config entry, in config order.
    pub fn into_builder(self) -> SchemaBuilder {
        let mut builder = SchemaBuilder::named(self.name);
        for field in self.fields {
            let key = field.key.clone();
            builder.declare_field(key, field.into_options());
        }
        builder
    }
}
