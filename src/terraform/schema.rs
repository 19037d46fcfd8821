use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::SchemaError;

pub const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Attribute catalogue per resource type.
///
/// Attribute details are kept opaque; only key presence is consulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSchema {
    pub resource_types: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl ProviderSchema {
    /// Decodes the output of `terraform providers schema -json`.
    ///
    /// Both plain attributes and nested block types count as possible
    /// attributes. Types defined by more than one provider are merged.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let dump: SchemaDump = serde_json::from_str(json)?;
        let providers = dump.provider_schemas.ok_or(SchemaError::NoProviders)?;

        let mut resource_types: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            BTreeMap::new();

        for (provider, entry) in providers {
            tracing::debug!(
                provider = %provider,
                resource_types = entry.resource_schemas.len(),
                "loaded provider schema"
            );

            for (resource_type, schema) in entry.resource_schemas {
                let attributes = resource_types.entry(resource_type).or_default();
                attributes.extend(schema.block.attributes);
                attributes.extend(schema.block.block_types);
            }
        }

        Ok(Self { resource_types })
    }

    pub fn attributes_for(
        &self,
        resource_type: &str,
    ) -> Option<&BTreeMap<String, serde_json::Value>> {
        self.resource_types.get(resource_type)
    }
}

#[derive(Debug, Deserialize)]
struct SchemaDump {
    #[serde(default)]
    provider_schemas: Option<HashMap<String, ProviderEntry>>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    #[serde(default)]
    resource_schemas: HashMap<String, ResourceSchema>,
}

#[derive(Debug, Deserialize)]
struct ResourceSchema {
    block: SchemaBlock,
}

#[derive(Debug, Deserialize)]
struct SchemaBlock {
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    block_types: BTreeMap<String, serde_json::Value>,
}

/// Source of provider schemas for a working directory.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn extract(&self, dir: &Path) -> Result<ProviderSchema, SchemaError>;
}

/// Runs `<binary> providers schema -json` inside the working directory.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    binary: String,
}

impl TerraformCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for TerraformCli {
    fn default() -> Self {
        Self::new(DEFAULT_TERRAFORM_BINARY)
    }
}

#[async_trait]
impl SchemaSource for TerraformCli {
    async fn extract(&self, dir: &Path) -> Result<ProviderSchema, SchemaError> {
        tracing::info!(binary = %self.binary, dir = %dir.display(), "extracting provider schema");

        let output = Command::new(&self.binary)
            .args(["providers", "schema", "-json"])
            .current_dir(dir)
            .output()
            .await
            .map_err(|source| SchemaError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SchemaError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let schema = ProviderSchema::from_json(&String::from_utf8_lossy(&output.stdout))?;
        tracing::info!(
            resource_types = schema.resource_types.len(),
            "provider schema extracted"
        );

        Ok(schema)
    }
}
