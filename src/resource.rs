use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single `resource "<type>" "<name>"` declaration.
///
/// Attribute values are kept as the text the author wrote. Attributes are
/// ordered by name so reports render deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Terraform address, e.g. `aws_s3_bucket.logs`.
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }
}
