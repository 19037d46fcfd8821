use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a Terraform file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid HCL in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    /// A `resource` block must carry exactly a type label and a name label.
    #[error(
        "resource block in {} must have a type and a name label, found {found} label(s)",
        path.display()
    )]
    MissingLabels { path: PathBuf, found: usize },
}

/// Errors raised while extracting provider schemas.
///
/// A resource type that is simply missing from the schema is not an error.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to run '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schema command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("malformed schema output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no provider schemas found (has `terraform init` been run?)")]
    NoProviders,
}
