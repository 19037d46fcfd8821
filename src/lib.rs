//! tfgap - Terraform attribute gap analyzer
//!
//! Finds the attributes a resource's provider schema supports but the author
//! did not set, and asks a language model for recommended values.

pub mod analyzer;
pub mod error;
pub mod oracle;
pub mod output;
pub mod resource;
pub mod terraform;

pub use analyzer::{AnalysisSummary, Analyzer, CoverageStatus, find_unused, validate_path};
pub use error::TfGapError;
pub use oracle::{OllamaClient, OpenAiClient, RecommendationError, Recommender, RecommenderConfig};
pub use resource::Resource;
pub use terraform::{ParseError, ProviderSchema, SchemaError, SchemaSource, TerraformCli};
