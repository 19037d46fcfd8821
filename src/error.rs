use thiserror::Error;

use crate::oracle::RecommendationError;
use crate::terraform::{ParseError, SchemaError};

#[derive(Debug, Error)]
pub enum TfGapError {
    #[error("the provided file must have a .tf extension: {0}")]
    InputValidation(String),

    #[error("error parsing Terraform file: {0}")]
    Parse(#[from] ParseError),

    #[error("error extracting provider schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("error getting recommendations for {resource}: {source}")]
    Recommendation {
        resource: String,
        #[source]
        source: RecommendationError,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
