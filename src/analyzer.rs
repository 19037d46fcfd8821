use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::error::TfGapError;
use crate::oracle::Recommender;
use crate::output;
use crate::resource::Resource;
use crate::terraform::{self, ProviderSchema, SchemaSource};

pub const TERRAFORM_EXTENSION: &str = ".tf";

/// Rejects paths that are not Terraform files. Performs no file I/O.
pub fn validate_path(path: &Path) -> Result<(), TfGapError> {
    let display = path.to_string_lossy();
    if display.ends_with(TERRAFORM_EXTENSION) {
        Ok(())
    } else {
        Err(TfGapError::InputValidation(display.into_owned()))
    }
}

/// Schema attributes that the resource does not set, sorted by name.
pub fn find_unused<'a, I>(used: &BTreeMap<String, String>, possible: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unused: Vec<String> = possible
        .into_iter()
        .filter(|attr| !used.contains_key(*attr))
        .map(str::to_string)
        .collect();
    unused.sort();
    unused.dedup();
    unused
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStatus {
    Covered,
    Recommended,
    UnknownType,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoverageStatus::Covered => "covered",
            CoverageStatus::Recommended => "recommended",
            CoverageStatus::UnknownType => "unknown type",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCoverage {
    pub resource_type: String,
    pub name: String,
    pub used: usize,
    pub unused: Vec<String>,
    pub status: CoverageStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    pub resources: Vec<ResourceCoverage>,
}

impl AnalysisSummary {
    pub fn count(&self, status: CoverageStatus) -> usize {
        self.resources
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }
}

/// Drives parse, schema extraction, gap analysis and reporting for one file.
pub struct Analyzer {
    schema_source: Box<dyn SchemaSource>,
    recommender: Box<dyn Recommender>,
    model: String,
}

impl Analyzer {
    pub fn new(
        schema_source: Box<dyn SchemaSource>,
        recommender: Box<dyn Recommender>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            schema_source,
            recommender,
            model: model.into(),
        }
    }

    pub async fn run<W: Write>(
        &self,
        path: &Path,
        out: &mut W,
    ) -> Result<AnalysisSummary, TfGapError> {
        validate_path(path)?;

        let resources = terraform::parse_file(path)?;
        tracing::info!(path = %path.display(), count = resources.len(), "parsed resources");

        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let schema = self.schema_source.extract(dir).await?;

        self.report(&resources, &schema, out).await
    }

    /// Reports every resource in order, stopping at the first oracle failure.
    pub async fn report<W: Write>(
        &self,
        resources: &[Resource],
        schema: &ProviderSchema,
        out: &mut W,
    ) -> Result<AnalysisSummary, TfGapError> {
        let mut summary = AnalysisSummary::default();

        for resource in resources {
            let Some(possible) = schema.attributes_for(&resource.resource_type) else {
                tracing::debug!(
                    resource = %resource.address(),
                    "resource type not in provider schema, skipping"
                );
                summary.resources.push(coverage(resource, Vec::new(), CoverageStatus::UnknownType));
                continue;
            };

            let unused = find_unused(&resource.attributes, possible.keys().map(String::as_str));

            if unused.is_empty() {
                output::write_covered(out, resource)?;
                summary.resources.push(coverage(resource, unused, CoverageStatus::Covered));
                continue;
            }

            tracing::info!(
                resource = %resource.address(),
                unused = unused.len(),
                backend = self.recommender.name(),
                "requesting recommendations"
            );

            let recommendations = self
                .recommender
                .recommend(&resource.resource_type, &unused, &self.model)
                .await
                .map_err(|source| TfGapError::Recommendation {
                    resource: resource.address(),
                    source,
                })?;

            output::write_recommendations(out, resource, &recommendations)?;
            out.flush()?;
            summary.resources.push(coverage(resource, unused, CoverageStatus::Recommended));
        }

        out.flush()?;
        Ok(summary)
    }
}

fn coverage(resource: &Resource, unused: Vec<String>, status: CoverageStatus) -> ResourceCoverage {
    ResourceCoverage {
        resource_type: resource.resource_type.clone(),
        name: resource.name.clone(),
        used: resource.attributes.len(),
        unused,
        status,
    }
}
