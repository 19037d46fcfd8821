use std::collections::BTreeMap;
use std::path::Path;

use hcl::{Block, BlockLabel, Expression};

use super::ParseError;
use crate::resource::Resource;

/// Value recorded for a nested block (e.g. `versioning { ... }`) used inside a resource.
pub const NESTED_BLOCK_VALUE: &str = "{...}";

pub fn parse_file(path: &Path) -> Result<Vec<Resource>, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_str(&content, path)
}

/// Parses HCL source into its `resource` blocks, in source order.
///
/// `path` is only used for error context.
pub fn parse_str(content: &str, path: &Path) -> Result<Vec<Resource>, ParseError> {
    let body = hcl::parse(content).map_err(|e| ParseError::Syntax {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    body.blocks()
        .filter(|block| block.identifier() == "resource")
        .map(|block| resource_from_block(block, path))
        .collect()
}

fn resource_from_block(block: &Block, path: &Path) -> Result<Resource, ParseError> {
    let labels: Vec<&str> = block.labels().iter().map(BlockLabel::as_str).collect();

    let [resource_type, name] = labels.as_slice() else {
        return Err(ParseError::MissingLabels {
            path: path.to_path_buf(),
            found: labels.len(),
        });
    };

    if resource_type.is_empty() || name.is_empty() {
        return Err(ParseError::MissingLabels {
            path: path.to_path_buf(),
            found: labels.iter().filter(|l| !l.is_empty()).count(),
        });
    }

    let mut attributes = BTreeMap::new();
    for attribute in block.body().attributes() {
        attributes.insert(
            attribute.key().to_string(),
            render_expression(attribute.expr()),
        );
    }
    for nested in block.body().blocks() {
        attributes
            .entry(nested_block_key(nested).to_string())
            .or_insert_with(|| NESTED_BLOCK_VALUE.to_string());
    }

    tracing::trace!(
        resource_type,
        name,
        attributes = attributes.len(),
        "parsed resource block"
    );

    Ok(Resource {
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        attributes,
    })
}

/// `dynamic "ingress" { ... }` generates `ingress` blocks, so it counts as `ingress`.
fn nested_block_key(block: &Block) -> &str {
    match (block.identifier(), block.labels().first()) {
        ("dynamic", Some(label)) => label.as_str(),
        (identifier, _) => identifier,
    }
}

// NOTE: Strings render without quotes, everything else as single-line HCL source
fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::String(s) => s.clone(),
        Expression::TemplateExpr(template) => template.to_string(),
        other => other
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
