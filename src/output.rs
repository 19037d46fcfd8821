use std::io::{self, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analyzer::ResourceCoverage;
use crate::resource::Resource;

pub fn write_covered<W: Write>(out: &mut W, resource: &Resource) -> io::Result<()> {
    writeln!(
        out,
        "Resource: {} (Type: {}) - All attributes are used.\n",
        resource.name, resource.resource_type
    )
}

/// Writes the suggested configuration block for a resource.
///
/// Used attributes are always quoted; the recommendation text is copied verbatim.
pub fn write_recommendations<W: Write>(
    out: &mut W,
    resource: &Resource,
    recommendations: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "\n# tfgap-generated recommendations for attributes in {} \"{}\":",
        resource.resource_type, resource.name
    )?;
    writeln!(
        out,
        "resource \"{}\" \"{}\" {{",
        resource.resource_type, resource.name
    )?;

    for (attr, value) in &resource.attributes {
        writeln!(out, "  {} = \"{}\"", attr, escape_string_literal(value))?;
    }

    writeln!(out, "\n  # Suggested attributes to enable:")?;
    write!(out, "{}", recommendations)?;
    if !recommendations.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, "}}\n")
}

/// Escapes a value so it stays a single-line HCL string literal.
fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Tabled)]
struct CoverageRow {
    #[tabled(rename = "Resource")]
    address: String,
    #[tabled(rename = "Used")]
    used: usize,
    #[tabled(rename = "Unused")]
    unused: usize,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn summary_table(coverage: &[ResourceCoverage]) -> String {
    let rows = coverage.iter().map(|entry| CoverageRow {
        address: format!("{}.{}", entry.resource_type, entry.name),
        used: entry.used,
        unused: entry.unused.len(),
        status: entry.status.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CoverageStatus;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_covered() {
        let resource = Resource::new("widget", "foo").with_attribute("size", "10");
        let output = render(|out| write_covered(out, &resource));
        assert_eq!(
            output,
            "Resource: foo (Type: widget) - All attributes are used.\n\n"
        );
    }

    #[test]
    fn test_write_recommendations_layout() {
        let resource = Resource::new("widget", "foo")
            .with_attribute("size", "10")
            .with_attribute("enabled", "true");
        let output = render(|out| {
            write_recommendations(out, &resource, "  color = \"red\"  # paint it\n")
        });

        let expected = "\n# tfgap-generated recommendations for attributes in widget \"foo\":\n\
                        resource \"widget\" \"foo\" {\n\
                        \x20 enabled = \"true\"\n\
                        \x20 size = \"10\"\n\
                        \n\
                        \x20 # Suggested attributes to enable:\n\
                        \x20 color = \"red\"  # paint it\n\
                        }\n\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_write_recommendations_adds_missing_newline() {
        let resource = Resource::new("widget", "foo");
        let output = render(|out| write_recommendations(out, &resource, "  owner = \"me\""));
        assert!(output.ends_with("  owner = \"me\"\n}\n\n"));
    }

    #[test]
    fn test_write_recommendations_escapes_values() {
        let resource = Resource::new("widget", "foo")
            .with_attribute("c", "[ 1, 2 ]")
            .with_attribute("d", "{ k = \"v\" }")
            .with_attribute("e", "say \"hi\"")
            .with_attribute("f", "C:\\tmp")
            .with_attribute("g", "line1\nline2\n");
        let output = render(|out| write_recommendations(out, &resource, "  h = 1\n"));

        assert!(output.contains("  c = \"[ 1, 2 ]\"\n"));
        assert!(output.contains("  d = \"{ k = \\\"v\\\" }\"\n"));
        assert!(output.contains("  e = \"say \\\"hi\\\"\"\n"));
        assert!(output.contains("  f = \"C:\\\\tmp\"\n"));
        assert!(output.contains("  g = \"line1\\nline2\\n\"\n"));

        let used_lines = output
            .lines()
            .filter(|line| line.starts_with("  ") && line.contains(" = \""))
            .count();
        assert_eq!(used_lines, 5);
    }

    #[test]
    fn test_escape_string_literal_plain_value_unchanged() {
        assert_eq!(escape_string_literal("my-logs"), "my-logs");
    }

    #[test]
    fn test_summary_table_lists_resources() {
        let coverage = vec![
            ResourceCoverage {
                resource_type: "widget".to_string(),
                name: "foo".to_string(),
                used: 1,
                unused: vec!["color".to_string(), "owner".to_string()],
                status: CoverageStatus::Recommended,
            },
            ResourceCoverage {
                resource_type: "gadget".to_string(),
                name: "bar".to_string(),
                used: 0,
                unused: Vec::new(),
                status: CoverageStatus::UnknownType,
            },
        ];
        let table = summary_table(&coverage);
        assert!(table.contains("Resource"));
        assert!(table.contains("widget.foo"));
        assert!(table.contains("recommended"));
        assert!(table.contains("gadget.bar"));
        assert!(table.contains("unknown type"));
    }
}
