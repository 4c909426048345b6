//! Output formatting module
//!
//! Renders a namespace description as text, JSON or YAML

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::cli::OutputFormat;
use crate::error::{Result, ZedError};
use crate::rpc::NamespaceDefinition;

/// Render a namespace in the requested format
pub fn render_namespace(
    definition: &NamespaceDefinition,
    raw: &serde_json::Value,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(definition)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(raw)?),
        OutputFormat::Yaml => serde_yml::to_string(raw)
            .map_err(|e| ZedError::Json(format!("Failed to serialize YAML: {}", e))),
    }
}

/// Print a namespace in the requested format
pub fn output_namespace(
    definition: &NamespaceDefinition,
    raw: &serde_json::Value,
    format: OutputFormat,
) -> Result<()> {
    let rendered = render_namespace(definition, raw, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn render_text(definition: &NamespaceDefinition) -> String {
    if definition.relations.is_empty() {
        return format!("Namespace: {}\n\nNo relations defined.", definition.name);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("RELATION"), Cell::new("REWRITE")]);

    for relation in &definition.relations {
        let rewrite = if relation.has_rewrite() { "yes" } else { "" };
        table.add_row(vec![Cell::new(&relation.name), Cell::new(rewrite)]);
    }

    format!("Namespace: {}\n\n{}", definition.name, table)
}
