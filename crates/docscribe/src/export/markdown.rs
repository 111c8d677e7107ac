//! Markdown documentation export.

use crate::types::{ApiSchema, Endpoint};

/// Render a schema as Markdown. Missing fields render as empty text.
pub fn to_markdown(schema: &ApiSchema) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", schema.title));
    md.push_str(&format!(
        "**Base URL**: {}\n\n",
        schema.base_url.as_deref().unwrap_or("")
    ));
    md.push_str(&format!(
        "{}\n\n",
        schema.description.as_deref().unwrap_or("")
    ));

    md.push_str("## Endpoints\n\n");
    for endpoint in &schema.endpoints {
        push_endpoint(&mut md, endpoint);
    }
    md
}

fn push_endpoint(md: &mut String, endpoint: &Endpoint) {
    md.push_str(&format!("### {} {}\n\n", endpoint.method, endpoint.path));
    md.push_str(&format!(
        "{}\n\n",
        endpoint.description.as_deref().unwrap_or("No description")
    ));

    if !endpoint.parameters.is_empty() {
        md.push_str("**Parameters**:\n");
        md.push_str("| Name | Type | Required | Description |\n");
        md.push_str("|------|------|----------|-------------|\n");
        for param in &endpoint.parameters {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                cell(&param.name),
                cell(&param.param_type),
                if param.required { "Yes" } else { "No" },
                cell(param.description.as_deref().unwrap_or(""))
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
}

/// Keep a value on one table row.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
