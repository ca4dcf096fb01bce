//! Line-oriented rendering of extracted records.
//!
//! Resources render as a Terraform configuration skeleton with each argument
//! documented by a comment; providers render as one resource name per line.

use tfdoc_shared::{ArgumentRecord, DocRecord, ProviderRecord, ResourceRecord};

const INDENT: &str = "  ";

/// Rendering switches.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Only emit arguments marked required (nested fields included).
    pub required_only: bool,
    /// Local name used in the `resource "<type>" "<label>"` header.
    pub label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            required_only: false,
            label: "this".into(),
        }
    }
}

/// Render any record.
pub fn render(record: &DocRecord, options: &RenderOptions) -> Vec<String> {
    match record {
        DocRecord::Resource(resource) => render_resource(resource, options),
        DocRecord::Provider(provider) => render_provider(provider),
    }
}

/// Render a resource as a configuration skeleton.
pub fn render_resource(resource: &ResourceRecord, options: &RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();

    if !resource.description.is_empty() {
        lines.push(format!("# {}", resource.description));
    }
    lines.push(format!(
        "resource \"{}\" \"{}\" {{",
        resource.name, options.label
    ));
    render_args(&resource.args, options, 1, &mut lines);
    lines.push("}".into());

    lines
}

pub fn render_provider(provider: &ProviderRecord) -> Vec<String> {
    provider.resource_names.clone()
}

fn render_args(
    args: &[ArgumentRecord],
    options: &RenderOptions,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let indent = INDENT.repeat(depth);

    // Items that had no code-styled name cannot be written as attributes.
    for arg in args
        .iter()
        .filter(|a| !a.name.is_empty())
        .filter(|a| a.required || !options.required_only)
    {
        if !arg.description.is_empty() {
            lines.push(format!("{indent}# {}", arg.description));
        }

        if arg.nested_fields.is_empty() {
            lines.push(format!("{indent}{} = \"\"", arg.name));
        } else {
            lines.push(format!("{indent}{} {{", arg.name));
            render_args(&arg.nested_fields, options, depth + 1, lines);
            lines.push(format!("{indent}}}"));
        }
    }
}
