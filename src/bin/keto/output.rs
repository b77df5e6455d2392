//! Rendering of command results.

use clap::ValueEnum;
use keto_client::{ExpandTree, NodeType};

/// Printed instead of a tree when the server returned none.
pub const EMPTY_TREE_MESSAGE: &str =
    "Got an empty tree. This probably means that the requested relation tuple is not present in Keto.";

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human readable text.
    #[default]
    Default,
    /// Compact JSON.
    Json,
    /// Indented JSON.
    JsonPretty,
}

#[derive(serde::Serialize)]
struct CheckOutput {
    allowed: bool,
}

/// Renders a check result, newline terminated.
pub fn render_check(allowed: bool, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Default => Ok(if allowed { "Allowed\n" } else { "Denied\n" }.to_string()),
        Format::Json | Format::JsonPretty => to_json(&CheckOutput { allowed }, format),
    }
}

/// Renders an expand result, newline terminated.
///
/// An empty result is `null` in JSON and a hint in text, unless `quiet`.
pub fn render_expand(
    tree: Option<&ExpandTree>,
    format: Format,
    quiet: bool,
) -> serde_json::Result<String> {
    match (format, tree) {
        (Format::Default, Some(tree)) => {
            let mut out = String::new();
            render_node(tree, "", "", &mut out);
            Ok(out)
        }
        (Format::Default, None) if quiet => Ok("\n".to_string()),
        (Format::Default, None) => Ok(format!("{EMPTY_TREE_MESSAGE}\n")),
        (Format::Json | Format::JsonPretty, tree) => to_json(&tree, format),
    }
}

fn to_json<T: serde::Serialize>(value: &T, format: Format) -> serde_json::Result<String> {
    let mut json = if format == Format::JsonPretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Writes `node` and its subtree, one node per line.
fn render_node(node: &ExpandTree, own_prefix: &str, child_prefix: &str, out: &mut String) {
    out.push_str(own_prefix);
    out.push_str(operator(node.node_type()));
    out.push(' ');
    out.push_str(&node.subject().to_string());
    out.push('\n');

    let last = node.children().len().saturating_sub(1);
    for (i, child) in node.children().iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        render_node(
            child,
            &format!("{child_prefix}{branch}"),
            &format!("{child_prefix}{indent}"),
            out,
        );
    }
}

fn operator(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Union => "∪",
        NodeType::Intersection => "∩",
        NodeType::Exclusion => "∖",
        NodeType::Not => "¬",
        NodeType::Leaf => "∋",
        NodeType::TupleToSubjectSet => "→",
        NodeType::ComputedSubjectSet => "⇒",
        NodeType::Unspecified => "?",
    }
}
