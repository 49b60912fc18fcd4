use std::path::MAIN_SEPARATOR;

use crate::{Node, NodeKind};

/// Options that only affect how a tree is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Show the component a container wraps in place of the container.
    pub hide_containers: bool,
}

/// A node prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub label: String,
    pub children: Vec<DisplayNode>,
}

/// The label of a node: `source/name`, or just `source` when the file lives
/// in a directory named after the component. The root is labelled by name.
pub fn node_label(node: &Node) -> String {
    let Some(source) = &node.source else {
        return node.name.clone();
    };

    let dir_name = node
        .filename
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy());

    if dir_name.as_deref() == Some(node.name.as_str()) {
        source.clone()
    } else {
        format!("{}{}{}", source, MAIN_SEPARATOR, node.name)
    }
}

fn sort_key(node: &Node) -> String {
    format!("{}{}", node.source.as_deref().unwrap_or_default(), node.name).to_uppercase()
}

/// Filters hidden nodes, sorts siblings and collapses containers.
pub fn to_display_tree(node: &Node, options: &PrintOptions) -> DisplayNode {
    display_node(node, options, "")
}

fn display_node(node: &Node, options: &PrintOptions, suffix: &str) -> DisplayNode {
    if options.hide_containers && node.kind == NodeKind::Container {
        if let Some(child) = node.children.first().filter(|child| !child.hidden) {
            return display_node(child, options, " (*)");
        }
    }

    let mut children: Vec<&Node> = node.children.iter().filter(|child| !child.hidden).collect();
    children.sort_by_cached_key(|child| sort_key(child));

    DisplayNode {
        label: format!("{}{}", node_label(node), suffix),
        children: children
            .into_iter()
            .map(|child| display_node(child, options, ""))
            .collect(),
    }
}

/// Renders the tree with box-drawing connectors, one node per line.
pub fn render_tree(node: &Node, options: &PrintOptions) -> String {
    let display = to_display_tree(node, options);

    let mut out = String::new();
    out.push_str(&display.label);
    out.push('\n');
    render_children(&display.children, "", &mut out);
    out
}

fn render_children(children: &[DisplayNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (connector, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.label);
        out.push('\n');

        render_children(&child.children, &format!("{}{}", prefix, indent), out);
    }
}
