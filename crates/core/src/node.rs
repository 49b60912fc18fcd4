use std::path::PathBuf;

use serde::Serialize;

/// An import of a single binding, e.g. `Button` from `./components/Button`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportBinding {
    /// The name the binding has inside the importing module.
    pub local_name: String,
    /// The module specifier as written in the import statement.
    pub source: String,
}

impl ImportBinding {
    pub fn new(local_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            source: source.into(),
        }
    }

    pub fn is_relative(&self) -> bool {
        self.source.starts_with('.')
    }
}

/// How the children of a node were found, or why there are none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A module that renders its children with jsx, or a leaf.
    Component,
    /// A module whose default export wraps a single imported component.
    Container,
    /// The file is already being expanded further up the same branch.
    Cycle,
    /// No candidate file could be read.
    Unresolved,
}

/// A component in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// The local binding name used where the component is rendered.
    pub name: String,
    /// The raw import specifier, `None` for the root.
    pub declared_source: Option<String>,
    /// The specifier as displayed: a path relative to the working directory for
    /// project files, the raw specifier for third party modules.
    pub source: Option<String>,
    /// The file the node was read from, or the best guess if nothing was found.
    pub filename: PathBuf,
    pub depth: usize,
    pub children: Vec<Node>,
    pub hidden: bool,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, depth: usize) -> Node {
        Node {
            name: name.to_string(),
            declared_source: Some(format!("./{}", name)),
            source: Some(name.to_string()),
            filename: PathBuf::from(format!("{}.js", name)),
            depth,
            children: vec![],
            hidden: false,
            kind: NodeKind::Component,
        }
    }

    #[test]
    fn test_iter_is_depth_first_in_order() {
        let mut header = leaf("Header", 1);
        header.children.push(leaf("Logo", 2));
        let mut root = leaf("App", 0);
        root.children = vec![header, leaf("Footer", 1)];

        let names: Vec<&str> = root.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["App", "Header", "Logo", "Footer"]);
        assert_eq!(root.count(), 4);
        assert!(!root.is_leaf());
    }

    #[test]
    fn test_binding_is_relative() {
        assert!(ImportBinding::new("Foo", "./Foo").is_relative());
        assert!(ImportBinding::new("Foo", "../Foo").is_relative());
        assert!(!ImportBinding::new("Link", "react-router-dom").is_relative());
    }
}
