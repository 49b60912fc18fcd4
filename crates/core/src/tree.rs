use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use rch_logger::Logger;

use crate::{
    analyze::{analyze_module, ModuleChildren},
    config::BuildOptions,
    locate::{LocatedModule, ModuleLocator},
    parse::parse_module,
    util::{absolutize, component_name_from_path, normalize_path, relative_to},
    ImportBinding, Node, NodeKind, TreeError,
};

/// The result of a build.
#[derive(Debug)]
pub struct ComponentTree {
    pub root: Node,
    /// Subtrees that could not be expanded. The nodes themselves are still
    /// part of the tree, as leaves.
    pub errors: Vec<TreeError>,
}

impl ComponentTree {
    /// True when the root renders nothing that was found.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

/// A node whose file has not been located yet.
struct PendingNode {
    name: String,
    declared_source: Option<String>,
    source: Option<String>,
    filename: PathBuf,
    depth: usize,
}

impl PendingNode {
    fn finish(self, filename: PathBuf, children: Vec<Node>, kind: NodeKind, hidden: bool) -> Node {
        Node {
            name: self.name,
            declared_source: self.declared_source,
            source: self.source,
            filename,
            depth: self.depth,
            children,
            hidden,
            kind,
        }
    }
}

/// State threaded through one build.
struct Walk {
    /// Resolved files on the current branch, root first.
    ancestors: Vec<PathBuf>,
    errors: Vec<TreeError>,
}

/// Walks the component hierarchy from a root file.
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds the tree below `root_path`, relative paths being taken from the
    /// base directory.
    pub fn build(&self, root_path: &Path) -> ComponentTree {
        let filename = absolutize(&self.options.base_dir, root_path);
        let root = PendingNode {
            name: component_name_from_path(&filename),
            declared_source: None,
            source: None,
            filename,
            depth: 0,
        };

        Logger::debug(&format!("Building tree from {}", root.filename.display()), 1);

        let mut walk = Walk {
            ancestors: Vec::new(),
            errors: Vec::new(),
        };
        let root = self.build_node(root, None, &mut walk);

        Logger::debug(&format!("Built tree with {} nodes", root.count()), 1);

        ComponentTree {
            root,
            errors: walk.errors,
        }
    }

    fn build_node(&self, pending: PendingNode, parent_dir: Option<&Path>, walk: &mut Walk) -> Node {
        let locator = ModuleLocator::new(&self.options);
        let candidates = locator.candidates(
            pending.declared_source.as_deref(),
            &pending.filename,
            parent_dir,
        );

        let located = match locator.locate(&pending.name, &candidates) {
            Ok(located) => located,
            Err(e) => {
                walk.errors.push(e);
                None
            }
        };

        let Some(LocatedModule { path, content }) = located else {
            Logger::debug(
                &format!(
                    "Could not resolve {} from {}",
                    pending.name,
                    pending.declared_source.as_deref().unwrap_or("root")
                ),
                2,
            );
            let filename = pending.filename.clone();
            return pending.finish(
                filename,
                vec![],
                NodeKind::Unresolved,
                self.options.hide_third_party,
            );
        };

        Logger::debug(&format!("Resolved {} to {}", pending.name, path.display()), 1);

        if walk.ancestors.contains(&path) {
            Logger::debug(&format!("{} is already being expanded", path.display()), 1);
            return pending.finish(path, vec![], NodeKind::Cycle, false);
        }

        if pending.depth >= self.options.scan_depth {
            return pending.finish(path, vec![], NodeKind::Component, false);
        }

        let module_children = {
            let allocator = Allocator::default();
            match parse_module(&allocator, &path, &content) {
                Ok(program) => analyze_module(&program),
                Err(e) => {
                    walk.errors.push(e);
                    return pending.finish(path, vec![], NodeKind::Component, false);
                }
            }
        };

        let kind = match module_children {
            ModuleChildren::Wrapped(_) => NodeKind::Container,
            _ => NodeKind::Component,
        };

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let depth = pending.depth + 1;

        walk.ancestors.push(path.clone());
        let children = module_children
            .into_bindings()
            .into_iter()
            .map(|binding| {
                let child = self.pending_child(binding, &dir, depth);
                self.build_node(child, Some(&dir), walk)
            })
            .collect();
        walk.ancestors.pop();

        pending.finish(path, children, kind, false)
    }

    /// The best-effort filename and display source of a child, before any
    /// file is probed.
    fn pending_child(&self, binding: ImportBinding, dir: &Path, depth: usize) -> PendingNode {
        let (filename, source) = if binding.is_relative() {
            let filename = normalize_path(&dir.join(&binding.source));
            let source = relative_to(&filename, &self.options.base_dir);
            (filename, source)
        } else if !self.options.alias.is_empty() {
            let aliased = self.options.alias.resolve(&binding.source);
            let filename = absolutize(&self.options.base_dir, Path::new(&aliased));
            let source = relative_to(&filename, &self.options.base_dir);
            (filename, source)
        } else {
            (dir.join(&binding.source), binding.source.clone())
        };

        PendingNode {
            name: binding.local_name,
            declared_source: Some(binding.source),
            source: Some(source),
            filename,
            depth,
        }
    }
}
