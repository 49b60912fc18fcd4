mod alias;
mod analyze;
mod config;
mod error;
mod locate;
mod node;
mod parse;
mod print;
mod tree;
mod util;

pub use alias::AliasTable;
pub use analyze::{analyze_module, ModuleChildren};
pub use config::{load_alias_config, BuildOptions};
pub use error::{ConfigError, TreeError};
pub use locate::{expand_candidates, LocatedModule, ModuleLocator};
pub use node::{ImportBinding, Node, NodeKind};
pub use parse::parse_module;
pub use print::{node_label, render_tree, to_display_tree, DisplayNode, PrintOptions};
pub use tree::{ComponentTree, TreeBuilder};
