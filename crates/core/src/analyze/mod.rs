mod children;
mod container;
mod imports;
mod reexport;

pub use children::{find_child_components, imports_react};
pub use container::find_container_child;
pub use imports::extract_imports;
pub use reexport::find_reexport_source;

use oxc_ast::ast::Program;

use crate::ImportBinding;

/// What a parsed module renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleChildren {
    /// Imports rendered through jsx, possibly none.
    Rendered(Vec<ImportBinding>),
    /// The one import a container module wraps.
    Wrapped(ImportBinding),
    /// Neither jsx nor a recognizable wrapped export.
    None,
}

impl ModuleChildren {
    pub fn into_bindings(self) -> Vec<ImportBinding> {
        match self {
            ModuleChildren::Rendered(bindings) => bindings,
            ModuleChildren::Wrapped(binding) => vec![binding],
            ModuleChildren::None => vec![],
        }
    }
}

/// Classifies a module and finds its child components.
///
/// A module importing `React` is searched for jsx usage only; any other
/// module is searched for a wrapped default export only.
pub fn analyze_module(program: &Program) -> ModuleChildren {
    let imports = extract_imports(&program.body);

    if imports_react(&imports) {
        return ModuleChildren::Rendered(find_child_components(program, &imports));
    }

    match find_container_child(&program.body, &imports) {
        Some(binding) => ModuleChildren::Wrapped(binding),
        None => ModuleChildren::None,
    }
}
