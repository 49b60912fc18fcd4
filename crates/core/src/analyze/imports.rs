use std::path::Path;

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Statement};

use crate::ImportBinding;

const STYLESHEET_EXTENSIONS: [&str; 5] = ["css", "scss", "sass", "less", "styl"];

fn is_stylesheet(source: &str) -> bool {
    Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| STYLESHEET_EXTENSIONS.contains(&ext))
}

/// Collects the bindings of every top-level import, in statement order.
///
/// Stylesheet imports and type-only imports are skipped since they can never
/// be rendered. Duplicate local names are kept.
pub fn extract_imports(body: &[Statement]) -> Vec<ImportBinding> {
    body.iter()
        .filter_map(|statement| match statement {
            Statement::ImportDeclaration(decl) => Some(decl),
            _ => None,
        })
        .flat_map(|decl| import_bindings(decl))
        .collect()
}

fn import_bindings(decl: &ImportDeclaration) -> Vec<ImportBinding> {
    let source = decl.source.value.as_str();

    if decl.import_kind.is_type() || is_stylesheet(source) {
        return vec![];
    }

    let Some(specifiers) = &decl.specifiers else {
        return vec![];
    };

    specifiers
        .iter()
        .filter_map(|specifier| {
            let local = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(specifier) => {
                    if specifier.import_kind.is_type() {
                        return None;
                    }
                    &specifier.local
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(specifier) => &specifier.local,
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(specifier) => {
                    &specifier.local
                }
            };

            Some(ImportBinding::new(local.name.as_str(), source))
        })
        .collect()
}
