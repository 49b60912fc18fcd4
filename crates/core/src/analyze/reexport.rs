use oxc_ast::ast::{ModuleExportName, Statement};

use super::extract_imports;

fn export_name<'s>(name: &'s ModuleExportName) -> &'s str {
    match name {
        ModuleExportName::IdentifierName(identifier_name) => identifier_name.name.as_str(),
        ModuleExportName::IdentifierReference(identifier_reference) => {
            identifier_reference.name.as_str()
        }
        ModuleExportName::StringLiteral(string_literal) => string_literal.value.as_str(),
    }
}

/// Finds where an index file gets `component_name` from.
///
/// Direct re-exports (`export { Button } from './Button'`, including
/// `export { default as Button } from './Button'`) are preferred over an
/// import of the same name that is exported further down.
pub fn find_reexport_source(body: &[Statement], component_name: &str) -> Option<String> {
    let reexported = body.iter().find_map(|statement| {
        let Statement::ExportNamedDeclaration(export) = statement else {
            return None;
        };
        let source = export.source.as_ref()?;

        export
            .specifiers
            .iter()
            .any(|specifier| export_name(&specifier.exported) == component_name)
            .then(|| source.value.to_string())
    });

    reexported.or_else(|| {
        extract_imports(body)
            .into_iter()
            .find(|import| import.local_name == component_name)
            .map(|import| import.source)
    })
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;
    use std::path::PathBuf;

    use super::*;
    use crate::parse::parse_module;

    fn source_of(content: &str, name: &str) -> Option<String> {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, &PathBuf::from("index.js"), content).unwrap();

        find_reexport_source(&program.body, name)
    }

    #[test]
    fn test_direct_reexport() {
        let content = r#"
            export { Input, Select } from './Input';
            export { Button } from './Button';
        "#;

        assert_eq!(source_of(content, "Button"), Some("./Button".to_string()));
        assert_eq!(source_of(content, "Select"), Some("./Input".to_string()));
    }

    #[test]
    fn test_default_as_reexport() {
        let content = "export { default as Modal } from './Modal';";

        assert_eq!(source_of(content, "Modal"), Some("./Modal".to_string()));
    }

    #[test]
    fn test_import_then_export() {
        let content = r#"
            import Card from './Card';
            import Avatar from './Avatar';

            export { Card, Avatar };
        "#;

        assert_eq!(source_of(content, "Avatar"), Some("./Avatar".to_string()));
    }

    #[test]
    fn test_unknown_name() {
        let content = "export { Button } from './Button';";

        assert_eq!(source_of(content, "Card"), None);
    }
}
