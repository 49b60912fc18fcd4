use std::path::Path;

use itertools::Itertools;
use miette::NamedSource;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::TreeError;

/// Picks the source type for a module.
///
/// Typescript files keep their own flavour. Everything else is parsed as jsx
/// with typescript syntax enabled. Flow annotations that are also valid
/// typescript, like `props: Props`, parse; flow-only syntax such as exact
/// object types (`{| name: string |}`) does not.
fn source_type_for(path: &Path) -> SourceType {
    let is_typescript = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| matches!(ext, "ts" | "tsx" | "mts" | "cts"));

    if is_typescript {
        if let Ok(source_type) = SourceType::from_path(path) {
            return source_type;
        }
    }

    SourceType::default().with_typescript(true).with_jsx(true)
}

/// parse a module with oxc
///
/// Any syntax error fails the whole module, the partially recovered program
/// oxc returns alongside errors is never used.
pub fn parse_module<'a>(
    allocator: &'a Allocator,
    file_path: &Path,
    file_content: &'a str,
) -> Result<Program<'a>, TreeError> {
    let parser_ret = Parser::new(allocator, file_content, source_type_for(file_path)).parse();

    if parser_ret.panicked || !parser_ret.errors.is_empty() {
        let named_source = NamedSource::new(
            file_path.to_string_lossy().to_string(),
            file_content.to_string(),
        );
        let message = parser_ret
            .errors
            .into_iter()
            .map(|error| format!("{:?}", error.with_source_code(named_source.clone())))
            .join("\n");

        return Err(TreeError::Parse {
            path: file_path.to_path_buf(),
            message,
        });
    }

    Ok(parser_ret.program)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_jsx() {
        let allocator = Allocator::default();
        let file_path = PathBuf::from("App.js");
        let file_content = "import React from 'react'; const App = () => <div>Hello, world!</div>;";
        let result = parse_module(&allocator, &file_path, file_content);

        assert!(result.is_ok());
        assert_eq!(result.unwrap().body.len(), 2);
    }

    #[test]
    fn test_parse_flow_style_annotations() {
        let allocator = Allocator::default();
        let file_path = PathBuf::from("Button.jsx");
        let file_content = "function Button(props: Props): Node { return <button />; }";

        assert!(parse_module(&allocator, &file_path, file_content).is_ok());
    }

    #[test]
    fn test_flow_exact_object_type_is_rejected() {
        let allocator = Allocator::default();
        let file_path = PathBuf::from("Button.js");
        let file_content = "type Props = {| name: string |};";

        assert!(parse_module(&allocator, &file_path, file_content).is_err());
    }

    #[test]
    fn test_parse_error_keeps_path() {
        let allocator = Allocator::default();
        let file_path = PathBuf::from("src/Broken.js");
        let file_content = "const = <div>;";

        let error = parse_module(&allocator, &file_path, file_content).unwrap_err();

        match error {
            TreeError::Parse { path, message } => {
                assert_eq!(path, file_path);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
