use oxc_ast::ast::{
    Argument, BindingPatternKind, CallExpression, Declaration, ExportDefaultDeclarationKind,
    Expression, Statement, VariableDeclaration,
};

use crate::ImportBinding;

/// The default export of a module, as far as unwrapping is concerned.
enum DefaultExport<'s, 'a> {
    /// `export default Container;`
    Identifier(&'s str),
    /// `export default connect(mapState)(Bar);`
    Call(&'s CallExpression<'a>),
}

/// Finds the single imported component a container module wraps.
///
/// Handles the higher-order component pattern where a module renders no jsx
/// itself and instead default-exports the result of wrapping an import:
///
/// ```js
/// import Bar from './Bar';
/// const BarContainer = connect(mapState)(Bar);
/// export default BarContainer;
/// ```
pub fn find_container_child(body: &[Statement], imports: &[ImportBinding]) -> Option<ImportBinding> {
    let call = match find_default_export(body)? {
        DefaultExport::Identifier(name) => find_call_initializer(body, name)?,
        DefaultExport::Call(call) => call,
    };

    let name = find_import_in_call_chain(call, imports)?;
    imports.iter().find(|import| import.local_name == name).cloned()
}

fn find_default_export<'s, 'a>(body: &'s [Statement<'a>]) -> Option<DefaultExport<'s, 'a>> {
    body.iter().find_map(|statement| {
        let Statement::ExportDefaultDeclaration(export) = statement else {
            return None;
        };

        match &export.declaration {
            ExportDefaultDeclarationKind::Identifier(ident) => {
                Some(DefaultExport::Identifier(ident.name.as_str()))
            }
            ExportDefaultDeclarationKind::CallExpression(call) => {
                Some(DefaultExport::Call(&**call))
            }
            ExportDefaultDeclarationKind::ParenthesizedExpression(paren) => {
                match strip_parentheses(&paren.expression) {
                    Expression::Identifier(ident) => {
                        Some(DefaultExport::Identifier(ident.name.as_str()))
                    }
                    Expression::CallExpression(call) => Some(DefaultExport::Call(&**call)),
                    _ => None,
                }
            }
            _ => None,
        }
    })
}

/// Finds `const <name> = <call>` at the top level, exported or not.
fn find_call_initializer<'s, 'a>(
    body: &'s [Statement<'a>],
    name: &str,
) -> Option<&'s CallExpression<'a>> {
    body.iter().find_map(|statement| match statement {
        Statement::VariableDeclaration(decl) => call_initializer(decl, name),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => call_initializer(decl, name),
            _ => None,
        },
        _ => None,
    })
}

fn call_initializer<'s, 'a>(
    decl: &'s VariableDeclaration<'a>,
    name: &str,
) -> Option<&'s CallExpression<'a>> {
    decl.declarations.iter().find_map(|declarator| {
        let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
            return None;
        };
        if ident.name.as_str() != name {
            return None;
        }

        match strip_parentheses(declarator.init.as_ref()?) {
            Expression::CallExpression(call) => Some(&**call),
            _ => None,
        }
    })
}

/// Searches the arguments of `call`, then those of its callee if the callee
/// is a call itself: `compose(a)(b)(Bar)` is searched from the outside in.
fn find_import_in_call_chain<'s>(
    call: &'s CallExpression,
    imports: &[ImportBinding],
) -> Option<&'s str> {
    let found = call.arguments.iter().find_map(|argument| match argument {
        Argument::Identifier(ident) => imports
            .iter()
            .any(|import| import.local_name == ident.name.as_str())
            .then(|| ident.name.as_str()),
        _ => None,
    });

    found.or_else(|| match strip_parentheses(&call.callee) {
        Expression::CallExpression(callee) => find_import_in_call_chain(callee, imports),
        _ => None,
    })
}

fn strip_parentheses<'s, 'a>(expression: &'s Expression<'a>) -> &'s Expression<'a> {
    match expression {
        Expression::ParenthesizedExpression(paren) => strip_parentheses(&paren.expression),
        _ => expression,
    }
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;
    use std::path::PathBuf;

    use super::*;
    use crate::{analyze::extract_imports, parse::parse_module};

    fn container_child_of(content: &str) -> Option<ImportBinding> {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, &PathBuf::from("Container.js"), content).unwrap();
        let imports = extract_imports(&program.body);

        find_container_child(&program.body, &imports)
    }

    #[test]
    fn test_connected_component_via_variable() {
        let child = container_child_of(
            r#"
            import { connect } from 'react-redux';
            import Bar from './Bar';

            const mapState = state => ({ items: state.items });
            const BarContainer = connect(mapState)(Bar);

            export default BarContainer;
        "#,
        );

        assert_eq!(child, Some(ImportBinding::new("Bar", "./Bar")));
    }

    #[test]
    fn test_connected_component_exported_directly() {
        let child = container_child_of(
            r#"
            import { connect } from 'react-redux';
            import Bar from './Bar';

            const mapState = state => state;
            export default connect(mapState)(Bar);
        "#,
        );

        assert_eq!(child, Some(ImportBinding::new("Bar", "./Bar")));
    }

    #[test]
    fn test_import_in_inner_call() {
        let child = container_child_of(
            r#"
            import { withStyles } from './styles';
            import Card from './Card';

            const Styled = withStyles(Card)({ padding: 4 });
            export default Styled;
        "#,
        );

        assert_eq!(child, Some(ImportBinding::new("Card", "./Card")));
    }

    #[test]
    fn test_outer_arguments_win() {
        let child = container_child_of(
            r#"
            import { compose } from 'redux';
            import withTracking from './withTracking';
            import List from './List';

            const Wrapped = compose(withTracking)(List);
            export default Wrapped;
        "#,
        );

        assert_eq!(child, Some(ImportBinding::new("List", "./List")));
    }

    #[test]
    fn test_exported_variable_declaration() {
        let child = container_child_of(
            r#"
            import { observer } from 'mobx-react';
            import Profile from './Profile';

            export const ProfileContainer = observer(Profile);
            export default ProfileContainer;
        "#,
        );

        assert_eq!(child, Some(ImportBinding::new("Profile", "./Profile")));
    }

    #[test]
    fn test_no_default_export() {
        let child = container_child_of(
            r#"
            import { connect } from 'react-redux';
            import Bar from './Bar';

            export const BarContainer = connect()(Bar);
        "#,
        );

        assert_eq!(child, None);
    }

    #[test]
    fn test_default_export_not_a_call() {
        let child = container_child_of(
            r#"
            import Bar from './Bar';

            const Alias = Bar;
            export default Alias;
        "#,
        );

        assert_eq!(child, None);
    }

    #[test]
    fn test_no_import_in_chain() {
        let child = container_child_of(
            r#"
            import { connect } from 'react-redux';

            function Local() { return null; }
            export default connect()(Local);
        "#,
        );

        assert_eq!(child, None);
    }
}
