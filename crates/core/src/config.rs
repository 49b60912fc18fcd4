// Handles the build options and the alias configuration file

use std::{
    fs,
    path::{Path, PathBuf},
};

use oxc_allocator::Allocator;
use oxc_ast::{
    ast::{Argument, Expression, ObjectExpression, ObjectPropertyKind, PropertyKey},
    visit::walk,
    Visit,
};
use rch_logger::Logger;
use serde_json::Value;

use crate::{parse::parse_module, util::normalize_path, AliasTable, ConfigError};

/// Everything the tree builder needs besides the root file.
///
/// Shared read-only by every node of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Nodes at this depth or deeper are not parsed. Always at least 1.
    pub scan_depth: usize,
    /// Mark nodes whose file could not be found as hidden.
    pub hide_third_party: bool,
    /// Secondary directory to look for modules in, e.g. `src`.
    pub module_dir: Option<PathBuf>,
    pub alias: AliasTable,
    /// Directory relative alias targets, the module directory and display
    /// sources are resolved against. Usually the working directory.
    pub base_dir: PathBuf,
}

impl BuildOptions {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            scan_depth: usize::MAX,
            hide_third_party: false,
            module_dir: None,
            alias: AliasTable::new(),
            base_dir,
        }
    }

    pub fn with_scan_depth(mut self, scan_depth: usize) -> Self {
        self.scan_depth = scan_depth.max(1);
        self
    }

    pub fn with_hide_third_party(mut self, hide_third_party: bool) -> Self {
        self.hide_third_party = hide_third_party;
        self
    }

    pub fn with_module_dir(mut self, module_dir: PathBuf) -> Self {
        self.module_dir = Some(module_dir);
        self
    }

    pub fn with_alias(mut self, alias: AliasTable) -> Self {
        self.alias = alias;
        self
    }
}

/// Reads the `resolve.alias` section of a bundler configuration.
///
/// Json (with comments) is read as is. Javascript configurations are never
/// executed: the `resolve.alias` object literal is read statically, see
/// `alias_value`.
pub fn load_alias_config(path: &Path) -> Result<AliasTable, ConfigError> {
    let content = fs::read_to_string(path)?;

    let alias = if is_script(path) {
        read_script_config(path, &content)?
    } else {
        read_json_config(path, &content)?
    };

    Logger::debug(
        &format!("Loaded {} aliases from {}", alias.len(), path.display()),
        1,
    );

    Ok(alias)
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| matches!(ext, "js" | "cjs" | "mjs" | "ts"))
}

fn read_json_config(path: &Path, content: &str) -> Result<AliasTable, ConfigError> {
    let value = jsonc_parser::parse_to_serde_value(content, &Default::default())?
        .ok_or_else(|| ConfigError::MissingAlias(path.to_path_buf()))?;

    let entries = value
        .get("resolve")
        .and_then(|resolve| resolve.get("alias"))
        .and_then(Value::as_object)
        .ok_or_else(|| ConfigError::MissingAlias(path.to_path_buf()))?;

    Ok(entries
        .iter()
        .filter_map(|(segment, replacement)| {
            replacement
                .as_str()
                .map(|replacement| (segment.clone(), replacement.to_string()))
        })
        .collect())
}

fn read_script_config(path: &Path, content: &str) -> Result<AliasTable, ConfigError> {
    let allocator = Allocator::default();
    let program =
        parse_module(&allocator, path, content).map_err(|e| ConfigError::Script(e.to_string()))?;

    let config_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut visitor = AliasVisitor {
        config_dir,
        alias: None,
    };
    visitor.visit_program(&program);

    visitor
        .alias
        .ok_or_else(|| ConfigError::MissingAlias(path.to_path_buf()))
}

/// Finds the first `resolve: { alias: { ... } }` object literal.
struct AliasVisitor {
    config_dir: PathBuf,
    alias: Option<AliasTable>,
}

impl<'a> Visit<'a> for AliasVisitor {
    fn visit_object_expression(&mut self, object: &ObjectExpression<'a>) {
        if self.alias.is_some() {
            return;
        }

        let alias_object = find_property(object, "resolve")
            .and_then(as_object)
            .and_then(|resolve| find_property(resolve, "alias"))
            .and_then(as_object);

        if let Some(alias_object) = alias_object {
            let mut table = AliasTable::new();
            for property in &alias_object.properties {
                let ObjectPropertyKind::ObjectProperty(property) = property else {
                    continue;
                };
                let Some(segment) = property_key_name(&property.key) else {
                    continue;
                };
                match alias_value(&property.value, &self.config_dir) {
                    Some(replacement) => table.insert(segment, replacement),
                    None => Logger::debug(
                        &format!("Skipping alias {} with a computed value", segment),
                        1,
                    ),
                }
            }
            self.alias = Some(table);
            return;
        }

        walk::walk_object_expression(self, object);
    }
}

fn find_property<'s, 'a>(
    object: &'s ObjectExpression<'a>,
    name: &str,
) -> Option<&'s Expression<'a>> {
    object.properties.iter().find_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(property)
            if property_key_name(&property.key).as_deref() == Some(name) =>
        {
            Some(&property.value)
        }
        _ => None,
    })
}

fn as_object<'s, 'a>(expression: &'s Expression<'a>) -> Option<&'s ObjectExpression<'a>> {
    match expression {
        Expression::ObjectExpression(object) => Some(&**object),
        Expression::ParenthesizedExpression(paren) => as_object(&paren.expression),
        _ => None,
    }
}

fn property_key_name(key: &PropertyKey) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.to_string()),
        _ => None,
    }
}

/// Evaluates the alias values that can be known without running the config:
/// string literals, template literals without expressions and
/// `path.resolve(...)` / `path.join(...)` over `__dirname` and strings.
fn alias_value(expression: &Expression, config_dir: &Path) -> Option<String> {
    match expression {
        Expression::StringLiteral(literal) => Some(literal.value.to_string()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| cooked.to_string()),
        Expression::CallExpression(call) if is_path_join(&call.callee) => {
            let mut joined = PathBuf::new();
            for argument in &call.arguments {
                match argument {
                    Argument::Identifier(ident) if ident.name.as_str() == "__dirname" => {
                        joined.push(config_dir)
                    }
                    Argument::StringLiteral(literal) => joined.push(literal.value.as_str()),
                    _ => return None,
                }
            }
            Some(normalize_path(&joined).to_string_lossy().to_string())
        }
        Expression::ParenthesizedExpression(paren) => alias_value(&paren.expression, config_dir),
        _ => None,
    }
}

fn is_path_join(callee: &Expression) -> bool {
    match callee {
        Expression::StaticMemberExpression(member) => {
            matches!(&member.object, Expression::Identifier(object) if object.name.as_str() == "path")
                && matches!(member.property.name.as_str(), "resolve" | "join")
        }
        Expression::Identifier(ident) => matches!(ident.name.as_str(), "resolve" | "join"),
        _ => false,
    }
}
