use oxc_ast::{
    ast::{
        JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXElementName, JSXExpression,
        JSXMemberExpression, JSXMemberExpressionObject, JSXOpeningElement, Program,
    },
    visit::walk,
    Visit,
};

use crate::ImportBinding;

/// Name of the attribute router libraries use to pass a component along,
/// e.g. `<Route component={Dashboard} />`.
const COMPONENT_ATTRIBUTE: &str = "component";

/// A module is treated as rendering jsx only when it imports `React`.
pub fn imports_react(imports: &[ImportBinding]) -> bool {
    imports.iter().any(|import| import.local_name == "React")
}

/// Finds the imports that are rendered as jsx elements or handed to a
/// `component` attribute, deduplicated in order of first use.
///
/// Returns nothing for modules without a `React` import.
pub fn find_child_components(program: &Program, imports: &[ImportBinding]) -> Vec<ImportBinding> {
    if !imports_react(imports) {
        return vec![];
    }

    let mut visitor = ChildUsageVisitor {
        imports,
        found: Vec::new(),
    };
    visitor.visit_program(program);

    visitor.found
}

struct ChildUsageVisitor<'b> {
    imports: &'b [ImportBinding],
    found: Vec<ImportBinding>,
}

impl<'b> ChildUsageVisitor<'b> {
    fn record(&mut self, name: &str) {
        let Some(import) = self.imports.iter().find(|i| i.local_name == name) else {
            return;
        };

        if !self.found.contains(import) {
            self.found.push(import.clone());
        }
    }
}

/// `<Icons.Close />` is a use of `Icons`.
fn member_root<'s>(member: &'s JSXMemberExpression) -> Option<&'s str> {
    match &member.object {
        JSXMemberExpressionObject::IdentifierReference(ident) => Some(ident.name.as_str()),
        JSXMemberExpressionObject::MemberExpression(inner) => member_root(inner),
        JSXMemberExpressionObject::ThisExpression(_) => None,
    }
}

impl<'a, 'b> Visit<'a> for ChildUsageVisitor<'b> {
    fn visit_jsx_opening_element(&mut self, element: &JSXOpeningElement<'a>) {
        let tag = match &element.name {
            JSXElementName::IdentifierReference(ident) => Some(ident.name.as_str()),
            JSXElementName::Identifier(ident) => Some(ident.name.as_str()),
            JSXElementName::MemberExpression(member) => member_root(member),
            _ => None,
        };

        if let Some(tag) = tag {
            self.record(tag);
        }

        walk::walk_jsx_opening_element(self, element);
    }

    fn visit_jsx_attribute_item(&mut self, item: &JSXAttributeItem<'a>) {
        if let JSXAttributeItem::Attribute(attribute) = item {
            let is_component_attribute = matches!(
                &attribute.name,
                JSXAttributeName::Identifier(name) if name.name.as_str() == COMPONENT_ATTRIBUTE
            );

            if is_component_attribute {
                if let Some(JSXAttributeValue::ExpressionContainer(container)) = &attribute.value {
                    if let JSXExpression::Identifier(ident) = &container.expression {
                        self.record(ident.name.as_str());
                    }
                }
            }
        }

        walk::walk_jsx_attribute_item(self, item);
    }
}
