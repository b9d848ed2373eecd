//! Built-in attribute modifiers

use super::transform::{AttributeTransform, Transform, TransformRegistry};
use crate::ast::{Attribute, Expression, Literal, Node, Tag};
use crate::context::CompileContext;
use crate::error::Result;

/// Binding of the owning component instance in emitted code.
const COMPONENT_BINDING: &str = "component";

pub(crate) fn register_builtin(registry: &mut TransformRegistry) {
    registry
        .register_modifier("scoped", AttributeTransform::enter(scoped))
        .register_modifier("no-update", AttributeTransform::enter(no_update));
}

/// `for:scoped="name"` resolves the id against the owning component:
/// `component.elId("name")`.
fn scoped(_: &mut Tag, attr: &mut Attribute, _: &mut CompileContext) -> Result<Transform> {
    let value = std::mem::replace(&mut attr.value, Node::Literal(Literal::undefined()));
    let span = value.source_span().cloned();
    let mut scoped = Expression::call(
        Expression::member(Expression::identifier(COMPONENT_BINDING), "elId"),
        vec![value],
    );
    scoped.source_span = span;

    Ok(Transform::Replaced(Attribute {
        name: attr.name.clone(),
        value: Node::Expression(scoped),
        arguments: attr.arguments.take(),
        modifier: None,
        source_span: attr.source_span.clone(),
    }))
}

/// `value:no-update=x` keeps the rendered attribute untouched on re-render.
fn no_update(tag: &mut Tag, attr: &mut Attribute, _: &mut CompileContext) -> Result<Transform> {
    if !tag.preserved_attributes.contains(&attr.name) {
        tag.preserved_attributes.push(attr.name.clone());
    }

    Ok(Transform::Replaced(Attribute {
        modifier: None,
        ..attr.clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;

    #[test]
    fn test_scoped_wraps_value() {
        let mut ctx = CompileContext::new(CompilerConfig::default());
        let mut attr = Attribute::new("for", Literal::new("name")).with_modifier("scoped");
        let Transform::Replaced(attr) = scoped(&mut Tag::new("label"), &mut attr, &mut ctx).unwrap()
        else {
            panic!("expected a replacement");
        };
        assert_eq!(attr.modifier, None);
        assert_eq!(attr.value.to_string(), "component.elId(\"name\")");
    }

    #[test]
    fn test_no_update_records_attribute() {
        let mut ctx = CompileContext::new(CompilerConfig::default());
        let mut tag = Tag::new("input");
        let mut attr =
            Attribute::new("value", Expression::identifier("input.value")).with_modifier("no-update");
        let result = no_update(&mut tag, &mut attr, &mut ctx).unwrap();
        assert!(matches!(result, Transform::Replaced(ref a) if a.modifier.is_none()));
        assert_eq!(tag.preserved_attributes, vec!["value".to_string()]);
    }
}
