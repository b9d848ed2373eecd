//! Built-in directives
//!
//! `no-update*` mark a tag (or its body) as preserved across re-renders.
//! `class` and `style` normalize their values: literal lists and maps are
//! flattened at compile time, anything else goes through a runtime helper.

use super::transform::{AttributeTransform, Transform, TransformRegistry};
use crate::ast::{Attribute, Expression, Literal, LiteralValue, Node, Tag, TagFlags};
use crate::context::CompileContext;
use crate::error::{CompileError, Result};

const CLASS_HELPER: &str = "class_value";
const STYLE_HELPER: &str = "style_value";

pub(crate) fn register_builtin(registry: &mut TransformRegistry) {
    registry
        .register_directive("no-update", AttributeTransform::enter(no_update))
        .register_directive("no-update-body", AttributeTransform::enter(no_update_body))
        .register_directive("no-update-if", AttributeTransform::enter(no_update_if))
        .register_directive("no-update-body-if", AttributeTransform::enter(no_update_body_if))
        .register_directive("class", AttributeTransform::exit(class))
        .register_directive("style", AttributeTransform::exit(style));
}

fn invalid(attr: &Attribute, reason: &str) -> CompileError {
    CompileError::InvalidDirective {
        name: attr.name.clone(),
        reason: reason.to_string(),
        span: attr.source_span.clone(),
    }
}

fn preserve(tag: &mut Tag, attr: &Attribute, flag: TagFlags) -> Result<Transform> {
    if attr.arguments.as_ref().is_some_and(|args| !args.is_empty()) {
        return Err(invalid(attr, "does not accept arguments"));
    }
    if !attr.value.is_true() {
        return Err(invalid(attr, "does not accept a value"));
    }
    tag.flags |= flag;
    Ok(Transform::Removed)
}

fn preserve_if(tag: &mut Tag, attr: &mut Attribute, flag: TagFlags) -> Result<Transform> {
    let condition = match attr.arguments.take() {
        Some(mut args) if args.len() == 1 => args.remove(0),
        _ => return Err(invalid(attr, "requires exactly one argument")),
    };
    tag.flags |= flag | TagFlags::PRESERVE_IF;
    tag.preserve_condition = Some(Box::new(condition));
    Ok(Transform::Removed)
}

fn no_update(tag: &mut Tag, attr: &mut Attribute, _: &mut CompileContext) -> Result<Transform> {
    preserve(tag, attr, TagFlags::PRESERVE)
}

fn no_update_body(
    tag: &mut Tag,
    attr: &mut Attribute,
    _: &mut CompileContext,
) -> Result<Transform> {
    preserve(tag, attr, TagFlags::PRESERVE_BODY)
}

fn no_update_if(tag: &mut Tag, attr: &mut Attribute, _: &mut CompileContext) -> Result<Transform> {
    preserve_if(tag, attr, TagFlags::PRESERVE)
}

fn no_update_body_if(
    tag: &mut Tag,
    attr: &mut Attribute,
    _: &mut CompileContext,
) -> Result<Transform> {
    preserve_if(tag, attr, TagFlags::PRESERVE_BODY)
}

fn class(_: &mut Tag, attr: &mut Attribute, ctx: &mut CompileContext) -> Result<Transform> {
    normalize_value(attr, ctx, CLASS_HELPER, class_text)
}

fn style(_: &mut Tag, attr: &mut Attribute, ctx: &mut CompileContext) -> Result<Transform> {
    normalize_value(attr, ctx, STYLE_HELPER, style_text)
}

/// Flatten a literal value with `flatten`, or wrap a dynamic one in a call
/// to the runtime helper. A value that flattens to nothing drops the
/// attribute.
fn normalize_value(
    attr: &mut Attribute,
    ctx: &mut CompileContext,
    helper: &str,
    flatten: fn(&LiteralValue) -> Option<String>,
) -> Result<Transform> {
    if attr.arguments.is_some() {
        return Ok(Transform::Unchanged);
    }

    if let Node::Literal(literal) = &attr.value {
        if let LiteralValue::String(_) = literal.value {
            return Ok(Transform::Unchanged);
        }
        if let Some(text) = flatten(&literal.value) {
            if text.is_empty() {
                return Ok(Transform::Removed);
            }
            let span = literal.source_span.clone();
            attr.value = Node::Literal(Literal {
                value: LiteralValue::String(text),
                source_span: span,
            });
            return Ok(Transform::Unchanged);
        }
    }

    let value = std::mem::replace(&mut attr.value, Node::Literal(Literal::undefined()));
    let span = value.source_span().cloned();
    let mut call = Expression::call(Expression::identifier(ctx.helper(helper)), vec![value]);
    call.source_span = span;
    attr.value = Node::Expression(call);
    Ok(Transform::Unchanged)
}

/// Compile-time class list: strings are kept, arrays are flattened and maps
/// contribute the keys whose values are truthy. `None` when part of the
/// value is only known at runtime.
fn class_text(value: &LiteralValue) -> Option<String> {
    let mut names = Vec::new();
    collect_classes(value, &mut names)?;
    Some(names.join(" "))
}

fn collect_classes(value: &LiteralValue, names: &mut Vec<String>) -> Option<()> {
    match value {
        LiteralValue::String(s) => {
            if !s.is_empty() {
                names.push(s.clone());
            }
        }
        LiteralValue::Array(items) => {
            for item in items {
                collect_classes(item.as_literal()?, names)?;
            }
        }
        LiteralValue::Object(fields) => {
            for (key, field) in fields {
                if field.as_literal()?.truthiness()? {
                    names.push(key.clone());
                }
            }
        }
        LiteralValue::Undefined | LiteralValue::Null | LiteralValue::Bool(_) => {}
        LiteralValue::Number(_) | LiteralValue::RegExp(_) => return None,
    }
    Some(())
}

/// Compile-time style declarations: maps become `key:value;` pairs with
/// camel-case keys dasherized, skipping empty values.
fn style_text(value: &LiteralValue) -> Option<String> {
    match value {
        LiteralValue::String(s) => Some(s.clone()),
        LiteralValue::Undefined | LiteralValue::Null | LiteralValue::Bool(false) => {
            Some(String::new())
        }
        LiteralValue::Object(fields) => {
            let mut out = String::new();
            for (key, field) in fields {
                let field = field.as_literal()?;
                let text = match field {
                    LiteralValue::Undefined | LiteralValue::Null | LiteralValue::Bool(false) => {
                        continue
                    }
                    LiteralValue::Number(n) if *n != 0.0 && !key_is_unitless(key) => {
                        format!("{}px", field.text_value()?)
                    }
                    other => other.text_value()?,
                };
                if text.is_empty() {
                    continue;
                }
                out.push_str(&dasherize(key));
                out.push(':');
                out.push_str(&text);
                out.push(';');
            }
            Some(out)
        }
        LiteralValue::Array(items) => {
            let mut out = String::new();
            for item in items {
                out.push_str(&style_text(item.as_literal()?)?);
            }
            Some(out)
        }
        LiteralValue::Bool(true) | LiteralValue::Number(_) | LiteralValue::RegExp(_) => None,
    }
}

fn key_is_unitless(key: &str) -> bool {
    matches!(
        key,
        "opacity" | "zIndex" | "z-index" | "fontWeight" | "font-weight" | "lineHeight"
            | "line-height" | "flex" | "flexGrow" | "flex-grow" | "flexShrink" | "flex-shrink"
            | "order" | "zoom"
    )
}

/// `backgroundColor` -> `background-color`. Keys already containing a dash
/// are custom properties or already dasherized.
fn dasherize(key: &str) -> String {
    if key.contains('-') {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use indexmap::IndexMap;
    use serde_json::json;

    fn ctx() -> CompileContext {
        CompileContext::new(CompilerConfig::default())
    }

    #[test]
    fn test_no_update_sets_flag() {
        let mut tag = Tag::new("div");
        let mut attr = Attribute::flag("no-update");
        let result = no_update(&mut tag, &mut attr, &mut ctx()).unwrap();
        assert_eq!(result, Transform::Removed);
        assert!(tag.flags.contains(TagFlags::PRESERVE));
    }

    #[test]
    fn test_no_update_rejects_arguments() {
        let mut tag = Tag::new("div");
        let mut attr =
            Attribute::flag("no-update").with_arguments(vec![Node::from(Expression::identifier("x"))]);
        let err = no_update(&mut tag, &mut attr, &mut ctx()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The \"no-update\" directive does not accept arguments."
        );
    }

    #[test]
    fn test_no_update_body_if_stores_condition() {
        let mut tag = Tag::new("div");
        let mut attr = Attribute::flag("no-update-body-if")
            .with_arguments(vec![Node::from(Expression::identifier("ready"))]);
        let result = no_update_body_if(&mut tag, &mut attr, &mut ctx()).unwrap();
        assert_eq!(result, Transform::Removed);
        assert!(tag.flags.contains(TagFlags::PRESERVE_BODY | TagFlags::PRESERVE_IF));
        assert_eq!(tag.preserve_condition.unwrap().to_string(), "ready");
    }

    #[test]
    fn test_no_update_if_requires_one_argument() {
        let mut tag = Tag::new("div");
        let mut attr = Attribute::flag("no-update-if").with_arguments(vec![]);
        assert!(no_update_if(&mut tag, &mut attr, &mut ctx()).is_err());
    }

    #[test]
    fn test_class_literal_is_flattened() {
        let mut attr = Attribute::new(
            "class",
            Literal::new(json!(["a", { "b": true, "c": false }, null])),
        );
        let result = class(&mut Tag::new("div"), &mut attr, &mut ctx()).unwrap();
        assert_eq!(result, Transform::Unchanged);
        assert_eq!(attr.value.to_string(), "\"a b\"");
    }

    #[test]
    fn test_class_dynamic_uses_helper() {
        let mut ctx = ctx();
        let mut attr = Attribute::new("class", Expression::identifier("input.classes"));
        class(&mut Tag::new("div"), &mut attr, &mut ctx).unwrap();
        assert_eq!(attr.value.to_string(), "rt_class_value(input.classes)");
    }

    #[test]
    fn test_class_empty_is_removed() {
        let mut attr = Attribute::new("class", Literal::new(json!({ "hidden": false })));
        let result = class(&mut Tag::new("div"), &mut attr, &mut ctx()).unwrap();
        assert_eq!(result, Transform::Removed);
    }

    #[test]
    fn test_style_object_is_flattened() {
        let mut fields = IndexMap::new();
        fields.insert("backgroundColor".to_string(), Node::literal("red"));
        fields.insert("width".to_string(), Node::literal(10_i64));
        fields.insert("opacity".to_string(), Node::literal(0.5));
        fields.insert("display".to_string(), Node::literal(LiteralValue::Null));
        let mut attr = Attribute::new("style", Literal::new(LiteralValue::Object(fields)));
        style(&mut Tag::new("div"), &mut attr, &mut ctx()).unwrap();
        assert_eq!(
            attr.value.as_literal().and_then(LiteralValue::as_str),
            Some("background-color:red;width:10px;opacity:0.5;")
        );
    }

    #[test]
    fn test_dasherize() {
        assert_eq!(dasherize("fontSize"), "font-size");
        assert_eq!(dasherize("--main-color"), "--main-color");
    }
}
