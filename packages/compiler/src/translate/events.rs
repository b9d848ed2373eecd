//! Event handler attributes
//!
//! `on-click(handler)`, `onClick(handler)` and their `once` variants are
//! moved off the attribute list into the tag's handler registry.

use crate::ast::{Attribute, EventHandler, Tag};
use crate::context::CompileContext;
use crate::error::{CompileError, Result};
use crate::schema::TagSchemaProvider;
use crate::util::lower_first;
use once_cell::sync::Lazy;
use regex::Regex;

/// Runtime module backing the `attach` and `detach` element events.
pub const ATTACH_DETACH_MODULE: &str = "runtime/components/attach-detach";

static EVENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(on(?:ce)?)(-)?(.*)$").unwrap());

/// An attribute name split into its event parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName<'a> {
    /// `on` or `once`.
    pub prefix: &'a str,
    pub is_dash: bool,
    pub name: &'a str,
}

impl<'a> EventName<'a> {
    pub fn parse(attribute_name: &'a str) -> Option<EventName<'a>> {
        let captures = EVENT_RE.captures(attribute_name)?;
        Some(EventName {
            prefix: captures.get(1)?.as_str(),
            is_dash: captures.get(2).is_some(),
            name: captures.get(3).map_or("", |m| m.as_str()),
        })
    }

    pub fn is_once(&self) -> bool {
        self.prefix == "once"
    }

    /// The registry key for this event. Dash-separated names are kept as
    /// written; otherwise markup tags follow DOM event naming (all lower
    /// case) and components follow property naming (first letter only).
    pub fn normalize(&self, is_native_tag: bool) -> String {
        if self.is_dash {
            self.name.to_string()
        } else if is_native_tag {
            self.name.to_lowercase()
        } else {
            lower_first(self.name)
        }
    }
}

/// Move an event handler attribute into the tag's handler registry.
///
/// Returns the attribute untouched when it is not an event handler, and
/// `None` when it was consumed.
pub fn extract_event_handler(
    tag: &mut Tag,
    attr: Attribute,
    schema: &dyn TagSchemaProvider,
    ctx: &mut CompileContext,
) -> Result<Option<Attribute>> {
    let Some(event) = EventName::parse(&attr.name) else {
        return Ok(Some(attr));
    };
    let Some(arguments) = attr.arguments.as_ref() else {
        return Ok(Some(attr));
    };

    if arguments.is_empty() {
        return Err(CompileError::MissingHandlerArguments {
            span: attr.source_span.clone(),
        });
    }

    if !attr.value.is_true() {
        return Err(CompileError::HandlerValue {
            name: attr.name.clone(),
            span: attr.value_span(),
        });
    }

    let event_name = event.normalize(schema.is_native_tag(tag));
    let once = event.is_once();

    if tag.handler(&event_name).is_some() {
        return Err(CompileError::DuplicateHandler {
            event: event_name,
            span: attr.source_span.clone(),
        });
    }

    tracing::debug!(tag = %tag.name, event = %event_name, once, "registered event handler");

    if ctx.config().is_vdom()
        && (event_name == "attach" || event_name == "detach")
        && ctx.load_attach_detach(tag.source_span.as_ref(), ATTACH_DETACH_MODULE)
    {
        tracing::debug!(module = ATTACH_DETACH_MODULE, "loaded attach/detach runtime");
    }

    let Attribute { arguments, .. } = attr;
    tag.handlers_mut().insert(
        event_name,
        EventHandler {
            arguments: arguments.unwrap_or_default(),
            once,
        },
    );

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dash_form() {
        let event = EventName::parse("on-click").unwrap();
        assert_eq!(event.prefix, "on");
        assert!(event.is_dash);
        assert_eq!(event.name, "click");
        assert!(!event.is_once());
    }

    #[test]
    fn test_parse_once_form() {
        let event = EventName::parse("onceSubmit").unwrap();
        assert!(event.is_once());
        assert!(!event.is_dash);
        assert_eq!(event.name, "Submit");
    }

    #[test]
    fn test_parse_non_event() {
        assert!(EventName::parse("class").is_none());
        // Matches the pattern; only the arguments make it a handler.
        assert_eq!(EventName::parse("one").unwrap().name, "e");
    }

    #[test]
    fn test_normalize() {
        let event = EventName::parse("onMouseOver").unwrap();
        assert_eq!(event.normalize(true), "mouseover");
        assert_eq!(event.normalize(false), "mouseOver");
        let dashed = EventName::parse("on-Custom").unwrap();
        assert_eq!(dashed.normalize(true), "Custom");
    }
}
