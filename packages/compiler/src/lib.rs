#![deny(clippy::all)]

//! Template Lowering
//!
//! Lowers a parsed template tree into emitted code: literal values are
//! encoded, text producers are merged, and tag attributes are resolved
//! into event handlers, directives and validated attributes.

pub mod ast;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod parse_util;
pub mod schema;
pub mod translate;
pub mod util;

// Re-exports
pub use ast::{Attribute, Expression, Literal, LiteralValue, Node, NodeKind, NodeTrait, Tag, TextNode};
pub use config::{CompilerConfig, OutputMode};
pub use context::{CompileContext, DefaultImport};
pub use error::{CompileError, ErrorKind, Result};
pub use schema::{TagDefinition, TagSchemaProvider, TagSchemaRegistry};
pub use translate::{AttributeTranslator, TransformRegistry};

use output::{CodeWriter, Writer};

/// Compilation result
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    /// Generated code, one statement per root node.
    pub code: String,
    /// Runtime helpers referenced by the code, as `(helper, identifier)`.
    pub helpers: Vec<(String, String)>,
    /// Default imports the emitted unit must declare.
    pub imports: Vec<DefaultImport>,
}

/// Lower `nodes` with the built-in directives and modifiers.
pub fn compile(
    nodes: Vec<Node>,
    config: &CompilerConfig,
    schema: &dyn TagSchemaProvider,
) -> Result<Compiled> {
    compile_with(nodes, config, schema, TransformRegistry::builtin())
}

/// Lower `nodes` with a host supplied transform registry.
pub fn compile_with(
    mut nodes: Vec<Node>,
    config: &CompilerConfig,
    schema: &dyn TagSchemaProvider,
    registry: &TransformRegistry,
) -> Result<Compiled> {
    let mut ctx = CompileContext::new(config.clone());

    AttributeTranslator::new(registry, schema).translate_nodes(&mut nodes, &mut ctx)?;

    let nodes = ast::normalize_body(nodes)
        .into_iter()
        .map(|node| node.rewrite(&mut ctx))
        .collect::<Result<Vec<_>>>()?;

    let mut writer = CodeWriter::new();
    for (i, node) in nodes.iter().enumerate() {
        if i != 0 {
            writer.newline();
        }
        node.emit(&mut writer);
        writer.write(";");
    }

    tracing::debug!(
        nodes = nodes.len(),
        helpers = ctx.helpers().count(),
        imports = ctx.imports().count(),
        "compiled template"
    );

    Ok(Compiled {
        code: writer.to_source(),
        helpers: ctx
            .helpers()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect(),
        imports: ctx.imports().cloned().collect(),
    })
}
