//! Compile Context
//!
//! One `CompileContext` exists per compilation unit. Nodes use it to
//! reference runtime helpers, schedule default imports and claim unique
//! identifiers. It is threaded through the pipeline as `&mut`, so there is
//! exactly one writer at a time.

use crate::config::CompilerConfig;
use crate::parse_util::ParseSourceSpan;
use crate::util::is_valid_identifier;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A default import the emitted unit must declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultImport {
    pub module_path: String,
    pub local_name: String,
    /// Where the import was first requested.
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug)]
pub struct CompileContext {
    config: CompilerConfig,
    /// helper name -> identifier, in first-use order
    helpers: IndexMap<String, String>,
    /// module path -> import
    imports: IndexMap<String, DefaultImport>,
    claimed_names: HashMap<String, u32>,
    optimizer_registered: bool,
    attach_detach_loaded: bool,
}

impl CompileContext {
    pub fn new(config: CompilerConfig) -> Self {
        CompileContext {
            config,
            helpers: IndexMap::new(),
            imports: IndexMap::new(),
            claimed_names: HashMap::new(),
            optimizer_registered: false,
            attach_detach_loaded: false,
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Stable reference to the runtime helper `name`. The identifier is
    /// allocated on first use and reused afterwards.
    pub fn helper(&mut self, name: &str) -> String {
        if let Some(id) = self.helpers.get(name) {
            return id.clone();
        }
        let base = sanitize_identifier(&format!("{}{}", self.config.helper_prefix, name));
        let id = self.unique_name(&base);
        tracing::debug!(helper = name, id = %id, "allocated runtime helper");
        self.helpers.insert(name.to_string(), id.clone());
        id
    }

    /// Schedule a default import of `module_path` and return its local name.
    /// Importing the same module again returns the existing binding.
    pub fn import_default(
        &mut self,
        source_span: Option<&ParseSourceSpan>,
        module_path: &str,
    ) -> String {
        if let Some(import) = self.imports.get(module_path) {
            return import.local_name.clone();
        }
        let stem = module_path
            .rsplit('/')
            .next()
            .unwrap_or(module_path)
            .trim_end_matches(".js");
        let base = sanitize_identifier(&format!("{}{}", self.config.helper_prefix, stem));
        let local_name = self.unique_name(&base);
        tracing::debug!(module = module_path, local = %local_name, "scheduled default import");
        self.imports.insert(
            module_path.to_string(),
            DefaultImport {
                module_path: module_path.to_string(),
                local_name: local_name.clone(),
                source_span: source_span.cloned(),
            },
        );
        local_name
    }

    /// Claim an identifier based on `base`, suffixing a counter when the
    /// name was already handed out.
    pub fn unique_name(&mut self, base: &str) -> String {
        let count = self.claimed_names.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_string()
        } else {
            format!("{}_{}", base, count)
        }
    }

    /// Mark the text optimizer as active for this unit. Returns `true` only
    /// for the first call.
    pub fn register_optimizer(&mut self) -> bool {
        !std::mem::replace(&mut self.optimizer_registered, true)
    }

    pub fn is_optimizer_registered(&self) -> bool {
        self.optimizer_registered
    }

    /// Import the element attach/detach runtime module once per unit.
    /// Returns `true` when this call scheduled the import.
    pub fn load_attach_detach(
        &mut self,
        source_span: Option<&ParseSourceSpan>,
        module_path: &str,
    ) -> bool {
        if self.attach_detach_loaded {
            return false;
        }
        self.attach_detach_loaded = true;
        self.import_default(source_span, module_path);
        true
    }

    pub fn helpers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.helpers
            .iter()
            .map(|(name, id)| (name.as_str(), id.as_str()))
    }

    pub fn imports(&self) -> impl Iterator<Item = &DefaultImport> {
        self.imports.values()
    }
}

fn sanitize_identifier(input: &str) -> String {
    let mut out: String = input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if !is_valid_identifier(&out) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CompileContext {
        CompileContext::new(CompilerConfig::default())
    }

    #[test]
    fn test_helper_is_memoized() {
        let mut ctx = ctx();
        let first = ctx.helper("str");
        let second = ctx.helper("str");
        assert_eq!(first, "rt_str");
        assert_eq!(first, second);
        assert_eq!(ctx.helpers().count(), 1);
    }

    #[test]
    fn test_unique_name() {
        let mut ctx = ctx();
        assert_eq!(ctx.unique_name("x"), "x");
        assert_eq!(ctx.unique_name("x"), "x_2");
        assert_eq!(ctx.unique_name("y"), "y");
    }

    #[test]
    fn test_import_default_dedup() {
        let mut ctx = ctx();
        let a = ctx.import_default(None, "runtime/components/attach-detach");
        let b = ctx.import_default(None, "runtime/components/attach-detach");
        assert_eq!(a, "rt_attach_detach");
        assert_eq!(a, b);
        assert_eq!(ctx.imports().count(), 1);
    }

    #[test]
    fn test_attach_detach_loaded_once() {
        let mut ctx = ctx();
        assert!(ctx.load_attach_detach(None, "runtime/attach-detach"));
        assert!(!ctx.load_attach_detach(None, "runtime/attach-detach"));
        assert_eq!(ctx.imports().count(), 1);
    }

    #[test]
    fn test_register_optimizer_once() {
        let mut ctx = ctx();
        assert!(!ctx.is_optimizer_registered());
        assert!(ctx.register_optimizer());
        assert!(!ctx.register_optimizer());
        assert!(ctx.is_optimizer_registered());
    }
}
