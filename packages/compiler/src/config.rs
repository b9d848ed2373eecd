//! Compiler configuration

use serde::Deserialize;

/// Which runtime the lowered code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Server side string output.
    Html,
    /// Virtual DOM output for the browser runtime.
    #[default]
    Vdom,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    pub output: OutputMode,
    /// Prefix used for generated runtime helper identifiers.
    pub helper_prefix: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            output: OutputMode::Vdom,
            helper_prefix: "rt_".to_string(),
        }
    }
}

impl CompilerConfig {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    pub fn html() -> Self {
        CompilerConfig {
            output: OutputMode::Html,
            ..CompilerConfig::default()
        }
    }

    pub fn is_vdom(&self) -> bool {
        self.output == OutputMode::Vdom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert!(config.is_vdom());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CompilerConfig::from_json(r#"{ "output": "html" }"#).unwrap();
        assert_eq!(config.output, OutputMode::Html);
        assert_eq!(config.helper_prefix, "rt_");
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        assert!(CompilerConfig::from_json(r#"{ "output": "pdf" }"#).is_err());
    }
}
