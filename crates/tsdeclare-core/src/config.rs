//! Declarative module layout.
//!
//! A layout is a JSON object whose keys name modules. A string value names a
//! source file stem (resolved to `<stem>.ts`), an object value is a nested
//! group of modules. Key order is preserved and becomes emission order.
//!
//! ```json
//! {
//!   "util": "src/util",
//!   "models": { "user": "src/models/user" }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Extension appended to every leaf stem.
pub const SOURCE_EXTENSION: &str = "ts";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutConfig {
    pub modules: IndexMap<String, LayoutEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutEntry {
    /// File stem relative to the base directory
    Source(String),
    Group(LayoutConfig),
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Builder-style insertion of a leaf.
    pub fn source(mut self, name: &str, stem: &str) -> Self {
        self.modules
            .insert(name.to_string(), LayoutEntry::Source(stem.to_string()));
        self
    }

    /// Builder-style insertion of a nested group.
    pub fn group(mut self, name: &str, group: LayoutConfig) -> Self {
        self.modules
            .insert(name.to_string(), LayoutEntry::Group(group));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LayoutEntry)> {
        self.modules.iter()
    }

    /// Every module name must be usable as a TypeScript identifier.
    pub fn validate(&self) -> Result<()> {
        for (name, entry) in &self.modules {
            if !is_identifier(name) {
                return Err(CoreError::InvalidModuleName { name: name.clone() });
            }
            if let LayoutEntry::Group(group) = entry {
                group.validate()?;
            }
        }
        Ok(())
    }

    /// Number of leaf sources in the whole layout.
    pub fn source_count(&self) -> usize {
        self.modules
            .values()
            .map(|entry| match entry {
                LayoutEntry::Source(_) => 1,
                LayoutEntry::Group(group) => group.source_count(),
            })
            .sum()
    }
}

/// Resolve a leaf stem against the base directory.
pub fn source_path(base_dir: &Path, stem: &str) -> PathBuf {
    base_dir.join(format!("{}.{}", stem, SOURCE_EXTENSION))
}

pub fn is_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern"))
        .is_match(name)
}

/// Package names double as the root namespace identifier.
pub fn validate_package_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(CoreError::InvalidPackageName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_order_is_preserved() {
        let config = LayoutConfig::from_json(
            r#"{ "zeta": "z", "alpha": { "mid": "m", "beta": "b" }, "gamma": "g" }"#,
        )
        .unwrap();

        let keys: Vec<&str> = config.modules.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "gamma"]);

        match &config.modules["alpha"] {
            LayoutEntry::Group(group) => {
                let keys: Vec<&str> = group.modules.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["mid", "beta"]);
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert_eq!(config.source_count(), 4);
    }

    #[test]
    fn test_builder_matches_json() {
        let built = LayoutConfig::new()
            .source("a", "fileA")
            .group("b", LayoutConfig::new().source("c", "fileC"));
        let parsed = LayoutConfig::from_json(r#"{ "a": "fileA", "b": { "c": "fileC" } }"#).unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_rejects_non_string_leaves() {
        let err = LayoutConfig::from_json(r#"{ "a": 3 }"#).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));

        let err = LayoutConfig::from_json(r#"["a"]"#).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_non_identifier_keys() {
        let err = LayoutConfig::from_json(r#"{ "ok": { "not-ok": "x" } }"#).unwrap_err();
        match err {
            CoreError::InvalidModuleName { name } => assert_eq!(name, "not-ok"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("$jq"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier(""));
        assert!(validate_package_name("my-lib").is_err());
        assert!(validate_package_name("mylib").is_ok());
    }

    #[test]
    fn test_source_path_appends_extension() {
        assert_eq!(
            source_path(Path::new("/work"), "lib/util"),
            PathBuf::from("/work/lib/util.ts")
        );
    }
}
