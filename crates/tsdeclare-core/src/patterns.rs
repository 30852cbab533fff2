//! Line patterns used to pull reference directives and requirements out of
//! TypeScript sources.
//!
//! Only the canonical single-line forms are recognised:
//!
//! ```text
//! /// <reference path="some/file.d.ts" />
//! import fs = require('fs');
//! var path = require("path");
//! ```
//!
//! Anything else, including ES `import ... from` statements and multi-line
//! forms, is left in the body untouched.

use regex::Regex;

use crate::error::Result;
use crate::unit::{Requirement, RequirementKind};

/// Canonical `/// <reference path=... />` directive. Quotes must pair up.
pub const REFERENCE_PATTERN: &str =
    r#"^///\s*<reference\s*path=(?:"([^"]+)"|'([^']+)')\s*/>\s*$"#;

/// Canonical `var|import <name> = require(<path>);` statement.
pub const REQUIREMENT_PATTERN: &str =
    r#"^(var|import)\s+(\w+)\s*=\s*require\((?:'([^']+)'|"([^"]+)")\);$"#;

/// The pair of patterns a [`SourceUnit`](crate::unit::SourceUnit) is parsed with.
#[derive(Debug, Clone)]
pub struct SourcePatterns {
    reference: Regex,
    requirement: Regex,
}

impl SourcePatterns {
    /// Build patterns from custom expressions.
    ///
    /// The reference expression must capture the path in group 1 or 2. The
    /// requirement expression must capture the keyword in group 1, the
    /// binding in group 2 and the module path in group 3 or 4.
    pub fn new(reference: &str, requirement: &str) -> Result<Self> {
        Ok(Self {
            reference: Regex::new(reference)?,
            requirement: Regex::new(requirement)?,
        })
    }

    pub fn match_reference(&self, line: &str) -> Option<String> {
        let caps = self.reference.captures(line)?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    pub fn match_requirement(&self, line: &str) -> Option<Requirement> {
        let caps = self.requirement.captures(line)?;
        let kind = match caps.get(1)?.as_str() {
            "var" => RequirementKind::Var,
            "import" => RequirementKind::Import,
            _ => return None,
        };
        let binding_name = caps.get(2)?.as_str().to_string();
        let module_path = caps.get(3).or_else(|| caps.get(4))?.as_str().to_string();
        Some(Requirement {
            kind,
            binding_name,
            module_path,
        })
    }
}

impl Default for SourcePatterns {
    fn default() -> Self {
        Self {
            reference: Regex::new(REFERENCE_PATTERN).expect("reference pattern compiles"),
            requirement: Regex::new(REQUIREMENT_PATTERN).expect("requirement pattern compiles"),
        }
    }
}
