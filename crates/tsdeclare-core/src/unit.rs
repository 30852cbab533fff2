//! A single TypeScript source file split into reference directives,
//! requirements and body lines.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::patterns::SourcePatterns;

/// Declaration keyword of a requirement statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementKind {
    Var,
    Import,
}

impl RequirementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementKind::Var => "var",
            RequirementKind::Import => "import",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `var|import <binding> = require('<path>');` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub binding_name: String,
    pub module_path: String,
}

impl Requirement {
    pub fn new(kind: RequirementKind, binding_name: &str, module_path: &str) -> Self {
        Self {
            kind,
            binding_name: binding_name.to_string(),
            module_path: module_path.to_string(),
        }
    }

    /// Relative requirements point at other files of the same tree.
    pub fn is_relative(&self) -> bool {
        self.module_path.starts_with('.')
    }

    pub fn to_line(&self) -> String {
        format!(
            "{} {} = require('{}');",
            self.kind, self.binding_name, self.module_path
        )
    }
}

/// Render a reference directive in canonical form.
pub fn reference_line(path: &str) -> String {
    format!("/// <reference path=\"{}\" />", path)
}

/// A parsed source file.
///
/// `lines` never holds a reference or requirement line; those live in their
/// own collections and are re-emitted ahead of the body by [`to_lines`].
///
/// [`to_lines`]: SourceUnit::to_lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    pub references: Vec<String>,
    pub requirements: Vec<Requirement>,
    pub lines: Vec<String>,
}

impl SourceUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse with the canonical patterns.
    pub fn parse(contents: &str) -> Self {
        Self::parse_with(contents, &SourcePatterns::default())
    }

    pub fn parse_with(contents: &str, patterns: &SourcePatterns) -> Self {
        let mut unit = Self::new();

        for line in contents.split('\n') {
            // Match against the line without a CRLF remainder, keep the body verbatim
            let candidate = line.strip_suffix('\r').unwrap_or(line);
            if let Some(path) = patterns.match_reference(candidate) {
                unit.references.push(path);
            } else if let Some(requirement) = patterns.match_requirement(candidate) {
                unit.requirements.push(requirement);
            } else {
                unit.lines.push(line.to_string());
            }
        }

        unit
    }

    /// Read and parse a file from disk.
    pub fn read(path: &Path, patterns: &SourcePatterns) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CoreError::from_source_io(path.to_path_buf(), e))?;
        let unit = Self::parse_with(&contents, patterns);
        debug!(
            "Parsed {}: {} references, {} requirements, {} lines",
            path.display(),
            unit.references.len(),
            unit.requirements.len(),
            unit.lines.len()
        );
        Ok(unit)
    }

    /// References first, then requirements, then the body.
    pub fn to_lines(&self) -> Vec<String> {
        self.references
            .iter()
            .map(|path| reference_line(path))
            .chain(self.requirements.iter().map(Requirement::to_line))
            .chain(self.lines.iter().cloned())
            .collect()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.references.is_empty() || !self.requirements.is_empty()
    }
}
