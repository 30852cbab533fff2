//! The module tree that gets rendered into the synthetic compilation unit.

use std::fmt;

use crate::unit::{reference_line, Requirement, SourceUnit};

const INDENT: &str = "  ";

fn indent(lines: Vec<String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|line| format!("{}{}", INDENT, line))
}

/// A child of a module: either a parsed file or a nested module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    Unit(SourceUnit),
    Module(SourceModule),
}

impl SourceNode {
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            SourceNode::Unit(unit) => unit.to_lines(),
            SourceNode::Module(module) => module.to_lines(),
        }
    }

    pub fn as_module(&self) -> Option<&SourceModule> {
        match self {
            SourceNode::Module(module) => Some(module),
            SourceNode::Unit(_) => None,
        }
    }

    pub fn as_unit(&self) -> Option<&SourceUnit> {
        match self {
            SourceNode::Unit(unit) => Some(unit),
            SourceNode::Module(_) => None,
        }
    }
}

impl From<SourceUnit> for SourceNode {
    fn from(unit: SourceUnit) -> Self {
        SourceNode::Unit(unit)
    }
}

impl From<SourceModule> for SourceNode {
    fn from(module: SourceModule) -> Self {
        SourceNode::Module(module)
    }
}

/// A named `export module <name> { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceModule {
    pub name: String,
    pub children: Vec<SourceNode>,
}

impl SourceModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: impl Into<SourceNode>) {
        self.children.push(child.into());
    }

    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("export module {} {{", self.name)];
        lines.extend(indent(render_children(&self.children)));
        lines.push("}".to_string());
        lines
    }

    /// Find a direct child module by name.
    pub fn child(&self, name: &str) -> Option<&SourceModule> {
        self.children
            .iter()
            .filter_map(SourceNode::as_module)
            .find(|module| module.name == name)
    }
}

/// The top of the tree.
///
/// Renders as the hoisted references and requirements followed by an
/// internal `module <name>` and an `export = <name>;` assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootModule {
    pub name: String,
    pub references: Vec<String>,
    pub requirements: Vec<Requirement>,
    pub children: Vec<SourceNode>,
}

impl RootModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, child: impl Into<SourceNode>) {
        self.children.push(child.into());
    }

    pub fn child(&self, name: &str) -> Option<&SourceModule> {
        self.children
            .iter()
            .filter_map(SourceNode::as_module)
            .find(|module| module.name == name)
    }

    pub fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .references
            .iter()
            .map(|path| reference_line(path))
            .chain(self.requirements.iter().map(Requirement::to_line))
            .collect();
        lines.push(format!("module {} {{", self.name));
        lines.extend(indent(render_children(&self.children)));
        lines.push("}".to_string());
        lines.push(format!("export = {};", self.name));
        lines
    }

    /// Depth-first, left-to-right walk over every unit in the tree.
    pub fn units(&self) -> Vec<&SourceUnit> {
        let mut units = Vec::new();
        collect_units(&self.children, &mut units);
        units
    }
}

impl fmt::Display for RootModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines().join("\n"))
    }
}

fn render_children(children: &[SourceNode]) -> Vec<String> {
    children.iter().flat_map(SourceNode::to_lines).collect()
}

fn collect_units<'a>(children: &'a [SourceNode], out: &mut Vec<&'a SourceUnit>) {
    for child in children {
        match child {
            SourceNode::Unit(unit) => out.push(unit),
            SourceNode::Module(module) => collect_units(&module.children, out),
        }
    }
}
