//! Builds a [`RootModule`] from a [`LayoutConfig`].

use std::path::PathBuf;

use tracing::debug;

use crate::config::{source_path, validate_package_name, LayoutConfig, LayoutEntry};
use crate::error::Result;
use crate::patterns::SourcePatterns;
use crate::tree::{RootModule, SourceModule, SourceNode};
use crate::unit::SourceUnit;

/// Walks a layout and reads every leaf file into the tree.
///
/// Any unreadable leaf aborts the whole build; nothing is returned for a
/// partially read layout.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    base_dir: PathBuf,
    patterns: SourcePatterns,
}

impl TreeBuilder {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            patterns: SourcePatterns::default(),
        }
    }

    pub fn with_patterns(mut self, patterns: SourcePatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Build the full tree for package `name`.
    pub fn build(&self, name: &str, config: &LayoutConfig) -> Result<RootModule> {
        validate_package_name(name)?;
        config.validate()?;

        let mut root = RootModule::new(name);
        root.children = self.build_children(config, name)?;
        debug!(
            "Built source tree '{}' with {} top-level modules",
            name,
            root.children.len()
        );
        Ok(root)
    }

    fn build_children(&self, config: &LayoutConfig, scope: &str) -> Result<Vec<SourceNode>> {
        let mut children = Vec::with_capacity(config.modules.len());

        for (module_name, entry) in config.iter() {
            let mut module = SourceModule::new(module_name.as_str());
            let qualified = format!("{}.{}", scope, module_name);

            match entry {
                LayoutEntry::Source(stem) => {
                    let path = source_path(&self.base_dir, stem);
                    debug!("Reading {} for module {}", path.display(), qualified);
                    module.push(SourceUnit::read(&path, &self.patterns)?);
                }
                LayoutEntry::Group(group) => {
                    module.children = self.build_children(group, &qualified)?;
                }
            }

            children.push(SourceNode::Module(module));
        }

        Ok(children)
    }
}
