//! Hoisting of reference directives and requirements to the root.
//!
//! Once every file is merged into one compilation unit, relative
//! requirements (`./foo`) point at code that now lives in the same file, so
//! they are dropped. External requirements and reference directives move to
//! the top of the unit, in depth-first left-to-right order, and are cleared
//! from the unit they came from so nothing is rendered twice.

use tracing::debug;

use crate::tree::{RootModule, SourceNode};
use crate::unit::Requirement;

/// What a percolation pass moved and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercolationStats {
    pub references: usize,
    pub requirements: usize,
    pub dropped_relative: usize,
}

/// Percolate the whole tree. Consumes the tree so the pass has sole ownership
/// while it rewrites descendant nodes.
pub fn percolate(root: RootModule) -> RootModule {
    percolate_with_stats(root).0
}

pub fn percolate_with_stats(mut root: RootModule) -> (RootModule, PercolationStats) {
    let mut stats = PercolationStats::default();
    let mut children = std::mem::take(&mut root.children);

    for child in &mut children {
        hoist(child, &mut root, &mut stats);
    }
    root.children = children;

    debug!(
        "Percolated {} references and {} requirements into '{}', dropped {} relative requirements",
        stats.references, stats.requirements, root.name, stats.dropped_relative
    );
    (root, stats)
}

fn hoist(node: &mut SourceNode, root: &mut RootModule, stats: &mut PercolationStats) {
    match node {
        SourceNode::Unit(unit) => {
            let (relative, external): (Vec<Requirement>, Vec<Requirement>) =
                std::mem::take(&mut unit.requirements)
                    .into_iter()
                    .partition(Requirement::is_relative);

            stats.dropped_relative += relative.len();
            stats.requirements += external.len();
            stats.references += unit.references.len();

            root.requirements.extend(external);
            root.references.append(&mut unit.references);
        }
        SourceNode::Module(module) => {
            for child in &mut module.children {
                hoist(child, root, stats);
            }
        }
    }
}
