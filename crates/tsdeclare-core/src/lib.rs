//! Source tree assembly for tsc-declare
//!
//! Reads a declarative module layout, parses every leaf TypeScript file into
//! a [`SourceUnit`], nests them into a [`RootModule`] and hoists their
//! dependencies to the top so the whole tree renders as one compilation unit.

pub mod builder;
pub mod config;
pub mod error;
pub mod patterns;
pub mod percolate;
pub mod tree;
pub mod unit;

pub use builder::TreeBuilder;
pub use config::{LayoutConfig, LayoutEntry};
pub use error::{CoreError, Result};
pub use patterns::SourcePatterns;
pub use percolate::{percolate, PercolationStats};
pub use tree::{RootModule, SourceModule, SourceNode};
pub use unit::{Requirement, RequirementKind, SourceUnit};
