//! Compiler driver and declaration finalizer for tsc-declare
//!
//! Takes a percolated [`RootModule`](tsdeclare_core::RootModule), writes it
//! out as `index.ts`, runs the TypeScript compiler over it and rewrites the
//! resulting `index.d.ts` into a standalone `<name>.d.ts`.

pub mod compiler;
pub mod emitter;
pub mod rewrite;

mod error;

pub use compiler::{CompilerCommand, CompilerOutput};
pub use emitter::{generate_type_declaration, EmitOptions, EmitOutput, Emitter};
pub use error::{EmitError, Result};
pub use rewrite::{rewrite_declaration, RewriteReport};
