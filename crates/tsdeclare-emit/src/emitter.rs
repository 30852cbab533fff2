//! Emit pipeline: render the unit, compile it, finalize the declaration.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use tsdeclare_core::{percolate, LayoutConfig, RootModule, SourcePatterns, TreeBuilder};

use crate::compiler::CompilerCommand;
use crate::error::{EmitError, Result};
use crate::rewrite::{rewrite_declaration, RewriteReport};

/// Synthetic compilation unit written for the compiler.
pub const UNIT_FILE: &str = "index.ts";
/// Declaration file the compiler writes next to the unit.
pub const RAW_DECLARATION_FILE: &str = "index.d.ts";
/// Compiled code the compiler writes next to the unit. Not consumed.
pub const COMPILED_FILE: &str = "index.js";

#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Directory the intermediate files and the artifact are written to
    pub work_dir: PathBuf,
    /// Directory leaf stems are resolved against; defaults to `work_dir`
    pub base_dir: Option<PathBuf>,
    pub compiler: CompilerCommand,
    pub patterns: SourcePatterns,
    /// Fail instead of warning when the declaration rewrite misses
    pub strict: bool,
}

impl EmitOptions {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            base_dir: None,
            compiler: CompilerCommand::default(),
            patterns: SourcePatterns::default(),
            strict: false,
        }
    }

    pub fn with_compiler(mut self, compiler: CompilerCommand) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_deref().unwrap_or(&self.work_dir)
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

#[derive(Debug, Clone)]
pub struct EmitOutput {
    pub declaration_path: PathBuf,
    pub declaration: String,
    pub report: RewriteReport,
}

pub struct Emitter {
    options: EmitOptions,
}

impl Emitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    fn work_path(&self, file: &str) -> PathBuf {
        self.options.work_dir.join(file)
    }

    /// Build and percolate the tree for `name` without touching the work dir.
    pub fn assemble(&self, name: &str, config: &LayoutConfig) -> Result<RootModule> {
        let builder =
            TreeBuilder::new(self.options.base_dir()).with_patterns(self.options.patterns.clone());
        let root = builder.build(name, config)?;
        Ok(percolate(root))
    }

    /// Text of the synthetic compilation unit.
    pub fn render(root: &RootModule) -> String {
        root.to_string()
    }

    /// Write the unit, compile it and produce `<name>.d.ts`.
    ///
    /// On compiler failure the intermediate files are left in the work dir
    /// for inspection. They are only removed on the success path.
    pub async fn emit(&self, root: &RootModule) -> Result<EmitOutput> {
        let name = root.name.as_str();
        let unit_path = self.work_path(UNIT_FILE);
        std::fs::write(&unit_path, Self::render(root))
            .map_err(|e| EmitError::io(&unit_path, e))?;
        debug!("Wrote compilation unit {}", unit_path.display());

        let output = self
            .options
            .compiler
            .run(Path::new(UNIT_FILE), &self.options.work_dir)
            .await?;
        if !output.success {
            return Err(EmitError::CompilerFailed {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        info!("compiled {}", COMPILED_FILE);

        let raw_path = self.work_path(RAW_DECLARATION_FILE);
        let raw = match std::fs::read_to_string(&raw_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EmitError::MissingDeclarationOutput { path: raw_path })
            }
            Err(e) => return Err(EmitError::io(&raw_path, e)),
        };

        let (declaration, report) = rewrite_declaration(&raw, name);
        if self.options.strict {
            if !report.header_rewritten {
                return Err(EmitError::DeclarationHeaderNotFound {
                    name: name.to_string(),
                });
            }
            if !report.export_removed {
                return Err(EmitError::ExportAssignmentNotFound {
                    name: name.to_string(),
                });
            }
        }

        // Intermediates go first: a package named `index` writes over index.d.ts
        for intermediate in [&unit_path, &raw_path] {
            std::fs::remove_file(intermediate).map_err(|e| EmitError::io(intermediate, e))?;
        }

        let file_name = format!("{}.d.ts", name);
        let declaration_path = self.work_path(&file_name);
        std::fs::write(&declaration_path, &declaration)
            .map_err(|e| EmitError::io(&declaration_path, e))?;
        info!("wrote {}", file_name);

        Ok(EmitOutput {
            declaration_path,
            declaration,
            report,
        })
    }
}

/// Assemble the layout for `name`, compile it and write `<name>.d.ts`.
pub async fn generate_type_declaration(
    name: &str,
    config: &LayoutConfig,
    options: EmitOptions,
) -> Result<EmitOutput> {
    let emitter = Emitter::new(options);
    let root = emitter.assemble(name, config)?;
    emitter.emit(&root).await
}
