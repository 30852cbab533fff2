//! TypeScript compiler wrapper
//!
//! Runs `tsc -m commonjs -t ES5 -d <unit>` on the synthetic compilation unit.
//! The compiler is treated as a black box: we only look at its exit status,
//! its captured output streams and the declaration file it leaves behind.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{EmitError, Result};

/// Flags requesting commonjs output, an ES5 target and declaration files.
pub const COMPILER_FLAGS: [&str; 5] = ["-m", "commonjs", "-t", "ES5", "-d"];

pub const DEFAULT_COMPILER: &str = "tsc";

#[derive(Debug, Clone)]
pub struct CompilerOutput {
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The program used as the compiler plus any arguments placed ahead of the
/// fixed flag set (useful for wrappers such as `npx tsc` or `node tsc.js`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    program: String,
    leading_args: Vec<String>,
}

impl CompilerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for compiling `unit_file`.
    pub fn args_for(&self, unit_file: &Path) -> Vec<String> {
        self.leading_args
            .iter()
            .cloned()
            .chain(COMPILER_FLAGS.iter().map(|flag| flag.to_string()))
            .chain(std::iter::once(unit_file.display().to_string()))
            .collect()
    }

    /// Bare program names are looked up on `PATH`. Relative paths resolve
    /// against the caller's current directory, not the compiler's work dir.
    pub fn resolve_program(&self) -> Result<PathBuf> {
        let program = Path::new(&self.program);
        if program.is_absolute() {
            return Ok(program.to_path_buf());
        }
        if program.components().count() > 1 {
            let cwd = std::env::current_dir().map_err(|e| EmitError::io(program, e))?;
            return Ok(cwd.join(program));
        }
        which::which(&self.program).map_err(|_| EmitError::CompilerNotFound {
            program: self.program.clone(),
        })
    }

    /// Compile `unit_file` with `work_dir` as the current directory and wait
    /// for the process to finish.
    pub async fn run(&self, unit_file: &Path, work_dir: &Path) -> Result<CompilerOutput> {
        let program = self.resolve_program()?;
        let args = self.args_for(unit_file);
        debug!("Running {} {}", program.display(), args.join(" "));

        let output = Command::new(&program)
            .args(&args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| EmitError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(CompilerOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

impl Default for CompilerCommand {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}
