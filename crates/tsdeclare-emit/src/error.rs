//! Error types for emitting declarations

use std::path::PathBuf;

use thiserror::Error;
use tsdeclare_core::CoreError;

pub type Result<T> = std::result::Result<T, EmitError>;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiler executable '{program}' not found. Please install TypeScript: npm install -g typescript")]
    CompilerNotFound { program: String },

    #[error("Failed to start compiler '{program}': {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiler failed with {}", describe_status(*status))]
    CompilerFailed {
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Compiler succeeded but produced no declaration file at {}", path.display())]
    MissingDeclarationOutput { path: PathBuf },

    #[error("Declaration output has no 'declare module {name}' header")]
    DeclarationHeaderNotFound { name: String },

    #[error("Declaration output has no 'export = {name};' assignment")]
    ExportAssignmentNotFound { name: String },
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmitError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code a command-line caller should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            EmitError::CompilerFailed {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
