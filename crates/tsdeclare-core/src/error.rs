use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Source file not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read layout config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid module name '{name}': expected an identifier")]
    InvalidModuleName { name: String },

    #[error("Invalid package name '{name}': expected an identifier")]
    InvalidPackageName { name: String },

    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl CoreError {
    /// Classify an io error raised while reading a leaf source file.
    pub(crate) fn from_source_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::SourceNotFound { path, source }
        } else {
            CoreError::SourceRead { path, source }
        }
    }
}
