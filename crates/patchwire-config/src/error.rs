//! Settings file failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why the settings file could not be loaded or saved.
///
/// I/O failures carry the path involved so the CLI can print it as-is.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed, including when it does not exist.
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// Writing the file failed.
    #[error("cannot write settings file '{path}': {source}")]
    Write {
        /// Settings file path.
        path: PathBuf,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// The parent directory of the file could not be created.
    #[error("cannot create settings directory '{path}': {source}")]
    CreateDir {
        /// Directory that `save` tried to create.
        path: PathBuf,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// The file exists but is not valid settings TOML.
    #[error("invalid settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be encoded, which only happens for values TOML
    /// has no representation for.
    #[error("cannot encode settings as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// True when reading failed because the settings file does not exist.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
