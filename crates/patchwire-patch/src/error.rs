//! Error types for patch editing.

use patchwire_core::GraphError;
use patchwire_registry::RegistryError;
use thiserror::Error;

/// Failures from [`Patch`](crate::Patch) operations.
///
/// None of these leave the patch half-edited: an operation that returns an
/// error has changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// No object has this name.
    #[error("no object named '{0}'")]
    UnknownObject(String),

    /// An object with this name already exists.
    #[error("an object named '{0}' already exists")]
    DuplicateName(String),

    /// The kind name is not a unit kind.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The target rejected the input.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// `set` was called on an object that is not a constant.
    #[error("'{0}' is not a value object")]
    NotAValue(String),

    /// The engine object only accepts connections into it.
    #[error("the engine object cannot be {0}")]
    EngineReserved(&'static str),

    /// `disconnect` named a connection that does not exist.
    #[error("'{from}' is not connected to '{to}.{input}'")]
    NotConnected {
        /// Source object.
        from: String,
        /// Target object.
        to: String,
        /// Target input.
        input: String,
    },
}

/// Result alias for patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;
