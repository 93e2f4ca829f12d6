//! Definition of the crate's error and result.

use std::io;
use std::sync::{Arc, PoisonError};

use thiserror::Error;

use crate::script::ScriptContext;

/// The library's error enum.
///
/// Argument validation errors (see [`FilterError::is_validation_error`])
/// are raised when a script is compiled or its parameters are bound,
/// before any segment is read.
#[derive(Debug, Clone, Error)]
pub enum FilterError {
    /// A required script parameter is absent.
    #[error("Missing parameter [{0}]")]
    MissingParameter(String),
    /// A script parameter is present but cannot be interpreted.
    #[error("Invalid parameter [{name}]: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The script engine cannot run in the requested context.
    #[error("{script_type} scripts cannot be used for context [{context}]")]
    UnsupportedContext {
        /// Type identifier of the engine rejecting the context.
        script_type: String,
        /// The rejected context.
        context: ScriptContext,
    },
    /// The script source does not name a script known to the engine.
    #[error("Unknown script name {0}")]
    UnknownScript(String),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// Reading the index failed.
    #[error("An IO error occurred: '{0}'")]
    IoError(#[source] Arc<io::Error>),
    /// A thread holding the locked panicked and poisoned the lock.
    #[error("A thread holding the lock panicked and poisoned the lock")]
    Poisoned,
    /// An Error happened in one of the thread.
    #[error("An error occurred in a thread: '{0}'")]
    ErrorInThread(String),
    /// System error. (e.g.: We failed spawning a new thread)
    #[error("System error.'{0}'")]
    SystemError(String),
}

impl FilterError {
    /// Returns true if the error was raised while validating a script,
    /// its context or its parameters.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            FilterError::MissingParameter(_)
                | FilterError::InvalidParameter { .. }
                | FilterError::UnsupportedContext { .. }
                | FilterError::UnknownScript(_)
                | FilterError::InvalidArgument(_)
        )
    }
}

impl From<io::Error> for FilterError {
    fn from(io_error: io::Error) -> FilterError {
        FilterError::IoError(Arc::new(io_error))
    }
}

impl From<rayon::ThreadPoolBuildError> for FilterError {
    fn from(error: rayon::ThreadPoolBuildError) -> FilterError {
        FilterError::SystemError(error.to_string())
    }
}

impl<Guard> From<PoisonError<Guard>> for FilterError {
    fn from(_: PoisonError<Guard>) -> FilterError {
        FilterError::Poisoned
    }
}
