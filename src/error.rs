use std::{collections::TryReserveError, fmt, io};

use regex::Error as RegexError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JigError {
    #[error("Allocation failure: {0}")]
    Allocation(String),
    #[error("Invalid Command: {0}")]
    Command(String),
    #[error("Custom error: {0}")]
    Custom(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Output closed: {0}")]
    OutputClosed(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl JigError {
    /// Only resource exhaustion aborts a run. Everything else a stage runs into is either a
    /// per-record diagnostic or a caller mistake reported before any work happens.
    pub fn is_fatal(&self) -> bool {
        matches!(self, JigError::Allocation(_))
    }

    /// The reader on the other end of the output went away, e.g. `jig tree | head -1`. Nothing
    /// is left to report to.
    pub fn is_output_closed(&self) -> bool {
        matches!(self, JigError::OutputClosed(_))
    }

    /// Suggested process exit status for the `jig` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            JigError::Command(_) => 2,
            _ => 1,
        }
    }
}

/// Push onto `vec`, reporting allocation failure instead of aborting.
pub(crate) fn try_push<T>(vec: &mut Vec<T>, item: T) -> Result<(), JigError> {
    vec.try_reserve(1)?;
    vec.push(item);
    Ok(())
}

impl From<io::Error> for JigError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => JigError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => JigError::PermissionDenied,
            io::ErrorKind::OutOfMemory => JigError::Allocation(format!("{x}")),
            io::ErrorKind::BrokenPipe => JigError::OutputClosed(format!("{x}")),
            _ => JigError::Io(format!("IOError: {}: {x}", x.kind())),
        }
    }
}

impl From<TryReserveError> for JigError {
    fn from(x: TryReserveError) -> Self {
        JigError::Allocation(format!("could not grow collection: {x}"))
    }
}

impl From<fmt::Error> for JigError {
    fn from(x: fmt::Error) -> Self {
        JigError::Custom(format!("{x}"))
    }
}

impl From<RegexError> for JigError {
    fn from(x: RegexError) -> Self {
        JigError::Serialization(format!("Regex parse failed: {x}"))
    }
}
