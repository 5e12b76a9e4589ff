use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::io;




/**
 * Error to represent a failed tree operation, or a failure reading keys and
 * snapshots from outside the tree. Duplicate keys and missing keys are not
 * errors.
 */
#[derive(Debug)]
pub enum Error {
    AllocationFailed(TryReserveError),
    Io(io::Error),
    Parse { line: usize, token: String },
    Snapshot(String),
}




// ============================================================================
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            AllocationFailed(e) => write!(fmt, "could not allocate a tree node: {}", e),
            Io(e) => write!(fmt, "{}", e),
            Parse { line, token } => write!(fmt, "line {}: '{}' is not a valid key", line, token),
            Snapshot(message) => write!(fmt, "bad snapshot: {}", message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocationFailed(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Self::AllocationFailed(e)
    }
}
