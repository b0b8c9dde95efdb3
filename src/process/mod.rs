use std::fmt;
use std::io;

pub mod executor;
pub mod signal;

pub use executor::{ChildOutcome, ProcessExecutor};
pub use signal::{setup_signal_handlers, InterruptFlag};

#[derive(Debug)]
pub enum ProcessError {
    Fork(io::Error),
    Wait(io::Error),
    Signal(io::Error),
    InvalidArgument(String),
    EmptyCommand,
}

impl ProcessError {
    /// Process creation itself is broken; the shell cannot go on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Fork(_))
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "fork failed: {}", e),
            ProcessError::Wait(e) => write!(f, "wait failed: {}", e),
            ProcessError::Signal(e) => write!(f, "cannot install signal handler: {}", e),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::EmptyCommand => write!(f, "empty command"),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Fork(e) | ProcessError::Wait(e) | ProcessError::Signal(e) => Some(e),
            ProcessError::InvalidArgument(_) | ProcessError::EmptyCommand => None,
        }
    }
}
