use std::fmt;
use std::io;

/// Errors surfaced by the engine, per the error kinds the engine is
/// contracted to report: bad configuration, resource exhaustion, I/O
/// failure, cooperative cancellation, and internal invariant violations.
#[derive(Debug)]
pub enum DskError {
    InvalidConfig(String),
    ResourceExhausted {
        attempted_passes: u32,
        attempted_partitions: u32,
        fd_limit: usize,
    },
    Io(io::Error),
    Cancelled,
    Internal(String),
}

impl fmt::Display for DskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DskError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            DskError::ResourceExhausted {
                attempted_passes,
                attempted_partitions,
                fd_limit,
            } => write!(
                f,
                "no feasible pass/partition plan within the file descriptor limit \
                 (tried {} passes x {} partitions, fd limit {})",
                attempted_passes, attempted_partitions, fd_limit
            ),
            DskError::Io(e) => write!(f, "io error: {}", e),
            DskError::Cancelled => write!(f, "cancelled"),
            DskError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for DskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DskError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DskError {
    fn from(e: io::Error) -> Self {
        DskError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, DskError>;
