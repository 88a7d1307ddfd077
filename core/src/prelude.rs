use std::path::PathBuf;

/// Process exit code for a run that finished without error.
pub const NORMAL_EXIT: u8 = 0;

/// Longest formatted diagnostic the pipeline will emit.
pub const MESSAGE_LIMIT: usize = 1024;

/// Common error type for every stage of a simulation run.
///
/// Each variant maps to one distinct process exit code, see
/// [`SimulationError::exit_code`].
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error("subroutine failed: {0}")]
    Subroutine(String),
    #[error("error parsing arguments: {0}")]
    Argument(String),
    #[error("input argument out of valid range: {0}")]
    Range(String),
    #[error("could not open file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error reading {origin}: {reason}")]
    InputFormat { origin: String, reason: String },
    #[error("out of memory: {0}")]
    Memory(String),
    #[error("message of {len} bytes exceeds the {limit} byte limit")]
    MessageOverflow { len: usize, limit: usize },
}

impl SimulationError {
    pub fn input_format(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputFormat {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Subroutine(_) => 1,
            Self::Argument(_) => 2,
            Self::Range(_) => 3,
            Self::File { .. } => 4,
            Self::InputFormat { .. } => 5,
            Self::Memory(_) => 6,
            Self::MessageOverflow { .. } => 7,
        }
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Rejects diagnostics that would not fit in [`MESSAGE_LIMIT`] bytes.
pub fn bounded_message(message: String) -> SimulationResult<String> {
    if message.len() >= MESSAGE_LIMIT {
        return Err(SimulationError::MessageOverflow {
            len: message.len(),
            limit: MESSAGE_LIMIT,
        });
    }
    Ok(message)
}
