use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Duplicate comparator tag: {0}")]
    DuplicateTag(String),

    #[error("Unknown comparator tag: {0}")]
    UnknownTag(String),
}

pub type Result<T> = std::result::Result<T, ProjDiffError>;

/// Failure of a single comparator run.
///
/// A comparator never fails because the two snapshots differ; it fails only
/// when an input cannot be interpreted or an injected capability cannot
/// answer. The orchestration layer records these per comparator so sibling
/// comparators still run.
#[derive(Error, Debug)]
pub enum ComparatorError {
    #[error("Malformed project: {0}")]
    MalformedProject(String),

    #[error("System capability error: {0}")]
    System(#[from] SystemError),
}

#[derive(Error, Debug)]
pub enum SystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No settings resolver configured")]
    NoResolver,

    #[error("Resolver command failed ({command}): {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Resolver command timed out after {seconds}s ({command})")]
    Timeout { command: String, seconds: u64 },

    #[error("Unparseable resolver output: {0}")]
    InvalidOutput(String),

    #[error("No resolution available for target '{target}' configuration '{configuration}'")]
    NotAvailable { target: String, configuration: String },
}
