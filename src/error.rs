use thiserror::Error;

/// Errors raised while decoding workflow stage/status codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The (stage, status) pair has no entry in the action table
    #[error("Invalid stage/status pair: stage {stage}, status {status}")]
    InvalidStageOrStatus { stage: usize, status: usize },
}

/// Errors raised by the date format mini-language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unsupported format code: {0}")]
    UnsupportedFormatCode(char),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors raised while reading or rendering a marble
#[derive(Debug, Error)]
pub enum MarbleError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("A marble carries exactly 8 check records, found {0}")]
    InvalidCheckCount(usize),
}
