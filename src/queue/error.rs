//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("log store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        source: base64::DecodeError,
    },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
