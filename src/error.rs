//! Error kinds surfaced by the decoding and reading layers.
use thiserror::Error;

/// All failure modes of the telemetry core.
///
/// Every variant carries the diagnostics a caller needs to report the problem
/// without re-deriving them: expected vs. found byte counts, the offending
/// field name, the unrepresentable raw timestamp.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The source length is not a whole number of records. Fatal for the
    /// entire read pass; nothing is decoded.
    #[error("invalid file size: expected a multiple of {expected}, but found {found}")]
    SizeMismatch { expected: u64, found: u64 },

    /// A chunk handed to a decoder was not exactly one record long. The
    /// reader slices the source itself, so hitting this indicates a chunking
    /// bug rather than bad user input.
    #[error("record length mismatch: expected {expected} bytes, got {found}")]
    RecordLength { expected: usize, found: usize },

    /// A caller asked a packet for a field its layout does not declare.
    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    /// `read_all` was invoked a second time on the same reader. The cursor is
    /// single-pass; reopen the path to restart.
    #[error("reader already exhausted; reopen the source to read again")]
    Exhausted,

    /// A raw epoch-seconds value outside the representable calendar range.
    #[error("timestamp {0} is outside the representable range")]
    TimestampRange(i64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
