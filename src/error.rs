use thiserror::Error;

/// Failures that abort a profiling request.
///
/// Delimited parsing is deliberately total: ragged rows are repaired rather
/// than rejected, so there is no error variant for malformed delimited text.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The input yielded zero records after parsing (including header-only
    /// delimited text).
    #[error("input produced no records")]
    EmptyInput,

    /// A JSON document failed to parse.
    #[error("malformed JSON input: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// One line of a line-delimited JSON payload failed to parse. The whole
    /// operation aborts; there is no partial recovery.
    #[error("malformed JSON on line {line}: {source}")]
    MalformedJsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
