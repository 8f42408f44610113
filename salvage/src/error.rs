//! Internal error types for the sanitization pipeline.
//!
//! These errors travel between pipeline stages only. The public sanitize
//! surface never returns them: every failure is absorbed into a fallback
//! and reported through the diagnostic sink.

/// Errors produced while turning raw text into a parsed candidate value.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    /// Input was empty or whitespace-only.
    #[error("empty input")]
    Empty,

    /// No candidate substring could be parsed, even after repair.
    #[error("unparseable candidate: {0}")]
    Unparseable(#[source] serde_json::Error),
}

/// Errors produced by truncation repair.
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// The candidate still fails to parse after closing delimiters and
    /// terminating strings.
    #[error("candidate still invalid after repair: {0}")]
    StillInvalid(#[from] serde_json::Error),
}
