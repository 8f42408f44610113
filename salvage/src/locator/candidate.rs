//! Candidate substrings and their extraction origin.

/// A substring of the input believed to contain one complete JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The extracted text, not yet guaranteed to parse.
    pub text: String,

    /// Which strategy produced this candidate.
    pub origin: Origin,
}

/// How a candidate was located within the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Unwrapped from a code fence.
    Fenced {
        /// The fence language tag (e.g. "json"), if any.
        lang: Option<String>,
    },

    /// Fence tokens stripped manually after the fence regexes failed.
    FenceStripped,

    /// Balanced `{`..`}` scan with string/escape awareness.
    ObjectScan,

    /// Balanced `[`..`]` scan with string/escape awareness.
    ArrayScan,

    /// Naive first-`{`-to-last-`}` span, lower confidence.
    Bracketed,

    /// Nothing matched; the trimmed input passed through unchanged.
    Verbatim,
}

impl Candidate {
    /// Creates a candidate with the given origin.
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_new() {
        let candidate = Candidate::new(r#"{"a": 1}"#, Origin::ObjectScan);
        assert_eq!(candidate.text, r#"{"a": 1}"#);
        assert_eq!(candidate.origin, Origin::ObjectScan);
    }

    #[test]
    fn test_origin_equality() {
        assert_eq!(Origin::Verbatim, Origin::Verbatim);
        assert_ne!(Origin::ObjectScan, Origin::ArrayScan);
    }
}
