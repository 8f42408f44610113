//! Last-resort pass-through strategy.

use super::LocateStrategy;
use crate::locator::candidate::{Candidate, Origin};

/// Strategy that returns the trimmed input unchanged.
///
/// Runs last, when nothing else matched and the text does not look like
/// structured data. The subsequent parse attempt decides what happens; for
/// plain prose that means the caller's fallback is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughStrategy;

impl LocateStrategy for PassThroughStrategy {
    #[inline]
    fn name(&self) -> &'static str {
        "pass_through"
    }

    fn locate(&self, input: &str) -> Option<Candidate> {
        Some(Candidate::new(input.trim(), Origin::Verbatim))
    }

    #[inline]
    fn priority(&self) -> u8 {
        5
    }
}
