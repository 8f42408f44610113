//! Candidate location: finding the substring most likely to hold one
//! complete JSON value inside noisy generated text.

mod candidate;
mod cleaner;
pub mod strategies;

pub use candidate::{Candidate, Origin};
pub use cleaner::strip_noise;
use strategies::{
    BalancedScanStrategy, BracketSpanStrategy, FenceStripStrategy, FencedBlockStrategy,
    LocateStrategy, PassThroughStrategy,
};

/// Locator that tries strategies in priority order, first success wins.
///
/// The ordering reflects decreasing confidence: fenced blocks are the
/// strongest signal, manual fence stripping covers cut-off fences, the
/// escape-aware balanced scans pull values out of prose, and the naive
/// bracket span is a validated last guess before passing the text through
/// untouched.
///
/// # Examples
///
/// ```
/// use salvage::locator::CandidateLocator;
///
/// let locator = CandidateLocator::new();
/// let candidate = locator.locate("Result: ```json\n{\"ok\": true}\n```");
/// assert_eq!(candidate.text, "{\"ok\": true}");
/// ```
#[derive(Debug)]
pub struct CandidateLocator {
    /// Strategies in priority order.
    strategies: Vec<Box<dyn LocateStrategy>>,
}

impl Default for CandidateLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateLocator {
    /// Creates a locator with the default strategy set.
    pub fn new() -> Self {
        let mut strategies: Vec<Box<dyn LocateStrategy>> = vec![
            Box::new(FencedBlockStrategy),
            Box::new(FenceStripStrategy),
            Box::new(BalancedScanStrategy),
            Box::new(BracketSpanStrategy),
            Box::new(PassThroughStrategy),
        ];

        strategies.sort_by_key(|s| s.priority());

        Self { strategies }
    }

    /// Strips noise from the input and returns the best-guess candidate.
    ///
    /// Always produces a candidate: the pass-through strategy accepts any
    /// input, so the worst case is the trimmed text itself.
    pub fn locate(&self, input: &str) -> Candidate {
        let cleaned = strip_noise(input);

        for strategy in &self.strategies {
            if let Some(candidate) = strategy.locate(&cleaned) {
                return candidate;
            }
        }

        Candidate::new(cleaned.trim(), Origin::Verbatim)
    }

    /// Returns the names of registered strategies in priority order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_order() {
        let locator = CandidateLocator::new();
        assert_eq!(
            locator.strategy_names(),
            vec![
                "fenced_block",
                "fence_strip",
                "balanced_scan",
                "bracket_span",
                "pass_through"
            ]
        );
    }

    #[test]
    fn test_fence_beats_scan() {
        let locator = CandidateLocator::new();
        // Both a fence and a bare object are present; the fence wins.
        let candidate = locator.locate("{\"outside\": 1}\n```json\n{\"inside\": 2}\n```");

        assert_eq!(candidate.text, r#"{"inside": 2}"#);
        assert!(matches!(candidate.origin, Origin::Fenced { .. }));
    }

    #[test]
    fn test_scan_when_no_fence() {
        let locator = CandidateLocator::new();
        let candidate = locator.locate(r#"answer: {"a": 1} done"#);

        assert_eq!(candidate.text, r#"{"a": 1}"#);
        assert_eq!(candidate.origin, Origin::ObjectScan);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let locator = CandidateLocator::new();
        let candidate = locator.locate("  no structure here  ");

        assert_eq!(candidate.text, "no structure here");
        assert_eq!(candidate.origin, Origin::Verbatim);
    }

    #[test]
    fn test_bom_stripped_before_location() {
        let locator = CandidateLocator::new();
        let candidate = locator.locate("\u{FEFF}{\"a\": 1}");

        assert_eq!(candidate.text, r#"{"a": 1}"#);
    }

    #[test]
    fn test_truncated_object_reaches_passthrough() {
        let locator = CandidateLocator::new();
        // No balanced span and no fence: the scan and bracket strategies
        // fail, so the trimmed text flows through for repair downstream.
        let candidate = locator.locate(r#"{"a": "x", "b": {"c": "y"#);

        assert_eq!(candidate.origin, Origin::Verbatim);
        assert_eq!(candidate.text, r#"{"a": "x", "b": {"c": "y"#);
    }
}
