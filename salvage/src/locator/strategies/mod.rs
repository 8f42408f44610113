//! Location strategies, tried in decreasing order of confidence.

mod fenced;
mod passthrough;
mod scan;

pub use fenced::{FenceStripStrategy, FencedBlockStrategy};
pub use passthrough::PassThroughStrategy;
pub use scan::{BalancedScanStrategy, BracketSpanStrategy};

use crate::locator::candidate::Candidate;

/// Trait for strategies that locate a JSON candidate inside messy text.
///
/// Each strategy represents one way of guessing where the structured value
/// lives. The locator tries them in priority order and stops at the first
/// one that produces a candidate.
pub trait LocateStrategy: Send + Sync + std::fmt::Debug {
    /// Returns the name of this strategy for diagnostics.
    fn name(&self) -> &'static str;

    /// Attempts to locate a candidate in the input.
    ///
    /// Returns `None` when the strategy does not apply to this input.
    fn locate(&self, input: &str) -> Option<Candidate>;

    /// Returns the priority of this strategy. Lower values are tried first.
    fn priority(&self) -> u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(FencedBlockStrategy::default().name(), "fenced_block");
        assert_eq!(PassThroughStrategy.name(), "pass_through");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(FencedBlockStrategy::default().priority() < FenceStripStrategy.priority());
        assert!(FenceStripStrategy.priority() < BalancedScanStrategy.priority());
        assert!(BalancedScanStrategy.priority() < BracketSpanStrategy.priority());
        assert!(BracketSpanStrategy.priority() < PassThroughStrategy.priority());
    }
}
