//! Instrumentation hooks for extraction passes.
//!
//! The driver reports what it does through an [`ExtractionObserver`] instead of printing.
//! Observers can also stop a pass between two seeds.

use std::ops::ControlFlow;

use crate::grid::Coordinate;

/// Final state of a single seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed already belonged to an earlier cluster.
    AlreadyClaimed,
    /// The seed is not bright and was not claimed.
    Background,
    /// A cluster was grown and kept.
    Accepted { size: usize },
    /// A cluster was grown and rejected by the size filter. Its pixels stay claimed.
    Discarded { size: usize },
}

/// Counters for a finished pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub seeds_scanned: usize,
    pub already_claimed: usize,
    pub background: usize,
    pub accepted: usize,
    pub discarded: usize,
    /// Pixels claimed by accepted and discarded clusters together.
    pub claimed_pixels: usize,
}

impl PassSummary {
    pub(crate) fn record(&mut self, outcome: SeedOutcome) {
        self.seeds_scanned += 1;
        match outcome {
            SeedOutcome::AlreadyClaimed => self.already_claimed += 1,
            SeedOutcome::Background => self.background += 1,
            SeedOutcome::Accepted { size } => {
                self.accepted += 1;
                self.claimed_pixels += size;
            }
            SeedOutcome::Discarded { size } => {
                self.discarded += 1;
                self.claimed_pixels += size;
            }
        }
    }
}

/// Receives events from an extraction pass.
///
/// All methods have empty default implementations.
pub trait ExtractionObserver {
    /// Called once before the first seed, after the inputs have been validated.
    fn pass_started(&mut self, _seed_count: usize) {}

    /// Called after each seed reaches its final state.
    ///
    /// Returning [`ControlFlow::Break`] abandons the rest of the pass; the extraction then
    /// fails with [`crate::ExtractError::Cancelled`].
    fn seed_processed(
        &mut self,
        _index: usize,
        _seed: Coordinate,
        _outcome: SeedOutcome,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called once after the last seed of a completed pass.
    fn pass_finished(&mut self, _summary: &PassSummary) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {}

/// Forwards events to the [`log`] facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ExtractionObserver for LogObserver {
    fn pass_started(&mut self, seed_count: usize) {
        log::debug!("cluster extraction started with {seed_count} seeds");
    }

    fn seed_processed(
        &mut self,
        index: usize,
        seed: Coordinate,
        outcome: SeedOutcome,
    ) -> ControlFlow<()> {
        log::trace!("seed #{index} at ({}, {}): {outcome:?}", seed.x, seed.y);
        ControlFlow::Continue(())
    }

    fn pass_finished(&mut self, summary: &PassSummary) {
        log::debug!(
            "cluster extraction finished: {} accepted, {} discarded, {} seeds already claimed, {} on background, {} pixels claimed",
            summary.accepted,
            summary.discarded,
            summary.already_claimed,
            summary.background,
            summary.claimed_pixels
        );
    }
}

impl<O: ExtractionObserver + ?Sized> ExtractionObserver for &mut O {
    fn pass_started(&mut self, seed_count: usize) {
        (**self).pass_started(seed_count);
    }

    fn seed_processed(
        &mut self,
        index: usize,
        seed: Coordinate,
        outcome: SeedOutcome,
    ) -> ControlFlow<()> {
        (**self).seed_processed(index, seed, outcome)
    }

    fn pass_finished(&mut self, summary: &PassSummary) {
        (**self).pass_finished(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = PassSummary::default();
        summary.record(SeedOutcome::Accepted { size: 9 });
        summary.record(SeedOutcome::AlreadyClaimed);
        summary.record(SeedOutcome::Discarded { size: 2 });
        summary.record(SeedOutcome::Background);
        summary.record(SeedOutcome::AlreadyClaimed);

        assert_eq!(
            summary,
            PassSummary {
                seeds_scanned: 5,
                already_claimed: 2,
                background: 1,
                accepted: 1,
                discarded: 1,
                claimed_pixels: 11,
            }
        );
    }

    #[test]
    fn test_default_hooks_continue() {
        let mut noop = NoopObserver;
        assert_eq!(
            noop.seed_processed(0, Coordinate::new(0, 0), SeedOutcome::Background),
            ControlFlow::Continue(())
        );
        let mut logger = LogObserver;
        assert_eq!(
            logger.seed_processed(3, Coordinate::new(1, 2), SeedOutcome::Accepted { size: 4 }),
            ControlFlow::Continue(())
        );
    }
}
