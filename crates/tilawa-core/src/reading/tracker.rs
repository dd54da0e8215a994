//! Viewport tracker: decides which verse is currently "active".
//!
//! In ratio mode the tracker picks the block with the greatest intersection
//! ratio among those at or above the visibility threshold. When the host
//! cannot provide per-scroll visibility information the tracker runs in
//! sampled mode instead: it reports the topmost visible block, evaluated at
//! most once per sample interval.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::events::ReadingEvent;
use super::region::{ScrollRegion, VerseBlock};

/// Default minimum visible fraction for a block to become active
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;

/// Default sample interval for the degraded tracker
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// How visibility is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Greatest intersection ratio above the threshold
    Ratio,
    /// Topmost visible block, sampled at a reduced rate
    Sampled { interval: Duration },
}

/// Pick the active verse from `(verse_number, intersection_ratio)` pairs.
///
/// Zero-ratio blocks and blocks below `threshold` are never selected. Ties on
/// ratio resolve to the lowest verse number.
pub fn select_active(ratios: &[(u32, f64)], threshold: f64) -> Option<u32> {
    ratios
        .iter()
        .filter(|(_, ratio)| *ratio > 0.0 && *ratio >= threshold)
        .fold(None, |best: Option<(u32, f64)>, &(verse, ratio)| match best {
            Some((best_verse, best_ratio))
                if best_ratio > ratio || (best_ratio == ratio && best_verse < verse) =>
            {
                Some((best_verse, best_ratio))
            }
            _ => Some((verse, ratio)),
        })
        .map(|(verse, _)| verse)
}

/// Topmost block with any visible part
pub fn topmost_visible(blocks: &[VerseBlock], view_top: f64, view_bottom: f64) -> Option<u32> {
    blocks
        .iter()
        .filter(|b| b.visible_height(view_top, view_bottom) > 0.0)
        .min_by(|a, b| {
            a.top
                .total_cmp(&b.top)
                .then(a.verse_number.cmp(&b.verse_number))
        })
        .map(|b| b.verse_number)
}

/// Tracks the most visible verse block in a scroll region
#[derive(Debug)]
pub struct ViewportTracker {
    mode: TrackingMode,
    threshold: f64,
    blocks: Vec<VerseBlock>,
    observing: bool,
    active: Option<u32>,
    last_sample: Option<Instant>,
    pending: VecDeque<ReadingEvent>,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl ViewportTracker {
    /// Ratio-mode tracker with the given threshold (clamped to [0, 1])
    pub fn new(threshold: f64) -> Self {
        Self {
            mode: TrackingMode::Ratio,
            threshold: threshold.clamp(0.0, 1.0),
            blocks: Vec::new(),
            observing: false,
            active: None,
            last_sample: None,
            pending: VecDeque::new(),
        }
    }

    /// Degraded tracker for hosts without a visibility primitive
    pub fn sampled(interval: Duration) -> Self {
        Self {
            mode: TrackingMode::Sampled { interval },
            ..Self::new(DEFAULT_VISIBILITY_THRESHOLD)
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Currently active verse, if one has been observed
    pub fn active_verse(&self) -> Option<u32> {
        self.active
    }

    /// Register `blocks` against `region`, replacing any earlier registration.
    ///
    /// Resets the active verse, discards undelivered events and evaluates the
    /// initial geometry immediately.
    pub fn observe(&mut self, blocks: &[VerseBlock], region: &ScrollRegion) {
        self.blocks = blocks.to_vec();
        self.observing = true;
        self.active = None;
        self.last_sample = None;
        self.pending.clear();
        tracing::debug!(blocks = self.blocks.len(), mode = ?self.mode, "Observing verse blocks");
        self.evaluate(region);
    }

    /// Replace the registered blocks after a re-layout of the same sequence.
    ///
    /// Unlike [`observe`](Self::observe) the active verse survives, so an
    /// event is raised only if a different verse ends up active.
    pub fn reobserve(&mut self, blocks: &[VerseBlock], region: &ScrollRegion) {
        self.blocks = blocks.to_vec();
        self.observing = true;
        self.last_sample = None;
        self.evaluate(region);
    }

    /// React to a geometry change (scroll, resize). In sampled mode the
    /// evaluation is skipped until the sample interval has elapsed.
    ///
    /// Returns `false` when the change was not evaluated (sample skipped or
    /// not observing), so the caller can report it again later.
    pub fn on_geometry_changed(&mut self, region: &ScrollRegion, now: Instant) -> bool {
        if !self.observing {
            return false;
        }
        if let TrackingMode::Sampled { interval } = self.mode {
            if let Some(last) = self.last_sample {
                if now.saturating_duration_since(last) < interval {
                    return false;
                }
            }
            self.last_sample = Some(now);
        }
        self.evaluate(region);
        true
    }

    /// Drain pending "active verse changed" events in emission order
    pub fn events(&mut self) -> impl Iterator<Item = ReadingEvent> + '_ {
        self.pending.drain(..)
    }

    /// Stop monitoring and drop registrations and undelivered events
    pub fn stop(&mut self) {
        if self.observing {
            tracing::debug!("Viewport tracker stopped");
        }
        self.observing = false;
        self.blocks.clear();
        self.last_sample = None;
        self.pending.clear();
    }

    fn evaluate(&mut self, region: &ScrollRegion) {
        let view_top = region.scroll_offset();
        let view_bottom = region.viewport_bottom();

        let candidate = match self.mode {
            TrackingMode::Ratio => {
                let ratios: Vec<(u32, f64)> = self
                    .blocks
                    .iter()
                    .map(|b| (b.verse_number, b.intersection_ratio(view_top, view_bottom)))
                    .collect();
                select_active(&ratios, self.threshold)
            }
            TrackingMode::Sampled { .. } => topmost_visible(&self.blocks, view_top, view_bottom),
        };

        if let Some(verse) = candidate {
            if self.active != Some(verse) {
                self.active = Some(verse);
                self.pending.push_back(ReadingEvent::ActiveVerseChanged(verse));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seven 100px blocks stacked from the top
    fn seven_blocks() -> Vec<VerseBlock> {
        (0..7)
            .map(|i| VerseBlock::new(i + 1, i as f64 * 100.0, 100.0))
            .collect()
    }

    fn region_at(blocks: &[VerseBlock], offset: f64, viewport: f64) -> ScrollRegion {
        let mut region = ScrollRegion::new(viewport);
        region.set_layout(blocks.to_vec(), 0.0);
        region.set_scroll_offset(offset);
        region
    }

    #[test]
    fn test_threshold_excludes_low_and_zero_ratios() {
        let ratios = [(1, 0.1), (2, 0.5), (3, 0.0)];
        assert_eq!(select_active(&ratios, 0.3), Some(2));
    }

    #[test]
    fn test_tie_resolves_to_lowest_verse() {
        assert_eq!(select_active(&[(6, 0.6), (5, 0.6)], 0.3), Some(5));
        assert_eq!(select_active(&[(5, 0.6), (6, 0.6)], 0.3), Some(5));
    }

    #[test]
    fn test_nothing_eligible() {
        assert_eq!(select_active(&[(1, 0.2), (2, 0.0)], 0.3), None);
        assert_eq!(select_active(&[(1, 0.0)], 0.0), None);
        assert_eq!(select_active(&[], 0.3), None);
    }

    #[test]
    fn test_observe_emits_initial_active_verse() {
        let blocks = seven_blocks();
        let region = region_at(&blocks, 0.0, 250.0);
        let mut tracker = ViewportTracker::default();
        tracker.observe(&blocks, &region);

        // Blocks 1 and 2 are fully visible, the tie goes to 1
        assert_eq!(tracker.active_verse(), Some(1));
        let events: Vec<_> = tracker.events().collect();
        assert_eq!(events, vec![ReadingEvent::ActiveVerseChanged(1)]);
    }

    #[test]
    fn test_change_only_events() {
        let blocks = seven_blocks();
        let mut region = region_at(&blocks, 0.0, 100.0);
        let mut tracker = ViewportTracker::default();
        let now = Instant::now();
        tracker.observe(&blocks, &region);
        tracker.events().for_each(drop);

        // Block 1 still has 0.9 visible against 0.1 for block 2
        region.set_scroll_offset(10.0);
        tracker.on_geometry_changed(&region, now);
        assert_eq!(tracker.events().count(), 0);

        region.set_scroll_offset(60.0);
        tracker.on_geometry_changed(&region, now);
        assert_eq!(
            tracker.events().collect::<Vec<_>>(),
            vec![ReadingEvent::ActiveVerseChanged(2)]
        );
    }

    #[test]
    fn test_active_kept_when_nothing_eligible() {
        // One tall block and a small window below threshold
        let blocks = vec![VerseBlock::new(1, 0.0, 100.0), VerseBlock::new(2, 100.0, 1000.0)];
        let mut region = region_at(&blocks, 0.0, 100.0);
        let mut tracker = ViewportTracker::default();
        tracker.observe(&blocks, &region);
        assert_eq!(tracker.active_verse(), Some(1));

        // Block 2 is only 10% visible, block 1 is gone
        region.set_scroll_offset(100.0);
        tracker.on_geometry_changed(&region, Instant::now());
        assert_eq!(tracker.active_verse(), Some(1));
    }

    #[test]
    fn test_observe_restarts_sequence() {
        let blocks = seven_blocks();
        let region = region_at(&blocks, 300.0, 100.0);
        let mut tracker = ViewportTracker::default();
        tracker.observe(&blocks, &region);
        assert_eq!(tracker.active_verse(), Some(4));

        let other: Vec<VerseBlock> = (0..3)
            .map(|i| VerseBlock::new(i + 1, i as f64 * 50.0, 50.0))
            .collect();
        let region = region_at(&other, 0.0, 100.0);
        tracker.observe(&other, &region);
        assert_eq!(
            tracker.events().collect::<Vec<_>>(),
            vec![ReadingEvent::ActiveVerseChanged(1)]
        );
    }

    #[test]
    fn test_reobserve_keeps_active_verse() {
        let blocks = seven_blocks();
        let region = region_at(&blocks, 300.0, 100.0);
        let mut tracker = ViewportTracker::default();
        tracker.observe(&blocks, &region);
        tracker.events().for_each(drop);

        // Taller blocks with the reader re-anchored on verse 4
        let taller: Vec<VerseBlock> = (0..7)
            .map(|i| VerseBlock::new(i + 1, i as f64 * 150.0, 150.0))
            .collect();
        let region = region_at(&taller, 450.0, 100.0);
        tracker.reobserve(&taller, &region);
        assert_eq!(tracker.active_verse(), Some(4));
        assert_eq!(tracker.events().count(), 0);

        let region = region_at(&taller, 750.0, 100.0);
        tracker.reobserve(&taller, &region);
        assert_eq!(
            tracker.events().collect::<Vec<_>>(),
            vec![ReadingEvent::ActiveVerseChanged(6)]
        );
    }

    #[test]
    fn test_stop_is_idempotent_and_silences() {
        let blocks = seven_blocks();
        let mut region = region_at(&blocks, 0.0, 100.0);
        let mut tracker = ViewportTracker::default();
        tracker.observe(&blocks, &region);
        tracker.stop();
        tracker.stop();
        assert_eq!(tracker.events().count(), 0);

        region.set_scroll_offset(400.0);
        tracker.on_geometry_changed(&region, Instant::now());
        assert_eq!(tracker.events().count(), 0);
        assert!(!tracker.is_observing());
    }

    #[test]
    fn test_sampled_mode_reports_topmost_at_reduced_rate() {
        let blocks = seven_blocks();
        let mut region = region_at(&blocks, 0.0, 300.0);
        let mut tracker = ViewportTracker::sampled(Duration::from_millis(250));
        let t0 = Instant::now();
        tracker.observe(&blocks, &region);
        tracker.on_geometry_changed(&region, t0);
        assert_eq!(tracker.active_verse(), Some(1));

        // Only the last 5px of block 2 remain visible, still enough to be topmost
        region.set_scroll_offset(195.0);
        assert!(!tracker.on_geometry_changed(&region, t0 + Duration::from_millis(100)));
        assert_eq!(tracker.active_verse(), Some(1), "sample skipped inside interval");

        assert!(tracker.on_geometry_changed(&region, t0 + Duration::from_millis(260)));
        assert_eq!(tracker.active_verse(), Some(2));
    }

    #[test]
    fn test_topmost_visible_ignores_hidden_blocks() {
        let blocks = seven_blocks();
        assert_eq!(topmost_visible(&blocks, 250.0, 400.0), Some(3));
        assert_eq!(topmost_visible(&blocks, 800.0, 900.0), None);
    }
}
