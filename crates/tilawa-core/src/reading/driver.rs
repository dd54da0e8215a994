//! Scroll driver: frame-rate independent auto-scroll plus smooth verse jumps.
//!
//! Each tick converts elapsed wall-clock time into distance at the session's
//! rate and accumulates it in a carryover. Only whole pixels are applied, the
//! fraction is kept for the next tick, so the average speed is exact whatever
//! the tick rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::easing::EasingType;
use super::events::ReadingEvent;
use super::region::ScrollRegion;
use super::timing::{elapsed_secs, is_complete, lerp, progress};
use crate::config::{ReadingConfig, ScrollConfig};

pub const MIN_RATE_PERCENT: u32 = 10;
pub const MAX_RATE_PERCENT: u32 = 100;

/// Pixels per second at 100% speed
pub const DEFAULT_MAX_RATE: f64 = 40.0;

/// Distance from the end of content at which auto-scroll stops
pub const DEFAULT_END_MARGIN: f64 = 20.0;

/// Driver parameters
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub max_rate_px_per_sec: f64,
    pub end_margin: f64,
    pub smooth_jumps: bool,
    pub jump_duration: Duration,
    pub easing: EasingType,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_rate_px_per_sec: DEFAULT_MAX_RATE,
            end_margin: DEFAULT_END_MARGIN,
            smooth_jumps: true,
            jump_duration: Duration::from_millis(300),
            easing: EasingType::Cubic,
        }
    }
}

impl DriverConfig {
    pub fn from_config(reading: &ReadingConfig, scroll: &ScrollConfig) -> Self {
        Self {
            max_rate_px_per_sec: if reading.max_speed_px_per_sec > 0.0 {
                reading.max_speed_px_per_sec
            } else {
                DEFAULT_MAX_RATE
            },
            end_margin: reading.end_margin_px.max(0.0),
            smooth_jumps: scroll.smooth_enabled && scroll.animation_duration_ms > 0,
            jump_duration: Duration::from_millis(scroll.animation_duration_ms),
            easing: scroll.easing,
        }
    }

    /// Pixels per second for a speed percentage (clamped to 10-100)
    pub fn rate_for(&self, rate_percent: u32) -> f64 {
        clamp_rate_percent(rate_percent) as f64 / 100.0 * self.max_rate_px_per_sec
    }
}

/// Clamp a user-facing speed percentage to the supported range
#[inline]
pub fn clamp_rate_percent(rate_percent: u32) -> u32 {
    rate_percent.clamp(MIN_RATE_PERCENT, MAX_RATE_PERCENT)
}

/// One active auto-scroll run
#[derive(Debug, Clone)]
struct ScrollSession {
    rate_percent: u32,
    /// Pixels per second, always > 0
    rate: f64,
    /// Fractional pixels not yet applied
    carryover: f64,
    last_tick: Option<Instant>,
}

/// One-shot smooth transition to a verse
#[derive(Debug, Clone)]
struct Jump {
    verse: u32,
    from: f64,
    to: f64,
    start: Option<Instant>,
}

/// Driver state (per scroll region)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Advances a region's scroll offset while a session is running
#[derive(Debug, Default)]
pub struct ScrollDriver {
    config: DriverConfig,
    session: Option<ScrollSession>,
    jump: Option<Jump>,
    pending: VecDeque<ReadingEvent>,
}

impl ScrollDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            session: None,
            jump: None,
            pending: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        if self.session.is_some() {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a verse jump is still in flight
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Speed percentage of the running session
    pub fn rate_percent(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.rate_percent)
    }

    /// Pixels per second of the running session
    pub fn rate(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.rate)
    }

    /// Begin auto-scroll. Returns `false` without touching the running
    /// session if one is already active.
    pub fn start(&mut self, rate_percent: u32) -> bool {
        if self.session.is_some() {
            tracing::debug!("Auto-scroll already running, start ignored");
            return false;
        }
        let rate_percent = clamp_rate_percent(rate_percent);
        let rate = self.config.rate_for(rate_percent);
        self.session = Some(ScrollSession {
            rate_percent,
            rate,
            carryover: 0.0,
            last_tick: None,
        });
        tracing::info!(rate_percent, rate_px_per_sec = rate, "Auto-scroll started");
        true
    }

    /// Change the running session's speed; applies from the next tick
    pub fn set_rate(&mut self, rate_percent: u32) -> bool {
        let rate_percent = clamp_rate_percent(rate_percent);
        let rate = self.config.rate_for(rate_percent);
        match self.session.as_mut() {
            Some(session) => {
                session.rate_percent = rate_percent;
                session.rate = rate;
                tracing::debug!(rate_percent, "Auto-scroll rate updated");
                true
            }
            None => false,
        }
    }

    /// End the session. Idempotent; the offset stays where it is and no
    /// further auto-scroll events are delivered.
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            tracing::info!("Auto-scroll stopped");
        }
        self.pending
            .retain(|e| !matches!(e, ReadingEvent::AutoScrollEnded));
    }

    /// Drop an in-flight jump and any undelivered `JumpCompleted`
    pub fn cancel_jump(&mut self) {
        if let Some(jump) = self.jump.take() {
            tracing::debug!(verse = jump.verse, "Jump cancelled");
        }
        self.pending
            .retain(|e| !matches!(e, ReadingEvent::JumpCompleted(_)));
    }

    /// Re-aim an in-flight jump at its verse's position in a new layout.
    /// The transition restarts from the current offset; a verse that is no
    /// longer laid out cancels the jump.
    pub fn retarget_jump(&mut self, region: &ScrollRegion) {
        let Some(verse) = self.jump.as_ref().map(|j| j.verse) else {
            return;
        };
        match region.offset_for_verse(verse) {
            Some(to) => {
                self.jump = Some(Jump {
                    verse,
                    from: region.scroll_offset(),
                    to,
                    start: None,
                });
            }
            None => self.cancel_jump(),
        }
    }

    /// Start a smooth transition aligning `verse_number`'s top edge with the
    /// viewport top. Returns `false` if the verse is not laid out.
    ///
    /// The transition clock starts on the next tick. Auto-scroll is neither
    /// started nor stopped.
    pub fn scroll_to(&mut self, region: &mut ScrollRegion, verse_number: u32) -> bool {
        let Some(target) = region.offset_for_verse(verse_number) else {
            tracing::debug!(verse_number, "Jump target not in current surah");
            return false;
        };

        if !self.config.smooth_jumps || (region.scroll_offset() - target).abs() < f64::EPSILON {
            region.set_scroll_offset(target);
            self.jump = None;
            self.pending.push_back(ReadingEvent::JumpCompleted(verse_number));
            return true;
        }

        self.jump = Some(Jump {
            verse: verse_number,
            from: region.scroll_offset(),
            to: target,
            start: None,
        });
        true
    }

    /// Advance by one scheduling tick
    pub fn tick(&mut self, region: &mut ScrollRegion, now: Instant) {
        if self.jump.is_some() {
            self.step_jump(region, now);
            if let Some(session) = self.session.as_mut() {
                // No distance accrues while a jump owns the offset
                session.last_tick = None;
            }
            return;
        }
        self.step_session(region, now);
    }

    /// Drain pending driver events
    pub fn events(&mut self) -> impl Iterator<Item = ReadingEvent> + '_ {
        self.pending.drain(..)
    }

    fn step_jump(&mut self, region: &mut ScrollRegion, now: Instant) {
        let Some(jump) = self.jump.as_mut() else {
            return;
        };
        let start = *jump.start.get_or_insert(now);
        let duration = self.config.jump_duration;

        if is_complete(start, now, duration) {
            region.set_scroll_offset(jump.to);
            let verse = jump.verse;
            self.jump = None;
            self.pending.push_back(ReadingEvent::JumpCompleted(verse));
        } else {
            let t = self.config.easing.apply(progress(start, now, duration));
            region.set_scroll_offset(lerp(jump.from, jump.to, t));
        }
    }

    fn step_session(&mut self, region: &mut ScrollRegion, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let dt = elapsed_secs(session.last_tick, now);
        session.last_tick = Some(now);

        session.carryover += session.rate * dt;
        let whole = session.carryover.floor();
        if whole >= 1.0 {
            session.carryover -= whole;
            region.scroll_by(whole);
        }

        let end = region.content_height() - self.config.end_margin;
        if region.viewport_bottom() >= end {
            self.session = None;
            self.pending.push_back(ReadingEvent::AutoScrollEnded);
            tracing::info!(offset = region.scroll_offset(), "Auto-scroll reached end of content");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::region::VerseBlock;

    fn tall_region() -> ScrollRegion {
        ScrollRegion::with_extent(100_000.0, 500.0)
    }

    /// Tick at `hz` for `seconds`, starting at `t0`, and return the end instant
    fn run_for(driver: &mut ScrollDriver, region: &mut ScrollRegion, t0: Instant, hz: u32, seconds: u32) -> Instant {
        let step = Duration::from_secs(1) / hz;
        let mut now = t0;
        driver.tick(region, now);
        for _ in 0..hz * seconds {
            now += step;
            driver.tick(region, now);
        }
        now
    }

    fn seven_verse_region() -> ScrollRegion {
        let blocks = (0..7)
            .map(|i| VerseBlock::new(i + 1, i as f64 * 200.0, 200.0))
            .collect();
        let mut region = ScrollRegion::new(500.0);
        region.set_layout(blocks, 0.0);
        region
    }

    #[test]
    fn test_rate_mapping() {
        let config = DriverConfig::default();
        assert!((config.rate_for(100) - 40.0).abs() < 1e-9);
        assert!((config.rate_for(50) - 20.0).abs() < 1e-9);
        assert!((config.rate_for(0) - 4.0).abs() < 1e-9);
        assert!((config.rate_for(250) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_independent_of_tick_rate() {
        for percent in [10, 35, 50, 75, 100] {
            let expected = DriverConfig::default().rate_for(percent) * 10.0;
            for hz in [60, 20] {
                let mut driver = ScrollDriver::default();
                let mut region = tall_region();
                assert!(driver.start(percent));
                run_for(&mut driver, &mut region, Instant::now(), hz, 10);
                let moved = region.scroll_offset();
                assert!(
                    (moved - expected).abs() <= 1.0,
                    "{}% at {}Hz moved {} expected {}",
                    percent,
                    hz,
                    moved,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_first_tick_does_not_move() {
        let mut driver = ScrollDriver::default();
        let mut region = tall_region();
        driver.start(100);
        driver.tick(&mut region, Instant::now());
        assert_eq!(region.scroll_offset(), 0.0);
    }

    #[test]
    fn test_sub_pixel_motion_is_carried() {
        let mut driver = ScrollDriver::default();
        let mut region = tall_region();
        driver.start(10); // 4 px/s
        let t0 = Instant::now();
        driver.tick(&mut region, t0);
        // 1/8 px per tick, nothing applied until 8 ticks have elapsed
        let mut now = t0;
        for _ in 0..7 {
            now += Duration::from_secs(1) / 32;
            driver.tick(&mut region, now);
        }
        assert_eq!(region.scroll_offset(), 0.0);
        now += Duration::from_secs(1) / 32;
        driver.tick(&mut region, now);
        assert_eq!(region.scroll_offset(), 1.0);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut driver = ScrollDriver::default();
        assert!(driver.start(50));
        assert!(!driver.start(100));
        assert_eq!(driver.rate_percent(), Some(50));
    }

    #[test]
    fn test_set_rate_keeps_session() {
        let mut driver = ScrollDriver::default();
        assert!(!driver.set_rate(80));
        driver.start(20);
        assert!(driver.set_rate(200));
        assert_eq!(driver.rate_percent(), Some(100));
        assert_eq!(driver.state(), DriverState::Running);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut driver = ScrollDriver::default();
        let mut region = tall_region();
        driver.start(100);
        let end = run_for(&mut driver, &mut region, Instant::now(), 60, 1);
        driver.stop();
        let offset = region.scroll_offset();
        driver.stop();
        driver.tick(&mut region, end + Duration::from_secs(1));
        assert_eq!(region.scroll_offset(), offset);
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn test_stops_exactly_at_end_margin() {
        let mut driver = ScrollDriver::default();
        let mut region = ScrollRegion::with_extent(1000.0, 500.0);
        driver.start(100);

        let mut now = Instant::now();
        driver.tick(&mut region, now);
        let mut ended = 0;
        while driver.is_running() {
            let before = region.scroll_offset();
            now += Duration::from_millis(1000 / 60);
            driver.tick(&mut region, now);
            let events: Vec<_> = driver.events().collect();
            if region.scroll_offset() < 480.0 {
                assert!(driver.is_running(), "stopped early at {}", region.scroll_offset());
                assert!(events.is_empty());
            } else {
                assert!(before < 480.0);
                ended += events
                    .iter()
                    .filter(|e| **e == ReadingEvent::AutoScrollEnded)
                    .count();
            }
        }
        assert_eq!(region.scroll_offset(), 480.0);
        assert_eq!(ended, 1);

        // Nothing else is emitted after the session ended
        driver.tick(&mut region, now + Duration::from_secs(1));
        assert_eq!(driver.events().count(), 0);
    }

    #[test]
    fn test_restart_after_end_is_allowed() {
        let mut driver = ScrollDriver::default();
        let mut region = ScrollRegion::with_extent(1000.0, 500.0);
        region.set_scroll_offset(490.0);
        driver.start(50);
        driver.tick(&mut region, Instant::now());
        assert!(!driver.is_running());
        assert!(driver.start(50));
    }

    #[test]
    fn test_scroll_to_unknown_verse_fails() {
        let mut driver = ScrollDriver::default();
        let mut region = seven_verse_region();
        assert!(!driver.scroll_to(&mut region, 999));
        assert!(!driver.is_jumping());
        assert_eq!(driver.events().count(), 0);
    }

    #[test]
    fn test_scroll_to_aligns_top_edge_once() {
        let mut driver = ScrollDriver::default();
        let mut region = seven_verse_region();
        assert!(driver.scroll_to(&mut region, 3));
        assert!(!driver.is_running());

        let t0 = Instant::now();
        let mut now = t0;
        let mut completions = 0;
        for _ in 0..40 {
            driver.tick(&mut region, now);
            completions += driver
                .events()
                .filter(|e| *e == ReadingEvent::JumpCompleted(3))
                .count();
            now += Duration::from_millis(16);
        }
        assert_eq!(region.scroll_offset(), 400.0);
        assert_eq!(completions, 1);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_scroll_to_without_smoothing_lands_immediately() {
        let config = DriverConfig {
            smooth_jumps: false,
            ..Default::default()
        };
        let mut driver = ScrollDriver::new(config);
        let mut region = seven_verse_region();
        assert!(driver.scroll_to(&mut region, 7));
        // Verse 7 starts at 1200 but the offset is capped at 1400 - 500
        assert_eq!(region.scroll_offset(), 900.0);
        assert_eq!(
            driver.events().collect::<Vec<_>>(),
            vec![ReadingEvent::JumpCompleted(7)]
        );
    }

    #[test]
    fn test_cancel_jump_leaves_offset_and_drops_completion() {
        let mut driver = ScrollDriver::default();
        let mut region = seven_verse_region();
        driver.scroll_to(&mut region, 4);
        let t0 = Instant::now();
        driver.tick(&mut region, t0);
        driver.tick(&mut region, t0 + Duration::from_millis(100));
        let mid = region.scroll_offset();
        assert!(mid > 0.0 && mid < 600.0);

        driver.cancel_jump();
        driver.cancel_jump();
        assert!(!driver.is_jumping());
        driver.tick(&mut region, t0 + Duration::from_millis(500));
        assert_eq!(region.scroll_offset(), mid);
        assert_eq!(driver.events().count(), 0);
    }

    #[test]
    fn test_retarget_jump_follows_new_layout() {
        let mut driver = ScrollDriver::default();
        let mut region = seven_verse_region();
        driver.scroll_to(&mut region, 3);
        let t0 = Instant::now();
        driver.tick(&mut region, t0);

        // Blocks shrink to 50 each: verse 3 now starts at 100
        region.set_layout(
            (0..7).map(|i| VerseBlock::new(i + 1, i as f64 * 50.0, 50.0)).collect(),
            1400.0,
        );
        driver.retarget_jump(&region);
        let mut now = t0;
        while driver.is_jumping() {
            now += Duration::from_millis(16);
            driver.tick(&mut region, now);
        }
        assert_eq!(region.scroll_offset(), 100.0);
        assert_eq!(
            driver.events().collect::<Vec<_>>(),
            vec![ReadingEvent::JumpCompleted(3)]
        );

        // A target missing from the new layout cancels the jump
        driver.scroll_to(&mut region, 2);
        region.set_layout(vec![VerseBlock::new(1, 0.0, 50.0)], 1400.0);
        driver.retarget_jump(&region);
        assert!(!driver.is_jumping());
    }

    #[test]
    fn test_jump_pauses_accumulation() {
        let mut driver = ScrollDriver::default();
        let mut region = seven_verse_region();
        driver.start(100);
        let t0 = Instant::now();
        driver.tick(&mut region, t0);
        driver.scroll_to(&mut region, 2);

        let mut now = t0;
        while driver.is_jumping() {
            now += Duration::from_millis(16);
            driver.tick(&mut region, now);
        }
        assert!(driver.is_running());
        assert_eq!(region.scroll_offset(), 200.0);

        // First tick after landing only restarts the session clock
        now += Duration::from_millis(500);
        driver.tick(&mut region, now);
        assert_eq!(region.scroll_offset(), 200.0);
        now += Duration::from_millis(500);
        driver.tick(&mut region, now);
        assert_eq!(region.scroll_offset(), 220.0);
    }
}
