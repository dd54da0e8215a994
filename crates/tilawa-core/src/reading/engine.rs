//! Reading engine: one scroll region shared by the driver and the tracker.
//!
//! `tick` runs the driver first and the tracker second, so the tracker always
//! sees the geometry the driver just produced. Events from both are queued in
//! tick order and drained by the host with `poll_event`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::driver::{DriverConfig, ScrollDriver};
use super::events::ReadingEvent;
use super::region::{ScrollRegion, VerseBlock};
use super::tracker::ViewportTracker;
use crate::config::AppConfig;

/// Capability that keeps the display awake while auto-scroll runs
pub trait KeepAwake {
    /// Returns `false` when the platform has no such primitive
    fn acquire(&mut self) -> bool;
    fn release(&mut self);
}

/// Keep-awake for platforms without one
#[derive(Debug, Default)]
pub struct NoKeepAwake;

impl KeepAwake for NoKeepAwake {
    fn acquire(&mut self) -> bool {
        false
    }

    fn release(&mut self) {}
}

pub struct ReaderEngine {
    region: ScrollRegion,
    driver: ScrollDriver,
    tracker: ViewportTracker,
    keep_awake: Box<dyn KeepAwake + Send>,
    awake_held: bool,
    geometry_dirty: bool,
    events: VecDeque<ReadingEvent>,
}

impl Default for ReaderEngine {
    fn default() -> Self {
        Self::new(DriverConfig::default(), ViewportTracker::default())
    }
}

impl ReaderEngine {
    pub fn new(driver: DriverConfig, tracker: ViewportTracker) -> Self {
        Self {
            region: ScrollRegion::default(),
            driver: ScrollDriver::new(driver),
            tracker,
            keep_awake: Box::new(NoKeepAwake),
            awake_held: false,
            geometry_dirty: false,
            events: VecDeque::new(),
        }
    }

    /// Build an engine from the `[reading]` and `[ui.scroll]` config sections
    pub fn from_config(config: &AppConfig) -> Self {
        let tracker = if config.reading.visibility_sampling {
            ViewportTracker::sampled(Duration::from_millis(config.reading.sample_interval_ms))
        } else {
            ViewportTracker::new(config.reading.visibility_threshold)
        };
        Self::new(
            DriverConfig::from_config(&config.reading, &config.ui.scroll),
            tracker,
        )
    }

    pub fn with_keep_awake(mut self, keep_awake: Box<dyn KeepAwake + Send>) -> Self {
        self.keep_awake = keep_awake;
        self
    }

    pub fn region(&self) -> &ScrollRegion {
        &self.region
    }

    pub fn scroll_offset(&self) -> f64 {
        self.region.scroll_offset()
    }

    pub fn active_verse(&self) -> Option<u32> {
        self.tracker.active_verse()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.driver.is_running()
    }

    pub fn auto_scroll_rate(&self) -> Option<u32> {
        self.driver.rate_percent()
    }

    /// Whether ticks are needed at animation rate
    pub fn needs_frames(&self) -> bool {
        self.driver.is_running() || self.driver.is_jumping()
    }

    /// Install a new verse layout (new surah). Stops auto-scroll, resets the
    /// offset to the top and restarts tracking.
    pub fn load_layout(&mut self, blocks: Vec<VerseBlock>, content_height: f64, viewport_height: f64) {
        self.stop_auto_scroll();
        self.driver.cancel_jump();
        self.region = ScrollRegion::new(viewport_height);
        self.region.set_layout(blocks, content_height);
        self.events.clear();
        self.observe();
    }

    /// Re-layout the same surah (resize, translation toggle), keeping the
    /// reader on the currently active verse. An in-flight jump is re-aimed
    /// at its verse's new position.
    pub fn relayout(&mut self, blocks: Vec<VerseBlock>, content_height: f64, viewport_height: f64) {
        let anchor = self.tracker.active_verse();
        self.region.set_viewport_height(viewport_height);
        self.region.set_layout(blocks, content_height);
        if let Some(offset) = anchor.and_then(|v| self.region.offset_for_verse(v)) {
            self.region.set_scroll_offset(offset);
        }
        self.driver.retarget_jump(&self.region);

        let blocks = self.region.blocks().to_vec();
        self.tracker.reobserve(&blocks, &self.region);
        self.geometry_dirty = false;
        self.collect_events();
    }

    /// Update only the viewport height
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        if (self.region.viewport_height() - viewport_height).abs() > f64::EPSILON {
            self.region.set_viewport_height(viewport_height);
            self.geometry_dirty = true;
        }
    }

    /// Manual scroll input; the tracker catches up on the next tick
    pub fn scroll_by(&mut self, delta: f64) {
        if self.region.scroll_by(delta) != 0.0 {
            self.geometry_dirty = true;
        }
    }

    /// Start auto-scroll; `false` if already running
    pub fn start_auto_scroll(&mut self, rate_percent: u32) -> bool {
        if !self.driver.start(rate_percent) {
            return false;
        }
        if !self.awake_held {
            self.awake_held = self.keep_awake.acquire();
            if !self.awake_held {
                tracing::debug!("Keep-awake unavailable, continuing without it");
            }
        }
        true
    }

    pub fn set_auto_scroll_rate(&mut self, rate_percent: u32) -> bool {
        self.driver.set_rate(rate_percent)
    }

    /// Stop auto-scroll. Safe to call at any time, including while handling
    /// an event from the current tick.
    pub fn stop_auto_scroll(&mut self) {
        self.driver.stop();
        self.events
            .retain(|e| !matches!(e, ReadingEvent::AutoScrollEnded));
        self.release_keep_awake();
    }

    /// Toggle auto-scroll; returns whether it is running afterwards
    pub fn toggle_auto_scroll(&mut self, rate_percent: u32) -> bool {
        if self.driver.is_running() {
            self.stop_auto_scroll();
            false
        } else {
            self.start_auto_scroll(rate_percent)
        }
    }

    /// Smoothly bring a verse to the top of the viewport
    pub fn scroll_to(&mut self, verse_number: u32) -> bool {
        let accepted = self.driver.scroll_to(&mut self.region, verse_number);
        if accepted {
            self.geometry_dirty = true;
            self.collect_events();
        }
        accepted
    }

    /// Stop visibility tracking; no further verse changes are reported
    pub fn stop_tracking(&mut self) {
        self.tracker.stop();
        self.events
            .retain(|e| !matches!(e, ReadingEvent::ActiveVerseChanged(_)));
    }

    /// Advance one scheduling tick
    pub fn tick(&mut self, now: Instant) {
        let before = self.region.scroll_offset();
        self.driver.tick(&mut self.region, now);
        if self.region.scroll_offset() != before {
            self.geometry_dirty = true;
        }

        if self.geometry_dirty && self.tracker.is_observing() {
            // A skipped sample stays dirty until the tracker accepts it
            self.geometry_dirty = !self.tracker.on_geometry_changed(&self.region, now);
        }

        self.collect_events();
        if !self.driver.is_running() {
            self.release_keep_awake();
        }
    }

    /// Next queued event, oldest first
    pub fn poll_event(&mut self) -> Option<ReadingEvent> {
        self.events.pop_front()
    }

    /// Drain every queued event
    pub fn drain_events(&mut self) -> Vec<ReadingEvent> {
        self.events.drain(..).collect()
    }

    fn observe(&mut self) {
        let blocks = self.region.blocks().to_vec();
        self.tracker.observe(&blocks, &self.region);
        self.geometry_dirty = false;
        self.collect_events();
    }

    fn collect_events(&mut self) {
        self.events.extend(self.driver.events());
        self.events.extend(self.tracker.events());
    }

    fn release_keep_awake(&mut self) {
        if self.awake_held {
            self.keep_awake.release();
            self.awake_held = false;
        }
    }
}
