//! Reading mode engine
//!
//! Auto-scroll and active-verse tracking for a single scroll region.
//!
//! - `region` - verse block geometry and the clamped scroll offset
//! - `tracker` - picks the most visible verse and reports changes
//! - `driver` - frame-rate independent auto-scroll and smooth verse jumps
//! - `engine` - composes both against one region, driven by host ticks
//! - `easing`, `timing` - pure helpers for the jump animation
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use tilawa_core::reading::{ReaderEngine, ReadingEvent, VerseBlock};
//!
//! let mut engine = ReaderEngine::default();
//! engine.load_layout(blocks, content_height, viewport_height);
//! engine.start_auto_scroll(50);
//!
//! // Once per frame
//! engine.tick(Instant::now());
//! while let Some(event) = engine.poll_event() {
//!     match event {
//!         ReadingEvent::ActiveVerseChanged(verse) => highlight(verse),
//!         ReadingEvent::AutoScrollEnded => show_paused(),
//!         ReadingEvent::JumpCompleted(_) => {}
//!     }
//! }
//! ```

pub mod driver;
pub mod easing;
pub mod engine;
pub mod events;
pub mod region;
pub mod timing;
pub mod tracker;

pub use driver::{clamp_rate_percent, DriverConfig, DriverState, ScrollDriver};
pub use engine::{KeepAwake, NoKeepAwake, ReaderEngine};
pub use events::ReadingEvent;
pub use region::{ScrollRegion, VerseBlock};
pub use tracker::{select_active, TrackingMode, ViewportTracker};
