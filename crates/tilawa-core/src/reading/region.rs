//! Scroll region geometry: verse blocks laid out inside one scrollable viewport.

/// One rendered verse inside the scroll region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerseBlock {
    /// Verse number within the surah (document order)
    pub verse_number: u32,
    /// Offset of the block's top edge from the top of the content
    pub top: f64,
    /// Block height
    pub height: f64,
}

impl VerseBlock {
    pub fn new(verse_number: u32, top: f64, height: f64) -> Self {
        Self {
            verse_number,
            top,
            height: height.max(0.0),
        }
    }

    /// Offset of the block's bottom edge
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Height of the part of this block inside `[view_top, view_bottom)`
    #[inline]
    pub fn visible_height(&self, view_top: f64, view_bottom: f64) -> f64 {
        (self.bottom().min(view_bottom) - self.top.max(view_top)).max(0.0)
    }

    /// Fraction of the block's own height that is visible
    pub fn intersection_ratio(&self, view_top: f64, view_bottom: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (self.visible_height(view_top, view_bottom) / self.height).clamp(0.0, 1.0)
    }
}

/// The scrollable viewport hosting an ordered sequence of verse blocks
///
/// `scroll_offset` is clamped on every write so that
/// `scroll_offset + viewport_height <= content_height` whenever the content is
/// taller than the viewport.
#[derive(Debug, Clone, Default)]
pub struct ScrollRegion {
    scroll_offset: f64,
    content_height: f64,
    viewport_height: f64,
    blocks: Vec<VerseBlock>,
}

impl ScrollRegion {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            ..Default::default()
        }
    }

    /// Build a region with explicit content height and no blocks
    pub fn with_extent(content_height: f64, viewport_height: f64) -> Self {
        Self {
            content_height: content_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
            ..Default::default()
        }
    }

    #[inline]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[inline]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[inline]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn blocks(&self) -> &[VerseBlock] {
        &self.blocks
    }

    /// Largest valid scroll offset
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Bottom edge of the viewport in content coordinates
    #[inline]
    pub fn viewport_bottom(&self) -> f64 {
        self.scroll_offset + self.viewport_height
    }

    /// Replace the laid-out blocks. Content height grows to cover the last
    /// block if the given height is too small.
    pub fn set_layout(&mut self, blocks: Vec<VerseBlock>, content_height: f64) {
        let covered = blocks.iter().map(VerseBlock::bottom).fold(0.0, f64::max);
        self.content_height = content_height.max(covered).max(0.0);
        self.blocks = blocks;
        self.set_scroll_offset(self.scroll_offset);
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Set the offset, clamped to `[0, max_offset]`
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_offset());
    }

    /// Move the offset by `delta`, clamped; returns the distance actually moved
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let before = self.scroll_offset;
        self.set_scroll_offset(before + delta);
        self.scroll_offset - before
    }

    /// Find the block for a verse number
    pub fn block(&self, verse_number: u32) -> Option<&VerseBlock> {
        self.blocks.iter().find(|b| b.verse_number == verse_number)
    }

    /// Offset that aligns the block's top edge with the viewport top
    pub fn offset_for_verse(&self, verse_number: u32) -> Option<f64> {
        self.block(verse_number)
            .map(|b| b.top.clamp(0.0, self.max_offset()))
    }
}
