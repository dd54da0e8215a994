/// Notifications raised by the reading engine for the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingEvent {
    /// A different verse became the active (most visible) one
    ActiveVerseChanged(u32),
    /// Auto-scroll reached the end of content and stopped itself
    AutoScrollEnded,
    /// A `scroll_to` transition landed on the verse's top edge
    JumpCompleted(u32),
}
