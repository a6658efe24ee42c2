//! Rendering hooks for transcript mutations.

use super::transcript::TranscriptEntry;

/// Receives every visible change the client makes.
///
/// Callbacks run while the client holds its state lock, so they observe
/// mutations in order. They must not call back into the client.
pub trait TranscriptView: Send + Sync + 'static {
    /// A new entry was added at `index`.
    fn entry_appended(&self, index: usize, entry: &TranscriptEntry);

    /// The entry at `index` (a loader) was resolved in place.
    fn entry_replaced(&self, index: usize, entry: &TranscriptEntry);

    /// The advisory status line changed; `None` hides it.
    fn status_changed(&self, status: Option<&str>);

    /// Bring the newest entry into view. Called after every entry mutation.
    fn scroll_to_latest(&self);
}
