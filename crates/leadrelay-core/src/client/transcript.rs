//! The visible chat transcript.
//!
//! Separate from the conversation history: the transcript also shows the
//! greeting, pending loaders and apologies, none of which are replayed to
//! the provider.

use leadrelay_types::llm::MessageRole;

/// What an entry currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    Text(String),
    /// Reply pending. Replaced in place once the request resolves.
    Loading,
}

/// One bubble in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: MessageRole,
    pub body: EntryBody,
}

impl TranscriptEntry {
    pub fn text(speaker: MessageRole, text: impl Into<String>) -> Self {
        Self {
            speaker,
            body: EntryBody::Text(text.into()),
        }
    }

    pub fn loader() -> Self {
        Self {
            speaker: MessageRole::Assistant,
            body: EntryBody::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, EntryBody::Loading)
    }

    /// Displayed text, `None` while loading.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            EntryBody::Text(text) => Some(text),
            EntryBody::Loading => None,
        }
    }
}

/// Ordered entries plus the advisory status line.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    status: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: TranscriptEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Resolve the loader at `index` with `text`, keeping its position.
    ///
    /// Returns `None` if `index` is out of range or not a loader.
    pub fn resolve_loader(&mut self, index: usize, text: impl Into<String>) -> Option<&TranscriptEntry> {
        let entry = self.entries.get_mut(index)?;
        if !entry.is_loading() {
            return None;
        }
        entry.body = EntryBody::Text(text.into());
        Some(entry)
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
