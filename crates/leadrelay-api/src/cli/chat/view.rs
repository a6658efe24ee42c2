//! Terminal [`TranscriptView`].
//!
//! Entries are printed through the readline `SharedWriter` so they land
//! above the prompt. A loader entry shows an indicatif spinner until the
//! client resolves it in place.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline_async::SharedWriter;

use leadrelay_core::client::transcript::{EntryBody, TranscriptEntry};
use leadrelay_core::client::view::TranscriptView;
use leadrelay_types::llm::MessageRole;

pub struct TerminalView {
    out: Mutex<SharedWriter>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new(out: SharedWriter) -> Self {
        Self {
            out: Mutex::new(out),
            spinner: Mutex::new(None),
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "{line}");
    }

    fn start_spinner(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(spinner) {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Styled single-entry rendering, without the spinner.
pub fn format_entry(entry: &TranscriptEntry) -> Option<String> {
    let EntryBody::Text(text) = &entry.body else {
        return None;
    };
    let line = match entry.speaker {
        MessageRole::User => format!("  {} {}", style("You >").green().bold(), text),
        MessageRole::Assistant => format!("  {} {}", style("AI  >").cyan().bold(), text.trim()),
        MessageRole::System => format!("  {}", style(text).dim()),
    };
    Some(line)
}

impl TranscriptView for TerminalView {
    fn entry_appended(&self, _index: usize, entry: &TranscriptEntry) {
        match format_entry(entry) {
            Some(line) => self.write_line(&line),
            None => self.start_spinner(),
        }
    }

    fn entry_replaced(&self, _index: usize, entry: &TranscriptEntry) {
        self.stop_spinner();
        if let Some(line) = format_entry(entry) {
            self.write_line(&line);
            self.write_line("");
        }
    }

    fn status_changed(&self, status: Option<&str>) {
        if let Some(status) = status {
            self.write_line(&format!("  {}", style(status).yellow().dim()));
        }
    }

    // Output is append-only; the newest line is always in view.
    fn scroll_to_latest(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_loader_is_none() {
        assert!(format_entry(&TranscriptEntry::loader()).is_none());
    }

    #[test]
    fn test_format_entries_carry_text() {
        console::set_colors_enabled(false);
        let user = format_entry(&TranscriptEntry::text(MessageRole::User, "Hi")).unwrap();
        assert_eq!(user, "  You > Hi");
        let bot =
            format_entry(&TranscriptEntry::text(MessageRole::Assistant, " Name? \n")).unwrap();
        assert_eq!(bot, "  AI  > Name?");
    }
}
