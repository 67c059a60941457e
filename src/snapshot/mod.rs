// Snapshot management for stepping back and forth through a lesson

use crate::errors::LessonError;
use crate::memory::stack::Stack;

/// Which output stream a piece of text was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A run of text written to one stream
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub text: String,
    pub stream: Stream,
}

/// Captured lesson output, in write order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { lines: Vec::new() }
    }

    /// Print without newline
    pub fn print(&mut self, text: String, stream: Stream) {
        if let Some(last) = self.lines.last_mut() {
            if last.stream == stream && !last.text.ends_with('\n') {
                last.text.push_str(&text);
                return;
            }
        }
        self.lines.push(TranscriptLine { text, stream });
    }

    /// Print followed by a newline
    pub fn println(&mut self, text: String, stream: Stream) {
        self.print(text + "\n", stream);
    }

    /// Standard output as individual lines
    pub fn get_output(&self) -> Vec<String> {
        self.lines_of(Stream::Stdout)
    }

    /// Diagnostic output as individual lines
    pub fn stderr_output(&self) -> Vec<String> {
        self.lines_of(Stream::Stderr)
    }

    /// Raw standard output text, exactly as written
    pub fn stdout_text(&self) -> String {
        self.text_of(Stream::Stdout)
    }

    /// Raw diagnostic text, exactly as written
    pub fn stderr_text(&self) -> String {
        self.text_of(Stream::Stderr)
    }

    fn text_of(&self, stream: Stream) -> String {
        self.lines
            .iter()
            .filter(|tl| tl.stream == stream)
            .map(|tl| tl.text.as_str())
            .collect()
    }

    fn lines_of(&self, stream: Stream) -> Vec<String> {
        let text = self.text_of(stream);
        // Split by newlines; a trailing newline does not start a new line
        let mut result: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }
}

/// Snapshot of lesson state at one checkpoint
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stack: Stack,
    pub terminal: Transcript,
    pub caption: String,
    pub step: usize,
}

impl Snapshot {
    pub fn new(stack: Stack, terminal: Transcript, caption: String, step: usize) -> Self {
        Snapshot {
            stack,
            terminal,
            caption,
            step,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: 100 bytes per frame, 64 per binding, 50 per output line
        let stack_size = self.stack.depth() * 100 + self.stack.binding_count() * 64;
        let terminal_size = self.terminal.lines.len() * 50;
        stack_size + terminal_size + self.caption.len()
    }
}

/// Ordered history of snapshots with a memory budget
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), LessonError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(LessonError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Captions of every snapshot, oldest first
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.snapshots.iter().map(|s| s.caption.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_kept_apart() {
        let mut terminal = Transcript::new();
        terminal.println("banner".to_string(), Stream::Stderr);
        terminal.print("its over ".to_string(), Stream::Stdout);
        terminal.println("hello".to_string(), Stream::Stdout);
        terminal.println("\n--- Calling log() ---".to_string(), Stream::Stdout);

        assert_eq!(terminal.get_output(), vec!["its over hello", "", "--- Calling log() ---"]);
        assert_eq!(terminal.stderr_output(), vec!["banner"]);
        assert_eq!(terminal.stdout_text(), "its over hello\n\n--- Calling log() ---\n");
    }

    #[test]
    fn history_respects_memory_limit() {
        let mut manager = SnapshotManager::new(120);
        let mut stack = Stack::new();
        stack.push_frame("main");

        let snapshot = Snapshot::new(stack, Transcript::new(), "start".to_string(), 0);
        manager.push(snapshot.clone()).unwrap();
        assert_eq!(manager.len(), 1);

        let err = manager.push(snapshot).unwrap_err();
        assert!(matches!(err, LessonError::SnapshotLimitExceeded { limit: 120, .. }));
        assert_eq!(manager.captions().collect::<Vec<_>>(), vec!["start"]);
    }
}
