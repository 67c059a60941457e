//! Lesson session: output capture, call frames and step history
//!
//! A [`Session`] is what a lesson runs against. While the lesson executes it
//! records output with [`Session::println`] / [`Session::eprintln`], mirrors
//! its call chain with [`Session::enter`] / [`Session::leave`], publishes
//! variables with [`Session::bind`], and marks steps with
//! [`Session::checkpoint`]. Each checkpoint stores a [`Snapshot`].
//!
//! Once the lesson has finished, the same session replays its history:
//! [`Session::rewind_to_start`], [`Session::step_forward`] and
//! [`Session::step_backward`] restore the stack and output of a checkpoint.

use crate::config::Config;
use crate::errors::LessonError;
use crate::memory::{stack::Stack, value::Value};
use crate::snapshot::{Snapshot, SnapshotManager, Stream, Transcript};
use rand::rngs::SmallRng;
use tracing::debug;

/// Recorder and replayer for one lesson run
#[derive(Debug)]
pub struct Session {
    config: Config,
    stack: Stack,
    terminal: Transcript,
    caption: String,
    snapshot_manager: SnapshotManager,
    history_position: usize,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Session {
            config: config.clone(),
            stack: Stack::new(),
            terminal: Transcript::new(),
            caption: String::new(),
            snapshot_manager: SnapshotManager::new(config.snapshot_limit),
            history_position: 0,
        }
    }

    /// Random source seeded from the session's configuration
    pub fn rng(&self) -> SmallRng {
        self.config.rng()
    }

    // ========== Recording ==========

    /// Write a line to standard output
    pub fn println(&mut self, text: impl Into<String>) {
        self.terminal.println(text.into(), Stream::Stdout);
    }

    /// Write a line to the diagnostic stream
    pub fn eprintln(&mut self, text: impl Into<String>) {
        self.terminal.println(text.into(), Stream::Stderr);
    }

    /// Push a frame for `function`
    pub fn enter(&mut self, function: &str) {
        self.stack.push_frame(function);
    }

    /// Pop the innermost frame
    pub fn leave(&mut self) {
        self.stack.pop_frame();
    }

    /// Bind `name` in the innermost frame, opening a `main` frame if none exists
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) {
        if self.stack.depth() == 0 {
            self.stack.push_frame("main");
        }
        if let Some(frame) = self.stack.current_frame_mut() {
            frame.bind(name, value.into());
        }
    }

    /// Record the current state as a step in the history
    pub fn checkpoint(&mut self, caption: impl Into<String>) -> Result<(), LessonError> {
        self.caption = caption.into();
        let step = self.snapshot_manager.len();
        let snapshot = Snapshot::new(
            self.stack.clone(),
            self.terminal.clone(),
            self.caption.clone(),
            step,
        );
        self.snapshot_manager.push(snapshot)?;
        self.history_position = step;
        debug!(step, caption = %self.caption, "checkpoint");
        Ok(())
    }

    // ========== Replay ==========

    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.stack = snapshot.stack.clone();
        self.terminal = snapshot.terminal.clone();
        self.caption = snapshot.caption.clone();
    }

    fn restore(&mut self, index: usize) -> Result<(), LessonError> {
        let snapshot = self
            .snapshot_manager
            .get(index)
            .cloned()
            .ok_or_else(|| LessonError::History {
                message: "Snapshot not found in history".to_string(),
            })?;
        self.history_position = index;
        self.restore_snapshot(&snapshot);
        Ok(())
    }

    /// Step back one checkpoint
    pub fn step_backward(&mut self) -> Result<(), LessonError> {
        if self.history_position == 0 {
            return Err(LessonError::History {
                message: "Already at the beginning of the lesson".to_string(),
            });
        }
        self.restore(self.history_position - 1)
    }

    /// Step forward one checkpoint
    pub fn step_forward(&mut self) -> Result<(), LessonError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(LessonError::History {
                message: "No more steps (lesson finished)".to_string(),
            });
        }
        self.restore(self.history_position + 1)
    }

    /// Rewind to the first checkpoint
    pub fn rewind_to_start(&mut self) -> Result<(), LessonError> {
        if self.snapshot_manager.is_empty() {
            return Err(LessonError::History {
                message: "No snapshots available".to_string(),
            });
        }
        self.restore(0)
    }

    /// Jump to the last checkpoint
    pub fn jump_to_end(&mut self) -> Result<(), LessonError> {
        match self.snapshot_manager.len() {
            0 => Err(LessonError::History {
                message: "No snapshots available".to_string(),
            }),
            n => self.restore(n - 1),
        }
    }

    // ========== Getter methods for UI ==========

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn terminal(&self) -> &Transcript {
        &self.terminal
    }

    /// Caption of the current step
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Captions of every recorded step
    pub fn captions(&self) -> Vec<&str> {
        self.snapshot_manager.captions().collect()
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }
}
