//! # Introduction
//!
//! primer runs short lessons on core language fundamentals (bindings and
//! results, copies versus references, slices and maps, traits) and records a
//! snapshot of the lesson's state at every step. The recorded history can be
//! printed straight to the terminal or stepped forward and backward in a
//! terminal viewer built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Lesson → Session (output, frames, bindings) → Snapshots → stdout / TUI
//! ```
//!
//! 1. [`lessons`]: the four lessons and their dispatcher.
//! 2. [`session`]: records output, call frames and checkpoints, then replays them.
//! 3. [`memory`]: tagged [`memory::value::Value`]s, the aliasing
//!    [`memory::slice::SharedSlice`], found-flag map lookups and the call
//!    [`memory::stack::Stack`].
//! 4. [`snapshot`]: output [`snapshot::Transcript`] and the bounded snapshot history.
//! 5. [`ui`]: ratatui-based viewer; not part of the stable library API.
//! 6. [`config`] and [`errors`]: run settings and error types.

pub mod config;
pub mod errors;
pub mod lessons;
pub mod memory;
pub mod session;
pub mod snapshot;
pub mod ui;
