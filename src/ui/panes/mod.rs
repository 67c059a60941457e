//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`steps`]: captions of every recorded step, current one highlighted
//! - [`stack`]: call frames and their bindings at the current step
//! - [`terminal`]: lesson output up to the current step
//! - [`status`]: status bar with keybindings and position
//!
//! Each module exports one stateless `render_*` function; scroll state lives
//! in [`crate::ui::App`].

pub mod stack;
pub mod status;
pub mod steps;
pub mod terminal;

pub use stack::render_stack_pane;
pub use status::render_status_bar;
pub use steps::render_steps_pane;
pub use terminal::render_terminal_pane;
