//! Memory model for lessons
//!
//! This module provides the abstractions lessons compute with and the
//! viewer renders:
//! - [`value`]: tagged runtime values (Int, Bool, Str, Record, Array, Slice, Map, Ref)
//! - [`slice`]: [`slice::SharedSlice`], an aliasing view over shared, growable storage
//! - [`map`]: lookups that report absence with a found-flag
//! - [`stack`]: call frames with ordered bindings
//!
//! # Aliasing
//!
//! Native Rust sub-slices already alias their source, but they cannot be
//! resliced past their length or grown in place. `SharedSlice` keeps the
//! storage behind an `Rc<RefCell<_>>` so views can outlive each other and
//! still observe each other's writes:
//!
//! ```text
//! scores := [1 2 3 4 5]
//! window := scores[2:4]    // shares storage
//! window[0] = 999          // scores is now [1 2 999 4 5]
//! ```

pub mod map;
pub mod slice;
pub mod stack;
pub mod value;
