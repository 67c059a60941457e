//! The four lessons and their dispatcher
//!
//! - [`functions`]: bindings, results, discarding, named results, the CLI contract
//! - [`pointers`]: copy versus exclusive reference
//! - [`collections`]: arrays, aliasing slices, growth, maps with found-flags
//! - [`interfaces`]: trait objects, composition, pipelines, `Any`
//!
//! Each lesson is a plain function over a [`Session`]. Only `functions`
//! reads user arguments; the others ignore them.

pub mod collections;
pub mod functions;
pub mod interfaces;
pub mod pointers;

use crate::errors::LessonError;
use crate::session::Session;
use clap::ValueEnum;
use std::fmt;
use tracing::{debug, info, warn};

/// A runnable lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lesson {
    Functions,
    Pointers,
    Collections,
    Interfaces,
}

impl Lesson {
    pub fn all() -> [Lesson; 4] {
        [
            Lesson::Functions,
            Lesson::Pointers,
            Lesson::Collections,
            Lesson::Interfaces,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Lesson::Functions => "functions",
            Lesson::Pointers => "pointers",
            Lesson::Collections => "collections",
            Lesson::Interfaces => "interfaces",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Lesson::Functions => "bindings, multiple results, discarding with _ (needs one argument)",
            Lesson::Pointers => "passing a record by copy versus by mutable reference",
            Lesson::Collections => "arrays, aliasing slices, capacity growth and maps",
            Lesson::Interfaces => "traits, trait objects, composition and downcasting",
        }
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Run `lesson` against `session`
pub fn run(lesson: Lesson, session: &mut Session, args: &[String]) -> Result<(), LessonError> {
    info!(lesson = lesson.name(), args = args.len(), "lesson started");

    let result = match lesson {
        Lesson::Functions => functions::run(session, args),
        Lesson::Pointers => pointers::run(session),
        Lesson::Collections => collections::run(session),
        Lesson::Interfaces => interfaces::run(session),
    };

    match &result {
        Ok(()) => info!(
            lesson = lesson.name(),
            steps = session.total_snapshots(),
            "lesson finished"
        ),
        Err(e) if e.is_silent() => debug!(lesson = lesson.name(), error = %e, "lesson refused its arguments"),
        Err(e) => warn!(lesson = lesson.name(), error = %e, "lesson stopped"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_command_line_values() {
        for lesson in Lesson::all() {
            assert_eq!(Lesson::from_str(lesson.name(), false), Ok(lesson));
        }
        assert_eq!(Lesson::from_str("POINTERS", true), Ok(Lesson::Pointers));
        assert!(Lesson::from_str("generics", true).is_err());
    }
}
