//! Lesson: arrays, slices and maps
//!
//! Fixed arrays cannot grow. Slices are views into shared storage: a
//! sub-slice aliases its source, reslicing may reach into spare capacity,
//! and appending past the capacity moves the data to larger storage. Maps
//! report a missing key with a found-flag rather than an error.

use crate::errors::LessonError;
use crate::memory::map::{self, lookup, map_of, SortedMap};
use crate::memory::slice::SharedSlice;
use crate::memory::value::Value;
use crate::session::Session;
use rand::Rng;
use rustc_hash::FxHashMap;

/// How many random scores the copy demonstration draws
pub const SCORE_COUNT: usize = 100;

/// Exclusive upper bound for a random score
pub const MAX_SCORE: i64 = 1000;

/// Remove `index` from `source` by swapping in the last element.
///
/// Order is not preserved and `source`'s storage is modified.
pub fn remove_at_index(
    source: &SharedSlice<i64>,
    index: usize,
) -> Result<SharedSlice<i64>, LessonError> {
    Ok(source.swap_remove(index)?)
}

/// Position of the first space in `haystack` after skipping `skip` bytes,
/// or -1 when there is none
pub fn index_of_space_after(haystack: &str, skip: usize) -> i64 {
    haystack
        .get(skip..)
        .and_then(|tail| tail.find(' '))
        .map_or(-1, |i| i as i64)
}

pub fn run(session: &mut Session) -> Result<(), LessonError> {
    session.enter("main");
    arrays(session)?;
    slices(session)?;
    growth(session)?;
    initialisation(session)?;
    windows(session)?;
    maps(session)?;
    session.leave();
    Ok(())
}

fn arrays(session: &mut Session) -> Result<(), LessonError> {
    let mut scores = [0i64; 10];
    scores[0] = 339;
    session.bind("scores", array_value(&scores));
    session.checkpoint("A fixed array holds exactly 10 ints")?;

    scores = [9001, 9333, 212, 33, 0, 0, 0, 0, 0, 0];
    session.bind("scores", array_value(&scores));
    for (index, value) in scores.iter().enumerate() {
        session.println(format!("Index: {}, Value: {}", index, value));
    }
    session.checkpoint("Reassign the array from a literal and iterate it")?;
    Ok(())
}

fn slices(session: &mut Session) -> Result<(), LessonError> {
    let scores_slice = SharedSlice::from_vec(vec![1i64, 4, 293, 4, 9]);
    session.bind("scores_slice", scores_slice.to_value());
    session.println(format!("Slice: {}", scores_slice));

    let scores_with_length: SharedSlice<i64> = SharedSlice::make(10, 10)?;
    session.bind("scores_with_length", scores_with_length.to_value());
    session.println(format!("Slice with length 10: {}", scores_with_length));

    let scores_zero_length: SharedSlice<i64> = SharedSlice::make(0, 10)?;
    session.bind("scores_zero_length", scores_zero_length.to_value());
    session.println(format!(
        "Slice length 0, capacity 10: {}",
        scores_zero_length
    ));
    session.checkpoint("Create slices from a literal and with make")?;

    let scores_zero_length = scores_zero_length.reslice(0, 8)?;
    scores_zero_length.set(7, 9033)?;
    session.bind("scores_zero_length", scores_zero_length.to_value());
    session.println(format!(
        "After reslicing and setting index 7: {}",
        scores_zero_length
    ));
    session.checkpoint("Reslice into spare capacity")?;

    let empty_slice: SharedSlice<i64> = SharedSlice::make(0, 10)?;
    let empty_slice = empty_slice.append(5);
    session.bind("empty_slice", empty_slice.to_value());
    session.println(format!("After append: {}", empty_slice));
    session.checkpoint("Append writes into spare capacity")?;
    Ok(())
}

fn growth(session: &mut Session) -> Result<(), LessonError> {
    let mut scores_grow: SharedSlice<i64> = SharedSlice::make(0, 5)?;
    let mut capacity = scores_grow.capacity();
    session.println(format!("Initial capacity: {}", capacity));
    session.bind("scores_grow", scores_grow.to_value());
    session.checkpoint("Start with capacity 5")?;

    for i in 0..25 {
        scores_grow = scores_grow.append(i);
        if scores_grow.capacity() != capacity {
            capacity = scores_grow.capacity();
            session.println(format!("Capacity expanded to: {}", capacity));
            session.bind("scores_grow", scores_grow.to_value());
            session.checkpoint(format!("Storage moved, capacity now {}", capacity))?;
        }
    }

    let scores_with_values: SharedSlice<i64> = SharedSlice::make(5, 5)?;
    let scores_with_values = scores_with_values.append(9332);
    session.bind("scores_with_values", scores_with_values.to_value());
    session.println(format!(
        "Append to slice with 5 values: {}",
        scores_with_values
    ));
    session.checkpoint("Append goes after the existing zeroes")?;
    Ok(())
}

fn initialisation(session: &mut Session) -> Result<(), LessonError> {
    let names = SharedSlice::from_vec(vec![
        "leto".to_string(),
        "jessica".to_string(),
        "paul".to_string(),
    ]);
    let checks: SharedSlice<bool> = SharedSlice::make(10, 10)?;
    let names_nil: SharedSlice<String> = SharedSlice::new();
    let scores_capacity: SharedSlice<i64> = SharedSlice::make(0, 20)?;

    session.bind("names", names.to_value());
    session.bind("checks", checks.to_value());
    session.bind("names_nil", names_nil.to_value());
    session.bind("scores_capacity", scores_capacity.to_value());

    session.println(format!("Names: {}", names));
    session.println(format!("Checks: {}", checks));
    session.println(format!("Names nil: {}", names_nil));
    session.println(format!("Scores capacity: {}", scores_capacity));
    session.checkpoint("Four ways to initialise a slice")?;
    Ok(())
}

fn windows(session: &mut Session) -> Result<(), LessonError> {
    let scores_list = SharedSlice::from_vec(vec![1i64, 2, 3, 4, 5]);
    let slice = scores_list.reslice(2, 4)?;
    slice.set(0, 999)?;
    session.bind("scores_list", scores_list.to_value());
    session.bind("slice", slice.to_value());
    session.println(format!(
        "Original after slice modification: {}",
        scores_list
    ));
    session.checkpoint("A window writes through to its source")?;

    let haystack = "the spice must flow";
    session.bind("haystack", haystack);
    session.println(format!(
        "Index of space after 5 chars: {}",
        index_of_space_after(haystack, 5)
    ));

    let score_remove = SharedSlice::from_vec(vec![1i64, 2, 3, 4, 5]).truncate_last()?;
    session.bind("score_remove", score_remove.to_value());
    session.println(format!("All but last: {}", score_remove));

    let score_to_remove = SharedSlice::from_vec(vec![1i64, 2, 3, 4, 5]);
    let score_to_remove = remove_at_index(&score_to_remove, 2)?;
    session.bind("score_to_remove", score_to_remove.to_value());
    session.println(format!("After removing index 2: {}", score_to_remove));
    session.checkpoint("Shrink a slice by reslicing")?;

    let mut rng = session.rng();
    let scores100: SharedSlice<i64> = SharedSlice::make(SCORE_COUNT, SCORE_COUNT)?;
    for i in 0..SCORE_COUNT {
        scores100.set(i, rng.gen_range(0..MAX_SCORE))?;
    }
    scores100.sort();
    let worst: SharedSlice<i64> = SharedSlice::make(5, 5)?;
    worst.copy_from(&scores100.reslice(0, 5)?);
    session.bind("worst", worst.to_value());
    session.println(format!("Worst 5 scores: {}", worst));
    session.checkpoint("Copy the five lowest scores into their own storage")?;
    Ok(())
}

fn maps(session: &mut Session) -> Result<(), LessonError> {
    let mut powers: FxHashMap<String, i64> = FxHashMap::default();
    powers.insert("goku".to_string(), 9001);
    let (power, exists) = lookup(&powers, "vegeta");
    session.bind("powers", map::to_value(&powers));
    session.bind("power", power);
    session.bind("exists", exists);
    session.println(format!("Power of vegeta: {} exists: {}", power, exists));
    session.checkpoint("A missing key yields zero and a false flag")?;

    let total = powers.len();
    session.bind("total", total);
    session.println(format!("Number of keys: {}", total));
    powers.remove("goku");
    session.bind("powers", map::to_value(&powers));
    session.checkpoint("Count the keys, then delete one")?;

    let power_levels = map_of([("goku".to_string(), 9001i64), ("gohan".to_string(), 2044)]);
    session.bind("power_levels", map::to_value(&power_levels));
    session.println(format!("Power levels: {}", SortedMap(&power_levels)));
    for (key, value) in map::sorted_entries(&power_levels) {
        session.println(format!("Key: {}, Value: {}", key, value));
    }
    session.checkpoint("Build a map from a literal and iterate it")?;
    Ok(())
}

fn array_value(items: &[i64]) -> Value {
    Value::Array(items.iter().map(|&n| Value::Int(n)).collect())
}
