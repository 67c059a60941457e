// Integration tests for the lessons, driven through the library API

use pretty_assertions::assert_eq;
use primer::config::Config;
use primer::errors::LessonError;
use primer::lessons::{self, Lesson};
use primer::memory::value::Value;
use primer::session::Session;

fn seeded() -> Config {
    Config {
        seed: Some(7),
        ..Config::default()
    }
}

fn run(lesson: Lesson, args: &[&str]) -> (Session, Result<(), LessonError>) {
    let mut session = Session::new(&seeded());
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let result = lessons::run(lesson, &mut session, &args);
    (session, result)
}

fn joined_output(session: &Session) -> String {
    session.terminal().get_output().join("\n")
}

#[test]
fn test_functions_echoes_single_argument() {
    let (session, result) = run(Lesson::Functions, &["hello"]);
    assert!(result.is_ok(), "Lesson failed: {:?}", result);

    let joined = joined_output(&session);
    println!("Lesson output:\n{}", joined);

    assert!(joined.contains("its over hello"));
    assert!(joined.contains("its over 5 times"));
    assert!(joined.contains("well its not over"));
    assert!(joined.contains("add(10, 20) = 30"));
    assert!(joined.contains("Power level: 9000, Over 9000: true"));
    assert!(joined.contains("Example 1 - Ignoring power level: Does Vegeta exist? true"));
    assert!(joined.contains("Example 2 - Ignoring existence: Power level = 9000"));
    assert!(joined.contains("17 divided by 5 = quotient: 3, remainder: 2"));
    assert!(joined.contains("Is Naruto real? true (ignoring power level)"));
}

#[test]
fn test_functions_rejects_wrong_argument_counts() {
    let cases: [&[&str]; 3] = [&[], &["a", "b"], &["a", "b", "c"]];
    for args in cases {
        let (session, result) = run(Lesson::Functions, args);
        assert_eq!(
            result,
            Err(LessonError::ArgumentCount {
                expected: 1,
                got: args.len()
            })
        );
        assert!(session.terminal().stdout_text().is_empty());
    }
}

#[test]
fn test_pointers_copy_versus_reference() {
    let (mut session, result) = run(Lesson::Pointers, &[]);
    result.expect("Lesson failed");
    session.jump_to_end().expect("history is not empty");

    let output = session.terminal().get_output();
    assert_eq!(output[0], "goku.PowerLevel after copy: 15000");
    assert_eq!(output[1], "goku.PowerLevel: 18000");

    let goku = session
        .stack()
        .current_frame()
        .and_then(|f| f.get("goku"))
        .cloned()
        .expect("goku is bound in main");
    assert_eq!(goku.field("PowerLevel"), Some(&Value::Int(18000)));
}

#[test]
fn test_collections_output() {
    let (session, result) = run(Lesson::Collections, &[]);
    result.expect("Lesson failed");

    let joined = joined_output(&session);
    println!("Lesson output:\n{}", joined);

    assert!(joined.contains("Index: 0, Value: 9001"));
    assert!(joined.contains("Index: 9, Value: 0"));
    assert!(joined.contains("Slice: [1 4 293 4 9]"));
    assert!(joined.contains("Slice with length 10: [0 0 0 0 0 0 0 0 0 0]"));
    assert!(joined.contains("Slice length 0, capacity 10: []"));
    assert!(joined.contains("After reslicing and setting index 7: [0 0 0 0 0 0 0 9033]"));
    assert!(joined.contains("After append: [5]"));
    assert!(joined.contains("Append to slice with 5 values: [0 0 0 0 0 9332]"));
    assert!(joined.contains("Names: [leto jessica paul]"));
    assert!(joined.contains("Names nil: []"));
    assert!(joined.contains("Original after slice modification: [1 2 999 4 5]"));
    assert!(joined.contains("Index of space after 5 chars: 4"));
    assert!(joined.contains("All but last: [1 2 3 4]"));
    assert!(joined.contains("After removing index 2: [1 2 5 4]"));
    assert!(joined.contains("Power of vegeta: 0 exists: false"));
    assert!(joined.contains("Number of keys: 1"));
    assert!(joined.contains("Power levels: map[gohan:2044 goku:9001]"));
}

#[test]
fn test_collections_capacity_growth() {
    let (session, result) = run(Lesson::Collections, &[]);
    result.expect("Lesson failed");

    let growth: Vec<String> = session
        .terminal()
        .get_output()
        .into_iter()
        .filter(|line| line.contains("apacity expanded") || line.starts_with("Initial capacity"))
        .collect();
    assert_eq!(
        growth,
        vec![
            "Initial capacity: 5",
            "Capacity expanded to: 10",
            "Capacity expanded to: 20",
            "Capacity expanded to: 40",
        ]
    );
}

#[test]
fn test_collections_worst_scores_are_sorted_and_seeded() {
    let worst = |session: &Session| {
        session
            .terminal()
            .get_output()
            .into_iter()
            .find(|line| line.starts_with("Worst 5 scores: "))
            .expect("worst scores line")
    };

    let (first, _) = run(Lesson::Collections, &[]);
    let (second, _) = run(Lesson::Collections, &[]);
    assert_eq!(worst(&first), worst(&second));

    let numbers: Vec<i64> = worst(&first)
        .trim_start_matches("Worst 5 scores: [")
        .trim_end_matches(']')
        .split(' ')
        .map(|n| n.parse().expect("score"))
        .collect();
    assert_eq!(numbers.len(), 5);
    assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
    assert!(numbers.iter().all(|&n| (0..1000).contains(&n)));
}

#[test]
fn test_collections_window_aliases_in_stack() {
    let (mut session, result) = run(Lesson::Collections, &[]);
    result.expect("Lesson failed");

    // Walk back to the aliasing step
    session.jump_to_end().expect("history is not empty");
    while session.caption() != "A window writes through to its source" {
        session.step_backward().expect("aliasing step is in history");
    }
    let frame = session.stack().current_frame().expect("main frame");
    let storage_of = |name: &str| match frame.get(name) {
        Some(Value::Slice { storage, .. }) => *storage,
        other => panic!("{} is not a slice: {:?}", name, other),
    };
    assert_eq!(storage_of("scores_list"), storage_of("slice"));
}

#[test]
fn test_interfaces_every_example_runs() {
    let (session, result) = run(Lesson::Interfaces, &["ignored"]);
    result.expect("Lesson failed");

    let joined = joined_output(&session);
    assert!(joined.contains("[CONSOLE] Processing complete!"));
    assert!(joined.contains("[FILE] app.log <- Processing complete!"));
    assert!(joined.contains("[SQL] INSERT INTO logs (message) VALUES ('Processing started...')"));
    assert!(joined.contains("[CONSOLE] Server name: WebServer"));
    assert!(joined.contains("Trimmed: Hello World"));
    assert!(joined.contains("String value: hello"));
    assert!(joined.contains("Integer value: 42"));
    assert!(joined.contains("This is a Logger!"));
    assert!(joined.contains("Unknown type"));
    assert!(joined.contains("ReadWriter echoed: composed traits"));
}

#[test]
fn test_history_replays_output() {
    let (mut session, result) = run(Lesson::Functions, &["hello"]);
    result.expect("Lesson failed");

    let final_lines = session.terminal().get_output().len();
    session.rewind_to_start().expect("history is not empty");
    assert!(session.terminal().get_output().is_empty());

    let mut steps = 0;
    while session.step_forward().is_ok() {
        steps += 1;
    }
    assert_eq!(steps + 1, session.total_snapshots());
    assert_eq!(session.terminal().get_output().len(), final_lines);
}

#[test]
fn test_final_step_replays_the_whole_transcript() {
    for lesson in Lesson::all() {
        let (mut session, result) = run(lesson, &["hello"]);
        result.expect("Lesson failed");

        let live_stdout = session.terminal().stdout_text();
        let live_stderr = session.terminal().stderr_text();
        session.jump_to_end().expect("history is not empty");

        assert_eq!(session.terminal().stdout_text(), live_stdout, "{}", lesson);
        assert_eq!(session.terminal().stderr_text(), live_stderr, "{}", lesson);
    }
}

#[test]
fn test_interfaces_last_step_shows_learning_tips() {
    let (mut session, result) = run(Lesson::Interfaces, &[]);
    result.expect("Lesson failed");
    session.jump_to_end().expect("history is not empty");

    assert_eq!(session.caption(), "Learning tips");
    assert!(joined_output(&session).contains("Learning Tips"));
}

#[test]
fn test_argument_count_wins_over_tiny_snapshot_budget() {
    let mut session = Session::new(&Config {
        seed: Some(1),
        snapshot_limit: 10,
    });
    let result = lessons::run(Lesson::Functions, &mut session, &[]);
    assert_eq!(
        result,
        Err(LessonError::ArgumentCount {
            expected: 1,
            got: 0
        })
    );
    assert!(result.unwrap_err().is_silent());
}

#[test]
fn test_tiny_snapshot_budget_stops_the_lesson() {
    let mut session = Session::new(&Config {
        seed: Some(1),
        snapshot_limit: 10,
    });
    let result = lessons::run(Lesson::Pointers, &mut session, &[]);
    assert!(matches!(
        result,
        Err(LessonError::SnapshotLimitExceeded { limit: 10, .. })
    ));
}
