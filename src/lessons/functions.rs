//! Lesson: declarations and calling conventions
//!
//! Covers bindings, functions with zero, one and two results, discarding a
//! result with `_`, and results with named fields. The lesson also carries
//! the tool's one command-line contract: it needs exactly one user argument.

use crate::errors::LessonError;
use crate::session::Session;

/// Fixed local constant echoed in the "times" line
pub const TIMES: i64 = 5;

/// Fixed local string echoed in the "well" line
pub const NOT_OVER: &str = "its not over";

/// Greeting written to the diagnostic stream before arguments are checked
pub const BANNER: &str = "LESGOO we learning the basics!!";

/// Quotient and remainder, returned together with named fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Division {
    pub quotient: i64,
    pub remainder: i64,
}

/// Function with no result
pub fn log_line(session: &mut Session, message: &str) {
    session.println(message);
}

/// Function with one result
pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

/// Function with two results: a power level and whether it is over 9000.
///
/// Every name gets the same answer.
pub fn power(_name: &str) -> (i64, bool) {
    (9000, true)
}

/// Quotient and remainder of `a / b`
pub fn divide_with_names(a: i64, b: i64) -> Result<Division, LessonError> {
    if b == 0 {
        return Err(LessonError::DivisionByZero);
    }
    Ok(Division {
        quotient: a / b,
        remainder: a % b,
    })
}

/// Run the lesson. `args` are the user arguments, without the program name.
pub fn run(session: &mut Session, args: &[String]) -> Result<(), LessonError> {
    session.enter("main");

    let a: i64 = TIMES;
    let b = NOT_OVER;
    session.bind("a", a);
    session.bind("b", b);
    session.eprintln(BANNER);

    // Checked before any checkpoint so a history budget can't mask it
    if args.len() != 1 {
        return Err(LessonError::ArgumentCount {
            expected: 1,
            got: args.len(),
        });
    }
    session.checkpoint("Declare a with an explicit type and b by inference")?;

    let arg = &args[0];
    session.bind("arg", arg.as_str());
    session.println(format!("its over {}", arg));
    session.println(format!("its over {} times", a));
    session.println(format!("well {}", b));
    session.checkpoint("Echo the argument and the two locals")?;

    // 1. No result
    session.println("\n--- Calling log_line() ---");
    log_line(session, "This message is printed by the log_line function!");
    log_line(session, "Functions make code reusable and organized");
    session.checkpoint("Call a function with no result")?;

    // 2. One result
    session.println("\n--- Calling add() ---");
    let result = traced_add(session, 10, 20)?;
    session.bind("result", result);
    session.println(format!("add(10, 20) = {}", result));

    let sum = traced_add(session, a, 15)?;
    session.bind("sum", sum);
    session.println(format!("add({}, 15) = {}", a, sum));
    session.checkpoint("Call a function with one result")?;

    // 3. Two results
    session.println("\n--- Calling power() ---");
    let (power_level, is_over_thousand) = power("Goku");
    session.bind("power_level", power_level);
    session.bind("is_over_thousand", is_over_thousand);
    session.println(format!(
        "Power level: {}, Over 9000: {}",
        power_level, is_over_thousand
    ));

    let (_, exists) = power("Vegeta");
    session.bind("exists", exists);
    session.println(format!("Does Vegeta exist: {}", exists));
    session.checkpoint("Keep both results, then discard the first with _")?;

    // 4. Discarding
    session.println(" Demonstrating Discard Values");
    demonstrate_discard_value(session)?;
    demonstrate_keep_only_first(session)?;

    // 5. Named results
    session.println("\nDemonstrating Named Results");
    let Division {
        quotient,
        remainder,
    } = divide_with_names(17, 5)?;
    session.bind("quotient", quotient);
    session.bind("remainder", remainder);
    session.println(format!(
        "divide_with_names(17, 5) = quotient: {}, remainder: {}",
        quotient, remainder
    ));
    session.checkpoint("Destructure a result with named fields")?;

    // 6. Everything together
    demonstrate_all_concepts(session)?;

    session.leave();
    Ok(())
}

fn traced_add(session: &mut Session, a: i64, b: i64) -> Result<i64, LessonError> {
    session.enter("add");
    session.bind("a", a);
    session.bind("b", b);
    let sum = add(a, b);
    session.checkpoint(format!("add({}, {}) returns {}", a, b, sum))?;
    session.leave();
    Ok(sum)
}

fn demonstrate_discard_value(session: &mut Session) -> Result<(), LessonError> {
    session.enter("demonstrate_discard_value");
    let (_, exists) = power("Vegeta");
    session.bind("exists", exists);
    session.println(format!(
        "Example 1 - Ignoring power level: Does Vegeta exist? {}",
        exists
    ));
    session.checkpoint("Only the flag is kept")?;
    session.leave();
    Ok(())
}

fn demonstrate_keep_only_first(session: &mut Session) -> Result<(), LessonError> {
    session.enter("demonstrate_keep_only_first");
    let (power_level, _) = power("Superman");
    session.bind("power_level", power_level);
    session.println(format!(
        "Example 2 - Ignoring existence: Power level = {}",
        power_level
    ));
    session.checkpoint("Only the power level is kept")?;
    session.leave();
    Ok(())
}

fn demonstrate_all_concepts(session: &mut Session) -> Result<(), LessonError> {
    session.enter("demonstrate_all_concepts");
    session.println("\nFULL EXAMPLE: All Concepts Together ");

    let Division {
        quotient: q,
        remainder: r,
    } = divide_with_names(17, 5)?;
    session.bind("q", q);
    session.bind("r", r);
    session.println(format!(
        "17 divided by 5 = quotient: {}, remainder: {}",
        q, r
    ));

    let total = add(100, 250);
    session.bind("total", total);
    session.println(format!("add(100, 250) = {}", total));

    let (_, is_real) = power("Naruto");
    session.bind("is_real", is_real);
    session.println(format!(
        "Is Naruto real? {} (ignoring power level)",
        is_real
    ));
    session.checkpoint("All concepts together")?;
    session.leave();
    Ok(())
}
