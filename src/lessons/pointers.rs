//! Lesson: passing a record by copy versus by exclusive reference
//!
//! `super_by_value` receives its own copy, so the boost it applies never
//! reaches the caller. `super_by_ref` borrows the caller's record mutably for
//! the duration of the call, so the boost is observed afterwards.

use crate::errors::LessonError;
use crate::memory::value::Value;
use crate::session::Session;
use tracing::debug;

/// Amount added by both `super_*` functions
pub const POWER_BOOST: i64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperSaiyan {
    pub name: String,
    pub power_level: i64,
    pub fusion: bool,
}

impl SuperSaiyan {
    pub fn goku() -> Self {
        SuperSaiyan {
            name: "Goku".to_string(),
            power_level: 15000,
            fusion: false,
        }
    }
}

impl From<&SuperSaiyan> for Value {
    fn from(s: &SuperSaiyan) -> Self {
        Value::record(
            "SuperSaiyan",
            [
                ("Name", Value::from(s.name.as_str())),
                ("PowerLevel", Value::Int(s.power_level)),
                ("Fusion", Value::Bool(s.fusion)),
            ],
        )
    }
}

/// Boost a copy; the caller's record is untouched.
///
/// The frame shows the boosted copy as the local `s`.
pub fn super_by_value(session: &mut Session, mut s: SuperSaiyan) -> Result<(), LessonError> {
    session.enter("super_by_value");
    s.power_level += POWER_BOOST;
    debug!(power_level = s.power_level, "boosted a copy");
    session.bind("s", &s);
    session.checkpoint("super_by_value boosts its own copy")?;
    session.leave();
    Ok(())
}

/// Boost the caller's record through an exclusive borrow
pub fn super_by_ref(session: &mut Session, s: &mut SuperSaiyan) -> Result<(), LessonError> {
    session.enter("super_by_ref");
    s.power_level += POWER_BOOST;
    session.bind("s", Value::from(&*s).by_ref());
    session.checkpoint("super_by_ref writes through the borrow")?;
    session.leave();
    Ok(())
}

pub fn run(session: &mut Session) -> Result<(), LessonError> {
    session.enter("main");

    let mut goku = SuperSaiyan::goku();
    session.bind("goku", &goku);
    session.checkpoint("Construct goku")?;

    super_by_value(session, goku.clone())?;
    session.println(format!("goku.PowerLevel after copy: {}", goku.power_level));
    session.checkpoint("The caller still sees the original power level")?;

    super_by_ref(session, &mut goku)?;
    session.bind("goku", &goku);
    session.println(format!("goku.PowerLevel: {}", goku.power_level));
    session.println(format!("goku: {}", Value::from(&goku).by_ref()));
    session.checkpoint("The caller observes the boost")?;

    session.leave();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn copy_mutation_is_not_observed() {
        let mut session = Session::new(&Config::default());
        let goku = SuperSaiyan::goku();
        super_by_value(&mut session, goku.clone()).unwrap();
        assert_eq!(goku.power_level, 15000);

        // The callee's frame held the boosted copy
        session.rewind_to_start().unwrap();
        let frame = session.stack().current_frame().unwrap();
        assert_eq!(frame.function_name, "super_by_value");
        assert_eq!(
            frame.get("s").and_then(|s| s.field("PowerLevel")),
            Some(&Value::Int(15000 + POWER_BOOST))
        );
    }

    #[test]
    fn reference_mutation_is_observed() {
        let mut session = Session::new(&Config::default());
        let mut goku = SuperSaiyan::goku();
        super_by_ref(&mut session, &mut goku).unwrap();
        assert_eq!(goku.power_level, 15000 + POWER_BOOST);
        assert_eq!(goku.name, "Goku");
        assert!(!goku.fusion);
    }
    #[test]
    fn lesson_output() {
        let mut session = Session::new(&Config::default());
        run(&mut session).unwrap();
        assert_eq!(
            session.terminal().get_output(),
            vec![
                "goku.PowerLevel after copy: 15000",
                "goku.PowerLevel: 18000",
                "goku: &{Goku 18000 false}",
            ]
        );
    }
}
