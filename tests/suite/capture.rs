//! Panic capture through the sync combinators and adapters

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use upshot::{Cancelled, Fallible, Fault, Outcome, ValueAbsent, attempt1_with, attempt2, capture};

use crate::common::{divide, init_tracing};

#[derive(Debug, Clone, PartialEq, Error)]
enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("not a number: {0}")]
    NotANumber(String),
}

#[derive(Debug, PartialEq, Error)]
enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("divide failed for {0}")]
    Divide(i32),
}

fn parse(input: &str) -> Fallible<i32, ParseError> {
    if input.is_empty() {
        return Fallible::Failed(ParseError::Empty);
    }
    input
        .parse()
        .map_err(|_| ParseError::NotANumber(input.to_string()))
        .into()
}

#[test]
fn pipeline_widens_parse_errors_and_translates_faults() {
    init_tracing();
    let run = |input: &str| -> Fallible<i32, AppError> {
        parse(input)
            .widen::<AppError>()
            .try_and_then(|n| Fallible::Succeeded(divide(100, n)), |_, n| AppError::Divide(*n))
    };

    assert_eq!(run("4"), Fallible::Succeeded(25));
    assert_eq!(run("0"), Fallible::Failed(AppError::Divide(0)));
    assert_eq!(run(""), Fallible::Failed(AppError::Parse(ParseError::Empty)));
    assert_eq!(
        run("x"),
        Fallible::Failed(AppError::Parse(ParseError::NotANumber("x".to_string())))
    );
}

#[test]
fn plain_map_lets_panics_unwind() {
    let result = panic::catch_unwind(|| {
        Fallible::<i32, ParseError>::Succeeded(0).map(|n| divide(1, n))
    });
    assert!(result.is_err());
}

#[test]
fn adapters_capture_per_call() {
    init_tracing();
    let safe_divide = attempt2(divide);
    assert_eq!(safe_divide(9, 3).ok(), Some(3));
    let fault = safe_divide(9, 0).err();
    assert!(fault.is_some_and(|fault| fault.message().contains("divide by zero")));

    let labelled = attempt1_with(|n: i32| divide(10, n), |_, n| format!("cannot divide by {n}"));
    assert_eq!(labelled(0), Fallible::Failed("cannot divide by 0".to_string()));
    assert_eq!(labelled(5), Fallible::Succeeded(2));
}

#[test]
fn cancellation_is_never_captured() {
    let outer = panic::catch_unwind(|| capture::catching(|| -> i32 { Cancelled::raise() }));
    let payload = outer.expect_err("cancellation must keep unwinding");
    assert!(payload.downcast_ref::<Cancelled>().is_some());
}

#[test]
fn fault_keeps_the_original_payload() {
    let fault = capture::catching(|| -> i32 { panic::panic_any(ParseError::Empty) }).unwrap_err();
    assert!(fault.is::<ParseError>());
    assert_eq!(fault.downcast::<ParseError>().ok(), Some(ParseError::Empty));
}

#[test]
fn get_rethrows_into_a_capturable_fault() {
    let failed = Fallible::<i32, ParseError>::Failed(ParseError::Empty);
    let fault = capture::catching(move || failed.get()).unwrap_err();
    assert_eq!(fault.downcast::<ParseError>().ok(), Some(ParseError::Empty));

    let denied = panic::catch_unwind(AssertUnwindSafe(|| Outcome::<i32>::Denied.get()));
    let payload = denied.expect_err("denied get panics");
    assert!(payload.downcast_ref::<ValueAbsent>().is_some());
}

#[test]
fn faults_convert_into_anyhow() {
    fn load() -> anyhow::Result<i32> {
        let value = capture::catching(|| divide(1, 0))?;
        Ok(value)
    }

    let err = load().unwrap_err();
    let fault = err.downcast_ref::<Fault>().expect("fault source");
    assert!(fault.message().contains("divide by zero"));
}
