//! Outcome types for upshot.
//!
//! This crate contains the three outcome shapes and their synchronous combinators, with no IO and
//! no async. Everything here can be used from any layer of an application.
//!
//! - [`Verdict`]: affirmed or denied, nothing attached.
//! - [`Outcome<T>`]: a value, or a denial with no detail.
//! - [`Fallible<T, E>`]: a value, or an error.
//!
//! Panics are not control flow. They are captured only by the explicit `try_*` combinators and
//! the [`capture`] adapters, and only ever become a [`Fault`] that a caller-supplied translator
//! turns into a domain error.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

pub mod capture;
mod fallible;
mod outcome;
mod value;
mod verdict;

pub use capture::{
    Cancelled, Fault, FaultLogLevel, FaultPolicy, attempt, attempt_with, attempt1, attempt1_with,
    attempt2, attempt2_with, attempt3, attempt3_with,
};
pub use fallible::Fallible;
pub use outcome::{Outcome, ValueAbsent};
pub use value::{AsVerdict, ValueOutcome, combine, zip, zip3};
pub use verdict::Verdict;
