//! Collection-level upshot combinators.
//!
//! Extension traits apply the outcome combinators element-wise. Every adapter is lazy, yields
//! exactly one output per input in the same order, and never short-circuits across elements: a
//! failure in one element does not affect its siblings.
//!
//! | Items | Trait |
//! |-------|-------|
//! | `Fallible<T, E>` | [`FallibleIterExt`] |
//! | `Outcome<T>` | [`OutcomeIterExt`] |
//! | raw values | [`AttemptIterExt`] |
//! | async outcomes | [`EventualIterExt`] |
//! | plain tasks | [`TaskIterExt`] |
//!
//! [`tally`] settles a collection of async outcomes and partitions the results.

mod attempt;
mod eventual;
mod fallible;
mod outcome;
mod tally;

pub use attempt::AttemptIterExt;
pub use eventual::{EventualIterExt, TaskIterExt};
pub use fallible::FallibleIterExt;
pub use outcome::OutcomeIterExt;
pub use tally::{Tally, tally};
