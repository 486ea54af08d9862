//! Asynchronous lifting for upshot outcomes.
//!
//! An [`Eventual`] is a future of a [`Fallible`](upshot_types::Fallible) that settles to one of
//! three terminal states ([`Completion`]): resolved, faulted by a panic, or cancelled. The
//! combinators on `Eventual` mirror the synchronous suite and keep the three states apart.
//! [`EventualOutcome`] and [`EventualVerdict`] do the same for `Outcome` and `Verdict`.
//!
//! The layer owns no executor. It only awaits futures supplied by the caller and builds derived
//! futures through the functions in [`primitive`].

mod completion;
mod eventual;
mod lift;
mod outcome;
pub mod primitive;
mod verdict;

pub use completion::{Completion, Interrupted};
pub use eventual::{Eventual, Settled};
pub use lift::{Lift, attempt_call, attempt_call2, attempt_call3, attempt_task, attempt_task_fault};
pub use outcome::{EventualOutcome, SettledOutcome};
pub use verdict::EventualVerdict;
