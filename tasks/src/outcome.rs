//! Async value outcomes: the untyped counterpart of [`Eventual`](crate::Eventual).

use std::future::{Future, IntoFuture, Ready};

use futures_util::FutureExt;
use futures_util::future::{Either, join};
use upshot_types::{Fallible, Outcome, Verdict};

use crate::primitive::{flatten, resolved, then};
use crate::{Completion, Eventual, EventualVerdict, Settled};

/// What an [`EventualOutcome`] settles to.
pub type SettledOutcome<T> = Completion<Outcome<T>>;

/// A future of an [`Outcome`], with the value-outcome combinators lifted over it.
///
/// Follows the same rules as [`Eventual`]: continuations run only on resolution, a panicking
/// continuation faults the derived future, and cancellation always passes through.
#[must_use = "an eventual outcome does nothing unless awaited"]
pub struct EventualOutcome<F>(F);

impl<F> EventualOutcome<F> {
    pub fn new(task: F) -> Self {
        Self(task)
    }

    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: Future> IntoFuture for EventualOutcome<F> {
    type Output = F::Output;
    type IntoFuture = F;

    fn into_future(self) -> F {
        self.0
    }
}

impl<T> EventualOutcome<Ready<SettledOutcome<T>>> {
    pub fn succeeded(value: T) -> Self {
        Self(resolved(Outcome::Succeeded(value)))
    }

    pub fn denied() -> Self {
        Self(resolved(Outcome::Denied))
    }

    pub fn from_outcome(outcome: Outcome<T>) -> Self {
        Self(resolved(outcome))
    }
}

impl<F, T> EventualOutcome<F>
where
    F: Future<Output = SettledOutcome<T>>,
{
    pub fn map<U>(
        self,
        f: impl FnOnce(T) -> U,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<U>>> {
        EventualOutcome(then(self.0, move |outcome| outcome.map(f)))
    }

    pub fn map_async<U, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<U>>>
    where
        Fut: IntoFuture<Output = U>,
    {
        EventualOutcome(flatten(then(self.0, move |outcome| match outcome {
            Outcome::Succeeded(value) => Either::Left(
                f(value)
                    .into_future()
                    .map(|mapped| Completion::Resolved(Outcome::Succeeded(mapped))),
            ),
            Outcome::Denied => Either::Right(resolved(Outcome::Denied)),
        })))
    }

    pub fn and_then<U>(
        self,
        f: impl FnOnce(T) -> Outcome<U>,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<U>>> {
        EventualOutcome(then(self.0, move |outcome| outcome.and_then(f)))
    }

    /// Continue with an async outcome; a denial means `f` never runs.
    pub fn and_then_async<U, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<U>>>
    where
        Fut: IntoFuture<Output = SettledOutcome<U>>,
    {
        EventualOutcome(flatten(then(self.0, move |outcome| match outcome {
            Outcome::Succeeded(value) => Either::Left(f(value).into_future()),
            Outcome::Denied => Either::Right(resolved(Outcome::Denied)),
        })))
    }

    pub fn filter(
        self,
        predicate: impl FnOnce(&T) -> bool,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(then(self.0, move |outcome| outcome.filter(predicate)))
    }

    pub fn inspect(
        self,
        f: impl FnOnce(&T),
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(then(self.0, move |outcome| outcome.inspect(f)))
    }

    pub fn inspect_denied(
        self,
        f: impl FnOnce(),
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(then(self.0, move |outcome| outcome.inspect_denied(f)))
    }

    /// Await an async side effect on the value, then settle to the unchanged outcome.
    pub fn inspect_async<Fut>(
        self,
        f: impl FnOnce(&T) -> Fut,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>>
    where
        Fut: IntoFuture<Output = ()>,
    {
        EventualOutcome(flatten(then(self.0, move |outcome| match outcome {
            Outcome::Succeeded(value) => {
                let touch = f(&value).into_future();
                Either::Left(touch.map(move |()| Completion::Resolved(Outcome::Succeeded(value))))
            }
            Outcome::Denied => Either::Right(resolved(Outcome::Denied)),
        })))
    }

    /// Both values, or a denial.
    ///
    /// Both futures are polled concurrently. The left side decides first: a left fault,
    /// cancellation, or denial wins over anything on the right.
    pub fn zip<U>(
        self,
        other: impl IntoFuture<Output = SettledOutcome<U>>,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<(T, U)>>> {
        EventualOutcome(join(self.0, other.into_future()).map(|(first, second)| match first {
            Completion::Resolved(Outcome::Succeeded(a)) => {
                second.map(|b| Outcome::Succeeded(a).zip(b))
            }
            Completion::Resolved(Outcome::Denied) => Completion::Resolved(Outcome::Denied),
            Completion::Faulted(fault) => Completion::Faulted(fault),
            Completion::Cancelled => Completion::Cancelled,
        }))
    }

    /// Alias of [`EventualOutcome::zip`].
    pub fn and<U>(
        self,
        other: impl IntoFuture<Output = SettledOutcome<U>>,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<(T, U)>>> {
        self.zip(other)
    }

    /// The first success. A left success settles the result; otherwise the right side does.
    pub fn or(
        self,
        other: impl IntoFuture<Output = SettledOutcome<T>>,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(join(self.0, other.into_future()).map(|(first, second)| match first {
            Completion::Resolved(Outcome::Succeeded(a)) => {
                Completion::Resolved(Outcome::Succeeded(a))
            }
            Completion::Resolved(Outcome::Denied) => second,
            Completion::Faulted(fault) => Completion::Faulted(fault),
            Completion::Cancelled => Completion::Cancelled,
        }))
    }

    /// The single success when exactly one side succeeded. Needs both sides; a left fault or
    /// cancellation wins.
    pub fn xor(
        self,
        other: impl IntoFuture<Output = SettledOutcome<T>>,
    ) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(join(self.0, other.into_future()).map(|(first, second)| match first {
            Completion::Resolved(a) => second.map(|b| a.xor(b)),
            Completion::Faulted(fault) => Completion::Faulted(fault),
            Completion::Cancelled => Completion::Cancelled,
        }))
    }

    /// Attach an error to a denial.
    pub fn ok_or<E>(self, error: E) -> Eventual<impl Future<Output = Settled<T, E>>> {
        Eventual::new(then(self.0, move |outcome| outcome.ok_or(error)))
    }

    pub fn ok_or_else<E>(
        self,
        error: impl FnOnce() -> E,
    ) -> Eventual<impl Future<Output = Settled<T, E>>> {
        Eventual::new(then(self.0, move |outcome| outcome.ok_or_else(error)))
    }

    pub fn verdict(self) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict::new(then(self.0, |outcome| outcome.verdict()))
    }

    /// The value, or continue unwinding: a denial panics with
    /// [`ValueAbsent`](upshot_types::ValueAbsent), a fault resumes its original payload, and a
    /// cancellation resumes with `Cancelled`.
    pub async fn get(self) -> T {
        self.0.await.unwrap_or_resume().get()
    }
}

impl<F, T> EventualOutcome<F>
where
    F: Future<Output = SettledOutcome<Outcome<T>>>,
{
    pub fn flatten(self) -> EventualOutcome<impl Future<Output = SettledOutcome<T>>> {
        EventualOutcome(then(self.0, Outcome::flatten))
    }
}

impl<T, E> From<Fallible<T, E>> for EventualOutcome<Ready<SettledOutcome<T>>> {
    fn from(outcome: Fallible<T, E>) -> Self {
        Self::from_outcome(outcome.into())
    }
}
