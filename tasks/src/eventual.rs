//! Async outcomes and their combinators.
//!
//! An [`Eventual`] wraps a future that settles to `Completion<Fallible<T, E>>`. Every combinator
//! builds a new future from the primitives in [`crate::primitive`]:
//!
//! - continuations run only when the source resolves; `Faulted` and `Cancelled` pass through;
//! - a continuation that panics faults the derived future;
//! - `try_*` variants translate a fault of their own continuation into `Failed`, and never touch
//!   cancellation.

use std::future::{Future, IntoFuture, Ready};

use futures_util::FutureExt;
use futures_util::future::{Either, join};
use upshot_types::{Fallible, Fault, Verdict};

use crate::primitive::{defer, flatten, on_fault, resolved, then};
use crate::{Completion, EventualVerdict};

/// What an [`Eventual`] settles to.
pub type Settled<T, E> = Completion<Fallible<T, E>>;

/// A future of a [`Fallible`], with the combinator suite lifted over it.
///
/// Awaiting an `Eventual` yields its [`Settled`] output.
///
/// ```
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// use std::future::Ready;
///
/// use upshot_tasks::{Eventual, Settled};
/// use upshot_types::Fallible;
///
/// let start: Eventual<Ready<Settled<i32, String>>> = Eventual::succeeded(21);
/// let doubled = start.map(|n| n * 2).and_then(|n| {
///     if n > 0 {
///         Fallible::Succeeded(n)
///     } else {
///         Fallible::Failed(String::from("not positive"))
///     }
/// });
/// assert_eq!(doubled.await.into_resolved(), Some(Fallible::Succeeded(42)));
/// # });
/// ```
#[must_use = "an eventual outcome does nothing unless awaited"]
pub struct Eventual<F>(F);

impl<F> Eventual<F> {
    pub fn new(task: F) -> Self {
        Self(task)
    }

    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: Future> IntoFuture for Eventual<F> {
    type Output = F::Output;
    type IntoFuture = F;

    fn into_future(self) -> F {
        self.0
    }
}

impl<T, E> Eventual<Ready<Settled<T, E>>> {
    /// An already-settled success.
    pub fn succeeded(value: T) -> Self {
        Self(resolved(Fallible::Succeeded(value)))
    }

    /// An already-settled failure.
    pub fn failed(error: E) -> Self {
        Self(resolved(Fallible::Failed(error)))
    }

    pub fn from_fallible(outcome: Fallible<T, E>) -> Self {
        Self(resolved(outcome))
    }
}

impl<F, T, E> Eventual<F>
where
    F: Future<Output = Settled<T, E>>,
{
    // ------------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------------

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Eventual<impl Future<Output = Settled<U, E>>> {
        Eventual(then(self.0, move |outcome| outcome.map(f)))
    }

    /// Map with an async function; the two steps are flattened into one future.
    pub fn map_async<U, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
    ) -> Eventual<impl Future<Output = Settled<U, E>>>
    where
        Fut: IntoFuture<Output = U>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Succeeded(value) => Either::Left(
                f(value)
                    .into_future()
                    .map(|mapped| Completion::Resolved(Fallible::Succeeded(mapped))),
            ),
            Fallible::Failed(error) => Either::Right(resolved(Fallible::Failed(error))),
        })))
    }

    /// Like [`Eventual::map`], but a panic in `f` becomes `Failed(translate(fault, &value))`.
    pub fn try_map<U>(
        self,
        f: impl FnOnce(T) -> U,
        translate: impl FnOnce(Fault, &T) -> E,
    ) -> Eventual<impl Future<Output = Settled<U, E>>>
    where
        T: Clone,
    {
        Eventual(then(self.0, move |outcome| outcome.try_map(f, translate)))
    }

    /// Like [`Eventual::map_async`], but a fault while starting or polling the mapped future
    /// becomes `Failed(translate(fault, &value))`.
    pub fn try_map_async<U, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
        translate: impl FnOnce(Fault, &T) -> E,
    ) -> Eventual<impl Future<Output = Settled<U, E>>>
    where
        T: Clone,
        Fut: IntoFuture<Output = U>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Succeeded(value) => {
                let input = value.clone();
                Either::Left(on_fault(
                    then(defer(move || f(value).into_future()), Fallible::Succeeded),
                    move |fault| Fallible::Failed(translate(fault, &input)),
                ))
            }
            Fallible::Failed(error) => Either::Right(resolved(Fallible::Failed(error))),
        })))
    }

    pub fn map_err<E2>(
        self,
        f: impl FnOnce(E) -> E2,
    ) -> Eventual<impl Future<Output = Settled<T, E2>>> {
        Eventual(then(self.0, move |outcome| outcome.map_err(f)))
    }

    pub fn widen<E2>(self) -> Eventual<impl Future<Output = Settled<T, E2>>>
    where
        E: Into<E2>,
    {
        Eventual(then(self.0, Fallible::widen))
    }

    // ------------------------------------------------------------------------
    // Bind
    // ------------------------------------------------------------------------

    /// Continue with `f` on success; a failure short-circuits with its error widened to `E2`.
    pub fn and_then<U, E2>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E2>,
    ) -> Eventual<impl Future<Output = Settled<U, E2>>>
    where
        E: Into<E2>,
    {
        Eventual(then(self.0, move |outcome| outcome.and_then(f)))
    }

    /// Continue with an async outcome. The result settles to the first non-success terminal
    /// state: a source fault or cancellation means `f` never runs.
    pub fn and_then_async<U, E2, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
    ) -> Eventual<impl Future<Output = Settled<U, E2>>>
    where
        E: Into<E2>,
        Fut: IntoFuture<Output = Settled<U, E2>>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Succeeded(value) => Either::Left(f(value).into_future()),
            Fallible::Failed(error) => Either::Right(resolved(Fallible::Failed(error.into()))),
        })))
    }

    pub fn try_and_then<U, E2>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E2>,
        translate: impl FnOnce(Fault, &T) -> E2,
    ) -> Eventual<impl Future<Output = Settled<U, E2>>>
    where
        T: Clone,
        E: Into<E2>,
    {
        Eventual(then(self.0, move |outcome| outcome.try_and_then(f, translate)))
    }

    /// Like [`Eventual::and_then_async`], but a fault of the continuation (while starting it or
    /// inside the future it returns) becomes `Failed(translate(fault, &value))`. A cancelled
    /// continuation stays cancelled.
    pub fn try_and_then_async<U, E2, Fut>(
        self,
        f: impl FnOnce(T) -> Fut,
        translate: impl FnOnce(Fault, &T) -> E2,
    ) -> Eventual<impl Future<Output = Settled<U, E2>>>
    where
        T: Clone,
        E: Into<E2>,
        Fut: IntoFuture<Output = Settled<U, E2>>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Succeeded(value) => {
                let input = value.clone();
                Either::Left(on_fault(
                    defer(move || f(value).into_future()).map(Completion::flatten),
                    move |fault| Fallible::Failed(translate(fault, &input)),
                ))
            }
            Fallible::Failed(error) => Either::Right(resolved(Fallible::Failed(error.into()))),
        })))
    }

    /// Recover from a failure with `f`; a success passes through.
    pub fn or_else<E2>(
        self,
        f: impl FnOnce(E) -> Fallible<T, E2>,
    ) -> Eventual<impl Future<Output = Settled<T, E2>>> {
        Eventual(then(self.0, move |outcome| outcome.or_else(f)))
    }

    /// Turn a fault of this future into `Failed(translate(fault))`. Cancellation is untouched.
    pub fn recover_faults(
        self,
        translate: impl FnOnce(Fault) -> E,
    ) -> Eventual<impl Future<Output = Settled<T, E>>> {
        Eventual(on_fault(self.0, move |fault| Fallible::Failed(translate(fault))))
    }

    // ------------------------------------------------------------------------
    // Touch & logical
    // ------------------------------------------------------------------------

    pub fn inspect(self, f: impl FnOnce(&T)) -> Eventual<impl Future<Output = Settled<T, E>>> {
        Eventual(then(self.0, move |outcome| outcome.inspect(f)))
    }

    pub fn inspect_err(self, f: impl FnOnce(&E)) -> Eventual<impl Future<Output = Settled<T, E>>> {
        Eventual(then(self.0, move |outcome| outcome.inspect_err(f)))
    }

    /// Await an async side effect on the value, then settle to the unchanged outcome. A fault in
    /// the side effect faults the derived future.
    pub fn inspect_async<Fut>(
        self,
        f: impl FnOnce(&T) -> Fut,
    ) -> Eventual<impl Future<Output = Settled<T, E>>>
    where
        Fut: IntoFuture<Output = ()>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Succeeded(value) => {
                let touch = f(&value).into_future();
                Either::Left(
                    touch.map(move |()| Completion::Resolved(Fallible::Succeeded(value))),
                )
            }
            Fallible::Failed(error) => Either::Right(resolved(Fallible::Failed(error))),
        })))
    }

    /// [`Eventual::inspect_async`] for the error side.
    pub fn inspect_err_async<Fut>(
        self,
        f: impl FnOnce(&E) -> Fut,
    ) -> Eventual<impl Future<Output = Settled<T, E>>>
    where
        Fut: IntoFuture<Output = ()>,
    {
        Eventual(flatten(then(self.0, move |outcome| match outcome {
            Fallible::Failed(error) => {
                let touch = f(&error).into_future();
                Either::Left(touch.map(move |()| Completion::Resolved(Fallible::Failed(error))))
            }
            Fallible::Succeeded(value) => Either::Right(resolved(Fallible::Succeeded(value))),
        })))
    }

    /// The binary view: affirmed iff the outcome resolves to a success.
    pub fn verdict(self) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict::new(then(self.0, |outcome| outcome.verdict()))
    }

    pub fn invert(self) -> Eventual<impl Future<Output = Settled<E, T>>> {
        Eventual(then(self.0, Fallible::invert))
    }

    /// Settle both futures concurrently and pair the values.
    ///
    /// The left side decides first: a left fault, cancellation, or failure wins over anything on
    /// the right.
    pub fn zip<U, E2>(
        self,
        other: impl IntoFuture<Output = Settled<U, E2>>,
    ) -> Eventual<impl Future<Output = Settled<(T, U), E>>>
    where
        E2: Into<E>,
    {
        Eventual(
            join(self.0, other.into_future()).map(|(first, second)| match first {
                Completion::Resolved(Fallible::Succeeded(a)) => {
                    second.map(|b| Fallible::Succeeded(a).zip(b))
                }
                Completion::Resolved(Fallible::Failed(error)) => {
                    Completion::Resolved(Fallible::Failed(error))
                }
                Completion::Faulted(fault) => Completion::Faulted(fault),
                Completion::Cancelled => Completion::Cancelled,
            }),
        )
    }

    // ------------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------------

    /// The value, or continue unwinding: a failure panics with the error as payload, a fault
    /// resumes its original payload, and a cancellation resumes with `Cancelled`.
    pub async fn get(self) -> T
    where
        E: Send + 'static,
    {
        self.0.await.unwrap_or_resume().get()
    }
}

impl<F, T, E1, E2> Eventual<F>
where
    F: Future<Output = Settled<Fallible<T, E2>, E1>>,
{
    /// Collapse a nested outcome, widening the outer error.
    pub fn flatten(self) -> Eventual<impl Future<Output = Settled<T, E2>>>
    where
        E1: Into<E2>,
    {
        Eventual(then(self.0, Fallible::flatten))
    }
}
