//! Entry points into the async layer: lifting immediate outcomes and capturing task faults.

use std::future::{Future, IntoFuture, Ready};

use upshot_types::{Fallible, Fault, Outcome, Verdict};

use crate::primitive::{defer, guard, on_fault, then};
use crate::{Completion, Eventual, EventualOutcome, EventualVerdict, Settled, SettledOutcome};

/// Lift an immediate outcome into an already-settled future, so it composes with async
/// continuations.
///
/// `Fallible` and `Result` lift into an [`Eventual`], `Outcome` and `Option` into an
/// [`EventualOutcome`], and `Verdict` into an [`EventualVerdict`].
pub trait Lift {
    type Lifted;

    fn lift(self) -> Self::Lifted;
}

impl<T, E> Lift for Fallible<T, E> {
    type Lifted = Eventual<Ready<Settled<T, E>>>;

    fn lift(self) -> Self::Lifted {
        Eventual::from_fallible(self)
    }
}

impl<T, E> Lift for Result<T, E> {
    type Lifted = Eventual<Ready<Settled<T, E>>>;

    fn lift(self) -> Self::Lifted {
        Eventual::from_fallible(self.into())
    }
}

impl<T> Lift for Outcome<T> {
    type Lifted = EventualOutcome<Ready<SettledOutcome<T>>>;

    fn lift(self) -> Self::Lifted {
        EventualOutcome::from_outcome(self)
    }
}

impl<T> Lift for Option<T> {
    type Lifted = EventualOutcome<Ready<SettledOutcome<T>>>;

    fn lift(self) -> Self::Lifted {
        EventualOutcome::from_outcome(self.into())
    }
}

impl Lift for Verdict {
    type Lifted = EventualVerdict<Ready<Completion<Verdict>>>;

    fn lift(self) -> Self::Lifted {
        EventualVerdict::from_verdict(self)
    }
}

/// Await a plain task; a fault becomes `Failed(translate(fault))`. Cancellation stays
/// cancelled.
pub fn attempt_task<Fut, E>(
    task: Fut,
    translate: impl FnOnce(Fault) -> E,
) -> Eventual<impl Future<Output = Settled<Fut::Output, E>>>
where
    Fut: IntoFuture,
{
    Eventual::new(on_fault(
        then(guard(task.into_future()), Fallible::Succeeded),
        move |fault| Fallible::Failed(translate(fault)),
    ))
}

/// [`attempt_task`] with the fault itself as the error.
pub fn attempt_task_fault<Fut>(
    task: Fut,
) -> Eventual<impl Future<Output = Settled<Fut::Output, Fault>>>
where
    Fut: IntoFuture,
{
    attempt_task(task, |fault| fault)
}

/// Call an async function of one argument; a fault while starting or awaiting it becomes
/// `Failed(translate(fault, &input))`.
pub fn attempt_call<A, Fut, E>(
    f: impl FnOnce(A) -> Fut,
    input: A,
    translate: impl FnOnce(Fault, &A) -> E,
) -> Eventual<impl Future<Output = Settled<Fut::Output, E>>>
where
    A: Clone,
    Fut: IntoFuture,
{
    let context = input.clone();
    Eventual::new(on_fault(
        then(defer(move || f(input).into_future()), Fallible::Succeeded),
        move |fault| Fallible::Failed(translate(fault, &context)),
    ))
}

/// [`attempt_call`] for two arguments.
pub fn attempt_call2<A, B, Fut, E>(
    f: impl FnOnce(A, B) -> Fut,
    first: A,
    second: B,
    translate: impl FnOnce(Fault, &A, &B) -> E,
) -> Eventual<impl Future<Output = Settled<Fut::Output, E>>>
where
    A: Clone,
    B: Clone,
    Fut: IntoFuture,
{
    let context = (first.clone(), second.clone());
    Eventual::new(on_fault(
        then(defer(move || f(first, second).into_future()), Fallible::Succeeded),
        move |fault| Fallible::Failed(translate(fault, &context.0, &context.1)),
    ))
}

/// [`attempt_call`] for three arguments.
pub fn attempt_call3<A, B, C, Fut, E>(
    f: impl FnOnce(A, B, C) -> Fut,
    first: A,
    second: B,
    third: C,
    translate: impl FnOnce(Fault, &A, &B, &C) -> E,
) -> Eventual<impl Future<Output = Settled<Fut::Output, E>>>
where
    A: Clone,
    B: Clone,
    C: Clone,
    Fut: IntoFuture,
{
    let context = (first.clone(), second.clone(), third.clone());
    Eventual::new(on_fault(
        then(defer(move || f(first, second, third).into_future()), Fallible::Succeeded),
        move |fault| Fallible::Failed(translate(fault, &context.0, &context.1, &context.2)),
    ))
}
