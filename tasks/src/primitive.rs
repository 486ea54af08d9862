//! The runtime primitives the lifting layer is built on.
//!
//! Everything in [`crate::Eventual`] is expressed through these functions, so the combinators
//! do not depend on a particular executor. [`joined`] and [`cancellable`] adapt tokio join
//! handles and `futures-util` abort handles into the same three-state [`Completion`].

use std::future::{Future, Ready, ready};
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;
use futures_util::future::{AbortHandle, Abortable};
use tokio::task::JoinHandle;
use upshot_types::Fault;

use crate::Completion;

/// An already-resolved task.
pub fn resolved<T>(value: T) -> Ready<Completion<T>> {
    ready(Completion::Resolved(value))
}

/// Run `f` synchronously; a panic becomes `Faulted`, or `Cancelled` for a cancellation payload.
pub fn contain<U>(f: impl FnOnce() -> Completion<U>) -> Completion<U> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(Completion::from_panic)
}

/// Poll `task` to completion; a panic while polling becomes `Faulted`, or `Cancelled` for a
/// cancellation payload.
pub async fn guard<F: Future>(task: F) -> Completion<F::Output> {
    match AssertUnwindSafe(task).catch_unwind().await {
        Ok(value) => Completion::Resolved(value),
        Err(payload) => Completion::from_panic(payload),
    }
}

/// Await `task`, then run exactly one of the three continuations for its terminal state.
///
/// A panic inside the continuation faults the returned task instead of unwinding into the
/// caller's poll.
pub async fn on_completion<T, U>(
    task: impl Future<Output = Completion<T>>,
    on_success: impl FnOnce(T) -> Completion<U>,
    on_fault: impl FnOnce(Fault) -> Completion<U>,
    on_cancel: impl FnOnce() -> Completion<U>,
) -> Completion<U> {
    match task.await {
        Completion::Resolved(value) => contain(|| on_success(value)),
        Completion::Faulted(fault) => contain(|| on_fault(fault)),
        Completion::Cancelled => contain(on_cancel),
    }
}

/// Continue a resolved task with `on_success`; faults and cancellation pass through untouched.
pub async fn then<T, U>(
    task: impl Future<Output = Completion<T>>,
    on_success: impl FnOnce(T) -> U,
) -> Completion<U> {
    on_completion(
        task,
        |value| Completion::Resolved(on_success(value)),
        Completion::Faulted,
        || Completion::Cancelled,
    )
    .await
}

/// Turn a fault into a value with `handler`; resolution and cancellation pass through untouched.
pub async fn on_fault<T>(
    task: impl Future<Output = Completion<T>>,
    handler: impl FnOnce(Fault) -> T,
) -> Completion<T> {
    on_completion(
        task,
        Completion::Resolved,
        |fault| Completion::Resolved(handler(fault)),
        || Completion::Cancelled,
    )
    .await
}

/// Collapse a task of a task. The earliest non-success terminal state wins: an outer fault or
/// cancellation means the inner task is never polled.
pub async fn flatten<F, T>(task: impl Future<Output = Completion<F>>) -> Completion<T>
where
    F: Future<Output = Completion<T>>,
{
    match task.await {
        Completion::Resolved(inner) => guard(inner).await.flatten(),
        Completion::Faulted(fault) => Completion::Faulted(fault),
        Completion::Cancelled => Completion::Cancelled,
    }
}

/// Start a task lazily, on first poll. A panic while starting it is contained like a panic
/// while polling it.
pub async fn defer<F: Future>(start: impl FnOnce() -> F) -> Completion<F::Output> {
    match contain(|| Completion::Resolved(start())) {
        Completion::Resolved(task) => guard(task).await,
        Completion::Faulted(fault) => Completion::Faulted(fault),
        Completion::Cancelled => Completion::Cancelled,
    }
}

/// Adapt a tokio join handle: an aborted task is `Cancelled`, a panicked task is `Faulted`.
pub async fn joined<T>(handle: JoinHandle<T>) -> Completion<T> {
    Completion::from(handle.await)
}

/// Wrap `task` so it can be cancelled from outside through the returned [`AbortHandle`].
pub fn cancellable<F: Future>(
    task: F,
) -> (impl Future<Output = Completion<F::Output>>, AbortHandle) {
    let (abort_handle, abort_registration) = AbortHandle::new_pair();
    let task = async move {
        match Abortable::new(guard(task), abort_registration).await {
            Ok(completion) => completion,
            Err(_aborted) => {
                tracing::trace!("Cancellable task was aborted");
                Completion::Cancelled
            }
        }
    };
    (task, abort_handle)
}
