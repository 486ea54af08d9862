use std::future::{Future, IntoFuture};

use upshot_tasks::{Eventual, Settled, attempt_task};
use upshot_types::{Fallible, Fault};

/// Element-wise combinators for iterators of async outcomes.
///
/// Each element is wrapped in its own [`Eventual`]; nothing is awaited until the caller awaits
/// an element. Closures are cloned once per element.
pub trait EventualIterExt<T, E>: Iterator<Item: IntoFuture<Output = Settled<T, E>>> + Sized {
    fn map_values<U>(
        self,
        f: impl FnOnce(T) -> U + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E>>>> {
        self.map(move |task| Eventual::new(task.into_future()).map(f.clone()))
    }

    fn try_map_values<U>(
        self,
        f: impl FnOnce(T) -> U + Clone,
        translate: impl FnOnce(Fault, &T) -> E + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E>>>>
    where
        T: Clone,
    {
        self.map(move |task| {
            Eventual::new(task.into_future()).try_map(f.clone(), translate.clone())
        })
    }

    fn map_errors<E2>(
        self,
        f: impl FnOnce(E) -> E2 + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E2>>>> {
        self.map(move |task| Eventual::new(task.into_future()).map_err(f.clone()))
    }

    fn and_then_values<U, E2>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E2> + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E2>>>>
    where
        E: Into<E2>,
    {
        self.map(move |task| Eventual::new(task.into_future()).and_then(f.clone()))
    }

    fn try_and_then_values<U, E2>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E2> + Clone,
        translate: impl FnOnce(Fault, &T) -> E2 + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E2>>>>
    where
        T: Clone,
        E: Into<E2>,
    {
        self.map(move |task| {
            Eventual::new(task.into_future()).try_and_then(f.clone(), translate.clone())
        })
    }

    fn map_values_async<U, Fut>(
        self,
        f: impl FnOnce(T) -> Fut + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E>>>>
    where
        Fut: IntoFuture<Output = U>,
    {
        self.map(move |task| Eventual::new(task.into_future()).map_async(f.clone()))
    }

    fn and_then_values_async<U, E2, Fut>(
        self,
        f: impl FnOnce(T) -> Fut + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<U, E2>>>>
    where
        E: Into<E2>,
        Fut: IntoFuture<Output = Settled<U, E2>>,
    {
        self.map(move |task| Eventual::new(task.into_future()).and_then_async(f.clone()))
    }

    fn or_else_errors<E2>(
        self,
        f: impl FnOnce(E) -> Fallible<T, E2> + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E2>>>> {
        self.map(move |task| Eventual::new(task.into_future()).or_else(f.clone()))
    }

    fn inspect_values(
        self,
        f: impl FnOnce(&T) + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E>>>> {
        self.map(move |task| Eventual::new(task.into_future()).inspect(f.clone()))
    }

    fn inspect_errors(
        self,
        f: impl FnOnce(&E) + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E>>>> {
        self.map(move |task| Eventual::new(task.into_future()).inspect_err(f.clone()))
    }

    fn inspect_values_async<Fut>(
        self,
        f: impl FnOnce(&T) -> Fut + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E>>>>
    where
        Fut: IntoFuture<Output = ()>,
    {
        self.map(move |task| Eventual::new(task.into_future()).inspect_async(f.clone()))
    }

    fn inspect_errors_async<Fut>(
        self,
        f: impl FnOnce(&E) -> Fut + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<T, E>>>>
    where
        Fut: IntoFuture<Output = ()>,
    {
        self.map(move |task| Eventual::new(task.into_future()).inspect_err_async(f.clone()))
    }
}

impl<I, T, E> EventualIterExt<T, E> for I
where
    I: Iterator<Item: IntoFuture<Output = Settled<T, E>>>,
{
}

/// Capture the faults of plain tasks, one outcome per task.
pub trait TaskIterExt: Iterator<Item: IntoFuture> + Sized {
    /// Wrap each task so a fault becomes `Failed(translate(fault))`. Cancellation stays
    /// cancelled.
    fn attempt_each<E>(
        self,
        translate: impl FnOnce(Fault) -> E + Clone,
    ) -> impl Iterator<
        Item = Eventual<impl Future<Output = Settled<<Self::Item as IntoFuture>::Output, E>>>,
    > {
        self.map(move |task| attempt_task(task, translate.clone()))
    }
}

impl<I> TaskIterExt for I where I: Iterator<Item: IntoFuture> {}
