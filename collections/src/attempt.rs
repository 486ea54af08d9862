use std::future::{Future, IntoFuture};

use upshot_tasks::{Eventual, Settled, attempt_call};
use upshot_types::capture::catching;
use upshot_types::{Fallible, Fault};

/// Capturing maps over raw values: each element becomes its own outcome, so a panic on one
/// element never stops the others.
pub trait AttemptIterExt: Iterator + Sized {
    /// Map each element; a panic becomes `Failed(fault)`.
    fn attempt_map<U>(
        self,
        mut f: impl FnMut(Self::Item) -> U,
    ) -> impl Iterator<Item = Fallible<U, Fault>> {
        self.map(move |item| match catching(|| f(item)) {
            Ok(value) => Fallible::Succeeded(value),
            Err(fault) => Fallible::Failed(fault),
        })
    }

    /// Map each element; a panic becomes `Failed(translate(fault, &element))`.
    fn attempt_map_with<U, E>(
        self,
        mut f: impl FnMut(Self::Item) -> U,
        mut translate: impl FnMut(Fault, &Self::Item) -> E,
    ) -> impl Iterator<Item = Fallible<U, E>>
    where
        Self::Item: Clone,
    {
        self.map(move |item| {
            let input = item.clone();
            match catching(|| f(item)) {
                Ok(value) => Fallible::Succeeded(value),
                Err(fault) => Fallible::Failed(translate(fault, &input)),
            }
        })
    }

    /// Start an async call per element. Each call's fault is translated independently.
    fn attempt_map_async<Fut, E>(
        self,
        f: impl FnOnce(Self::Item) -> Fut + Clone,
        translate: impl FnOnce(Fault, &Self::Item) -> E + Clone,
    ) -> impl Iterator<Item = Eventual<impl Future<Output = Settled<Fut::Output, E>>>>
    where
        Self::Item: Clone,
        Fut: IntoFuture,
    {
        self.map(move |item| attempt_call(f.clone(), item, translate.clone()))
    }
}

impl<I: Iterator> AttemptIterExt for I {}
