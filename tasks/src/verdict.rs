//! Async verdicts.

use std::future::{Future, IntoFuture, Ready};

use futures_util::FutureExt;
use futures_util::future::join;
use upshot_types::Verdict;

use crate::Completion;
use crate::primitive::{resolved, then};

/// A future of a [`Verdict`].
///
/// The binary operators poll both sides concurrently and let the left side decide first: the
/// right side only matters when the left resolution does not settle the result.
#[must_use = "an eventual verdict does nothing unless awaited"]
pub struct EventualVerdict<F>(F);

impl<F> EventualVerdict<F> {
    pub fn new(task: F) -> Self {
        Self(task)
    }

    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: Future> IntoFuture for EventualVerdict<F> {
    type Output = F::Output;
    type IntoFuture = F;

    fn into_future(self) -> F {
        self.0
    }
}

impl EventualVerdict<Ready<Completion<Verdict>>> {
    pub fn affirmed() -> Self {
        Self(resolved(Verdict::Affirmed))
    }

    pub fn denied() -> Self {
        Self(resolved(Verdict::Denied))
    }

    pub fn from_verdict(verdict: Verdict) -> Self {
        Self(resolved(verdict))
    }
}

impl<F> EventualVerdict<F>
where
    F: Future<Output = Completion<Verdict>>,
{
    /// Affirmed iff both are affirmed. A left denial settles the result.
    pub fn and(
        self,
        other: impl IntoFuture<Output = Completion<Verdict>>,
    ) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(join(self.0, other.into_future()).map(|(first, second)| match first {
            Completion::Resolved(Verdict::Affirmed) => second,
            decided => decided,
        }))
    }

    /// Affirmed iff at least one is affirmed. A left affirmation settles the result.
    pub fn or(
        self,
        other: impl IntoFuture<Output = Completion<Verdict>>,
    ) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(join(self.0, other.into_future()).map(|(first, second)| match first {
            Completion::Resolved(Verdict::Denied) => second,
            decided => decided,
        }))
    }

    /// Affirmed iff exactly one is affirmed.
    pub fn xor(
        self,
        other: impl IntoFuture<Output = Completion<Verdict>>,
    ) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(join(self.0, other.into_future()).map(|(first, second)| {
            first.and_then(|a| second.map(|b| a.xor(b)))
        }))
    }

    pub fn invert(self) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(then(self.0, Verdict::invert))
    }

    pub fn inspect_affirmed(
        self,
        f: impl FnOnce(),
    ) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(then(self.0, move |verdict| verdict.inspect_affirmed(f)))
    }

    pub fn inspect_denied(
        self,
        f: impl FnOnce(),
    ) -> EventualVerdict<impl Future<Output = Completion<Verdict>>> {
        EventualVerdict(then(self.0, move |verdict| verdict.inspect_denied(f)))
    }
}
