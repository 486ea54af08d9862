//! Shape-independent views over outcomes.
//!
//! [`AsVerdict`] is the binary view every outcome shape has. [`ValueOutcome`] is the value view
//! shared by [`Outcome`] and [`Fallible`], so code that only cares whether a value is present
//! accepts either shape.

use crate::{Fallible, Outcome, Verdict};

/// Anything that can be judged as affirmed or denied.
pub trait AsVerdict {
    fn verdict(&self) -> Verdict;
}

/// An outcome that may carry a value of type `T`.
pub trait ValueOutcome<T>: AsVerdict {
    /// Drop any error detail.
    fn into_outcome(self) -> Outcome<T>;

    fn value(&self) -> Option<&T>;
}

impl AsVerdict for Verdict {
    fn verdict(&self) -> Verdict {
        *self
    }
}

impl<T> AsVerdict for Outcome<T> {
    fn verdict(&self) -> Verdict {
        Outcome::verdict(self)
    }
}

impl<T, E> AsVerdict for Fallible<T, E> {
    fn verdict(&self) -> Verdict {
        Fallible::verdict(self)
    }
}

impl<V: AsVerdict + ?Sized> AsVerdict for &V {
    fn verdict(&self) -> Verdict {
        (**self).verdict()
    }
}

impl<T> ValueOutcome<T> for Outcome<T> {
    fn into_outcome(self) -> Outcome<T> {
        self
    }

    fn value(&self) -> Option<&T> {
        Outcome::value(self)
    }
}

impl<T, E> ValueOutcome<T> for Fallible<T, E> {
    fn into_outcome(self) -> Outcome<T> {
        Outcome::from(self)
    }

    fn value(&self) -> Option<&T> {
        Fallible::value(self)
    }
}

/// Both values, or a plain denial. Error detail from either side is dropped.
pub fn zip<A, B>(first: impl ValueOutcome<A>, second: impl ValueOutcome<B>) -> Outcome<(A, B)> {
    first.into_outcome().zip(second.into_outcome())
}

/// All three values, or a plain denial.
pub fn zip3<A, B, C>(
    first: impl ValueOutcome<A>,
    second: impl ValueOutcome<B>,
    third: impl ValueOutcome<C>,
) -> Outcome<(A, B, C)> {
    first
        .into_outcome()
        .zip3(second.into_outcome(), third.into_outcome())
}

/// Affirmed iff no element is a failure. An empty collection is affirmed.
pub fn combine<I>(outcomes: I) -> Verdict
where
    I: IntoIterator,
    I::Item: AsVerdict,
{
    Verdict::from_bool(
        outcomes
            .into_iter()
            .all(|outcome| outcome.verdict().is_affirmed()),
    )
}
