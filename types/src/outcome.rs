//! The value outcome: a value, or a denial with no detail.

use thiserror::Error;

use crate::{Fallible, Verdict};

/// Raised by [`Outcome::get`] when there is no value to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("outcome was denied: no value present")]
pub struct ValueAbsent;

/// A value, or a denial that carries no error detail.
///
/// Use this where only presence matters; use [`Fallible`] when the failure has something to say.
/// Every `Fallible<T, E>` converts into an `Outcome<T>` by dropping the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an outcome may be denied, which should be handled"]
pub enum Outcome<T> {
    Succeeded(T),
    Denied,
}

impl<T> Outcome<T> {
    pub const fn succeeded(value: T) -> Self {
        Self::Succeeded(value)
    }

    pub const fn denied() -> Self {
        Self::Denied
    }

    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Denied => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Denied => None,
        }
    }

    pub const fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Succeeded(value) => Outcome::Succeeded(value),
            Self::Denied => Outcome::Denied,
        }
    }

    pub const fn verdict(&self) -> Verdict {
        Verdict::from_bool(self.is_succeeded())
    }

    /// Attach an error to a denial.
    pub fn ok_or<E>(self, error: E) -> Fallible<T, E> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(value),
            Self::Denied => Fallible::Failed(error),
        }
    }

    pub fn ok_or_else<E>(self, error: impl FnOnce() -> E) -> Fallible<T, E> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(value),
            Self::Denied => Fallible::Failed(error()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Succeeded(value) => Outcome::Succeeded(f(value)),
            Self::Denied => Outcome::Denied,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Succeeded(value) => f(value),
            Self::Denied => Outcome::Denied,
        }
    }

    /// Keep the value only if `predicate` holds; otherwise deny.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Succeeded(value) => {
                if predicate(&value) {
                    Self::Succeeded(value)
                } else {
                    Self::Denied
                }
            }
            Self::Denied => Self::Denied,
        }
    }

    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Succeeded(value) = &self {
            f(value);
        }
        self
    }

    pub fn inspect_denied(self, f: impl FnOnce()) -> Self {
        if self.is_denied() {
            f();
        }
        self
    }

    /// Both values, or a denial.
    pub fn and<U>(self, other: Outcome<U>) -> Outcome<(T, U)> {
        self.zip(other)
    }

    /// The first success, or a denial.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Succeeded(_) => self,
            Self::Denied => other,
        }
    }

    /// The single success when exactly one side succeeded, otherwise a denial.
    pub fn xor(self, other: Self) -> Self {
        match (self, other) {
            (success @ Self::Succeeded(_), Self::Denied)
            | (Self::Denied, success @ Self::Succeeded(_)) => success,
            _ => Self::Denied,
        }
    }

    pub fn zip<U>(self, other: Outcome<U>) -> Outcome<(T, U)> {
        match (self, other) {
            (Self::Succeeded(a), Outcome::Succeeded(b)) => Outcome::Succeeded((a, b)),
            _ => Outcome::Denied,
        }
    }

    pub fn zip3<U, V>(self, second: Outcome<U>, third: Outcome<V>) -> Outcome<(T, U, V)> {
        match (self, second, third) {
            (Self::Succeeded(a), Outcome::Succeeded(b), Outcome::Succeeded(c)) => {
                Outcome::Succeeded((a, b, c))
            }
            _ => Outcome::Denied,
        }
    }

    /// The value, or a panic with [`ValueAbsent`] as the payload.
    ///
    /// This is the escape hatch back into unwinding; prefer [`Outcome::into_option`].
    pub fn get(self) -> T {
        match self {
            Self::Succeeded(value) => value,
            Self::Denied => std::panic::panic_any(ValueAbsent),
        }
    }
}

impl<T> Outcome<Outcome<T>> {
    pub fn flatten(self) -> Outcome<T> {
        self.and_then(|inner| inner)
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::Denied
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Succeeded(value),
            None => Self::Denied,
        }
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_option()
    }
}

impl<T, E> From<Fallible<T, E>> for Outcome<T> {
    fn from(fallible: Fallible<T, E>) -> Self {
        match fallible {
            Fallible::Succeeded(value) => Self::Succeeded(value),
            Fallible::Failed(_) => Self::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic;

    use super::*;

    #[test]
    fn map_applies_only_on_success() {
        assert_eq!(Outcome::succeeded(2).map(|x| x * 10), Outcome::Succeeded(20));
        assert_eq!(Outcome::<i32>::denied().map(|x| x * 10), Outcome::Denied);
    }

    #[test]
    fn and_then_short_circuits_denial() {
        let halve = |x: i32| {
            if x % 2 == 0 {
                Outcome::Succeeded(x / 2)
            } else {
                Outcome::Denied
            }
        };
        assert_eq!(Outcome::succeeded(8).and_then(halve), Outcome::Succeeded(4));
        assert_eq!(Outcome::succeeded(3).and_then(halve), Outcome::Denied);
        assert_eq!(Outcome::Denied.and_then(halve), Outcome::Denied);
    }

    #[test]
    fn filter_downgrades_to_denied() {
        assert_eq!(Outcome::succeeded(4).filter(|x| *x > 3), Outcome::Succeeded(4));
        assert_eq!(Outcome::succeeded(2).filter(|x| *x > 3), Outcome::Denied);
        assert_eq!(Outcome::<i32>::Denied.filter(|_| true), Outcome::Denied);
    }

    #[test]
    fn or_and_xor_pick_successes() {
        let one = Outcome::succeeded(1);
        let two = Outcome::succeeded(2);
        let none = Outcome::<i32>::Denied;

        assert_eq!(one.or(two), one);
        assert_eq!(none.or(two), two);
        assert_eq!(none.or(none), none);

        assert_eq!(one.xor(two), none);
        assert_eq!(one.xor(none), one);
        assert_eq!(none.xor(two), two);
        assert_eq!(none.xor(none), none);

        assert_eq!(one.and(two), Outcome::Succeeded((1, 2)));
        assert_eq!(one.and(none), Outcome::Denied);
    }

    #[test]
    fn zip3_requires_all_successes() {
        let all = Outcome::succeeded(1).zip3(Outcome::succeeded("b"), Outcome::succeeded('c'));
        assert_eq!(all, Outcome::Succeeded((1, "b", 'c')));

        let missing = Outcome::succeeded(1).zip3(Outcome::<&str>::Denied, Outcome::succeeded('c'));
        assert_eq!(missing, Outcome::Denied);
    }

    #[test]
    fn inspect_runs_at_most_once_on_matching_variant() {
        let mut seen = Vec::new();
        let _ = Outcome::succeeded(5).inspect(|v| seen.push(*v));
        let _ = Outcome::<i32>::Denied.inspect(|v| seen.push(*v));
        assert_eq!(seen, [5]);

        let mut denials = 0;
        let _ = Outcome::<i32>::Denied.inspect_denied(|| denials += 1);
        let _ = Outcome::succeeded(1).inspect_denied(|| denials += 1);
        assert_eq!(denials, 1);
    }

    #[test]
    fn get_panics_with_value_absent() {
        assert_eq!(Outcome::succeeded(9).get(), 9);

        let payload = panic::catch_unwind(|| Outcome::<i32>::Denied.get()).unwrap_err();
        assert!(payload.is::<ValueAbsent>());
    }

    #[test]
    fn fallible_views_as_outcome() {
        let failed: Fallible<i32, &str> = Fallible::Failed("nope");
        assert_eq!(Outcome::from(failed), Outcome::Denied);
        assert_eq!(Outcome::from(Fallible::<_, &str>::Succeeded(1)), Outcome::Succeeded(1));
    }

    #[test]
    fn flatten_and_conversions() {
        assert_eq!(Outcome::succeeded(Outcome::succeeded(1)).flatten(), Outcome::Succeeded(1));
        assert_eq!(Outcome::succeeded(Outcome::<i32>::Denied).flatten(), Outcome::Denied);
        assert_eq!(Outcome::from(Some(3)).into_option(), Some(3));
        assert_eq!(Outcome::<i32>::Denied.ok_or("missing"), Fallible::Failed("missing"));
        assert_eq!(Outcome::<i32>::default(), Outcome::Denied);
    }
}
