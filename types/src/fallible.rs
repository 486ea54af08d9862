//! The value-error outcome.

use crate::capture::{Fault, catching};
use crate::{Outcome, Verdict};

/// A value, or an error explaining why there is none.
///
/// Chaining widens the error type through [`Into`]: a step that fails with `E1` may be followed by
/// a step that fails with `E2` as long as `E1: Into<E2>`. The conversion is applied to the carried
/// error, so nothing produced earlier in the chain is lost.
///
/// ```
/// use upshot_types::Fallible;
///
/// #[derive(Debug, PartialEq)]
/// struct ParseFailed;
///
/// #[derive(Debug, PartialEq)]
/// enum StepFailed {
///     Parse(ParseFailed),
///     Range(i64),
/// }
///
/// impl From<ParseFailed> for StepFailed {
///     fn from(error: ParseFailed) -> Self {
///         StepFailed::Parse(error)
///     }
/// }
///
/// let parsed: Fallible<i64, ParseFailed> = Fallible::Failed(ParseFailed);
/// let checked: Fallible<i64, StepFailed> = parsed.and_then(|n| {
///     if n < 100 { Fallible::Succeeded(n) } else { Fallible::Failed(StepFailed::Range(n)) }
/// });
/// assert_eq!(checked, Fallible::Failed(StepFailed::Parse(ParseFailed)));
/// ```
///
/// A chain whose earlier error cannot be represented by the later error type does not compile:
///
/// ```compile_fail
/// use upshot_types::Fallible;
///
/// struct Narrow;
/// struct Unrelated;
///
/// let first: Fallible<i32, Narrow> = Fallible::Failed(Narrow);
/// let _: Fallible<i32, Unrelated> = first.and_then(Fallible::Succeeded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a fallible outcome may be a failure, which should be handled"]
pub enum Fallible<T, E> {
    Succeeded(T),
    Failed(E),
}

impl<T, E> Fallible<T, E> {
    pub const fn succeeded(value: T) -> Self {
        Self::Succeeded(value)
    }

    pub const fn failed(error: E) -> Self {
        Self::Failed(error)
    }

    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(error) => Some(error),
        }
    }

    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn err(self) -> Option<E> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(error) => Err(error),
        }
    }

    pub const fn as_ref(&self) -> Fallible<&T, &E> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(value),
            Self::Failed(error) => Fallible::Failed(error),
        }
    }

    pub const fn verdict(&self) -> Verdict {
        Verdict::from_bool(self.is_succeeded())
    }

    /// Drop the error detail.
    pub fn into_outcome(self) -> Outcome<T> {
        Outcome::from(self)
    }

    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
        match self {
            Self::Succeeded(value) => value,
            Self::Failed(error) => f(error),
        }
    }

    // ------------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------------

    /// Apply `f` to the value. A panic in `f` is not captured; see [`Fallible::try_map`].
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fallible<U, E> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(f(value)),
            Self::Failed(error) => Fallible::Failed(error),
        }
    }

    /// Like [`Fallible::map`], but a panic in `f` becomes `Failed(translate(fault, &value))`.
    pub fn try_map<U>(
        self,
        f: impl FnOnce(T) -> U,
        translate: impl FnOnce(Fault, &T) -> E,
    ) -> Fallible<U, E>
    where
        T: Clone,
    {
        match self {
            Self::Succeeded(value) => {
                let input = value.clone();
                match catching(|| f(value)) {
                    Ok(mapped) => Fallible::Succeeded(mapped),
                    Err(fault) => Fallible::Failed(translate(fault, &input)),
                }
            }
            Self::Failed(error) => Fallible::Failed(error),
        }
    }

    /// Like [`Fallible::try_map`] for translators that do not need the input.
    pub fn try_map_with<U>(
        self,
        f: impl FnOnce(T) -> U,
        translate: impl FnOnce(Fault) -> E,
    ) -> Fallible<U, E> {
        match self {
            Self::Succeeded(value) => match catching(|| f(value)) {
                Ok(mapped) => Fallible::Succeeded(mapped),
                Err(fault) => Fallible::Failed(translate(fault)),
            },
            Self::Failed(error) => Fallible::Failed(error),
        }
    }

    pub fn map_err<E2>(self, f: impl FnOnce(E) -> E2) -> Fallible<T, E2> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(value),
            Self::Failed(error) => Fallible::Failed(f(error)),
        }
    }

    /// Convert the error into a wider error type.
    pub fn widen<E2>(self) -> Fallible<T, E2>
    where
        E: Into<E2>,
    {
        self.map_err(Into::into)
    }

    // ------------------------------------------------------------------------
    // Bind
    // ------------------------------------------------------------------------

    /// Continue with `f` on success; a failure short-circuits with its error widened to `E2`.
    pub fn and_then<U, E2>(self, f: impl FnOnce(T) -> Fallible<U, E2>) -> Fallible<U, E2>
    where
        E: Into<E2>,
    {
        match self {
            Self::Succeeded(value) => f(value),
            Self::Failed(error) => Fallible::Failed(error.into()),
        }
    }

    /// Like [`Fallible::and_then`], but a panic in `f` becomes `Failed(translate(fault, &value))`.
    pub fn try_and_then<U, E2>(
        self,
        f: impl FnOnce(T) -> Fallible<U, E2>,
        translate: impl FnOnce(Fault, &T) -> E2,
    ) -> Fallible<U, E2>
    where
        T: Clone,
        E: Into<E2>,
    {
        match self {
            Self::Succeeded(value) => {
                let input = value.clone();
                match catching(|| f(value)) {
                    Ok(next) => next,
                    Err(fault) => Fallible::Failed(translate(fault, &input)),
                }
            }
            Self::Failed(error) => Fallible::Failed(error.into()),
        }
    }

    /// Recover from a failure with `f`; a success passes through.
    pub fn or_else<E2>(self, f: impl FnOnce(E) -> Fallible<T, E2>) -> Fallible<T, E2> {
        match self {
            Self::Succeeded(value) => Fallible::Succeeded(value),
            Self::Failed(error) => f(error),
        }
    }

    // ------------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------------

    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Succeeded(value) = &self {
            f(value);
        }
        self
    }

    pub fn inspect_err(self, f: impl FnOnce(&E)) -> Self {
        if let Self::Failed(error) = &self {
            f(error);
        }
        self
    }

    // ------------------------------------------------------------------------
    // Logical
    // ------------------------------------------------------------------------

    /// Swap the roles of value and error.
    pub fn invert(self) -> Fallible<E, T> {
        match self {
            Self::Succeeded(value) => Fallible::Failed(value),
            Self::Failed(error) => Fallible::Succeeded(error),
        }
    }

    /// Both values, or the first failure (left to right).
    pub fn zip<U, E2>(self, other: Fallible<U, E2>) -> Fallible<(T, U), E>
    where
        E2: Into<E>,
    {
        match (self, other) {
            (Self::Succeeded(a), Fallible::Succeeded(b)) => Fallible::Succeeded((a, b)),
            (Self::Failed(error), _) => Fallible::Failed(error),
            (Self::Succeeded(_), Fallible::Failed(error)) => Fallible::Failed(error.into()),
        }
    }

    /// All three values, or the first failure (left to right).
    pub fn zip3<U, V, E2, E3>(
        self,
        second: Fallible<U, E2>,
        third: Fallible<V, E3>,
    ) -> Fallible<(T, U, V), E>
    where
        E2: Into<E>,
        E3: Into<E>,
    {
        self.zip(second)
            .zip(third)
            .map(|((a, b), c)| (a, b, c))
    }

    // ------------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------------

    /// The value, or a panic that carries the error as its payload.
    ///
    /// This is the escape hatch back into unwinding; prefer [`Fallible::into_result`]. The
    /// payload can be recovered with [`Fault::downcast`] after capture.
    pub fn get(self) -> T
    where
        E: Send + 'static,
    {
        match self {
            Self::Succeeded(value) => value,
            Self::Failed(error) => std::panic::panic_any(error),
        }
    }
}

impl<T, E1, E2> Fallible<Fallible<T, E2>, E1> {
    /// Collapse one level of nesting, widening the outer error.
    pub fn flatten(self) -> Fallible<T, E2>
    where
        E1: Into<E2>,
    {
        self.and_then(|inner| inner)
    }
}

impl<T, E> From<Result<T, E>> for Fallible<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        }
    }
}

impl<T, E> From<Fallible<T, E>> for Result<T, E> {
    fn from(fallible: Fallible<T, E>) -> Self {
        fallible.into_result()
    }
}
