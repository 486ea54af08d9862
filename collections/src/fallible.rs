use upshot_types::{Fallible, Fault, Verdict, combine};

/// Element-wise combinators for iterators of [`Fallible`].
pub trait FallibleIterExt<T, E>: Iterator<Item = Fallible<T, E>> + Sized {
    fn map_values<U>(self, mut f: impl FnMut(T) -> U) -> impl Iterator<Item = Fallible<U, E>> {
        self.map(move |outcome| outcome.map(&mut f))
    }

    /// Map each value, capturing a panic per element as `Failed(translate(fault, &value))`.
    fn try_map_values<U>(
        self,
        mut f: impl FnMut(T) -> U,
        mut translate: impl FnMut(Fault, &T) -> E,
    ) -> impl Iterator<Item = Fallible<U, E>>
    where
        T: Clone,
    {
        self.map(move |outcome| outcome.try_map(&mut f, &mut translate))
    }

    fn map_errors<E2>(self, mut f: impl FnMut(E) -> E2) -> impl Iterator<Item = Fallible<T, E2>> {
        self.map(move |outcome| outcome.map_err(&mut f))
    }

    fn and_then_values<U, E2>(
        self,
        mut f: impl FnMut(T) -> Fallible<U, E2>,
    ) -> impl Iterator<Item = Fallible<U, E2>>
    where
        E: Into<E2>,
    {
        self.map(move |outcome| outcome.and_then(&mut f))
    }

    fn try_and_then_values<U, E2>(
        self,
        mut f: impl FnMut(T) -> Fallible<U, E2>,
        mut translate: impl FnMut(Fault, &T) -> E2,
    ) -> impl Iterator<Item = Fallible<U, E2>>
    where
        T: Clone,
        E: Into<E2>,
    {
        self.map(move |outcome| outcome.try_and_then(&mut f, &mut translate))
    }

    fn or_else_errors<E2>(
        self,
        mut f: impl FnMut(E) -> Fallible<T, E2>,
    ) -> impl Iterator<Item = Fallible<T, E2>> {
        self.map(move |outcome| outcome.or_else(&mut f))
    }

    fn inspect_values(self, mut f: impl FnMut(&T)) -> impl Iterator<Item = Fallible<T, E>> {
        self.map(move |outcome| outcome.inspect(&mut f))
    }

    fn inspect_errors(self, mut f: impl FnMut(&E)) -> impl Iterator<Item = Fallible<T, E>> {
        self.map(move |outcome| outcome.inspect_err(&mut f))
    }

    /// The successful values, in order.
    fn values(self) -> impl Iterator<Item = T> {
        self.filter_map(Fallible::ok)
    }

    /// The errors, in order.
    fn errors(self) -> impl Iterator<Item = E> {
        self.filter_map(Fallible::err)
    }

    /// Split into values and errors, keeping the relative order within each side.
    fn partition_outcomes(self) -> (Vec<T>, Vec<E>) {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for outcome in self {
            match outcome {
                Fallible::Succeeded(value) => values.push(value),
                Fallible::Failed(error) => errors.push(error),
            }
        }
        (values, errors)
    }

    /// Affirmed iff no element failed. An empty iterator is affirmed.
    fn verdict(self) -> Verdict {
        combine(self)
    }
}

impl<I, T, E> FallibleIterExt<T, E> for I where I: Iterator<Item = Fallible<T, E>> {}
