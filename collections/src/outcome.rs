use upshot_types::{Outcome, Verdict, combine};

/// Element-wise combinators for iterators of [`Outcome`].
pub trait OutcomeIterExt<T>: Iterator<Item = Outcome<T>> + Sized {
    fn map_values<U>(self, mut f: impl FnMut(T) -> U) -> impl Iterator<Item = Outcome<U>> {
        self.map(move |outcome| outcome.map(&mut f))
    }

    /// The successful values, in order.
    fn values(self) -> impl Iterator<Item = T> {
        self.filter_map(Outcome::into_option)
    }

    fn denied_count(self) -> usize {
        self.filter(Outcome::is_denied).count()
    }

    /// Affirmed iff no element was denied. An empty iterator is affirmed.
    fn verdict(self) -> Verdict {
        combine(self)
    }
}

impl<I, T> OutcomeIterExt<T> for I where I: Iterator<Item = Outcome<T>> {}
