use std::future::IntoFuture;

use futures_util::future::join_all;
use upshot_tasks::{Completion, Settled};
use upshot_types::{Fallible, Fault, Verdict};

/// Settled async outcomes, partitioned by terminal state.
///
/// Each partition keeps the relative order of its elements.
#[derive(Debug)]
pub struct Tally<T, E> {
    pub values: Vec<T>,
    pub errors: Vec<E>,
    pub faults: Vec<Fault>,
    pub cancelled: usize,
}

impl<T, E> Default for Tally<T, E> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            errors: Vec::new(),
            faults: Vec::new(),
            cancelled: 0,
        }
    }
}

impl<T, E> Tally<T, E> {
    /// Total number of settled outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() + self.errors.len() + self.faults.len() + self.cancelled
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Affirmed iff every outcome resolved to a success.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_bool(self.errors.is_empty() && self.faults.is_empty() && self.cancelled == 0)
    }

    fn record(&mut self, settled: Settled<T, E>) {
        match settled {
            Completion::Resolved(Fallible::Succeeded(value)) => self.values.push(value),
            Completion::Resolved(Fallible::Failed(error)) => self.errors.push(error),
            Completion::Faulted(fault) => self.faults.push(fault),
            Completion::Cancelled => self.cancelled += 1,
        }
    }
}

impl<T, E> Extend<Settled<T, E>> for Tally<T, E> {
    fn extend<I: IntoIterator<Item = Settled<T, E>>>(&mut self, iter: I) {
        for settled in iter {
            self.record(settled);
        }
    }
}

impl<T, E> FromIterator<Settled<T, E>> for Tally<T, E> {
    fn from_iter<I: IntoIterator<Item = Settled<T, E>>>(iter: I) -> Self {
        let mut tally = Self::default();
        tally.extend(iter);
        tally
    }
}

/// Await every async outcome concurrently and partition the results.
pub async fn tally<I, T, E>(tasks: I) -> Tally<T, E>
where
    I: IntoIterator<Item: IntoFuture<Output = Settled<T, E>>>,
{
    let settled = join_all(tasks.into_iter().map(IntoFuture::into_future)).await;
    let tally: Tally<T, E> = settled.into_iter().collect();
    tracing::debug!(
        values = tally.values.len(),
        errors = tally.errors.len(),
        faults = tally.faults.len(),
        cancelled = tally.cancelled,
        "Tallied async outcomes"
    );
    tally
}
