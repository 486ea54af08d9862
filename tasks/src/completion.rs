//! Terminal states of an asynchronous computation.

use std::any::Any;

use thiserror::Error;
use tokio::task::JoinError;
use upshot_types::capture::record;
use upshot_types::{Cancelled, Fault};

/// How a task ended: with a value, with an unexpected fault, or by cancellation.
///
/// A future yields its output once, so a `Completion` is produced exactly once per task and is
/// never mutated afterwards.
#[derive(Debug)]
#[must_use = "a completion may be a fault or a cancellation, which should be handled"]
pub enum Completion<T> {
    Resolved(T),
    Faulted(Fault),
    Cancelled,
}

/// Why a [`Completion`] carried no value.
#[derive(Debug, Error)]
pub enum Interrupted {
    #[error("task faulted: {0}")]
    Faulted(#[from] Fault),
    #[error("task was cancelled")]
    Cancelled,
}

impl From<Cancelled> for Interrupted {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

impl<T> Completion<T> {
    /// Classify a panic payload, logging it when it is a fault.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        match Fault::from_panic(payload) {
            Ok(fault) => {
                record(&fault);
                Self::Faulted(fault)
            }
            Err(Cancelled) => {
                tracing::trace!("Cancellation surfaced as a cancelled completion");
                Self::Cancelled
            }
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub const fn is_faulted(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn into_resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Faulted(_) | Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Faulted(fault) => Some(fault),
            Self::Resolved(_) | Self::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Completion<U> {
        match self {
            Self::Resolved(value) => Completion::Resolved(f(value)),
            Self::Faulted(fault) => Completion::Faulted(fault),
            Self::Cancelled => Completion::Cancelled,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Completion<U>) -> Completion<U> {
        match self {
            Self::Resolved(value) => f(value),
            Self::Faulted(fault) => Completion::Faulted(fault),
            Self::Cancelled => Completion::Cancelled,
        }
    }

    pub fn into_result(self) -> Result<T, Interrupted> {
        match self {
            Self::Resolved(value) => Ok(value),
            Self::Faulted(fault) => Err(Interrupted::Faulted(fault)),
            Self::Cancelled => Err(Interrupted::Cancelled),
        }
    }

    /// The value, or continue unwinding: a fault resumes its original payload and a
    /// cancellation resumes with [`Cancelled`].
    pub fn unwrap_or_resume(self) -> T {
        match self {
            Self::Resolved(value) => value,
            Self::Faulted(fault) => fault.resume(),
            Self::Cancelled => Cancelled.resume(),
        }
    }
}

impl<T> Completion<Completion<T>> {
    /// Collapse one level of nesting; the outer terminal state wins over the inner one.
    pub fn flatten(self) -> Completion<T> {
        self.and_then(|inner| inner)
    }
}

impl<T> From<Result<T, JoinError>> for Completion<T> {
    fn from(result: Result<T, JoinError>) -> Self {
        match result {
            Ok(value) => Self::Resolved(value),
            Err(error) if error.is_cancelled() => {
                tracing::trace!(error = %error, "Joined task was aborted");
                Self::Cancelled
            }
            Err(error) => match error.try_into_panic() {
                Ok(payload) => Self::from_panic(payload),
                Err(error) => {
                    let fault = Fault::new(error.to_string());
                    record(&fault);
                    Self::Faulted(fault)
                }
            },
        }
    }
}
