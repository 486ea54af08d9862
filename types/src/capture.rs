//! Fault capture: turning panics into outcomes.
//!
//! A panic inside a guarded function is an *unexpected fault*. The `attempt*` adapters run the
//! function under [`std::panic::catch_unwind`] and hand the captured [`Fault`] to a translator,
//! producing a [`Fallible`] instead of unwinding further.
//!
//! One payload is never captured: [`Cancelled`]. It signals cooperative cancellation of the
//! surrounding operation, and turning it into a `Failed` would report a cancellation as a
//! business-logic error. The synchronous adapters re-raise it unchanged.
//!
//! Every captured fault is logged according to the process-wide [`FaultPolicy`].

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, OnceLock, PoisonError};

use serde::Deserialize;
use thiserror::Error;

use crate::{Fallible, ValueAbsent};

// ============================================================================
// Fault & Cancelled
// ============================================================================

/// A captured panic.
///
/// Keeps the original payload so the fault can be inspected ([`Fault::downcast`]) or re-raised
/// ([`Fault::resume`]) without losing what was thrown. The payload sits behind a mutex so a
/// `Fault` is `Sync` and converts into `anyhow::Error` and other boxed error types.
#[derive(Error)]
#[error("{message}")]
pub struct Fault {
    message: String,
    payload: Mutex<Box<dyn Any + Send + 'static>>,
}

impl Fault {
    /// A fault carrying only a message (the payload is the message itself).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            payload: Mutex::new(Box::new(message.clone())),
            message,
        }
    }

    /// Classify a panic payload.
    ///
    /// Returns `Err(Cancelled)` when the payload is the cancellation signal; every other payload
    /// becomes a fault.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Result<Self, Cancelled> {
        if payload.is::<Cancelled>() {
            return Err(Cancelled);
        }
        Ok(Self {
            message: panic_message(payload.as_ref()),
            payload: Mutex::new(payload),
        })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the original payload has type `P`.
    #[must_use]
    pub fn is<P: Any>(&self) -> bool {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is::<P>()
    }

    /// Recover the original payload as `P`, or get the fault back.
    pub fn downcast<P: Any>(self) -> Result<P, Self> {
        let message = self.message.clone();
        match self.into_payload().downcast::<P>() {
            Ok(value) => Ok(*value),
            Err(payload) => Err(Self {
                message,
                payload: Mutex::new(payload),
            }),
        }
    }

    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Continue unwinding with the original payload. The panic hook is not invoked again.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.into_payload())
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(absent) = payload.downcast_ref::<ValueAbsent>() {
        absent.to_string()
    } else {
        "panic with a non-string payload".to_string()
    }
}

/// The cooperative cancellation signal.
///
/// Raised as a panic payload (see [`Cancelled::raise`]) by code that wants to abandon the
/// ambient operation. Capturing adapters let it through; the async layer maps it to a cancelled
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

impl Cancelled {
    /// Start unwinding with `Cancelled` as the payload.
    pub fn raise() -> ! {
        panic::panic_any(Cancelled)
    }

    /// Continue unwinding with `Cancelled` as the payload, without invoking the panic hook.
    pub fn resume(self) -> ! {
        panic::resume_unwind(Box::new(self))
    }
}

// ============================================================================
// Fault policy
// ============================================================================

/// Level at which captured faults are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultLogLevel {
    Off,
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
}

/// How captured faults are reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FaultPolicy {
    pub log: FaultLogLevel,
    /// Maximum characters of the fault message included in the log event.
    pub message_limit: usize,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            log: FaultLogLevel::Debug,
            message_limit: 200,
        }
    }
}

static POLICY: OnceLock<FaultPolicy> = OnceLock::new();

/// Install the process-wide fault policy.
///
/// Only the first call wins; later calls get their policy back.
pub fn install_policy(policy: FaultPolicy) -> Result<(), FaultPolicy> {
    POLICY.set(policy)
}

/// The installed fault policy, or the default when none was installed.
#[must_use]
pub fn policy() -> &'static FaultPolicy {
    POLICY.get_or_init(FaultPolicy::default)
}

/// Log a captured fault according to [`policy`].
pub fn record(fault: &Fault) {
    let policy = policy();
    if policy.log == FaultLogLevel::Off {
        return;
    }
    let message = clip(fault.message(), policy.message_limit);
    match policy.log {
        FaultLogLevel::Off => {}
        FaultLogLevel::Trace => tracing::trace!(fault = %message, "Captured fault"),
        FaultLogLevel::Debug => tracing::debug!(fault = %message, "Captured fault"),
        FaultLogLevel::Info => tracing::info!(fault = %message, "Captured fault"),
        FaultLogLevel::Warn => tracing::warn!(fault = %message, "Captured fault"),
    }
}

/// The first `limit` characters of `message`, ending in `...` when cut. Never shorter than the
/// ellipsis itself.
fn clip(message: &str, limit: usize) -> Cow<'_, str> {
    let message = message.trim();
    let limit = limit.max(3);
    match message.char_indices().nth(limit) {
        None => Cow::Borrowed(message),
        Some(_) => {
            let kept: String = message.chars().take(limit - 3).collect();
            Cow::Owned(format!("{kept}..."))
        }
    }
}

// ============================================================================
// Capturing calls
// ============================================================================

/// Run `f`, capturing a panic as a [`Fault`].
///
/// A [`Cancelled`] payload is re-raised instead of captured.
pub fn catching<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match Fault::from_panic(payload) {
            Ok(fault) => {
                record(&fault);
                Err(fault)
            }
            Err(cancelled) => {
                tracing::trace!("Cancellation passed through capture");
                cancelled.resume()
            }
        },
    }
}

/// Wrap a zero-argument function; a panic becomes `Failed(fault)`.
pub fn attempt<R>(f: impl Fn() -> R) -> impl Fn() -> Fallible<R, Fault> {
    attempt_with(f, |fault| fault)
}

/// Wrap a zero-argument function; a panic becomes `Failed(translate(fault))`.
pub fn attempt_with<R, E>(
    f: impl Fn() -> R,
    translate: impl Fn(Fault) -> E,
) -> impl Fn() -> Fallible<R, E> {
    move || match catching(&f) {
        Ok(value) => Fallible::Succeeded(value),
        Err(fault) => Fallible::Failed(translate(fault)),
    }
}

/// Wrap a one-argument function; a panic becomes `Failed(fault)`.
pub fn attempt1<A, R>(f: impl Fn(A) -> R) -> impl Fn(A) -> Fallible<R, Fault> {
    move |a| match catching(|| f(a)) {
        Ok(value) => Fallible::Succeeded(value),
        Err(fault) => Fallible::Failed(fault),
    }
}

/// Wrap a one-argument function; a panic becomes `Failed(translate(fault, &a))`.
pub fn attempt1_with<A: Clone, R, E>(
    f: impl Fn(A) -> R,
    translate: impl Fn(Fault, &A) -> E,
) -> impl Fn(A) -> Fallible<R, E> {
    move |a| {
        let input = a.clone();
        match catching(|| f(a)) {
            Ok(value) => Fallible::Succeeded(value),
            Err(fault) => Fallible::Failed(translate(fault, &input)),
        }
    }
}

/// Wrap a two-argument function; a panic becomes `Failed(fault)`.
pub fn attempt2<A, B, R>(f: impl Fn(A, B) -> R) -> impl Fn(A, B) -> Fallible<R, Fault> {
    move |a, b| match catching(|| f(a, b)) {
        Ok(value) => Fallible::Succeeded(value),
        Err(fault) => Fallible::Failed(fault),
    }
}

/// Wrap a two-argument function; a panic becomes `Failed(translate(fault, &a, &b))`.
pub fn attempt2_with<A: Clone, B: Clone, R, E>(
    f: impl Fn(A, B) -> R,
    translate: impl Fn(Fault, &A, &B) -> E,
) -> impl Fn(A, B) -> Fallible<R, E> {
    move |a, b| {
        let inputs = (a.clone(), b.clone());
        match catching(|| f(a, b)) {
            Ok(value) => Fallible::Succeeded(value),
            Err(fault) => Fallible::Failed(translate(fault, &inputs.0, &inputs.1)),
        }
    }
}

/// Wrap a three-argument function; a panic becomes `Failed(fault)`.
pub fn attempt3<A, B, C, R>(
    f: impl Fn(A, B, C) -> R,
) -> impl Fn(A, B, C) -> Fallible<R, Fault> {
    move |a, b, c| match catching(|| f(a, b, c)) {
        Ok(value) => Fallible::Succeeded(value),
        Err(fault) => Fallible::Failed(fault),
    }
}

/// Wrap a three-argument function; a panic becomes `Failed(translate(fault, &a, &b, &c))`.
pub fn attempt3_with<A: Clone, B: Clone, C: Clone, R, E>(
    f: impl Fn(A, B, C) -> R,
    translate: impl Fn(Fault, &A, &B, &C) -> E,
) -> impl Fn(A, B, C) -> Fallible<R, E> {
    move |a, b, c| {
        let inputs = (a.clone(), b.clone(), c.clone());
        match catching(|| f(a, b, c)) {
            Ok(value) => Fallible::Succeeded(value),
            Err(fault) => Fallible::Failed(translate(fault, &inputs.0, &inputs.1, &inputs.2)),
        }
    }
}
