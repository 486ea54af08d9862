//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::future::Ready;
use std::sync::Once;

use tracing_subscriber::EnvFilter;
use upshot::{Completion, Eventual, Fault, Settled};

/// Route `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub type Ready32 = Eventual<Ready<Settled<i32, String>>>;

pub fn faulted(message: &str) -> Ready32 {
    Eventual::new(std::future::ready(Completion::Faulted(Fault::new(message))))
}

pub fn cancelled() -> Ready32 {
    Eventual::new(std::future::ready(Completion::Cancelled))
}

/// Integer division that panics on a zero divisor.
pub fn divide(dividend: i32, divisor: i32) -> i32 {
    dividend / divisor
}
