//! Collection combinators end to end

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use upshot::prelude::*;
use upshot::{Eventual, Fallible, Outcome, Verdict, tally};

use crate::common::{Ready32, cancelled, divide, faulted, init_tracing};

#[test]
fn try_select_over_a_divisor_list_keeps_every_element() {
    init_tracing();
    let outcomes: Vec<Fallible<i32, String>> = [1, 0, 2]
        .into_iter()
        .attempt_map_with(|x| divide(10, x), |_, x| format!("div-by-zero:{x}"))
        .collect();

    assert_eq!(
        outcomes,
        [
            Fallible::Succeeded(10),
            Fallible::Failed("div-by-zero:0".to_string()),
            Fallible::Succeeded(5)
        ]
    );
    assert_eq!(outcomes.iter().cloned().verdict(), Verdict::Denied);
    assert_eq!(outcomes.into_iter().values().sum::<i32>(), 15);
}

#[test]
fn adapters_are_lazy() {
    let calls = AtomicUsize::new(0);
    let mapped = [1, 2, 3].into_iter().attempt_map(|x| {
        calls.fetch_add(1, Ordering::SeqCst);
        x
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(mapped.take(2).count(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn value_outcomes_convert_and_combine() {
    let mixed: Vec<Outcome<i32>> = vec![
        Fallible::<i32, String>::Succeeded(1).into(),
        Outcome::Denied,
        Fallible::<i32, String>::Failed("gone".to_string()).into(),
        Outcome::Succeeded(4),
    ];
    assert_eq!(mixed.iter().copied().denied_count(), 2);
    assert_eq!(mixed.into_iter().map_values(|x| x * 2).values().collect::<Vec<_>>(), [2, 8]);
}

#[tokio::test]
async fn async_elements_settle_independently() {
    init_tracing();
    let tasks = vec![
        Ready32::succeeded(2),
        faulted("lost connection"),
        Ready32::succeeded(0),
        cancelled(),
        Ready32::failed("rejected".to_string()),
    ];
    let summary = tally(
        tasks
            .into_iter()
            .try_map_values(|x| divide(8, x), |_, x| format!("zero divisor {x}")),
    )
    .await;

    assert_eq!(summary.values, [4]);
    assert_eq!(summary.errors, ["zero divisor 0", "rejected"]);
    assert_eq!(summary.faults.len(), 1);
    assert_eq!(summary.faults[0].message(), "lost connection");
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.verdict(), Verdict::Denied);
}

#[tokio::test]
async fn async_calls_per_element_run_concurrently() {
    let started = Arc::new(AtomicUsize::new(0));
    let calls = [3, 0, 6].into_iter().attempt_map_async(
        {
            let started = Arc::clone(&started);
            move |x: i32| {
                started.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::task::yield_now().await;
                    divide(12, x)
                }
            }
        },
        |fault, x| format!("{x}: {}", fault.message()),
    );
    let summary = tally(calls).await;

    assert_eq!(started.load(Ordering::SeqCst), 3);
    assert_eq!(summary.values, [4, 2]);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("0: "));
}

#[tokio::test]
async fn plain_tasks_become_outcomes() {
    let tasks = (0..4).map(|x| async move { divide(12, x) });
    let summary = tally(tasks.attempt_each(|fault| fault.message().to_string())).await;
    assert_eq!(summary.values, [12, 6, 4]);
    assert_eq!(summary.errors.len(), 1);

    let single = tally(vec![Eventual::from_fallible(Fallible::<i32, String>::Succeeded(1))]).await;
    assert_eq!(single.verdict(), Verdict::Affirmed);
}
