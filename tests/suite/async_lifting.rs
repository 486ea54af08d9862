//! Async lifting across a real runtime

use std::time::Duration;

use upshot::prelude::*;
use upshot::{Completion, Eventual, Fallible, Fault, Interrupted, attempt_task, primitive};

use crate::common::{Ready32, cancelled, divide, faulted, init_tracing};

async fn fetch(id: i32) -> Fallible<String, String> {
    tokio::time::sleep(Duration::from_millis(1)).await;
    if id > 0 {
        Fallible::Succeeded(format!("user-{id}"))
    } else {
        Fallible::Failed(format!("no user {id}"))
    }
}

#[tokio::test]
async fn lifted_pipeline_mixes_sync_and_async_steps() {
    init_tracing();
    let name = Ready32::succeeded(7)
        .and_then_async(|id| async move { Completion::Resolved(fetch(id).await) })
        .map(|user| user.to_uppercase())
        .await;
    assert_eq!(name.into_resolved(), Some(Fallible::Succeeded("USER-7".to_string())));

    let missing = Ready32::succeeded(-1)
        .and_then_async(|id| async move { Completion::Resolved(fetch(id).await) })
        .await;
    assert_eq!(missing.into_resolved(), Some(Fallible::Failed("no user -1".to_string())));
}

#[tokio::test]
async fn spawned_panics_settle_as_faults() {
    init_tracing();
    let handle = tokio::spawn(async { divide(1, 0) });
    let completion = primitive::joined(handle).await;
    assert!(completion.fault().is_some_and(|fault| fault.message().contains("divide by zero")));

    let handle = tokio::spawn(async { divide(1, 0) });
    let settled = Eventual::new(primitive::then(primitive::joined(handle), Fallible::Succeeded))
        .recover_faults(|fault| fault.message().to_string())
        .await;
    assert!(
        settled
            .into_resolved()
            .and_then(Fallible::err)
            .is_some_and(|message| message.contains("divide by zero"))
    );
}

#[tokio::test]
async fn aborted_spawn_settles_as_cancelled() {
    let handle = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
    handle.abort();
    let completion = primitive::joined(handle).await;
    assert!(completion.is_cancelled());
    assert!(matches!(completion.into_result(), Err(Interrupted::Cancelled)));
}

#[tokio::test]
async fn cancellable_task_stops_the_chain() {
    let (task, abort) = primitive::cancellable(tokio::time::sleep(Duration::from_secs(60)));
    abort.abort();
    let settled = Eventual::new(primitive::then(task, |()| Fallible::<i32, String>::Succeeded(1)))
        .map(|n| n + 1)
        .recover_faults(|fault| fault.message().to_string())
        .await;
    assert!(settled.is_cancelled());
}

#[tokio::test]
async fn try_variants_translate_only_their_own_faults() {
    init_tracing();
    let own = Ready32::succeeded(0)
        .try_map_async(|n| async move { divide(10, n) }, |_, n| format!("bad input {n}"))
        .await;
    assert_eq!(own.into_resolved(), Some(Fallible::Failed("bad input 0".to_string())));

    let upstream = faulted("upstream")
        .try_map(|n| n + 1, |_, _| "translated".to_string())
        .await;
    assert_eq!(upstream.fault().map(Fault::message), Some("upstream"));

    let recovered = faulted("upstream")
        .recover_faults(|fault| format!("recovered: {}", fault.message()))
        .await;
    assert_eq!(
        recovered.into_resolved(),
        Some(Fallible::Failed("recovered: upstream".to_string()))
    );
}

#[tokio::test]
async fn zip_prefers_the_left_terminal_state() {
    let both = Ready32::succeeded(1).zip(Ready32::succeeded(2)).await;
    assert_eq!(both.into_resolved(), Some(Fallible::Succeeded((1, 2))));

    let left_cancelled = cancelled().zip(faulted("right")).await;
    assert!(left_cancelled.is_cancelled());

    let left_failed = Ready32::failed("left".to_string()).zip(faulted("right")).await;
    assert_eq!(left_failed.into_resolved(), Some(Fallible::Failed("left".to_string())));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn attempt_task_runs_on_the_multi_thread_runtime() {
    let runtime_task = tokio::spawn(async {
        attempt_task(async { divide(6, 0) }, |fault| fault.message().to_string())
            .or_else(|_| Fallible::<i32, String>::Succeeded(-1))
            .await
    });
    let settled = Completion::from(runtime_task.await).flatten();
    assert_eq!(settled.into_resolved(), Some(Fallible::Succeeded(-1)));
}

#[tokio::test]
async fn result_lifts_like_fallible() {
    let parsed: Result<i32, String> = "12".parse::<i32>().map_err(|e| e.to_string());
    let doubled = parsed.lift().map(|n| n * 2).get().await;
    assert_eq!(doubled, 24);
}
