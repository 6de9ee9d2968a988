//! Integration tests for the Store runtime
//!
//! Covers reducer execution, state snapshot subscription, and the effect
//! executor's action feedback loop.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use marquee_runtime::Store;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Simple synchronous increment
    Increment,
    /// Kick off an async computation that feeds `Loaded` back
    StartLoad,
    /// Produced by the `StartLoad` effect
    Loaded { value: u32 },
    /// Schedule an increment after a delay
    DelayedIncrement,
    /// Run two labelled steps sequentially
    RunSteps,
    /// Run two labelled steps in parallel
    RunParallelSteps,
    /// A labelled step
    Step(u32),
}

#[derive(Debug, Clone, Default)]
struct TestState {
    counter: u32,
    loaded: Option<u32>,
    steps: Vec<u32>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Increment => {
                state.counter += 1;
                smallvec![Effect::None]
            },
            TestAction::StartLoad => {
                smallvec![Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::Loaded { value: 42 })
                }))]
            },
            TestAction::Loaded { value } => {
                state.loaded = Some(value);
                smallvec![Effect::None]
            },
            TestAction::DelayedIncrement => {
                smallvec![Effect::Delay {
                    duration: Duration::from_millis(10),
                    action: Box::new(TestAction::Increment),
                }]
            },
            TestAction::RunSteps => {
                smallvec![Effect::Sequential(vec![
                    Effect::Future(Box::pin(async { Some(TestAction::Step(1)) })),
                    Effect::Future(Box::pin(async { Some(TestAction::Step(2)) })),
                ])]
            },
            TestAction::RunParallelSteps => {
                smallvec![Effect::Parallel(vec![
                    Effect::Future(Box::pin(async { Some(TestAction::Step(1)) })),
                    Effect::Future(Box::pin(async { Some(TestAction::Step(2)) })),
                ])]
            },
            TestAction::Step(n) => {
                state.steps.push(n);
                smallvec![Effect::None]
            },
        }
    }
}

fn test_store() -> Store<TestState, TestAction, (), TestReducer> {
    Store::new(TestState::default(), TestReducer, ())
}

// ============================================================================
// Reducer execution
// ============================================================================

#[tokio::test]
async fn send_runs_reducer_synchronously() {
    let store = test_store();

    let _ = store.send(TestAction::Increment).await;
    let counter = store.state(|s| s.counter).await;
    assert_eq!(counter, 1);
}

#[tokio::test]
async fn pure_actions_complete_immediately() {
    let store = test_store();

    let handle = store.send(TestAction::Increment).await;
    assert!(handle.completed());
}

#[tokio::test]
async fn concurrent_sends_serialize_at_the_reducer() {
    let store = test_store();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let _ = store.send(TestAction::Increment).await;
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            panic!("concurrent send task panicked: {e}");
        }
    }

    let counter = store.state(|s| s.counter).await;
    assert_eq!(counter, 10);
}

// ============================================================================
// State subscription
// ============================================================================

#[tokio::test]
async fn subscriber_sees_post_mutation_snapshot() {
    let store = test_store();
    let mut snapshots = store.subscribe();

    let _ = store.send(TestAction::Increment).await;

    snapshots.changed().await.expect("store alive");
    let snapshot = snapshots.borrow().clone();
    assert_eq!(snapshot.counter, 1);
}

#[tokio::test]
async fn subscriber_always_holds_latest_snapshot() {
    let store = test_store();
    let snapshots = store.subscribe();

    for _ in 0..3 {
        let _ = store.send(TestAction::Increment).await;
    }

    // A watch receiver may skip intermediate snapshots but never lags
    // behind the latest one
    assert_eq!(snapshots.borrow().counter, 3);
}

#[tokio::test]
async fn late_subscriber_starts_from_current_state() {
    let store = test_store();

    let _ = store.send(TestAction::Increment).await;
    let _ = store.send(TestAction::Increment).await;

    let snapshots = store.subscribe();
    assert_eq!(snapshots.borrow().counter, 2);
}

// ============================================================================
// Effect execution
// ============================================================================

#[tokio::test]
async fn future_effect_feeds_action_back() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartLoad).await;
    assert!(!handle.completed());

    handle.wait().await;
    let loaded = store.state(|s| s.loaded).await;
    assert_eq!(loaded, Some(42));
}

#[tokio::test]
async fn delay_effect_dispatches_after_duration() {
    let store = test_store();

    let mut handle = store.send(TestAction::DelayedIncrement).await;
    handle.wait().await;

    let counter = store.state(|s| s.counter).await;
    assert_eq!(counter, 1);
}

#[tokio::test]
async fn sequential_effects_preserve_order() {
    let store = test_store();

    let mut handle = store.send(TestAction::RunSteps).await;
    handle.wait().await;

    let steps = store.state(|s| s.steps.clone()).await;
    assert_eq!(steps, vec![1, 2]);
}

#[tokio::test]
async fn parallel_effects_all_complete() {
    let store = test_store();

    let mut handle = store.send(TestAction::RunParallelSteps).await;
    handle.wait().await;

    // Parallel tasks may interleave; both steps must land either way
    let mut steps = store.state(|s| s.steps.clone()).await;
    steps.sort_unstable();
    assert_eq!(steps, vec![1, 2]);
}

#[tokio::test]
async fn wait_with_timeout_returns_error_when_effects_outlive_it() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartLoad).await;
    let result = handle.wait_with_timeout(Duration::from_micros(1)).await;
    assert!(result.is_err());

    // The effect still completes afterwards
    handle.wait().await;
    let loaded = store.state(|s| s.loaded).await;
    assert_eq!(loaded, Some(42));
}

#[tokio::test]
async fn wait_with_timeout_succeeds_for_fast_effects() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartLoad).await;
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .expect("effect completes well within timeout");
}
