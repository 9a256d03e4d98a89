//! Avisos de hooks que fallan o quedan sin liquidar.
//!
//! Binario propio: instala un logger global que guarda los avisos.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use log::{Level, LevelFilter, Log, Metadata, Record};
use uiflow_core::{Hook, InMemoryTestRegistry, StepBuilder, StepError};

struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Log for Recorder {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder { lines: Mutex::new(Vec::new()) };
static INIT: Once = Once::new();

fn recorder() -> &'static Recorder {
    INIT.call_once(|| {
            log::set_logger(&RECORDER).expect("logger installed once");
            log::set_max_level(LevelFilter::Warn);
        });
    &RECORDER
}

fn warnings_for(scenario: &str) -> Vec<String> {
    let needle = format!("'{scenario}'");
    recorder().lines.lock().unwrap().iter().filter(|l| l.contains(&needle)).cloned().collect()
}

async fn wait_for_warning(scenario: &str, fragment: &str) -> bool {
    for _ in 0..100 {
        if warnings_for(scenario).iter().any(|l| l.contains(fragment)) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

fn explode() -> Result<(), StepError> {
    panic!("hook exploded")
}

#[test]
fn dropping_unsettled_hook_without_runtime_is_reported() {
    recorder();
    let registry = InMemoryTestRegistry::<i32>::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let scenario = StepBuilder::new("tests/warn/dropped.rs", &registry).before(Hook::function(move || {
                                                                           let counter = counter.clone();
                                                                           async move {
                                                                               counter.fetch_add(1, Ordering::SeqCst);
                                                                               Ok::<(), StepError>(())
                                                                           }
                                                                       }));

    assert_eq!(scenario.pending_hooks(), 1);
    assert!(warnings_for("tests/warn/dropped.rs").iter().any(|l| l.contains("no tokio runtime for BEFORE hook at step 0")));

    drop(scenario);
    drop(registry);

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(warnings_for("tests/warn/dropped.rs").iter().any(|l| l.contains("unsettled BEFORE hook at step 0") && l.contains("never invoked")));
}

#[test]
fn settled_hooks_leave_nothing_to_report_on_drop() {
    recorder();
    let registry = InMemoryTestRegistry::<i32>::new();
    let scenario = StepBuilder::new("tests/warn/settled.rs", &registry).after(Hook::function(|| async { Ok::<(), StepError>(()) }));

    tokio_test::block_on(scenario.settle()).expect("hook ok");
    drop(scenario);
    drop(registry);

    assert!(!warnings_for("tests/warn/settled.rs").iter().any(|l| l.contains("unsettled")));
}

#[tokio::test]
async fn spawned_hook_failure_is_logged_before_settle() {
    recorder();
    let registry = InMemoryTestRegistry::<i32>::new();
    let scenario = StepBuilder::new("tests/warn/failing.rs", &registry).after(Hook::function(|| async { Err::<(), _>(StepError::callback("logout")) }));

    assert!(wait_for_warning("tests/warn/failing.rs", "AFTER hook at step 0 failed").await);
    assert_eq!(scenario.settle().await, Err(StepError::callback("logout")));
}

#[tokio::test]
async fn spawned_hook_panic_is_logged_before_settle() {
    recorder();
    let registry = InMemoryTestRegistry::<i32>::new();
    let scenario = StepBuilder::new("tests/warn/panicking.rs", &registry).before(Hook::function(|| async { explode() }));

    assert!(wait_for_warning("tests/warn/panicking.rs", "hook task panicked").await);
    match scenario.settle().await {
        Err(StepError::HookPanicked(msg)) => assert!(msg.contains("BEFORE hook at step 0")),
        other => panic!("expected HookPanicked, got {other:?}"),
    }
}
