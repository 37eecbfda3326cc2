mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{Gauge, Recorder, units};
use taskfan::{EventKind, RunConfig, Runner, UnitError, UnitFn, UnitRef, run_sequential};

fn logging_units(n: usize, fail_at: Option<usize>, log: &Arc<Mutex<Vec<usize>>>) -> Vec<UnitRef> {
    (0..n)
        .map(move |i| {
            let log = Arc::clone(log);
            UnitFn::boxed(format!("step-{i}"), move || async move {
                // Yield so a broken gate would let later units overtake.
                tokio::time::sleep(Duration::from_millis((n - i) as u64)).await;
                log.lock().unwrap().push(i);
                if fail_at == Some(i) {
                    return Err(UnitError::fail("boom"));
                }
                Ok(())
            })
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn all_units_run_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let res = run_sequential(logging_units(5, None, &log)).await;

    assert!(res.is_ok());
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failure_stops_at_strict_prefix() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let res = run_sequential(logging_units(5, Some(2), &log)).await;

    let err = res.unwrap_err();
    assert_eq!(err.as_message(), "boom");
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn first_unit_failing_runs_nothing_else() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let err = run_sequential(logging_units(8, Some(0), &log))
        .await
        .unwrap_err();

    assert_eq!(err.as_message(), "boom");
    assert_eq!(*log.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn empty_input_executes_nothing() {
    assert!(run_sequential(Vec::new()).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn units_never_overlap() {
    let gauge = Gauge::new();
    let res = run_sequential(units(12, None, Duration::from_millis(2), &gauge)).await;

    assert!(res.is_ok());
    assert_eq!(gauge.runs(), 12);
    assert_eq!(gauge.peak(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn later_units_are_drained_not_executed() {
    let recorder = Recorder::new();
    let runner = Runner::builder(RunConfig::default())
        .with_subscriber(recorder.clone())
        .build();

    let gauge = Gauge::new();
    let res = runner
        .run_sequential(units(5, Some(2), Duration::ZERO, &gauge))
        .await;
    runner.shutdown().await;

    assert_eq!(res.unwrap_err().as_message(), "boom");
    assert_eq!(recorder.started(), vec![0, 1, 2]);

    let drained: u64 = recorder
        .of_kind(EventKind::QueueDrained)
        .iter()
        .filter_map(|e| e.count)
        .sum();
    let skipped = recorder.of_kind(EventKind::UnitSkipped).len() as u64;
    assert_eq!(drained + skipped, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn panicking_unit_releases_the_gate() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let units: Vec<UnitRef> = (0..4)
        .map(|i| {
            let log = Arc::clone(&log);
            UnitFn::boxed(format!("step-{i}"), move || async move {
                if i == 1 {
                    panic!("step 1 exploded");
                }
                log.lock().unwrap().push(i);
                Ok::<_, UnitError>(())
            })
        })
        .collect();

    let res = tokio::time::timeout(Duration::from_secs(5), run_sequential(units))
        .await
        .expect("a panicking unit must not block the next one");

    assert!(res.is_ok());
    assert_eq!(*log.lock().unwrap(), vec![0, 2, 3]);
}
