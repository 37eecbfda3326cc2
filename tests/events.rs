mod common;

use std::time::Duration;

use common::{Gauge, Recorder, units};
use taskfan::{Cancel, EventKind, RunConfig, Runner, Source, UnitError, UnitFn, UnitRef};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn successful_run_lifecycle() {
    let recorder = Recorder::new();
    let runner = Runner::builder(RunConfig::new(2))
        .with_subscriber(recorder.clone())
        .build();

    let gauge = Gauge::new();
    runner
        .run_concurrent(units(3, None, Duration::ZERO, &gauge))
        .await
        .unwrap();
    runner.shutdown().await;

    let events = recorder.events();
    assert_eq!(events.first().map(|e| e.kind), Some(EventKind::RunStarted));
    assert_eq!(events.first().and_then(|e| e.count), Some(2));
    assert_eq!(events.last().map(|e| e.kind), Some(EventKind::RunFinished));
    assert!(events.last().unwrap().reason.is_none());

    let run = events[0].run;
    assert!(run.is_some());
    assert!(events.iter().all(|e| e.run == run));

    let mut completed: Vec<u64> = recorder
        .of_kind(EventKind::UnitCompleted)
        .iter()
        .filter_map(|e| e.index)
        .collect();
    completed.sort_unstable();
    assert_eq!(completed, vec![0, 1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failure_is_published_once_as_cancellation() {
    let recorder = Recorder::new();
    let runner = Runner::builder(RunConfig::new(5))
        .with_subscriber(recorder.clone())
        .build();

    let gauge = Gauge::new();
    let err = runner
        .run_concurrent(units(5, Some(2), Duration::from_millis(1), &gauge))
        .await
        .unwrap_err();
    runner.shutdown().await;

    let failed = recorder.of_kind(EventKind::UnitFailed);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].unit.as_deref(), Some("unit-2"));
    assert_eq!(failed[0].index, Some(2));

    let cancelled = recorder.of_kind(EventKind::RunCancelled);
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].reason.as_deref(), Some(err.to_string().as_str()));

    let finished = recorder.of_kind(EventKind::RunFinished);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].reason.as_deref(), Some("execution failed: boom"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn panicking_unit_is_contained_and_reported() {
    let recorder = Recorder::new();
    let runner = Runner::builder(RunConfig::new(4))
        .with_subscriber(recorder.clone())
        .build();

    let units: Vec<UnitRef> = (0..4)
        .map(|i| {
            UnitFn::boxed(format!("unit-{i}"), move || async move {
                if i == 3 {
                    panic!("unit 3 exploded");
                }
                Ok::<_, UnitError>(())
            })
        })
        .collect();

    let res = runner.run_concurrent(units).await;
    runner.shutdown().await;

    // A panic is a fault, not a unit failure: it never becomes the outcome.
    assert!(res.is_ok());

    let panics = recorder.of_kind(EventKind::TaskPanicked);
    assert_eq!(panics.len(), 1);
    assert_eq!(panics[0].index, Some(3));
    assert_eq!(panics[0].reason.as_deref(), Some("unit 3 exploded"));
    assert!(panics[0].is_fault());
    assert!(recorder.of_kind(EventKind::RunCancelled).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn producer_panic_truncates_input() {
    let recorder = Recorder::new();
    let runner = Runner::builder(RunConfig::new(2))
        .with_subscriber(recorder.clone())
        .build();

    let res = runner
        .map_void(
            |source: Source<u32>| async move {
                for n in 0..10 {
                    if n == 4 {
                        panic!("generator gave up at {n}");
                    }
                    if source.send(n).await.is_err() {
                        break;
                    }
                }
            },
            |_n: u32, _cancel: Cancel| async {},
        )
        .await;
    runner.shutdown().await;

    assert!(res.is_ok());

    let panics = recorder.of_kind(EventKind::ProducerPanicked);
    assert_eq!(panics.len(), 1);
    assert_eq!(panics[0].reason.as_deref(), Some("generator gave up at 4"));

    let finished = recorder.of_kind(EventKind::RunFinished);
    assert_eq!(finished.len(), 1);
    assert!(finished[0].seq > panics[0].seq);
}

#[tokio::test]
async fn runner_without_subscribers_still_runs() {
    let runner = Runner::builder(RunConfig::default()).build();
    let mut rx = runner.bus().subscribe();

    let gauge = Gauge::new();
    runner
        .run_sequential(units(2, None, Duration::ZERO, &gauge))
        .await
        .unwrap();

    let first = rx.recv().await.unwrap();
    assert_eq!(first.kind, EventKind::RunStarted);
    runner.shutdown().await;
}
