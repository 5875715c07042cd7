// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use pacer::{poll, PacerError, PollOptions, Scheduler, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
use pacer_test_utils::{CallRecorder, ManualScheduler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn options(timeout: Duration, interval: Duration) -> PollOptions {
    PollOptions {
        timeout,
        interval,
        ..Default::default()
    }
}

#[test]
fn success_fires_once_when_the_condition_becomes_true() {
    // Arrange - a counter that increments by 1 every 10ms
    let scheduler = ManualScheduler::new();
    let counter = Arc::new(AtomicUsize::new(0));
    for tick in 1..=10u64 {
        let incremented = Arc::clone(&counter);
        scheduler.schedule_after(
            ms(10 * tick),
            Box::new(move || {
                incremented.fetch_add(1, Ordering::SeqCst);
            }),
        );
    }

    let successes: CallRecorder<Duration> = CallRecorder::new();
    let failures: CallRecorder<String> = CallRecorder::new();

    // Act
    let watched = Arc::clone(&counter);
    let success_sink = successes.clone();
    let success_clock = scheduler.clone();
    let failure_sink = failures.clone();
    let _token = poll(
        &scheduler,
        move || watched.load(Ordering::SeqCst) >= 3,
        move || success_sink.record(success_clock.now()),
        move |err| failure_sink.record(err.to_string()),
        options(ms(1000), ms(10)),
    );
    scheduler.advance(ms(1000));

    // Assert - success at the 30ms evaluation, failure never
    assert_eq!(successes.values(), vec![ms(30)]);
    assert_eq!(failures.count(), 0);
}

#[test]
fn timeout_fires_failure_exactly_once() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let successes: CallRecorder<()> = CallRecorder::new();
    let failures: CallRecorder<String> = CallRecorder::new();
    let evaluations = Arc::new(AtomicUsize::new(0));

    // Act - a condition that never holds, 50ms deadline, 10ms interval
    let evaluated = Arc::clone(&evaluations);
    let success_sink = successes.clone();
    let failure_sink = failures.clone();
    let _token = poll(
        &scheduler,
        move || {
            evaluated.fetch_add(1, Ordering::SeqCst);
            false
        },
        move || success_sink.record(()),
        move |err| failure_sink.record(err.to_string()),
        PollOptions {
            timeout: ms(50),
            interval: ms(10),
            description: "queue drained".to_string(),
        },
    );
    scheduler.advance(ms(500));

    // Assert - one failure naming the condition, no success
    assert_eq!(failures.count(), 1);
    assert_eq!(successes.count(), 0);
    let message = failures.last().unwrap();
    assert!(message.contains("queue drained"), "got: {message}");
    assert!(message.contains("50ms"), "got: {message}");

    // Assert - evaluations at 0, 10, ..., 50 and then never again
    assert_eq!(evaluations.load(Ordering::SeqCst), 6);
    scheduler.advance(ms(500));
    assert_eq!(evaluations.load(Ordering::SeqCst), 6);
    assert_eq!(failures.count(), 1);
}

#[test]
fn timeout_error_carries_condition_and_elapsed_time() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let errors: CallRecorder<Arc<PacerError>> = CallRecorder::new();

    // Act
    let error_sink = errors.clone();
    let _token = poll(
        &scheduler,
        || false,
        || panic!("condition never holds"),
        move |err| error_sink.record(Arc::new(err)),
        PollOptions {
            timeout: ms(40),
            interval: ms(20),
            description: "socket connected".to_string(),
        },
    );
    scheduler.advance(ms(100));

    // Assert
    let err = errors.last().unwrap();
    match &*err {
        PacerError::Timeout { condition, elapsed } => {
            assert_eq!(condition, "socket connected");
            assert_eq!(*elapsed, ms(40));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn success_on_the_first_synchronous_evaluation() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let successes: CallRecorder<()> = CallRecorder::new();

    // Act - condition already true at call time
    let success_sink = successes.clone();
    let _token = poll(
        &scheduler,
        || true,
        move || success_sink.record(()),
        |_err| panic!("should not time out"),
        PollOptions::default(),
    );

    // Assert - fired synchronously, nothing left scheduled
    assert_eq!(successes.count(), 1);
    assert_eq!(scheduler.pending(), 0);

    scheduler.advance(DEFAULT_POLL_TIMEOUT * 2);
    assert_eq!(successes.count(), 1);
}

#[test]
fn cancellation_suppresses_evaluation_and_both_callbacks() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let successes: CallRecorder<()> = CallRecorder::new();
    let failures: CallRecorder<String> = CallRecorder::new();
    let evaluations = Arc::new(AtomicUsize::new(0));

    let evaluated = Arc::clone(&evaluations);
    let success_sink = successes.clone();
    let failure_sink = failures.clone();
    let token = poll(
        &scheduler,
        move || {
            evaluated.fetch_add(1, Ordering::SeqCst);
            false
        },
        move || success_sink.record(()),
        move |err| failure_sink.record(err.to_string()),
        options(ms(100), ms(10)),
    );

    // Act - let two intervals play out, then cancel mid-session
    scheduler.advance(ms(20));
    let evaluations_before_cancel = evaluations.load(Ordering::SeqCst);
    token.cancel();
    scheduler.advance(ms(500));

    // Assert - no further evaluation, neither callback fired
    assert_eq!(evaluations.load(Ordering::SeqCst), evaluations_before_cancel);
    assert_eq!(successes.count(), 0);
    assert_eq!(failures.count(), 0);
}

#[test]
fn overlapping_sessions_are_independent() {
    // Arrange - two sessions over the same condition closure
    let scheduler = ManualScheduler::new();
    let flag = Arc::new(AtomicUsize::new(0));
    let first_successes: CallRecorder<()> = CallRecorder::new();
    let second_successes: CallRecorder<()> = CallRecorder::new();

    let watched = Arc::clone(&flag);
    let first_sink = first_successes.clone();
    let first_token = poll(
        &scheduler,
        move || watched.load(Ordering::SeqCst) > 0,
        move || first_sink.record(()),
        |_err| {},
        options(ms(100), ms(10)),
    );

    let watched = Arc::clone(&flag);
    let second_sink = second_successes.clone();
    let _second_token = poll(
        &scheduler,
        move || watched.load(Ordering::SeqCst) > 0,
        move || second_sink.record(()),
        |_err| panic!("second session should succeed"),
        options(ms(100), ms(10)),
    );

    // Act - cancel the first, then let the condition become true
    first_token.cancel();
    flag.store(1, Ordering::SeqCst);
    scheduler.advance(ms(10));

    // Assert - only the surviving session fired
    assert_eq!(first_successes.count(), 0);
    assert_eq!(second_successes.count(), 1);
}

#[test]
fn zero_interval_and_timeout_select_the_defaults() {
    // Arrange - a condition that never holds, with both timings zeroed
    let scheduler = ManualScheduler::new();
    let failures: CallRecorder<String> = CallRecorder::new();
    let evaluations = Arc::new(AtomicUsize::new(0));

    let evaluated = Arc::clone(&evaluations);
    let failure_sink = failures.clone();
    let _token = poll(
        &scheduler,
        move || {
            evaluated.fetch_add(1, Ordering::SeqCst);
            false
        },
        || panic!("condition never holds"),
        move |err| failure_sink.record(err.to_string()),
        options(Duration::ZERO, Duration::ZERO),
    );

    // Assert - one synchronous evaluation; a zero interval must not turn
    // the next tick into an endless same-instant reschedule loop
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    scheduler.advance(Duration::ZERO);
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);

    // Assert - re-evaluation at the 100ms default spacing
    scheduler.advance(ms(100));
    assert_eq!(evaluations.load(Ordering::SeqCst), 2);

    // Assert - deadline at the 2000ms default
    scheduler.advance(ms(1899));
    assert_eq!(failures.count(), 0);
    scheduler.advance(ms(1));
    assert_eq!(failures.count(), 1);
    assert_eq!(evaluations.load(Ordering::SeqCst), 21);

    // Assert - terminal after the timeout
    scheduler.advance(ms(500));
    assert_eq!(evaluations.load(Ordering::SeqCst), 21);
    assert_eq!(failures.count(), 1);
}

#[test]
fn default_options_match_the_documented_values() {
    let options = PollOptions::default();
    assert_eq!(options.timeout, DEFAULT_POLL_TIMEOUT);
    assert_eq!(options.interval, DEFAULT_POLL_INTERVAL);
    assert_eq!(options.timeout, ms(2000));
    assert_eq!(options.interval, ms(100));
}
