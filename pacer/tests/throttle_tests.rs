// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use pacer::{Throttle, DEFAULT_THROTTLE_WAIT};
use pacer_test_utils::{CallRecorder, ManualScheduler};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn first_call_runs_immediately() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), ms(100));

    // Act
    throttled.call(1);

    // Assert - leading edge, no deferral
    assert_eq!(recorder.values(), vec![1]);
}

#[test]
fn calls_inside_the_window_become_one_trailing_run_with_last_arguments() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), ms(100));

    // Act - leading call opens the window, three more land inside it
    throttled.call(1);
    scheduler.advance(ms(20));
    throttled.call(2);
    scheduler.advance(ms(20));
    throttled.call(3);
    scheduler.advance(ms(20));
    throttled.call(4);

    // Assert - nothing extra inside the window
    assert_eq!(recorder.values(), vec![1]);

    // Assert - single trailing run at the window boundary, last call wins
    scheduler.advance(ms(40));
    assert_eq!(recorder.values(), vec![1, 4]);
}

#[test]
fn trailing_run_reopens_the_window_at_its_own_fire_time() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), ms(100));

    // Act - leading at t=0, trailing fires at t=100
    throttled.call(1);
    scheduler.advance(ms(50));
    throttled.call(2);
    scheduler.advance(ms(50));
    assert_eq!(recorder.values(), vec![1, 2]);

    // Act - t=150 falls inside the window the trailing run opened at t=100
    scheduler.advance(ms(50));
    throttled.call(3);

    // Assert - deferred to the new window's boundary at t=200
    assert_eq!(recorder.values(), vec![1, 2]);
    scheduler.advance(ms(50));
    assert_eq!(recorder.values(), vec![1, 2, 3]);
}

#[test]
fn continuous_calling_executes_once_per_window() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), ms(100));

    // Act - a call every 30ms for 990ms, then run out the last window
    for i in 0..33 {
        throttled.call(i);
        scheduler.advance(ms(30));
    }
    scheduler.advance(ms(10));

    // Assert - floor(T / wait) + 1 executions over T = 1000ms
    assert_eq!(recorder.count(), 11);
    // Leading run, then one boundary run per window with the newest
    // arguments at that boundary.
    assert_eq!(recorder.values()[0], 0);
    assert_eq!(recorder.values()[1], 3);
    assert_eq!(recorder.last(), Some(32));
}

#[test]
fn calls_after_an_idle_window_run_on_the_leading_edge_again() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), ms(100));

    // Act
    throttled.call(1);
    scheduler.advance(ms(100));
    throttled.call(2);

    // Assert - window had lapsed, so the call ran immediately
    assert_eq!(recorder.values(), vec![1, 2]);
}

#[test]
fn zero_wait_selects_the_default_window() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder: CallRecorder<u32> = CallRecorder::new();
    let sink = recorder.clone();
    let throttled = Throttle::new(scheduler.clone(), move |n| sink.record(n), Duration::ZERO);

    // Act
    throttled.call(1);
    throttled.call(2);

    // Assert - trailing run waits for the 250ms default, not zero
    scheduler.advance(DEFAULT_THROTTLE_WAIT - ms(1));
    assert_eq!(recorder.values(), vec![1]);
    scheduler.advance(ms(1));
    assert_eq!(recorder.values(), vec![1, 2]);
}
