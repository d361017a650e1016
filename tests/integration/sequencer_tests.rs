//! Integration tests: Configuration → ZoneSequencer → output writes.

use std::thread;
use std::time::{Duration, Instant};

use sprinkler::adapters::cancel::{CancelReason, ChannelCancel};
use sprinkler::app::events::AppEvent;
use sprinkler::app::ports::NullSink;
use sprinkler::app::sequencer::{RunResult, RunStatus, ZoneSequencer};
use sprinkler::config::validate;
use sprinkler::zone::{OutputMask, ZoneId};

use super::mock_hw::{MockOutput, RecordingSink, ScriptedCancel};

fn mask(z: u64) -> u8 {
    ZoneId::new(z).unwrap().mask().bits()
}

// ── Manual hold ──────────────────────────────────────────────

#[test]
fn single_zone_without_timeout_holds_until_cancelled() {
    let config = validate(&[3], Duration::ZERO, 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let mut cancel = ScriptedCancel::never();
    let mut sink = RecordingSink::default();

    let result = seq.run(&mut out, &mut cancel, &mut sink);

    assert_eq!(result, RunResult::Cancelled, "hold mode never completes");
    assert_eq!(out.attempts, vec![0b1111_1011]);
    assert_eq!(cancel.holds, 1);
    assert!(cancel.waits.is_empty(), "hold must not use a timed wait");
    assert!(sink.events.contains(&AppEvent::Holding {
        zone: ZoneId::new(3).unwrap()
    }));
}

// ── Full run ─────────────────────────────────────────────────

#[test]
fn two_zones_two_passes_writes_four_masks() {
    let config = validate(&[1, 2], Duration::from_secs(5), 2).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let mut cancel = ScriptedCancel::never();

    let result = seq.run(&mut out, &mut cancel, &mut NullSink);

    assert_eq!(result, RunResult::Completed);
    assert_eq!(out.attempts, vec![mask(1), mask(2), mask(1), mask(2)]);
    assert_eq!(cancel.waits, vec![Duration::from_secs(5); 4]);
    assert_eq!(seq.status(), RunStatus::Finished(RunResult::Completed));
}

#[test]
fn events_follow_the_writes() {
    let config = validate(&[4, 6], Duration::from_secs(5), 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut sink = RecordingSink::default();

    seq.run(&mut MockOutput::new(), &mut ScriptedCancel::never(), &mut sink);

    let z4 = ZoneId::new(4).unwrap();
    let z6 = ZoneId::new(6).unwrap();
    assert_eq!(
        sink.events,
        vec![
            AppEvent::RunStarted {
                zones: vec![z4, z6],
                repeat: 1,
                timeout: Duration::from_secs(5),
            },
            AppEvent::ZoneActivated {
                pass: 0,
                zone: z4,
                mask: z4.mask(),
            },
            AppEvent::ZoneActivated {
                pass: 0,
                zone: z6,
                mask: z6.mask(),
            },
            AppEvent::RunFinished(RunResult::Completed),
        ]
    );
}

// ── Cancellation ─────────────────────────────────────────────

#[test]
fn no_write_after_cancellation() {
    let config = validate(&[1, 2, 3], Duration::from_secs(5), 2).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let mut cancel = ScriptedCancel::cancel_on_wait(3);

    let result = seq.run(&mut out, &mut cancel, &mut NullSink);

    assert_eq!(result, RunResult::Cancelled);
    assert_eq!(out.attempts, vec![mask(1), mask(2), mask(3), mask(1)]);
    assert_eq!(cancel.waits.len(), 4);
    assert_eq!(seq.state().pass, 1);
    assert_eq!(seq.state().index, 0);
}

#[test]
fn channel_cancel_cuts_a_long_wait_short() {
    let config = validate(&[1, 2], Duration::from_secs(30), 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let (handle, mut cancel) = ChannelCancel::new();

    let started = Instant::now();
    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.cancel(CancelReason::Interrupt)
    });
    let result = seq.run(&mut out, &mut cancel, &mut NullSink);

    assert!(sender.join().unwrap());
    assert_eq!(result, RunResult::Cancelled);
    assert_eq!(out.attempts, vec![mask(1)]);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(cancel.reason(), Some(CancelReason::Interrupt));
}

#[test]
fn cancel_before_start_writes_nothing() {
    let config = validate(&[1, 2], Duration::from_secs(30), 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let mut sink = RecordingSink::default();
    let (handle, mut cancel) = ChannelCancel::new();
    assert!(handle.cancel(CancelReason::Interrupt));

    let started = Instant::now();
    let result = seq.run(&mut out, &mut cancel, &mut sink);

    assert_eq!(result, RunResult::Cancelled);
    assert!(out.attempts.is_empty(), "no zone may switch on");
    assert_eq!(seq.state().writes, 0);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::ZoneActivated { .. })));
}

#[test]
fn cancel_before_hold_writes_nothing() {
    let config = validate(&[5], Duration::ZERO, 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();
    let (handle, mut cancel) = ChannelCancel::new();
    assert!(handle.cancel(CancelReason::Terminate));

    assert_eq!(seq.run(&mut out, &mut cancel, &mut NullSink), RunResult::Cancelled);
    assert!(out.attempts.is_empty());
    assert_eq!(cancel.reason(), Some(CancelReason::Terminate));
}

// ── Write failures ───────────────────────────────────────────

#[test]
fn failed_write_aborts_the_run() {
    let config = validate(&[1, 2, 3], Duration::from_secs(5), 2).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::failing_at(3);
    let mut cancel = ScriptedCancel::never();
    let mut sink = RecordingSink::default();

    let result = seq.run(&mut out, &mut cancel, &mut sink);

    assert!(matches!(result, RunResult::Failed(_)));
    assert_eq!(out.acked, vec![mask(1), mask(2)]);
    assert_eq!(cancel.waits.len(), 2, "no wait after the failed write");
    assert_eq!(seq.state().writes, 2);
    assert_eq!(sink.events.last(), Some(&AppEvent::RunFinished(result)));
}

#[test]
fn each_write_is_a_full_mask() {
    // Zone 5 after zone 2: the second write must not keep bit 1 cleared.
    let config = validate(&[2, 5], Duration::from_secs(5), 1).unwrap();
    let mut seq = ZoneSequencer::new(config);
    let mut out = MockOutput::new();

    seq.run(&mut out, &mut ScriptedCancel::never(), &mut NullSink);

    let last = OutputMask::from_bits(*out.attempts.last().unwrap());
    assert_eq!(last.active_zones().collect::<Vec<_>>(), vec![ZoneId::new(5).unwrap()]);
}

