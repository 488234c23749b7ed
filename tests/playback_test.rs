// Integration tests for playback control over compiled traces

use std::time::Duration;

use stepviz::compilers::Compile;
use stepviz::compilers::queue::{QueueInput, QueueOp};
use stepviz::playback::{
    ManualClock, PlaybackConfig, PlaybackSession, Position, DEFAULT_BASE_INTERVAL,
};
use stepviz::visualization::{AlgorithmInput, Visualization};

use proptest::prelude::*;

fn session(len: usize) -> (PlaybackSession<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let session = PlaybackSession::with_clock(len, PlaybackConfig::default(), clock.clone())
        .expect("Default config should be valid");
    (session, clock)
}

#[test]
fn test_play_twice_arms_one_timer() {
    let (mut session, clock) = session(10);
    session.play();
    session.play();

    clock.advance(DEFAULT_BASE_INTERVAL);
    session.tick();
    session.tick();
    assert_eq!(session.current_index(), 1);

    clock.advance(DEFAULT_BASE_INTERVAL);
    session.tick();
    assert_eq!(session.current_index(), 2);
}

#[test]
fn test_pause_cancels_timer() {
    let (mut session, clock) = session(10);
    session.play();
    session.pause();
    session.pause();

    clock.advance(DEFAULT_BASE_INTERVAL * 3);
    assert!(!session.tick());
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.next_tick(), None);
}

#[test]
fn test_seek_does_not_pause() {
    let (mut session, _clock) = session(10);
    session.play();
    session.seek(5);
    assert!(session.is_playing());
    assert_eq!(session.current_index(), 5);

    session.seek(usize::MAX);
    assert_eq!(session.current_index(), 10);
    assert!(!session.is_playing());
}

#[test]
fn test_speed_change_applies_to_next_tick() {
    let (mut session, clock) = session(10);
    session.set_speed(2.0).unwrap();
    session.play();

    clock.advance(Duration::from_millis(500));
    assert!(session.tick());

    session.set_speed(0.5).unwrap();
    clock.advance(Duration::from_millis(1999));
    assert!(!session.tick());
    clock.advance(Duration::from_millis(1));
    assert!(session.tick());
    assert_eq!(session.current_index(), 2);
}

#[test]
fn test_full_playback_over_queue_trace() {
    let ops = vec![
        QueueOp::Enqueue(1),
        QueueOp::Enqueue(2),
        QueueOp::Enqueue(3),
        QueueOp::Dequeue,
        QueueOp::Enqueue(4),
        QueueOp::Dequeue,
        QueueOp::Dequeue,
        QueueOp::Enqueue(5),
    ];
    let trace = QueueInput::new(ops).unwrap().compile();
    let (mut session, clock) = session(trace.len());

    assert!(trace.at(session.position()).is_none());

    session.play();
    let mut seen = Vec::new();
    for _ in 0..20 {
        clock.advance(DEFAULT_BASE_INTERVAL);
        if session.tick() {
            seen.push(trace.at(session.position()).unwrap().ordinal);
        }
    }

    assert_eq!(seen, (0..8).collect::<Vec<_>>());
    assert_eq!(session.position(), Position::AtStep(7));
    assert!(!session.is_playing());
    assert_eq!(trace.at(session.position()).unwrap().payload.queue, vec![4, 5]);
}

#[test]
fn test_visualization_drives_session_length() {
    let viz = Visualization::compile(AlgorithmInput::Queue(QueueInput::new(vec![]).unwrap()));
    let (mut session, clock) = session(viz.len());

    session.play();
    clock.advance(DEFAULT_BASE_INTERVAL);
    assert!(!session.tick());
    assert!(!session.is_playing());
    assert_eq!(session.current_index(), 0);
}

#[test]
fn test_play_at_end_keeps_index() {
    let (mut session, clock) = session(6);
    session.seek(6);
    session.play();
    assert_eq!(session.current_index(), 6);

    clock.advance(DEFAULT_BASE_INTERVAL);
    assert!(!session.tick());
    assert_eq!(session.current_index(), 6);
    assert!(!session.is_playing());
}

/// One user or timer action against a session
#[derive(Debug, Clone)]
enum Action {
    Play,
    Pause,
    Toggle,
    StepForward,
    StepBackward,
    Seek(usize),
    SetSpeed(f64),
    Reset,
    Wait(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Play),
        Just(Action::Pause),
        Just(Action::Toggle),
        Just(Action::StepForward),
        Just(Action::StepBackward),
        (0usize..40).prop_map(Action::Seek),
        prop_oneof![Just(0.5), Just(1.0), Just(2.0), Just(-1.0)]
            .prop_map(Action::SetSpeed),
        Just(Action::Reset),
        (0u64..3000).prop_map(Action::Wait),
    ]
}

proptest! {
    #[test]
    fn prop_index_stays_in_bounds(
        len in 0usize..20,
        actions in prop::collection::vec(action(), 0..60),
    ) {
        let (mut session, clock) = session(len);
        for action in actions {
            match action {
                Action::Play => session.play(),
                Action::Pause => session.pause(),
                Action::Toggle => session.toggle(),
                Action::StepForward => session.step_forward(),
                Action::StepBackward => session.step_backward(),
                Action::Seek(i) => session.seek(i),
                Action::SetSpeed(s) => { let _ = session.set_speed(s); }
                Action::Reset => session.reset(),
                Action::Wait(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    session.tick();
                }
            }
            prop_assert!(session.current_index() <= len);
            prop_assert!(session.speed() > 0.0);
        }
    }

    #[test]
    fn prop_seek_then_step(len in 0usize..30, i in 0usize..30) {
        let (mut session, _clock) = session(len);
        let i = i.min(len);
        session.seek(i);
        session.step_forward();
        prop_assert_eq!(session.current_index(), (i + 1).min(len));
    }

    #[test]
    fn prop_one_step_per_interval(len in 1usize..20, plays in 1usize..4) {
        let (mut session, clock) = session(len);
        for _ in 0..plays {
            session.play();
        }
        clock.advance(DEFAULT_BASE_INTERVAL);
        for _ in 0..3 {
            session.tick();
        }
        prop_assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn prop_auto_pause_at_terminus(len in 0usize..15, extra in 0usize..10) {
        let (mut session, clock) = session(len);
        session.play();
        for _ in 0..(len + extra) {
            clock.advance(DEFAULT_BASE_INTERVAL);
            session.tick();
        }
        prop_assert_eq!(session.current_index(), len);
        prop_assert!(!session.is_playing());

        clock.advance(DEFAULT_BASE_INTERVAL);
        prop_assert!(!session.tick());
        prop_assert_eq!(session.current_index(), len);
    }
}
