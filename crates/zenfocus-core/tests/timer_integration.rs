//! Timer to profile: finished sessions become XP.

use chrono::{DateTime, Duration, Utc};
use zenfocus_core::storage::{TimerConfig, PROFILE_FILE};
use zenfocus_core::{Event, FocusMode, FocusTimer, GamificationEngine, TimerSession, TimerState};

fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

#[test]
fn test_pomodoro_run_to_zero_awards_xp() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = GamificationEngine::open(dir.path().join(PROFILE_FILE));

    let mut timer = FocusTimer::from_config(&TimerConfig::default());
    timer.start();
    let mut finished = None;
    for _ in 0..25 * 60 {
        if let Some(event) = timer.tick(1) {
            finished = Some(event);
        }
    }
    let event = finished.expect("pomodoro should finish after 25 minutes");

    let report = engine.record_event(&event).unwrap();
    assert_eq!(report.xp_gained, 250);
    assert!(report.leveled_up);
    assert_eq!(report.new_level, 2);
    assert_eq!(report.current_xp, 150);
    assert_eq!(timer.state(), TimerState::Idle);

    let reopened = GamificationEngine::open(dir.path().join(PROFILE_FILE));
    assert_eq!(reopened.level(), 2);
    assert_eq!(reopened.profile().total_minutes_focused, 25.0);
}

#[test]
fn test_persisted_session_finishes_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let profile_path = dir.path().join(PROFILE_FILE);
    let timer_path = TimerSession::path_beside(&profile_path);
    let t0 = start_time();

    let mut session = TimerSession::new(FocusTimer::new(25), t0);
    session.timer_mut().start();
    session.save(&timer_path).unwrap();

    // Ten minutes in: still counting.
    let mut session = TimerSession::load(&timer_path).unwrap().unwrap();
    assert!(session.sync(t0 + Duration::minutes(10)).is_none());
    assert_eq!(session.timer().clock(), "15:00");
    session.save(&timer_path).unwrap();

    // Long after the countdown ran out.
    let mut session = TimerSession::load(&timer_path).unwrap().unwrap();
    let event = session.sync(t0 + Duration::minutes(40)).unwrap();
    assert!(matches!(
        event,
        Event::SessionFinished { mode: FocusMode::Pomodoro, .. }
    ));

    let mut engine = GamificationEngine::open(&profile_path);
    let report = engine.record_event(&event).unwrap();
    assert_eq!(report.xp_gained, 250);
    assert_eq!(engine.profile().current_xp, 150);
}

#[test]
fn test_flowtime_finish_awards_truncated_xp() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = GamificationEngine::open(dir.path().join(PROFILE_FILE));

    let mut timer = FocusTimer::default();
    timer.set_mode(FocusMode::Flowtime);
    timer.start();
    timer.tick(7 * 60 + 45);

    let event = timer.finish().unwrap();
    let report = engine.record_event(&event).unwrap();
    assert_eq!(report.xp_gained, 77);
    assert!(!report.leveled_up);
    assert_eq!(engine.profile().total_minutes_focused, 7.75);
}

#[test]
fn test_non_session_events_leave_profile_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROFILE_FILE);
    let mut engine = GamificationEngine::open(&path);

    let mut timer = FocusTimer::default();
    let started = timer.start().unwrap();
    let paused = timer.pause().unwrap();
    assert!(engine.record_event(&started).is_none());
    assert!(engine.record_event(&paused).is_none());
    assert!(!path.exists());
}
