//! Focus timer commands.
//!
//! The timer is stored as `timer.json` beside the profile. Every command
//! first catches it up to the wall clock; any session that finishes along
//! the way is credited to the profile.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use zenfocus_core::error::{CoreError, Result};
use zenfocus_core::timer::{format_clock, suggested_break_minutes};
use zenfocus_core::{Config, Event, FocusMode, FocusTimer, SessionReport, TimerSession, TimerState};

use super::open_engine;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the timer
    Start {
        /// Count up until `timer finish` instead of down
        #[arg(long)]
        flowtime: bool,
        /// Count down from the configured focus duration
        #[arg(long, conflicts_with = "flowtime")]
        pomodoro: bool,
    },
    /// Pause the running timer
    Pause,
    /// Print the timer state as JSON
    Status,
    /// Advance a running timer by a number of seconds
    Tick { secs: u64 },
    /// End a Flowtime session and award its XP
    Finish,
    /// Stop the timer and rearm it from the config
    Reset,
    /// Suggest a break length after a Flowtime session
    SuggestBreak {
        /// Minutes focused so far
        minutes: u64,
    },
    /// Format a number of seconds as MM:SS
    Clock { secs: u64 },
}

#[derive(Serialize)]
struct TimerView<'a> {
    mode: FocusMode,
    state: TimerState,
    clock: String,
    progress: f64,
    suggested_break: u32,
    sessions: &'a [SessionReport],
}

impl<'a> TimerView<'a> {
    fn new(timer: &FocusTimer, sessions: &'a [SessionReport]) -> Self {
        Self {
            mode: timer.mode(),
            state: timer.state(),
            clock: timer.clock(),
            progress: timer.progress(),
            suggested_break: timer.suggested_break(),
            sessions,
        }
    }
}

fn fresh_timer(config: &Config, mode: FocusMode) -> FocusTimer {
    let mut timer = FocusTimer::from_config(&config.timer);
    if mode != timer.mode() {
        timer.set_mode(mode);
    }
    timer
}

fn load_session(path: &Path, config: &Config, now: DateTime<Utc>) -> TimerSession {
    match TimerSession::load(path) {
        Ok(Some(session)) => session,
        Ok(None) => TimerSession::new(fresh_timer(config, FocusMode::Pomodoro), now),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "discarding unreadable timer state"
            );
            TimerSession::new(fresh_timer(config, FocusMode::Pomodoro), now)
        }
    }
}

/// Apply one command to the timer. Returns a finished session, if any.
fn apply(
    action: TimerAction,
    session: &mut TimerSession,
    config: &Config,
) -> Result<Option<Event>> {
    let timer = session.timer_mut();
    match action {
        TimerAction::Start { flowtime, pomodoro } => {
            let mode = match (flowtime, pomodoro) {
                (true, _) => FocusMode::Flowtime,
                (_, true) => FocusMode::Pomodoro,
                _ => timer.mode(),
            };
            // An idle timer has nothing to lose, so pick up config changes.
            if mode != timer.mode() || timer.state() == TimerState::Idle {
                *timer = fresh_timer(config, mode);
            }
            timer.start();
            Ok(None)
        }
        TimerAction::Pause => {
            timer.pause();
            Ok(None)
        }
        TimerAction::Tick { secs } => Ok(timer.tick(secs)),
        TimerAction::Finish => match timer.mode() {
            FocusMode::Pomodoro => Err(CoreError::Custom(
                "a Pomodoro finishes when its countdown reaches zero".into(),
            )),
            FocusMode::Flowtime => timer
                .finish()
                .map(Some)
                .ok_or_else(|| CoreError::Custom("no Flowtime session to finish".into())),
        },
        TimerAction::Reset => {
            let mode = timer.mode();
            *timer = fresh_timer(config, mode);
            Ok(None)
        }
        TimerAction::Status | TimerAction::SuggestBreak { .. } | TimerAction::Clock { .. } => {
            Ok(None)
        }
    }
}

pub fn run(action: TimerAction, profile: Option<PathBuf>) -> Result<()> {
    match action {
        TimerAction::SuggestBreak { minutes } => {
            println!("Suggested break: {} min", suggested_break_minutes(minutes));
            return Ok(());
        }
        TimerAction::Clock { secs } => {
            println!("{}", format_clock(secs));
            return Ok(());
        }
        _ => {}
    }

    let mut engine = open_engine(profile);
    let config = Config::load_or_default();
    let path = TimerSession::path_beside(&engine.location());
    let now = Utc::now();
    let mut session = load_session(&path, &config, now);

    let mut reports = Vec::new();
    if let Some(event) = session.sync(now) {
        reports.extend(engine.record_event(&event));
    }
    let outcome = apply(action, &mut session, &config);
    if let Ok(Some(event)) = &outcome {
        reports.extend(engine.record_event(event));
    }

    // Saved even when the command fails so credited sessions are not replayed.
    session.save(&path)?;
    tracing::debug!(path = %path.display(), "timer state saved");
    outcome?;

    for report in &reports {
        eprintln!("{}", report.summary());
    }
    let view = TimerView::new(session.timer(), &reports);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
