//! Focus timer.
//!
//! Like the rest of the core, the timer has no internal thread: the caller
//! invokes `tick()` once per elapsed interval (the desktop UI does it every
//! second).
//!
//! ## Modes
//!
//! - **Pomodoro**: counts down from the configured focus duration. Reaching
//!   zero finishes the session and rearms the countdown.
//! - **Flowtime**: counts up from zero until the user calls `finish()`,
//!   suggesting a longer break the longer the session runs.
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           +-> (SessionFinished) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::storage::TimerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    Pomodoro,
    Flowtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Break length, in minutes, suggested after `elapsed_minutes` of Flowtime.
pub fn suggested_break_minutes(elapsed_minutes: u64) -> u32 {
    match elapsed_minutes {
        m if m > 50 => 15,
        m if m > 25 => 8,
        _ => 5,
    }
}

fn default_short_break() -> u32 {
    TimerConfig::default().short_break
}

/// Formats seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    mode: FocusMode,
    state: TimerState,
    /// Length of one Pomodoro in seconds.
    focus_secs: u64,
    /// Break offered after a Pomodoro, in minutes.
    #[serde(default = "default_short_break")]
    short_break: u32,
    /// Seconds left (Pomodoro) or seconds elapsed (Flowtime).
    clock_secs: u64,
}

impl FocusTimer {
    /// Idle Pomodoro timer of `focus_minutes`.
    pub fn new(focus_minutes: u32) -> Self {
        let focus_secs = u64::from(focus_minutes) * 60;
        Self {
            mode: FocusMode::Pomodoro,
            state: TimerState::Idle,
            focus_secs,
            short_break: default_short_break(),
            clock_secs: focus_secs,
        }
    }

    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            short_break: config.short_break,
            ..Self::new(config.focus_duration)
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn clock_secs(&self) -> u64 {
        self.clock_secs
    }

    /// Current clock as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.clock_secs)
    }

    /// Fraction of the Pomodoro still remaining (1.0 when armed).
    /// Always 0.0 in Flowtime.
    pub fn progress(&self) -> f64 {
        match self.mode {
            FocusMode::Pomodoro if self.focus_secs > 0 => {
                self.clock_secs as f64 / self.focus_secs as f64
            }
            _ => 0.0,
        }
    }

    /// Break to take after this session: the configured short break for
    /// Pomodoro, or a length that grows with the Flowtime clock.
    pub fn suggested_break(&self) -> u32 {
        match self.mode {
            FocusMode::Flowtime => suggested_break_minutes(self.clock_secs / 60),
            FocusMode::Pomodoro => self.short_break,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Switch modes. Stops the timer and rearms the clock.
    pub fn set_mode(&mut self, mode: FocusMode) -> Event {
        self.mode = mode;
        self.reset()
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerStarted {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Idle | TimerState::Paused => self.start(),
        }
    }

    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.clock_secs = self.armed_clock();
        Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        }
    }

    /// Advance the clock by `secs`. Returns `SessionFinished` when a
    /// Pomodoro runs out.
    pub fn tick(&mut self, secs: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }

        match self.mode {
            FocusMode::Pomodoro => {
                if secs < self.clock_secs {
                    self.clock_secs -= secs;
                    return None;
                }
                let minutes = self.focus_secs as f64 / 60.0;
                self.state = TimerState::Idle;
                self.clock_secs = self.focus_secs;
                Some(Event::SessionFinished {
                    mode: FocusMode::Pomodoro,
                    minutes,
                    at: Utc::now(),
                })
            }
            FocusMode::Flowtime => {
                self.clock_secs = self.clock_secs.saturating_add(secs);
                None
            }
        }
    }

    /// End a Flowtime session early and report what was focused.
    ///
    /// Pomodoros only count when they run out, so this is `None` in
    /// Pomodoro mode, and also when no time has elapsed.
    pub fn finish(&mut self) -> Option<Event> {
        if self.mode != FocusMode::Flowtime || self.clock_secs == 0 {
            return None;
        }
        let minutes = self.clock_secs as f64 / 60.0;
        self.state = TimerState::Idle;
        self.clock_secs = 0;
        Some(Event::SessionFinished {
            mode: FocusMode::Flowtime,
            minutes,
            at: Utc::now(),
        })
    }

    fn armed_clock(&self) -> u64 {
        match self.mode {
            FocusMode::Pomodoro => self.focus_secs,
            FocusMode::Flowtime => 0,
        }
    }

    fn elapsed_secs(&self) -> u64 {
        match self.mode {
            FocusMode::Pomodoro => self.focus_secs - self.clock_secs,
            FocusMode::Flowtime => self.clock_secs,
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::from_config(&TimerConfig::default())
    }
}
