//! Timer state that outlives a single process.
//!
//! The CLI runs one command at a time, so between invocations the
//! [`FocusTimer`] is kept as JSON next to the profile. Each command first
//! calls [`TimerSession::sync`], which ticks the timer by the whole seconds
//! of wall-clock time since the last sync.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::engine::FocusTimer;
use crate::error::Result;
use crate::events::Event;

/// File name of the timer document, kept in the profile's directory.
pub const TIMER_FILE: &str = "timer.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSession {
    timer: FocusTimer,
    synced_at: DateTime<Utc>,
}

impl TimerSession {
    pub fn new(timer: FocusTimer, now: DateTime<Utc>) -> Self {
        Self {
            timer,
            synced_at: now,
        }
    }

    /// Timer document location for a given profile document.
    pub fn path_beside(profile_path: &Path) -> PathBuf {
        profile_path.with_file_name(TIMER_FILE)
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }

    pub fn synced_at(&self) -> DateTime<Utc> {
        self.synced_at
    }

    /// Catch the timer up to `now`.
    ///
    /// Sub-second remainders carry over to the next sync. If the wall clock
    /// went backwards the timer is left alone and the sync point moves to `now`.
    pub fn sync(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let elapsed = (now - self.synced_at).num_seconds();
        if elapsed < 0 {
            self.synced_at = now;
            return None;
        }
        if elapsed == 0 {
            return None;
        }
        self.synced_at += Duration::seconds(elapsed);
        self.timer.tick(elapsed as u64)
    }

    /// Read a saved session. `Ok(None)` when there is none yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
