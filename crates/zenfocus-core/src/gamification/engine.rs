//! XP progression engine.
//!
//! A reducer over [`Profile`] (`Profile x minutes -> Profile' x SessionReport`)
//! wrapped with load-on-construction and save-on-every-mutation.
//!
//! ## XP rules
//!
//! - 10 XP per focused minute, truncated toward zero.
//! - Reaching the next level costs `level * 100` XP.
//! - Leftover XP carries over; one session can cross several levels.
//!
//! ## Persistence
//!
//! Read and write failures never reach the caller. They are logged and, if
//! installed, passed to a [`PersistHook`]; the in-memory profile stays
//! authoritative.
//!
//! ```ignore
//! let mut engine = GamificationEngine::open("data/user_profile.json");
//! let report = engine.add_session_xp(25.0);
//! if report.leveled_up {
//!     println!("LEVEL {}", report.new_level);
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::profile::Profile;
use crate::error::PersistError;
use crate::events::Event;
use crate::storage::{Config, JsonFileStore, ProfileStore};

/// XP awarded per focused minute.
pub const XP_PER_MINUTE: u64 = 10;

/// XP cost of each level step, multiplied by the level.
pub const XP_PER_LEVEL: u64 = 100;

/// Callback invoked with every swallowed persistence failure.
pub type PersistHook = Box<dyn Fn(&PersistError) + Send + Sync>;

/// XP required to advance from `level` to `level + 1`.
pub fn xp_needed_for(level: u32) -> u64 {
    u64::from(level) * XP_PER_LEVEL
}

/// XP earned for a session of `minutes`, truncated toward zero.
pub fn xp_for_minutes(minutes: f64) -> u64 {
    // `as` saturates: huge inputs clamp to u64::MAX, NaN becomes 0.
    (minutes * XP_PER_MINUTE as f64).trunc() as u64
}

/// Outcome of one recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub xp_gained: u64,
    pub leveled_up: bool,
    pub new_level: u32,
    /// XP toward the next level, after level-ups were applied.
    pub current_xp: u64,
    /// XP the new level needs.
    pub xp_needed: u64,
}

impl SessionReport {
    /// `LevelUp` event for notification, if this session crossed a level.
    pub fn level_up_event(&self) -> Option<Event> {
        self.leveled_up.then(|| Event::LevelUp {
            new_level: self.new_level,
            at: Utc::now(),
        })
    }

    /// One-line notification text.
    pub fn summary(&self) -> String {
        if self.leveled_up {
            format!(
                "Session complete! +{} XP\nLEVEL UP! You reached level {}",
                self.xp_gained, self.new_level
            )
        } else {
            format!("Session complete! +{} XP", self.xp_gained)
        }
    }
}

/// Owns the profile and its storage.
pub struct GamificationEngine {
    profile: Profile,
    store: Box<dyn ProfileStore>,
    hook: Option<PersistHook>,
}

impl fmt::Debug for GamificationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamificationEngine")
            .field("profile", &self.profile)
            .field("location", &self.store.location())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl GamificationEngine {
    /// Create an engine over `store`, loading any persisted profile.
    ///
    /// Never fails: an unreadable document leaves the default profile in place.
    pub fn new(store: impl ProfileStore + 'static) -> Self {
        Self::build(Box::new(store), None)
    }

    /// Like [`new`](Self::new), with a hook that also sees load failures.
    pub fn with_persist_hook(
        store: impl ProfileStore + 'static,
        hook: impl Fn(&PersistError) + Send + Sync + 'static,
    ) -> Self {
        Self::build(Box::new(store), Some(Box::new(hook)))
    }

    /// Engine over a JSON document at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileStore::new(path))
    }

    /// Engine over the profile location from the user's config.
    pub fn open_default() -> Self {
        Self::open(Config::load_or_default().profile_path())
    }

    fn build(store: Box<dyn ProfileStore>, hook: Option<PersistHook>) -> Self {
        let mut engine = Self {
            profile: Profile::default(),
            store,
            hook,
        };
        engine.load_data();
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Read-only view of the profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn level(&self) -> u32 {
        self.profile.level
    }

    /// XP the current level needs before the next level-up.
    pub fn xp_needed(&self) -> u64 {
        xp_needed_for(self.profile.level)
    }

    /// Fraction of the current level completed, for progress bars.
    pub fn progress_percent(&self) -> f64 {
        let xp_needed = self.xp_needed();
        if xp_needed == 0 {
            return 0.0;
        }
        self.profile.current_xp as f64 / xp_needed as f64
    }

    pub fn location(&self) -> PathBuf {
        self.store.location()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Record a finished focus session and persist the result.
    ///
    /// Negative and non-finite durations count as zero minutes.
    pub fn add_session_xp(&mut self, minutes_focused: f64) -> SessionReport {
        let minutes = if minutes_focused.is_finite() && minutes_focused > 0.0 {
            minutes_focused
        } else {
            if minutes_focused != 0.0 {
                tracing::warn!(
                    minutes = minutes_focused,
                    "ignoring invalid session duration"
                );
            }
            0.0
        };
        let xp_gained = xp_for_minutes(minutes);

        let profile = &mut self.profile;
        profile.total_minutes_focused += minutes;
        profile.total_xp_earned = profile.total_xp_earned.saturating_add(xp_gained);
        profile.current_xp = profile.current_xp.saturating_add(xp_gained);

        let mut leveled_up = false;
        let mut xp_needed = xp_needed_for(profile.level);
        while xp_needed > 0 && profile.current_xp >= xp_needed {
            let Some(next_level) = profile.level.checked_add(1) else {
                // Top of the curve: keep the level, hold XP just under it.
                profile.current_xp = xp_needed - 1;
                break;
            };
            profile.current_xp -= xp_needed;
            profile.level = next_level;
            leveled_up = true;
            xp_needed = xp_needed_for(profile.level);
        }

        if leveled_up {
            tracing::debug!(level = profile.level, "level up");
        }

        let report = SessionReport {
            xp_gained,
            leveled_up,
            new_level: profile.level,
            current_xp: profile.current_xp,
            xp_needed,
        };

        self.save_data();
        report
    }

    /// Feed a timer event to the engine.
    ///
    /// Only `SessionFinished` awards XP; every other event yields `None`.
    pub fn record_event(&mut self, event: &Event) -> Option<SessionReport> {
        match event {
            Event::SessionFinished { minutes, .. } => Some(self.add_session_xp(*minutes)),
            _ => None,
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Write the profile to storage. Failures are logged and swallowed.
    pub fn save_data(&mut self) {
        match self.store.save(&self.profile) {
            Ok(()) => {
                tracing::debug!(location = %self.store.location().display(), "profile saved")
            }
            Err(e) => {
                tracing::warn!("Error saving progress: {e}");
                self.notify(&e);
            }
        }
    }

    /// Overlay the persisted document onto the current profile.
    ///
    /// Missing documents are not an error; unreadable ones are logged and
    /// leave the profile untouched.
    pub fn load_data(&mut self) {
        let location = self.store.location();
        let loaded = self.store.load().and_then(|doc| match doc {
            None => Ok(None),
            Some(map) => Profile::overlay(map, &location).map(Some),
        });

        match loaded {
            Ok(Some(profile)) => {
                tracing::debug!(
                    location = %location.display(),
                    level = profile.level,
                    "profile loaded"
                );
                self.profile = profile;
            }
            Ok(None) => {
                tracing::debug!(location = %location.display(), "no saved profile, starting fresh");
            }
            Err(e) => {
                tracing::warn!("Error loading profile, starting a new one: {e}");
                self.notify(&e);
            }
        }
    }

    fn notify(&self, err: &PersistError) {
        if let Some(ref hook) = self.hook {
            hook(err);
        }
    }
}
