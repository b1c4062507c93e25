//! # ZenFocus Core Library
//!
//! Business logic for the ZenFocus focus timer. The desktop UI and the CLI
//! are thin callers over this crate: they run the timer, hand finished
//! sessions to the gamification engine, and render what comes back.
//!
//! ## Architecture
//!
//! - **Gamification**: converts focused minutes into XP, applies the level
//!   curve, and persists the profile after every session
//! - **Storage**: JSON profile store (atomic replace) and TOML configuration
//! - **Timer**: tick-driven Pomodoro / Flowtime clock
//!
//! ## Key Components
//!
//! - [`GamificationEngine`]: XP and leveling
//! - [`ProfileStore`]: persistence seam for the profile
//! - [`FocusTimer`]: focus session clock
//! - [`TimerSession`]: timer state kept between CLI runs
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod gamification;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, PersistError};
pub use events::Event;
pub use gamification::{GamificationEngine, Profile, SessionReport};
pub use storage::{Config, JsonFileStore, MemoryStore, ProfileStore};
pub use timer::{FocusMode, FocusTimer, TimerSession, TimerState};
