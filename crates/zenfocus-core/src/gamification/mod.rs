//! XP and leveling.
//!
//! Turns focused minutes into experience points, applies the level curve and
//! keeps the [`Profile`] persisted after every change.

mod engine;
mod profile;

pub use engine::{
    xp_for_minutes, xp_needed_for, GamificationEngine, PersistHook, SessionReport, XP_PER_LEVEL,
    XP_PER_MINUTE,
};
pub use profile::{Profile, DEFAULT_TITLE};
