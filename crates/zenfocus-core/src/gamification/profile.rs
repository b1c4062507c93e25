//! Persisted user profile.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PersistError;

/// Title every new profile starts with.
pub const DEFAULT_TITLE: &str = "Distracted Novice";

/// Gamification state for one user/installation.
///
/// Handed out by the engine only as `&Profile`; all mutation goes through
/// [`GamificationEngine::add_session_xp`](super::GamificationEngine::add_session_xp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub level: u32,
    /// XP accumulated toward the next level.
    pub current_xp: u64,
    pub total_xp_earned: u64,
    pub total_minutes_focused: f64,
    /// Maintained outside the engine.
    pub streak_days: u32,
    pub unlocked_titles: Vec<String>,
    /// Keys present in the persisted document that this version does not know.
    /// Kept so they are written back out unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            total_xp_earned: 0,
            total_minutes_focused: 0.0,
            streak_days: 0,
            unlocked_titles: vec![DEFAULT_TITLE.to_string()],
            extra: Map::new(),
        }
    }
}

impl Profile {
    /// Shallow-merge a persisted document over the defaults.
    ///
    /// Keys in `loaded` replace default keys; default keys absent from
    /// `loaded` survive. Fails with a read error naming `location` if a
    /// known key has the wrong type or the level is zero.
    pub fn overlay(loaded: Map<String, Value>, location: &Path) -> Result<Self, PersistError> {
        let mut merged = match serde_json::to_value(Profile::default()) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(PersistError::read(
                    location,
                    "default profile did not serialize to an object",
                ))
            }
            Err(e) => return Err(PersistError::read(location, e)),
        };
        merged.extend(loaded);

        let profile: Profile = serde_json::from_value(Value::Object(merged))
            .map_err(|e| PersistError::read(location, e))?;
        if profile.level == 0 {
            return Err(PersistError::read(location, "level must be at least 1"));
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overlay(value: Value) -> Result<Profile, PersistError> {
        Profile::overlay(as_map(value), Path::new("user_profile.json"))
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn default_profile_starts_fresh() {
        let p = Profile::default();
        assert_eq!(p.level, 1);
        assert_eq!(p.current_xp, 0);
        assert_eq!(p.total_xp_earned, 0);
        assert_eq!(p.total_minutes_focused, 0.0);
        assert_eq!(p.streak_days, 0);
        assert_eq!(p.unlocked_titles, vec![DEFAULT_TITLE.to_string()]);
        assert!(p.extra.is_empty());
    }

    #[test]
    fn serialized_keys_match_persisted_format() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        let mut keys: Vec<_> = as_map(json).keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "current_xp",
                "level",
                "streak_days",
                "total_minutes_focused",
                "total_xp_earned",
                "unlocked_titles",
            ]
        );
    }

    #[test]
    fn overlay_keeps_defaults_for_missing_keys() {
        let p = overlay(json!({ "level": 4, "current_xp": 120 })).unwrap();
        assert_eq!(p.level, 4);
        assert_eq!(p.current_xp, 120);
        assert_eq!(p.total_xp_earned, 0);
        assert_eq!(p.unlocked_titles, vec![DEFAULT_TITLE.to_string()]);
    }

    #[test]
    fn overlay_accepts_integer_minutes() {
        let p = overlay(json!({ "total_minutes_focused": 25 })).unwrap();
        assert_eq!(p.total_minutes_focused, 25.0);
    }

    #[test]
    fn overlay_preserves_unknown_keys() {
        let p = overlay(json!({ "level": 2, "theme": "forest" })).unwrap();
        assert_eq!(p.extra.get("theme"), Some(&json!("forest")));

        let out = as_map(serde_json::to_value(&p).unwrap());
        assert_eq!(out.get("theme"), Some(&json!("forest")));
        assert_eq!(out.get("level"), Some(&json!(2)));
    }

    #[test]
    fn overlay_rejects_wrong_types() {
        assert!(overlay(json!({ "level": "three" })).is_err());
        assert!(overlay(json!({ "current_xp": -5 })).is_err());
    }

    #[test]
    fn overlay_rejects_level_zero() {
        let err = overlay(json!({ "level": 0 })).unwrap_err();
        assert!(matches!(err, PersistError::Read { .. }));
        assert_eq!(err.path(), Path::new("user_profile.json"));
    }
}
