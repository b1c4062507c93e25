use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::FocusMode;

/// Every state change in the system produces an Event.
/// The UI renders them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: FocusMode,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: FocusMode,
        at: DateTime<Utc>,
    },
    /// A focus interval ended; `minutes` is what gets turned into XP.
    SessionFinished {
        mode: FocusMode,
        minutes: f64,
        at: DateTime<Utc>,
    },
    LevelUp {
        new_level: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::SessionFinished { at, .. }
            | Event::LevelUp { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::LevelUp {
            new_level: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "LevelUp");
        assert_eq!(json["new_level"], 3);
    }
}
