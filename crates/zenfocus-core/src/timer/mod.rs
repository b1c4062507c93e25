mod engine;
mod session;

pub use engine::{format_clock, suggested_break_minutes, FocusMode, FocusTimer, TimerState};
pub use session::{TimerSession, TIMER_FILE};
