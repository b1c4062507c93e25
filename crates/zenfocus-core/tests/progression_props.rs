//! Property tests for the XP curve and level normalization.

use proptest::prelude::*;
use zenfocus_core::gamification::{xp_for_minutes, xp_needed_for};
use zenfocus_core::{GamificationEngine, MemoryStore};

proptest! {
    #[test]
    fn prop_xp_needed_is_hundred_per_level(level in 1u32..1_000_000) {
        prop_assert_eq!(xp_needed_for(level), 100 * u64::from(level));
    }

    #[test]
    fn prop_current_xp_stays_below_threshold(
        sessions in prop::collection::vec(0.0f64..600.0, 1..20)
    ) {
        let mut engine = GamificationEngine::new(MemoryStore::new());
        for minutes in sessions {
            let report = engine.add_session_xp(minutes);
            prop_assert!(report.current_xp < report.xp_needed);
            prop_assert_eq!(report.xp_needed, xp_needed_for(report.new_level));
            prop_assert_eq!(engine.profile().current_xp, report.current_xp);
        }
    }

    #[test]
    fn prop_progress_is_a_fraction_of_the_level(
        sessions in prop::collection::vec(0.0f64..300.0, 0..10)
    ) {
        let mut engine = GamificationEngine::new(MemoryStore::new());
        for minutes in sessions {
            engine.add_session_xp(minutes);
            let progress = engine.progress_percent();
            prop_assert!((0.0..1.0).contains(&progress));
            let p = engine.profile();
            prop_assert_eq!(progress, p.current_xp as f64 / (u64::from(p.level) * 100) as f64);
        }
    }

    #[test]
    fn prop_counters_never_decrease(
        sessions in prop::collection::vec(-60.0f64..600.0, 1..20)
    ) {
        let mut engine = GamificationEngine::new(MemoryStore::new());
        let mut last = engine.profile().clone();
        for minutes in sessions {
            let report = engine.add_session_xp(minutes);
            let p = engine.profile();
            prop_assert!(p.level >= last.level);
            prop_assert!(p.total_xp_earned >= last.total_xp_earned);
            prop_assert!(p.total_minutes_focused >= last.total_minutes_focused);
            prop_assert_eq!(p.total_xp_earned - last.total_xp_earned, report.xp_gained);
            last = p.clone();
        }
    }

    #[test]
    fn prop_xp_is_truncated_minutes(minutes in 0.0f64..10_000.0) {
        let xp = xp_for_minutes(minutes);
        prop_assert!(xp as f64 <= minutes * 10.0);
        prop_assert!((xp + 1) as f64 > minutes * 10.0);
    }

    #[test]
    fn prop_xp_total_matches_level_sum(minutes in 0.0f64..2_000.0) {
        let mut engine = GamificationEngine::new(MemoryStore::new());
        let report = engine.add_session_xp(minutes);
        let spent: u64 = (1..report.new_level).map(xp_needed_for).sum();
        prop_assert_eq!(spent + report.current_xp, report.xp_gained);
    }
}
