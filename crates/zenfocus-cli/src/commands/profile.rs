//! Profile inspection commands.
//!
//! Read-only: profiles change through `session record` and the timer.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;
use zenfocus_core::error::Result;
use zenfocus_core::Profile;

use super::open_engine;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile with XP progress as JSON
    Show,
    /// Print the level badge and XP bar text
    Progress,
    /// Print where the profile document lives
    Path,
}

#[derive(Serialize)]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a Profile,
    xp_needed: u64,
    progress: f64,
}

pub fn run(action: ProfileAction, profile: Option<PathBuf>) -> Result<()> {
    let engine = open_engine(profile);

    match action {
        ProfileAction::Show => {
            let view = ProfileView {
                profile: engine.profile(),
                xp_needed: engine.xp_needed(),
                progress: engine.progress_percent(),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        ProfileAction::Progress => {
            let p = engine.profile();
            println!("LEVEL {}", p.level);
            println!("{} / {} XP", p.current_xp, engine.xp_needed());
            println!("{:.0}%", engine.progress_percent() * 100.0);
        }
        ProfileAction::Path => {
            println!("{}", engine.location().display());
        }
    }
    Ok(())
}
