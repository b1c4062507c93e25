use std::path::PathBuf;

use clap::Subcommand;
use zenfocus_core::error::Result;

use super::open_engine;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Award XP for a finished focus session
    Record {
        /// Minutes focused (fractions allowed)
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
}

pub fn run(action: SessionAction, profile: Option<PathBuf>) -> Result<()> {
    let mut engine = open_engine(profile);

    match action {
        SessionAction::Record { minutes } => {
            let report = engine.add_session_xp(minutes);
            println!("{}", serde_json::to_string_pretty(&report)?);
            eprintln!("{}", report.summary());
        }
    }
    Ok(())
}
