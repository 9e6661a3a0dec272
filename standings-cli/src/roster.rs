use std::path::PathBuf;

use clap::Subcommand;
use standings_lib::{League, Result, RosterSnapshot, Session};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write the current roster to the snapshot file
    Export { path: Option<PathBuf> },
    /// Replace the roster with the one in the snapshot file
    Import { path: Option<PathBuf> },
}

impl Command {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Import { .. })
    }
}

pub fn handle(league: &League, session: &Session, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Export { path } => {
            let snapshot = snapshot(league, path.as_ref())?;
            let count = league.export_roster(&snapshot)?;
            println!("Exported {count} teams to {}", snapshot.path().display());
        }
        Command::Import { path } => {
            let snapshot = snapshot(league, path.as_ref())?;
            let count = league.import_roster(session, &snapshot)?;
            println!("Imported {count} teams from {}", snapshot.path().display());
        }
    }

    Ok(())
}

fn snapshot(league: &League, path: Option<&PathBuf>) -> Result<RosterSnapshot> {
    match path {
        Some(path) => Ok(RosterSnapshot::new(path)),
        None => {
            let file_name = league.cfg().read().roster_file().clone();
            Ok(RosterSnapshot::open_default(&file_name)?)
        }
    }
}
