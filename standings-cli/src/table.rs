use clap::{Subcommand, ValueEnum};
use standings_lib::{League, Result, Session};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Set the table title
    Title { text: String },
    /// Set the line shown under the title
    Subtitle { text: String },
    /// Rank automatically or keep the manual order
    Sort {
        #[arg(value_enum)]
        mode: SortMode,
    },
    /// Replace everything with the built-in default table
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortMode {
    On,
    Off,
    Toggle,
}

pub fn handle(league: &League, session: &Session, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Title { text } => league.set_title(session, text)?,
        Command::Subtitle { text } => league.set_subtitle(session, text)?,
        Command::Sort { mode } => {
            let auto_sort = match mode {
                SortMode::On => {
                    league.set_auto_sort(session, true)?;
                    true
                }
                SortMode::Off => {
                    league.set_auto_sort(session, false)?;
                    false
                }
                SortMode::Toggle => league.toggle_auto_sort(session)?,
            };
            println!("{}", if auto_sort { "Automatic order" } else { "Manual order" });
        }
        Command::Reset => league.reset(session)?,
    }

    Ok(())
}
