use std::path::PathBuf;

use clap::{Args, Subcommand};
use standings_lib::{Direction, Field, League, Result, Session, TeamId, photo};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List teams in manual order with their ids
    List,
    /// Add a new team
    Add { name: Option<String> },
    /// Remove a team
    Remove { id: String },
    /// Change one field of a team
    Set {
        id: String,
        #[arg(value_enum)]
        field: Field,
        value: String,
    },
    /// Set or clear a team's photo
    Photo {
        id: String,
        #[command(flatten)]
        source: PhotoSource,
    },
    /// Move a team one place in the manual order
    Move { id: String, direction: Direction },
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PhotoSource {
    /// Remote image URL
    #[arg(long)]
    url: Option<String>,
    /// Local image file to embed in the table
    #[arg(long)]
    file: Option<PathBuf>,
    /// Remove the photo
    #[arg(long)]
    clear: bool,
}

impl Command {
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::List)
    }
}

pub fn handle(league: &League, session: &Session, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for team in league.state().entities {
                let photo = if team.photo.is_some() { " (photo)" } else { "" };
                println!("{}\t{}{photo}", team.id, team.name);
            }
        }
        Command::Add { name } => {
            let id = league.add_team(session, name.as_deref())?;
            println!("{id}");
        }
        Command::Remove { id } => {
            league.remove_team(session, &TeamId::from(id.as_str()))?;
        }
        Command::Set { id, field, value } => {
            league.edit_team(session, &TeamId::from(id.as_str()), *field, value)?;
        }
        Command::Photo { id, source } => {
            let photo = match (&source.url, &source.file) {
                _ if source.clear => None,
                (Some(url), _) => Some(url.trim().to_string()),
                (None, Some(path)) => Some(photo::from_file(path)?),
                (None, None) => None,
            };
            league.set_photo(session, &TeamId::from(id.as_str()), photo)?;
        }
        Command::Move { id, direction } => {
            league.move_team(session, &TeamId::from(id.as_str()), *direction)?;
        }
    }

    Ok(())
}
