use clap::Subcommand;
use standings_lib::{CoreConfig, League, Result, Scoring};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the active configuration
    Show,
    /// Set the points awarded for a win and for a draw
    Scoring { win: u32, draw: u32 },
}

impl Command {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Scoring { .. })
    }
}

pub fn handle(league: &League, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Show => {
            let cfg = league.cfg().read();
            let path = CoreConfig::path()?;
            let scoring = cfg.scoring();
            println!("file:        {}", path.display());
            println!("scoring:     win = {}, draw = {}", scoring.win, scoring.draw);
            println!("storage key: {}", cfg.storage_key());
            println!("roster file: {}", cfg.roster_file());
        }
        Command::Scoring { win, draw } => {
            let mut cfg = league.cfg().write();
            cfg.set_scoring(Scoring::new(*win, *draw));
            cfg.save()?;
            println!("Scoring set to {win} per win, {draw} per draw");
        }
    }

    Ok(())
}
