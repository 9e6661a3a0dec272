use clap::{Parser, Subcommand};
use colored::Colorize;
use standings_lib::{AdminSecret, Error, League, Session};
use sysexits::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod render;
mod roster;
mod table;
mod team;

#[derive(Parser, Debug)]
#[command(name = "standings")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Admin password, required by commands that change the table
    #[arg(short, long, global = true, env = "STANDINGS_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Show the ranked table
    Show,
    /// Operate on teams
    #[command(subcommand)]
    Team(team::Command),
    /// Change the table title, order or contents
    #[command(subcommand)]
    Table(table::Command),
    /// Exchange the roster with the snapshot file
    #[command(subcommand)]
    Roster(roster::Command),
    /// Inspect or change the configuration
    #[command(subcommand)]
    Config(config::Command),
}

impl Command {
    fn is_write(&self) -> bool {
        match self {
            Self::Show => false,
            Self::Team(cmd) => cmd.is_write(),
            Self::Table(_) => true,
            Self::Roster(cmd) => cmd.is_write(),
            Self::Config(cmd) => cmd.is_write(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {err}");
    }

    let cli = Cli::parse();

    let league = match League::open() {
        Ok(league) => league,
        Err(err) => return fail(&err),
    };

    // Nothing is shown or written until the stored table has been loaded
    league.hydrated().await;
    debug!("Table loaded");

    let mut session = Session::new(AdminSecret::from_env());
    if cli.command.is_write() && !session.login(cli.password.as_deref().unwrap_or_default()) {
        eprintln!(
            "{} wrong or missing admin password (pass --password or set STANDINGS_PASSWORD)",
            "error:".red().bold()
        );
        return ExitCode::NoPerm;
    }

    let result = match &cli.command {
        Command::Show => {
            render::table(&league);
            Ok(())
        }
        Command::Team(cmd) => team::handle(&league, &session, cmd),
        Command::Table(cmd) => table::handle(&league, &session, cmd),
        Command::Roster(cmd) => roster::handle(&league, &session, cmd),
        Command::Config(cmd) => config::handle(&league, cmd),
    };

    match result {
        Ok(()) => ExitCode::Ok,
        Err(err) => fail(&err),
    }
}

fn fail(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "error:".red().bold());

    match err {
        Error::NotAuthorized => ExitCode::NoPerm,
        Error::Edit(_) => ExitCode::DataErr,
        Error::Photo(_) => ExitCode::NoInput,
        Error::Snapshot(_) => ExitCode::DataErr,
        Error::Config(_) => ExitCode::Config,
        Error::Storage(_) | Error::Io(_) => ExitCode::IoErr,
    }
}
