//! Standings: a ranked league table with a persisted, hydrating state store.
//!
//! Core modules:
//! - `ranking`: pure ordering of teams by points and tie-breaks
//! - `cell`: [`StateCell`], a store that hydrates from durable storage in the background
//! - `session`: the admin login gate that decides whether edits are offered
//! - `league`: [`League`], the access point tying the pieces together

use thiserror::Error;

pub mod cell;
pub mod config;
pub mod edit;
pub mod fs;
pub mod league;
pub mod model;
pub mod photo;
pub mod ranking;
pub mod session;
pub mod snapshot;
pub mod storage;

pub use cell::StateCell;
pub use config::{Cfg, CoreConfig};
pub use edit::{Edit, Field};
pub use league::League;
pub use model::{Direction, TableState, Team, TeamId};
pub use ranking::{Scoring, Standing};
pub use session::{AdminSecret, Session, SessionState};
pub use snapshot::RosterSnapshot;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageHandle};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Admin login required to change the table")]
    NotAuthorized,
    #[error(transparent)]
    Edit(#[from] edit::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] storage::Error),
    #[error("Roster snapshot error: {0}")]
    Snapshot(#[from] snapshot::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    #[error(transparent)]
    Photo(#[from] photo::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
