//! Validation of user edits.
//!
//! Raw text typed by the user is turned into an [`Edit`] here, before it gets anywhere near the
//! table. Anything that doesn't parse is rejected and the table keeps its last committed value.

use clap::ValueEnum;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::model::{Stat, TableState, TeamId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("`{field}` expects a non-negative whole number, got {raw:?}")]
    NotANumber { field: Field, raw: String },
    #[error("`{field}` cannot be blank")]
    Blank { field: Field },
    #[error("No team with id {0}")]
    UnknownTeam(TeamId),
}

/// An editable column of a team row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum Field {
    Name,
    Photo,
    RoundsPlayed,
    Wins,
    Draws,
    Losses,
    GoalsFor,
    GoalsAgainst,
}

impl Field {
    /// The counter behind this field, if it is numeric.
    pub fn stat(self) -> Option<Stat> {
        match self {
            Self::Name | Self::Photo => None,
            Self::RoundsPlayed => Some(Stat::RoundsPlayed),
            Self::Wins => Some(Stat::Wins),
            Self::Draws => Some(Stat::Draws),
            Self::Losses => Some(Stat::Losses),
            Self::GoalsFor => Some(Stat::GoalsFor),
            Self::GoalsAgainst => Some(Stat::GoalsAgainst),
        }
    }
}

/// A validated change to a single team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Name(String),
    /// `None` removes the photo
    Photo(Option<String>),
    Stat(Stat, u32),
}

impl Edit {
    /// Parses the raw text entered for `field`.
    ///
    /// Names are trimmed and must not be blank. Counters must be base-10 non-negative integers.
    /// A blank photo clears it, anything else is kept verbatim.
    pub fn parse(field: Field, raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();

        if let Some(stat) = field.stat() {
            return trimmed
                .parse::<u32>()
                .map(|value| Self::Stat(stat, value))
                .map_err(|_| Error::NotANumber {
                    field,
                    raw: raw.to_string(),
                });
        }

        match field {
            Field::Photo if trimmed.is_empty() => Ok(Self::Photo(None)),
            Field::Photo => Ok(Self::Photo(Some(trimmed.to_string()))),
            _ if trimmed.is_empty() => Err(Error::Blank { field }),
            _ => Ok(Self::Name(trimmed.to_string())),
        }
    }
}

impl TableState {
    /// Returns a copy of the table with `edit` applied to the team `id`.
    pub fn with_edit(&self, id: &TeamId, edit: &Edit) -> Result<Self, Error> {
        let mut next = self.clone();
        let team = next
            .entities
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| Error::UnknownTeam(id.clone()))?;

        match edit {
            Edit::Name(name) => team.name.clone_from(name),
            Edit::Photo(photo) => team.photo.clone_from(photo),
            Edit::Stat(stat, value) => *team.stat_mut(*stat) = *value,
        }

        Ok(next)
    }
}
