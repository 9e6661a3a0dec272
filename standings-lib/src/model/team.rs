use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::model::TeamId;

/// One competing participant and its match statistics.
///
/// Counters are edited independently of each other. Nothing ties `wins + draws + losses` to
/// `rounds_played`; the table shows whatever was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Remote URL or inline `data:` URL, stored verbatim
    pub photo: Option<String>,
    pub rounds_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

/// The numeric counters of a [`Team`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Stat {
    RoundsPlayed,
    Wins,
    Draws,
    Losses,
    GoalsFor,
    GoalsAgainst,
}

impl Team {
    /// A team with no photo and every counter at zero.
    pub fn new(id: TeamId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            photo: None,
            rounds_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn stat(&self, stat: Stat) -> u32 {
        match stat {
            Stat::RoundsPlayed => self.rounds_played,
            Stat::Wins => self.wins,
            Stat::Draws => self.draws,
            Stat::Losses => self.losses,
            Stat::GoalsFor => self.goals_for,
            Stat::GoalsAgainst => self.goals_against,
        }
    }

    pub(crate) fn stat_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::RoundsPlayed => &mut self.rounds_played,
            Stat::Wins => &mut self.wins,
            Stat::Draws => &mut self.draws,
            Stat::Losses => &mut self.losses,
            Stat::GoalsFor => &mut self.goals_for,
            Stat::GoalsAgainst => &mut self.goals_against,
        }
    }
}
