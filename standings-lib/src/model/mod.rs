//! The league table data model.
//!
//! [`TableState`] is the unit that gets persisted. It is treated as an immutable value: every
//! change builds a new [`TableState`] from the previous one instead of patching it in place, so a
//! value handed out to a reader never changes underneath it.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

mod team;
mod team_id;

pub use team::{Stat, Team};
pub use team_id::TeamId;

pub const DEFAULT_TITLE: &str = "Torneio Phoenix de Rocket League";
pub const DEFAULT_SUBTITLE: &str = "EDIÇÃO TWITCH TV";
pub const DEFAULT_TEAM_COUNT: usize = 8;

static DEFAULT_SNAPSHOT: LazyLock<TableState> = LazyLock::new(|| TableState {
    entities: (1..=DEFAULT_TEAM_COUNT)
        .map(|i| Team::new(TeamId::from(i.to_string()), &format!("Participante {i}")))
        .collect(),
    title: DEFAULT_TITLE.to_string(),
    subtitle: DEFAULT_SUBTITLE.to_string(),
    auto_sort: true,
});

/// The whole league table: roster plus display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Teams in insertion order, which is also the manual display order
    pub entities: Vec<Team>,
    pub title: String,
    pub subtitle: String,
    /// Rank by statistics when set, otherwise show `entities` as they are
    pub auto_sort: bool,
}

/// Which way to shift a team in the manual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl TableState {
    /// A fresh copy of the built-in table used on first start and on reset.
    pub fn default_snapshot() -> Self {
        DEFAULT_SNAPSHOT.clone()
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.entities.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TeamId) -> bool {
        self.team(id).is_some()
    }

    /// Appends `team` to the end of the manual order.
    pub fn with_team_added(&self, team: Team) -> Self {
        let mut next = self.clone();
        next.entities.push(team);
        next
    }

    pub fn with_team_removed(&self, id: &TeamId) -> Self {
        Self {
            entities: self
                .entities
                .iter()
                .filter(|t| &t.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Swaps a team with its neighbour in the manual order. Moving past either end is a no-op.
    pub fn with_team_moved(&self, id: &TeamId, direction: Direction) -> Self {
        let mut next = self.clone();
        let Some(from) = next.entities.iter().position(|t| &t.id == id) else {
            return next;
        };

        let to = match direction {
            Direction::Up => from.checked_sub(1),
            Direction::Down => from.checked_add(1).filter(|i| *i < next.entities.len()),
        };

        if let Some(to) = to {
            next.entities.swap(from, to);
        }

        next
    }

    pub fn with_title(&self, title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..self.clone()
        }
    }

    pub fn with_subtitle(&self, subtitle: &str) -> Self {
        Self {
            subtitle: subtitle.to_string(),
            ..self.clone()
        }
    }

    pub fn with_auto_sort(&self, auto_sort: bool) -> Self {
        Self {
            auto_sort,
            ..self.clone()
        }
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::default_snapshot()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(state: &TableState) -> Vec<&str> {
        state.entities.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_default_snapshot() {
        let state = TableState::default_snapshot();

        assert_eq!(state.entities.len(), DEFAULT_TEAM_COUNT);
        assert_eq!(state.title, DEFAULT_TITLE);
        assert!(state.auto_sort);
    }

    #[test]
    fn test_reset_target_is_not_aliased() {
        let mut edited = TableState::default_snapshot();
        edited.entities.clear();
        edited.title = "Changed".into();

        let fresh = TableState::default_snapshot();

        assert_eq!(fresh.entities.len(), DEFAULT_TEAM_COUNT);
        assert_eq!(fresh.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_with_team_added_keeps_original() {
        let state = TableState::default_snapshot();
        let next = state.with_team_added(Team::new(TeamId::from("new"), "Newcomer"));

        assert_eq!(state.entities.len(), DEFAULT_TEAM_COUNT);
        assert_eq!(next.entities.len(), DEFAULT_TEAM_COUNT + 1);
        assert_eq!(next.entities.last().unwrap().name, "Newcomer");
    }

    #[test]
    fn test_with_team_removed() {
        let state = TableState::default_snapshot();
        let next = state.with_team_removed(&TeamId::from("1"));

        assert!(!next.contains(&TeamId::from("1")));
        assert_eq!(next.entities.len(), DEFAULT_TEAM_COUNT - 1);
        assert!(state.contains(&TeamId::from("1")));
    }

    #[test]
    fn test_with_team_moved() {
        let state = TableState::default_snapshot();

        let down = state.with_team_moved(&TeamId::from("1"), Direction::Down);
        let top: Vec<&str> = names(&down).into_iter().take(2).collect();
        assert_eq!(top, ["Participante 2", "Participante 1"]);

        let up = down.with_team_moved(&TeamId::from("1"), Direction::Up);
        assert_eq!(names(&up), names(&state));
    }

    #[test]
    fn test_with_team_moved_at_edges_is_noop() {
        let state = TableState::default_snapshot();

        assert_eq!(state.with_team_moved(&TeamId::from("1"), Direction::Up), state);
        assert_eq!(
            state.with_team_moved(&TeamId::from("8"), Direction::Down),
            state
        );
        assert_eq!(
            state.with_team_moved(&TeamId::from("missing"), Direction::Up),
            state
        );
    }

    #[test]
    fn test_round_trip() {
        let mut state = TableState::default_snapshot()
            .with_title("Liga")
            .with_subtitle("2026")
            .with_auto_sort(false);
        if let Some(team) = state.entities.first_mut() {
            team.wins = 3;
            team.goals_for = 9;
            team.photo = Some("data:image/png;base64,AAAA".into());
        }

        let json = serde_json::to_string(&state).unwrap();
        let back: TableState = serde_json::from_str(&json).unwrap();

        assert_eq!(back, state);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(TableState::default_snapshot()).unwrap();

        assert!(json["entities"].is_array());
        assert_eq!(json["autoSort"], true);
        assert_eq!(json["subtitle"], DEFAULT_SUBTITLE);
    }
}
