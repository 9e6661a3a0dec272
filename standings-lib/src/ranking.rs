//! Ranking of teams by their statistics.
//!
//! Everything here is pure: inputs are only borrowed, and the same input always produces the
//! same order. Points and goal difference are derived on every call and never stored.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{TableState, Team};

/// Number of positions highlighted as the podium
pub const PODIUM_SIZE: usize = 3;

/// Points awarded per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub win: u32,
    pub draw: u32,
}

impl Scoring {
    /// Six points a win, one a draw. The tournament's own scheme and the default.
    pub const TOURNAMENT: Self = Self::new(6, 1);
    /// Three points a win, one a draw.
    pub const FOOTBALL: Self = Self::new(3, 1);

    pub const fn new(win: u32, draw: u32) -> Self {
        Self { win, draw }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::TOURNAMENT
    }
}

/// A ranked row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based position in the displayed order
    pub position: usize,
    pub team: Team,
    pub points: i128,
    pub goal_diff: i64,
}

impl Standing {
    pub fn is_leader(&self) -> bool {
        self.position == 1
    }

    pub fn is_podium(&self) -> bool {
        self.position <= PODIUM_SIZE
    }
}

/// Wide enough that maximal counters and scoring can't overflow.
pub fn points(team: &Team, scoring: Scoring) -> i128 {
    i128::from(team.wins) * i128::from(scoring.win) + i128::from(team.draws) * i128::from(scoring.draw)
}

pub fn goal_diff(team: &Team) -> i64 {
    i64::from(team.goals_for) - i64::from(team.goals_against)
}

/// Total order used when sorting automatically.
///
/// Descending points, goal difference, goals scored and wins, then ascending name. Only teams
/// sharing an identical name and identical numbers compare equal.
pub fn compare(a: &Team, b: &Team, scoring: Scoring) -> Ordering {
    points(b, scoring)
        .cmp(&points(a, scoring))
        .then_with(|| goal_diff(b).cmp(&goal_diff(a)))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.name.cmp(&b.name))
}

/// Orders `teams` for display.
///
/// With `auto_sort` off the insertion order is returned unchanged.
pub fn rank(teams: &[Team], auto_sort: bool, scoring: Scoring) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();

    if auto_sort {
        ranked.sort_by(|a, b| compare(a, b, scoring));
    }

    ranked
}

/// Ranks the table and derives the per-row metrics.
pub fn standings(state: &TableState, scoring: Scoring) -> Vec<Standing> {
    rank(&state.entities, state.auto_sort, scoring)
        .into_iter()
        .enumerate()
        .map(|(i, team)| Standing {
            position: i.saturating_add(1),
            team: team.clone(),
            points: points(team, scoring),
            goal_diff: goal_diff(team),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::model::TeamId;

    fn team(id: &str, name: &str, wins: u32, draws: u32, gf: u32, ga: u32) -> Team {
        Team {
            wins,
            draws,
            goals_for: gf,
            goals_against: ga,
            ..Team::new(TeamId::from(id), name)
        }
    }

    fn names<'a>(ranked: &[&'a Team]) -> Vec<&'a str> {
        ranked.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_points_use_scoring() {
        let t = team("1", "A", 4, 2, 0, 0);

        assert_eq!(points(&t, Scoring::TOURNAMENT), 26);
        assert_eq!(points(&t, Scoring::FOOTBALL), 14);
    }

    #[test]
    fn test_goal_diff_can_be_negative() {
        let t = team("1", "A", 0, 0, 2, 7);

        assert_eq!(goal_diff(&t), -5);
    }

    #[test]
    fn test_points_first() {
        let teams = vec![team("1", "Low", 1, 0, 50, 0), team("2", "High", 2, 0, 0, 10)];

        let ranked = rank(&teams, true, Scoring::default());

        assert_eq!(names(&ranked), ["High", "Low"]);
    }

    #[test]
    fn test_goals_for_breaks_tie() {
        let a = team("1", "A", 5, 0, 10, 2);
        let b = team("2", "B", 5, 0, 8, 0);
        let teams = vec![b.clone(), a.clone()];

        assert_eq!(points(&a, Scoring::TOURNAMENT), 30);
        assert_eq!(points(&b, Scoring::TOURNAMENT), 30);
        assert_eq!(goal_diff(&a), goal_diff(&b));

        let ranked = rank(&teams, true, Scoring::TOURNAMENT);

        assert_eq!(names(&ranked), ["A", "B"]);
    }

    #[test]
    fn test_wins_break_tie() {
        // 2 wins + 0 draws and 1 win + 3 draws both give 6 points with 3/1 scoring
        let teams = vec![team("1", "Drawer", 1, 3, 4, 4), team("2", "Winner", 2, 0, 4, 4)];

        let ranked = rank(&teams, true, Scoring::FOOTBALL);

        assert_eq!(names(&ranked), ["Winner", "Drawer"]);
    }

    #[test]
    fn test_full_tie_falls_back_to_name() {
        let teams = vec![team("1", "Zeta", 1, 1, 3, 3), team("2", "Alpha", 1, 1, 3, 3)];

        let ranked = rank(&teams, true, Scoring::default());

        assert_eq!(names(&ranked), ["Alpha", "Zeta"]);
    }

    #[test]
    fn test_manual_order_is_untouched() {
        let teams = vec![
            team("1", "Last", 0, 0, 0, 9),
            team("2", "First", 9, 0, 9, 0),
            team("3", "Middle", 3, 0, 3, 3),
        ];

        let ranked = rank(&teams, false, Scoring::default());

        assert_eq!(names(&ranked), ["Last", "First", "Middle"]);
    }

    #[test]
    fn test_rank_does_not_touch_input() {
        let teams = vec![team("1", "B", 0, 0, 0, 0), team("2", "A", 1, 0, 0, 0)];
        let before = teams.clone();

        let _ = rank(&teams, true, Scoring::default());

        assert_eq!(teams, before);
    }

    #[test]
    fn test_standings_rows() {
        let mut state = TableState::default_snapshot();
        state.entities = vec![team("1", "B", 1, 0, 2, 1), team("2", "A", 3, 1, 5, 0)];

        let rows = standings(&state, Scoring::TOURNAMENT);

        let leader = rows.first().unwrap();
        assert_eq!(leader.team.name, "A");
        assert_eq!(leader.position, 1);
        assert_eq!(leader.points, 19);
        assert_eq!(leader.goal_diff, 5);
        assert!(leader.is_leader());

        let second = rows.get(1).unwrap();
        assert_eq!(second.position, 2);
        assert!(second.is_podium());
        assert!(!second.is_leader());
    }

    #[test]
    fn test_extreme_counters() {
        let max = Scoring::new(u32::MAX, u32::MAX);
        let top = team("1", "Top", u32::MAX, u32::MAX, u32::MAX, 0);
        let next = team("2", "Next", u32::MAX, u32::MAX - 1, 0, u32::MAX);

        let expected = 2 * i128::from(u32::MAX) * i128::from(u32::MAX);
        assert_eq!(points(&top, max), expected);
        assert_eq!(goal_diff(&top), i64::from(u32::MAX));
        assert_eq!(goal_diff(&next), -i64::from(u32::MAX));

        let teams = vec![next.clone(), top.clone()];
        assert_eq!(names(&rank(&teams, true, max)), ["Top", "Next"]);

        let mut state = TableState::default_snapshot();
        state.entities = teams;
        let rows = standings(&state, max);
        assert_eq!(rows.first().unwrap().points, expected);
    }

    #[test]
    fn test_scoring_fills_missing_fields() {
        let scoring: Scoring = serde_json::from_str(r#"{"win":3}"#).unwrap();

        assert_eq!(scoring, Scoring::new(3, 1));
    }

    fn arb_teams() -> impl Strategy<Value = Vec<Team>> {
        prop::collection::vec(
            ("[A-Za-z]{0,4}", 0u32..6, 0u32..6, 0u32..12, 0u32..12),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, w, d, gf, ga))| team(&i.to_string(), &name, w, d, gf, ga))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_rank_is_a_permutation(teams in arb_teams(), auto in any::<bool>()) {
            let ranked = rank(&teams, auto, Scoring::default());

            let mut ids_in: Vec<&TeamId> = teams.iter().map(|t| &t.id).collect();
            let mut ids_out: Vec<&TeamId> = ranked.iter().map(|t| &t.id).collect();
            ids_in.sort();
            ids_out.sort();

            prop_assert_eq!(ids_in, ids_out);
        }

        #[test]
        fn test_rank_is_deterministic(teams in arb_teams()) {
            let first: Vec<&TeamId> = rank(&teams, true, Scoring::FOOTBALL).into_iter().map(|t| &t.id).collect();
            let second: Vec<&TeamId> = rank(&teams, true, Scoring::FOOTBALL).into_iter().map(|t| &t.id).collect();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_rank_respects_compare(teams in arb_teams()) {
            let ranked = rank(&teams, true, Scoring::default());

            for pair in ranked.windows(2) {
                if let [a, b] = pair {
                    prop_assert_ne!(compare(a, b, Scoring::default()), Ordering::Greater);
                }
            }
        }

        #[test]
        fn test_order_ignores_input_order(teams in arb_teams()) {
            let mut reversed = teams.clone();
            reversed.reverse();

            let forward: Vec<(i128, i64, u32, u32, &str)> = rank(&teams, true, Scoring::default())
                .into_iter()
                .map(|t| (points(t, Scoring::default()), goal_diff(t), t.goals_for, t.wins, t.name.as_str()))
                .collect();
            let backward: Vec<(i128, i64, u32, u32, &str)> = rank(&reversed, true, Scoring::default())
                .into_iter()
                .map(|t| (points(t, Scoring::default()), goal_diff(t), t.goals_for, t.wins, t.name.as_str()))
                .collect();

            prop_assert_eq!(forward, backward);
        }
    }
}
