use colored::Colorize;
use standings_lib::{League, Standing, photo};

const NAME_WIDTH: usize = 24;

pub fn table(league: &League) {
    let state = league.state();

    println!("{}", state.title.bold());
    println!("{}", state.subtitle.to_uppercase().dimmed());
    println!(
        "{}",
        if state.auto_sort {
            "Automatic order"
        } else {
            "Manual order"
        }
        .dimmed()
    );
    println!();

    println!(
        "{}",
        format!(
            "{:>3}     {:<NAME_WIDTH$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            "Pos", "Team", "R", "V", "E", "D", "GM", "GS", "SG", "Pts"
        )
        .bold()
    );

    for row in league.standings() {
        let line = line(&row);
        let line = if row.is_leader() {
            line.yellow().bold()
        } else if row.is_podium() {
            line.green()
        } else {
            line.normal()
        };
        println!("{line}");
    }
}

fn line(row: &Standing) -> String {
    let team = &row.team;
    let badge = match &team.photo {
        Some(_) => "img".to_string(),
        None => format!("[{}]", photo::initial(&team.name)),
    };

    format!(
        "{:>3} {:>3} {:<NAME_WIDTH$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}",
        row.position,
        badge,
        truncate(&team.name, NAME_WIDTH),
        team.rounds_played,
        team.wins,
        team.draws,
        team.losses,
        team.goals_for,
        team.goals_against,
        row.goal_diff,
        row.points,
    )
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut cut: String = name.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod test {
    use standings_lib::{Team, TeamId};

    use super::*;

    fn standing(name: &str, photo: Option<&str>) -> Standing {
        let mut team = Team::new(TeamId::from("1"), name);
        team.photo = photo.map(str::to_string);
        team.goals_against = 2;
        Standing {
            position: 1,
            team,
            points: 0,
            goal_diff: -2,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Phoenix", 10), "Phoenix");
        assert_eq!(truncate("Phoenix Rising", 8), "Phoenix…");
        assert_eq!(truncate("ÁÉÍÓÚáéí", 4), "ÁÉÍ…");
    }

    #[test]
    fn test_line_shows_initial_without_photo() {
        let row = line(&standing("phoenix", None));

        assert!(row.contains("[P]"));
        assert!(row.contains("-2"));
    }

    #[test]
    fn test_line_marks_photo() {
        let row = line(&standing("Phoenix", Some("https://example.com/p.png")));

        assert!(row.contains("img"));
        assert!(!row.contains("[P]"));
    }
}
