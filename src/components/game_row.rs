use lacrosse_api::{Game, Team};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const TIME_WIDTH: usize = 12;

/// Single-line game for the Schedule and Results lists:
/// `time-or-Final  Away (rec) @ Home (rec)  score  · venue`.
pub fn game_row(game: &Game) -> Line<'static> {
    let result = game.is_final();
    let lead = if result {
        "Final".to_string()
    } else {
        game.time.clone().unwrap_or_else(|| "TBD".to_string())
    };

    let mut spans = vec![
        Span::styled(format!("{lead:<TIME_WIDTH$}"), Style::default().fg(Color::DarkGray)),
        team_span(&game.away, result && game.away_won()),
        Span::styled(" @ ", Style::default().fg(Color::DarkGray)),
        team_span(&game.home, result && game.home_won()),
    ];

    if result {
        spans.push(Span::raw("  "));
        spans.push(score_span(game.away_score, game.away_won()));
        spans.push(Span::raw("-"));
        spans.push(score_span(game.home_score, game.home_won()));
    }

    if let Some(venue) = &game.venue {
        spans.push(Span::styled(format!("  · {venue}"), Style::default().fg(Color::DarkGray)));
    }

    Line::from(spans)
}

fn team_span(team: &Team, won: bool) -> Span<'static> {
    let text = match &team.record {
        Some(record) => format!("{} ({record})", team.name),
        None => team.name.clone(),
    };
    if won {
        Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(text)
    }
}

fn score_span(score: u16, won: bool) -> Span<'static> {
    if won {
        Span::styled(score.to_string(), Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(score.to_string())
    }
}
