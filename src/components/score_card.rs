use lacrosse_api::{Game, GameStatus, Team};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Border, status line, away row, home row, venue.
pub const CARD_HEIGHT: u16 = 6;
pub const CARD_MIN_WIDTH: u16 = 30;

/// One game on the Scores tab.
pub struct ScoreCard<'a> {
    pub game: &'a Game,
}

impl ScoreCard<'_> {
    fn status_line(&self) -> Line<'static> {
        let game = self.game;
        match game.status {
            GameStatus::Live => {
                let mut text = game.status.label().to_string();
                let detail: Vec<&str> =
                    [game.period.as_deref(), game.clock.as_deref()].into_iter().flatten().collect();
                if !detail.is_empty() {
                    text.push_str(" · ");
                    text.push_str(&detail.join(" "));
                }
                Line::from(Span::styled(
                    text,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
            }
            GameStatus::Final => {
                Line::from(Span::styled(game.status.label(), Style::default().fg(Color::Gray)))
            }
            GameStatus::Postponed => {
                Line::from(Span::styled(game.status.label(), Style::default().fg(Color::Yellow)))
            }
            GameStatus::Scheduled => Line::from(Span::styled(
                game.time.clone().unwrap_or_else(|| "TBD".to_string()),
                Style::default().fg(Color::Cyan),
            )),
        }
    }

    fn team_line(&self, team: &Team, score: u16, won: bool, width: u16) -> Line<'static> {
        let game = self.game;
        let show_score = game.is_live() || game.is_final();
        let style = if won {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut left = team.name.clone();
        if let Some(record) = &team.record {
            left.push_str(&format!(" ({record})"));
        }
        let right = if show_score { score.to_string() } else { String::new() };

        let width = width as usize;
        let room = width.saturating_sub(right.chars().count() + 1);
        let left = truncate(&left, room);
        let pad = width.saturating_sub(left.chars().count() + right.chars().count());

        Line::from(vec![
            Span::styled(left, style),
            Span::raw(" ".repeat(pad)),
            Span::styled(right, style),
        ])
    }
}

impl Widget for ScoreCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = self.game;
        let border = if game.is_live() { Color::Red } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", game.league));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            self.status_line(),
            self.team_line(&game.away, game.away_score, game.away_won(), inner.width),
            self.team_line(&game.home, game.home_score, game.home_won(), inner.width),
            Line::from(Span::styled(
                game.venue.clone().unwrap_or_default(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
