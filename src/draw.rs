use chrono::{Local, NaiveDate};
use log::error;
use std::time::Instant;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::game_row::game_row;
use crate::components::score_card::{CARD_HEIGHT, CARD_MIN_WIDTH, ScoreCard};
use crate::state::app_state::PageState;
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use lacrosse_api::Game;
use lacrosse_api::views::{DateGroup, TodayView};

static TABS: &[&str; 3] = &["Scores", "Schedule", "Results"];

const SEASON_HINT: &str = "The NCAA D1 season typically runs February through May.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let now = Instant::now();

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Scores => draw_scores(f, layout.main, &mut app.state.today, now),
            MenuItem::Schedule => draw_date_groups(
                f,
                layout.main,
                " Schedule ",
                "Upcoming NCAA D1 Men's Lacrosse",
                &mut app.state.schedule,
                "No upcoming games found",
            ),
            MenuItem::Results => draw_date_groups(
                f,
                layout.main,
                " Results ",
                "NCAA D1 Men's Lacrosse scores",
                &mut app.state.results,
                "No results yet",
            ),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Scores => 0,
        MenuItem::Schedule => 1,
        MenuItem::Results => 2,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Schedule => 1,
            MenuItem::Results => 2,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new(format!("{} · Help: ? ", app.state.provider_name))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

fn draw_scores(f: &mut Frame, area: Rect, page: &mut PageState<TodayView>, now: Instant) {
    let block = default_border(Color::White).title(" Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = page.data.as_ref() else {
        draw_placeholder(f, inner, "Loading today's games…", None);
        return;
    };

    let [header, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let mut header_spans = vec![Span::styled(
        format_day(Local::now().date_naive()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if view.has_live()
        && let Some(label) = page.updated_label(now)
    {
        header_spans.push(Span::raw("  "));
        header_spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(header_spans)), header);

    if view.is_empty() {
        draw_placeholder(
            f,
            body,
            "No games today",
            Some("Check the Schedule tab for upcoming games."),
        );
        return;
    }

    let columns = (body.width / CARD_MIN_WIDTH).clamp(1, 4) as usize;

    // Flatten into rows: one heading row per section, then rows of cards.
    let mut rows: Vec<ScoreRow> = Vec::new();
    for (section, games) in view.sections() {
        rows.push(ScoreRow::Heading(format!("{} ({})", section.label(), games.len())));
        rows.extend(games.chunks(columns).map(ScoreRow::Cards));
    }

    let heights: Vec<u16> = rows.iter().map(ScoreRow::height).collect();
    page.scroll_offset = page.scroll_offset.min(max_scroll(&heights, body.height));

    let mut y = body.y;
    let bottom = body.y + body.height;
    for row in rows.into_iter().skip(page.scroll_offset as usize) {
        let height = row.height();
        if y + height > bottom {
            break;
        }
        match row {
            ScoreRow::Heading(label) => {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        label,
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )),
                    Rect::new(body.x, y, body.width, 1),
                );
            }
            ScoreRow::Cards(games) => {
                let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                    .split(Rect::new(body.x, y, body.width, CARD_HEIGHT));
                for (game, cell) in games.iter().zip(cells.iter()) {
                    f.render_widget(ScoreCard { game }, *cell);
                }
            }
        }
        y += height;
    }
}

enum ScoreRow<'a> {
    Heading(String),
    Cards(&'a [Game]),
}

impl ScoreRow<'_> {
    fn height(&self) -> u16 {
        match self {
            ScoreRow::Heading(_) => 1,
            ScoreRow::Cards(_) => CARD_HEIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule / Results
// ---------------------------------------------------------------------------

fn draw_date_groups(
    f: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    page: &mut PageState<Vec<DateGroup>>,
    empty_message: &str,
) {
    let block = default_border(Color::White).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(Span::styled(subtitle.to_string(), Style::default().fg(Color::DarkGray))),
        header,
    );

    let Some(groups) = page.data.as_deref() else {
        draw_placeholder(f, body, "Loading…", None);
        return;
    };
    if groups.is_empty() {
        draw_placeholder(f, body, empty_message, Some(SEASON_HINT));
        return;
    }

    let lines = group_lines(groups);
    let max = lines.len().saturating_sub(body.height as usize);
    page.scroll_offset = page.scroll_offset.min(u16::try_from(max).unwrap_or(u16::MAX));

    f.render_widget(Paragraph::new(lines).scroll((page.scroll_offset, 0)), body);
}

/// Largest offset that still fills the viewport: rows past it would leave
/// blank space below the last one.
fn max_scroll(heights: &[u16], viewport: u16) -> u16 {
    let mut used: u16 = 0;
    let mut tail = 0;
    for height in heights.iter().rev() {
        if used.saturating_add(*height) > viewport {
            break;
        }
        used += height;
        tail += 1;
    }
    let max = heights.len().saturating_sub(tail.max(1));
    u16::try_from(max).unwrap_or(u16::MAX)
}

fn group_lines(groups: &[DateGroup]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(Line::from(Span::styled(
            format_day(group.date),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.extend(group.games.iter().map(game_row));
        lines.push(Line::default());
    }
    lines
}

/// "Saturday, March 7"
fn format_day(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

// ---------------------------------------------------------------------------
// Help, logs, shared bits
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bindings = [
        ("1 / 2 / 3", "Scores / Schedule / Results"),
        ("j k ↓ ↑", "Scroll"),
        ("r", "Reload the current tab"),
        ("f", "Toggle full screen"),
        ("\"", "Toggle log pane"),
        ("Esc", "Close help"),
        ("q / Ctrl-C", "Quit"),
    ];
    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray))
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str, hint: Option<&str>) {
    let mut lines = vec![Line::from(msg.to_string())];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading {
        return;
    }
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::White));
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(2), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
