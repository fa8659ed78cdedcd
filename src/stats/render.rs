//! Stats screen rendering: the stats view plus the achievement gallery.

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::catalog::AchievementKind;
use crate::state::GameState;

pub fn render(game: &GameState, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(30)])
        .split(area);

    render_numbers(game, f, columns[0]);
    render_achievements(game, f, columns[1]);
}

fn render_numbers(game: &GameState, f: &mut Frame, area: Rect) {
    let v = game.stats_view();
    let rows = [
        ("Focus sessions", v.total_sessions.to_string()),
        ("Focus minutes", game.total_focus_minutes.to_string()),
        ("Seeds planted", v.total_planted.to_string()),
        ("Herbs harvested", v.total_harvested.to_string()),
        ("Drinks brewed", v.total_brewed.to_string()),
        ("Richest purse", format!("{} coins", v.max_coins)),
        ("Unique recipes", v.unique_recipes.to_string()),
        ("Unique herbs", v.unique_herbs_harvested.to_string()),
    ];

    let mut lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    if v.full_garden_achieved {
        lines.push(Line::from(Span::styled(
            "The garden has been full!",
            Style::default().fg(Color::Magenta),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Stats "),
    );
    f.render_widget(widget, area);
}

fn render_achievements(game: &GameState, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for achievement in AchievementKind::all() {
        let unlocked = game.unlocked.contains(achievement);
        let (marker, name_style) = if unlocked {
            (
                Span::styled("[*] ", Style::default().fg(Color::Yellow)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Span::styled("[ ] ", Style::default().fg(Color::DarkGray)),
                Style::default().fg(Color::DarkGray),
            )
        };
        lines.push(Line::from(vec![
            marker,
            Span::styled(format!("{:<17}", achievement.name()), name_style),
            Span::styled(
                achievement.description(),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    let unlocked_count = game.unlocked.len();
    let title = format!(
        " Achievements {}/{} ",
        unlocked_count,
        AchievementKind::all().len()
    );
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(widget, area);
}
