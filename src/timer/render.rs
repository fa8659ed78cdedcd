//! Timer screen rendering: mode badge, countdown, progress bar, controls,
//! and the drink picker.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratzilla::ratatui::Frame;

use crate::clock::ticks_to_secs_ceil;
use crate::input::ClickState;
use crate::state::GameState;
use crate::widgets::{hint, ClickableList};

use super::state::TimerMode;
use super::{
    owned_drinks, TimerScreen, ACT_CLOSE_DRINKS, ACT_DRINKS, ACT_RESET, ACT_SKIP, ACT_TOGGLE,
    DRINK_BASE,
};

/// Format remaining ticks as mm:ss.
pub fn format_remaining(ticks: u64) -> String {
    let secs = ticks_to_secs_ceil(ticks);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn render(
    screen: &TimerScreen,
    game: &GameState,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(area);

    render_countdown(game, f, chunks[0], cs);
    if screen.drink_menu {
        render_drink_picker(game, f, chunks[1], cs);
    } else {
        render_controls(game, f, chunks[1], cs);
    }
}

fn render_countdown(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let timer = &game.timer;
    let in_break = timer.mode == TimerMode::Break;

    let (badge, badge_color) = if in_break {
        (" Break Time ", Color::Blue)
    } else {
        (" Focus Time ", Color::Green)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(badge_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // badge
            Constraint::Length(1),
            Constraint::Length(1), // countdown
            Constraint::Length(1),
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(1), // status line
            Constraint::Min(0),
        ])
        .split(inner);

    let badge_line = Line::from(Span::styled(
        badge,
        Style::default()
            .fg(Color::Black)
            .bg(badge_color)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(badge_line).alignment(Alignment::Center),
        rows[0],
    );

    let remaining = timer.remaining_ticks(game.now_ticks);
    let time_line = Line::from(Span::styled(
        format_remaining(remaining),
        Style::default()
            .fg(badge_color)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(time_line).alignment(Alignment::Center),
        rows[2],
    );

    let total = timer.mode_length_ticks(&game.settings).max(1);
    let ratio = 1.0 - (remaining.min(total) as f64 / total as f64);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(badge_color).bg(Color::DarkGray))
        .ratio(ratio)
        .label("");
    f.render_widget(gauge, rows[4]);

    // The whole countdown panel toggles start/pause on tap.
    cs.add(area, ACT_TOGGLE);

    let mut status: Vec<Span> = Vec::new();
    if let Some((recipe, _)) = timer.effect_banner {
        status.push(Span::styled(
            format!("* {} *", recipe.effect()),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    } else if let Some(recipe) = timer.active_drink {
        status.push(Span::styled(
            format!("{} on the table ({})", recipe.name(), recipe.effect()),
            Style::default().fg(Color::Magenta),
        ));
    } else if !timer.is_running() {
        status.push(Span::styled(
            "Paused. Press space or tap to start",
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        rows[6],
    );
}

fn render_controls(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let timer = &game.timer;
    let mut cl = ClickableList::new();

    let toggle_label = if timer.is_running() { "Pause" } else { "Start" };
    let mut toggle_hint = hint(' ', toggle_label);
    toggle_hint[0] = Span::styled(
        "[SPACE]",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    cl.push_clickable(Line::from(toggle_hint), ACT_TOGGLE);
    cl.push_clickable(Line::from(hint('r', "Reset")), ACT_RESET);
    if timer.mode == TimerMode::Break {
        cl.push_clickable(Line::from(hint('s', "Skip break")), ACT_SKIP);
    }
    if !owned_drinks(game).is_empty() {
        cl.push_clickable(Line::from(hint('d', "Use a drink")), ACT_DRINKS);
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!("Sessions today: {}", timer.sessions_completed),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(Span::styled(
        format!("Focus total: {}m", game.total_focus_minutes),
        Style::default().fg(Color::Gray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Controls ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, 1);
    let widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(widget, inner);
}

fn render_drink_picker(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Drink with your next session:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    let drinks = owned_drinks(game);
    if drinks.is_empty() {
        cl.push(Line::from(Span::styled(
            "No drinks brewed yet!",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, (recipe, count)) in drinks.iter().enumerate() {
        let key = if i < 9 {
            crate::widgets::key_span(char::from(b'1' + i as u8))
        } else {
            Span::raw("   ")
        };
        let line = Line::from(vec![
            key,
            Span::styled(
                format!(" {} x{}  {}", recipe.name(), count, recipe.effect()),
                Style::default().fg(Color::Magenta),
            ),
        ]);
        cl.push_clickable(line, DRINK_BASE + i as u16);
    }

    cl.push(Line::from(""));
    cl.push_clickable(Line::from(hint('q', "Cancel")), ACT_CLOSE_DRINKS);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Drinks ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, 1);
    let widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(widget, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_formats_as_mm_ss() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(10), "00:01");
        assert_eq!(format_remaining(15_000), "25:00");
        assert_eq!(format_remaining(14_991), "25:00");
        assert_eq!(format_remaining(14_990), "24:59");
    }
}
