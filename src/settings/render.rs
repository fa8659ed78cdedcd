//! Settings screen rendering.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::state::GameState;
use crate::widgets::ClickableList;

use super::{ACT_AUTO_START, ACT_BREAK, ACT_FOCUS, ACT_SOUND};

pub fn render(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let s = &game.settings;
    let mut cl = ClickableList::new();

    let row = |key: char, label: &str, value: String| {
        Line::from(vec![
            crate::widgets::key_span(key),
            Span::styled(format!(" {:<24}", label), Style::default().fg(Color::Gray)),
            Span::styled(
                value,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };

    cl.push_clickable(
        row(
            'f',
            "Focus duration",
            format!("{} minutes", s.focus_length),
        ),
        ACT_FOCUS,
    );
    cl.push_clickable(
        row(
            'b',
            "Break duration",
            format!("{} minutes", s.break_length),
        ),
        ACT_BREAK,
    );
    cl.push_clickable(
        row(
            's',
            "Sound on completion",
            String::from(if s.sound_enabled { "ON" } else { "OFF" }),
        ),
        ACT_SOUND,
    );
    cl.push_clickable(
        row(
            'a',
            "Auto-start next session",
            String::from(if s.auto_start { "ON" } else { "OFF" }),
        ),
        ACT_AUTO_START,
    );

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Length changes apply from the next reset or session.",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Settings ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, 1);
    let widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(widget, inner);
}
