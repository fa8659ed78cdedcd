//! Shop screen rendering: the seed table with prices and owned counts.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::catalog::SeedKind;
use crate::input::ClickState;
use crate::state::GameState;
use crate::widgets::ClickableList;

use super::SEED_BASE;

pub fn render(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        Span::styled(
            "Seed Shop",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} coins in the purse", game.coins),
            Style::default().fg(Color::Yellow),
        ),
    ]));
    cl.push(Line::from(""));

    for (i, seed) in SeedKind::all().iter().enumerate() {
        let affordable = game.coins >= seed.price();
        let owned = game.seeds.get(seed).copied().unwrap_or(0);
        let name_style = if affordable {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            crate::widgets::key_span(char::from(b'a' + i as u8)),
            Span::styled(format!(" {:<11}", seed.name()), name_style),
            Span::styled(format!("{:>3}c  ", seed.price()), Style::default().fg(Color::Yellow)),
            Span::styled(format!("owned x{:<3}", owned), Style::default().fg(Color::Gray)),
            Span::styled(seed.description(), Style::default().fg(Color::DarkGray)),
        ]);
        cl.push_clickable(line, SEED_BASE + i as u16);
    }

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Tap a seed or press its key to buy one.",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Shop ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, 1);
    let widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(widget, inner);
}
