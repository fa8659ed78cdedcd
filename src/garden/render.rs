//! Garden screen rendering: the tile board plus a side panel with tile
//! info, seed counts, and the tool buttons.

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::state::GameState;
use crate::widgets::{hint, ClickableList};

use super::grid::{Garden, Tile, TileKind, GRID_H, GRID_W, MAX_STAGE};
use super::{
    GardenScreen, ACT_CLOSE_SEEDS, ACT_HARVEST, ACT_PLANT, ACT_TILL, ACT_WATER, SEED_BASE,
    TILE_BASE,
};
use crate::catalog::SeedKind;

pub fn render(
    screen: &GardenScreen,
    game: &GameState,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let board_width = (GRID_W as u16) * 2 + 2;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(24)])
        .split(area);

    render_board(screen, game, f, chunks[0], cs);
    if screen.seed_menu {
        render_seed_picker(game, f, chunks[1], cs);
    } else {
        render_side_panel(screen, game, f, chunks[1], cs);
    }
}

fn render_board(
    screen: &GardenScreen,
    game: &GameState,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Garden ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(GRID_H);
    for y in 0..GRID_H {
        let mut spans: Vec<Span> = Vec::with_capacity(GRID_W);
        for x in 0..GRID_W {
            let Some(tile) = game.garden.tile(x, y) else {
                continue;
            };
            spans.push(tile_span(tile, x, y, screen.cursor == (x, y)));
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines), inner);

    // Every tile is tappable: clicking moves the cursor there.
    for y in 0..GRID_H {
        for x in 0..GRID_W {
            if inner.y + (y as u16) < area.y + area.height {
                cs.add(
                    Rect::new(inner.x + (x as u16) * 2, inner.y + y as u16, 2, 1),
                    TILE_BASE + (y * GRID_W + x) as u16,
                );
            }
        }
    }
}

/// Two-character glyph for one tile.
fn tile_span(tile: &Tile, x: usize, y: usize, cursor: bool) -> Span<'static> {
    let (glyph, style) = if Garden::in_tree_area(x, y) {
        if (x, y) == (super::grid::TREE_CENTER.0, super::grid::TREE_CENTER.1 + 1) {
            ("||", Style::default().fg(Color::Yellow))
        } else {
            ("/\\", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        }
    } else if let Some(crop) = &tile.crop {
        let glyph = match crop.stage {
            0 => ". ",
            1 => ", ",
            2 => "y ",
            _ => "Y*",
        };
        let style = if crop.harvestable {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if crop.watered {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default().fg(Color::Green)
        };
        (glyph, style)
    } else {
        match tile.kind {
            TileKind::Grass if tile.flowers => ("*'", Style::default().fg(Color::Magenta)),
            TileKind::Grass => ("''", Style::default().fg(Color::Green)),
            TileKind::Path => ("░░", Style::default().fg(Color::DarkGray)),
            TileKind::Tilled => ("==", Style::default().fg(Color::Yellow)),
            TileKind::TilledWatered => ("==", Style::default().fg(Color::Blue)),
        }
    };

    let style = if cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };
    Span::styled(glyph, style)
}

fn render_side_panel(
    screen: &GardenScreen,
    game: &GameState,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!("Tile ({}, {})", screen.cursor.0, screen.cursor.1),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(describe_tile(game, screen.cursor)));
    cl.push(Line::from(""));

    cl.push_clickable(Line::from(hint('t', "Till soil")), ACT_TILL);
    cl.push_clickable(Line::from(hint('p', "Plant a seed")), ACT_PLANT);
    cl.push_clickable(Line::from(hint('w', "Water")), ACT_WATER);
    cl.push_clickable(Line::from(hint('h', "Harvest")), ACT_HARVEST);
    cl.push(Line::from(""));

    cl.push(Line::from(Span::styled(
        "Seeds",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for seed in SeedKind::all() {
        let count = game.seeds.get(seed).copied().unwrap_or(0);
        let style = if count > 0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push(Line::from(Span::styled(
            format!("{:<11} x{}", seed.name(), count),
            style,
        )));
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Arrows move the cursor",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_area = block.inner(area);
    cl.register_targets(area, cs, 1);
    let lines_widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(lines_widget, inner_area);
}

fn describe_tile(game: &GameState, (x, y): (usize, usize)) -> Span<'static> {
    if Garden::in_tree_area(x, y) {
        return Span::styled("The old tree", Style::default().fg(Color::Green));
    }
    let Some(tile) = game.garden.tile(x, y) else {
        return Span::raw("");
    };
    if let Some(crop) = &tile.crop {
        let text = if crop.harvestable {
            format!("{} is ready to harvest!", crop.seed.name())
        } else if crop.watered {
            format!(
                "{} growing ({}/{})",
                crop.seed.name(),
                crop.stage,
                MAX_STAGE
            )
        } else {
            format!("{} needs water", crop.seed.name())
        };
        let color = if crop.harvestable {
            Color::Yellow
        } else {
            Color::LightGreen
        };
        return Span::styled(text, Style::default().fg(color));
    }
    let text = match tile.kind {
        TileKind::Grass if tile.flowers => "Flowering grass",
        TileKind::Grass => "Grass",
        TileKind::Path => "Garden path",
        TileKind::Tilled => "Tilled soil",
        TileKind::TilledWatered => "Watered soil",
    };
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn render_seed_picker(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Select seeds to plant",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    for (i, seed) in SeedKind::all().iter().enumerate() {
        let count = game.seeds.get(seed).copied().unwrap_or(0);
        let style = if count > 0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            crate::widgets::key_span(char::from(b'1' + i as u8)),
            Span::styled(format!(" {:<11} x{}", seed.name(), count), style),
        ]);
        cl.push_clickable(line, SEED_BASE + i as u16);
    }

    cl.push(Line::from(""));
    cl.push_clickable(Line::from(hint('q', "Cancel")), ACT_CLOSE_SEEDS);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Seed Bag ");
    let inner_area = block.inner(area);
    cl.register_targets(area, cs, 1);
    let lines_widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, area);
    f.render_widget(lines_widget, inner_area);
}
