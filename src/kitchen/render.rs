//! Kitchen screen rendering: ingredient shelf, brewed collection, the
//! recipe book, and brew progress.

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratzilla::ratatui::Frame;

use crate::catalog::{RecipeKind, SeedKind};
use crate::input::ClickState;
use crate::kitchen::logic::can_brew;
use crate::kitchen::state::{BrewStep, HEATING_TICKS, INGREDIENT_TICKS};
use crate::state::GameState;
use crate::widgets::{hint, ClickableList};

use super::{ACT_CANCEL, RECIPE_BASE};

pub fn render(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(area);

    render_pantry(game, f, columns[0]);
    render_recipe_book(game, f, columns[1], cs);
}

fn render_pantry(game: &GameState, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Ingredients",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if game.herbs.is_empty() {
        lines.push(Line::from(Span::styled(
            "No herbs yet! Harvest some.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for seed in SeedKind::all() {
        if let Some(count) = game.herbs.get(seed) {
            lines.push(Line::from(Span::styled(
                format!("{:<11} x{}", seed.name(), count),
                Style::default().fg(Color::Green),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Brewed Collection",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if game.drinks.values().all(|count| *count == 0) {
        lines.push(Line::from(Span::styled(
            "No drinks brewed yet!",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (recipe, count) in &game.drinks {
        if *count > 0 {
            lines.push(Line::from(Span::styled(
                format!("{:<15} x{}", recipe.name(), count),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Pantry "),
    );
    f.render_widget(widget, area);
}

fn render_recipe_book(game: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let (book_area, brew_area) = if game.brew.is_some() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(4)])
            .split(area);
        (rows[0], Some(rows[1]))
    } else {
        (area, None)
    };

    let mut cl = ClickableList::new();
    for (i, recipe) in RecipeKind::all().iter().enumerate() {
        let brewable = can_brew(*recipe, &game.herbs);
        let ingredients = recipe
            .ingredients()
            .iter()
            .map(|(seed, amount)| format!("{} x{}", seed.name(), amount))
            .collect::<Vec<_>>()
            .join(", ");
        let name_style = if brewable {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            crate::widgets::key_span(char::from(b'a' + i as u8)),
            Span::styled(format!(" {:<15}", recipe.name()), name_style),
            Span::styled(
                format!("{:<18}", recipe.effect()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(ingredients, Style::default().fg(Color::Gray)),
        ]);
        cl.push_clickable(line, RECIPE_BASE + i as u16);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Recipe Book ");
    let inner = block.inner(book_area);
    cl.register_targets(book_area, cs, 1);
    let widget = Paragraph::new(cl.into_lines());
    f.render_widget(block, book_area);
    f.render_widget(widget, inner);

    if let (Some(brew_area), Some(process)) = (brew_area, &game.brew) {
        render_brew_progress(process, f, brew_area, cs);
    }
}

fn render_brew_progress(
    process: &crate::kitchen::state::BrewProcess,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Brewing {} ", process.recipe.name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    // Overall progress: finished steps plus the fraction of the current one.
    let step_ticks = match process.step {
        BrewStep::Ingredient(_) => INGREDIENT_TICKS,
        BrewStep::Heating => HEATING_TICKS,
    };
    let step_done = 1.0 - process.ticks_left as f64 / step_ticks as f64;
    let ratio = ((process.step_index() as f64 + step_done) / process.total_steps() as f64)
        .clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
        .ratio(ratio)
        .label(process.step_label());
    f.render_widget(gauge, rows[0]);

    let mut cancel = ClickableList::new();
    cancel.push_clickable(Line::from(hint('x', "Cancel brew")), ACT_CANCEL);
    cancel.render(f, rows[1], cs, 0);
}
