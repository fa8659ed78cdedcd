//! Brew & Bloom: a gamified focus timer that grows in a browser terminal.
//!
//! Complete focus sessions to earn coins, buy seeds, work the garden,
//! harvest herbs, and brew drinks that sweeten the next session's reward.
//! Runs as WASM inside a DOM terminal; all progress lives in localStorage.

mod app;
mod catalog;
mod clock;
mod garden;
mod input;
mod kitchen;
mod save;
mod settings;
mod shop;
mod state;
mod stats;
mod timer;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use app::App;
use clock::FrameClock;
use input::{ClickState, InputEvent};
use save::SessionStore;

/// Wall-clock milliseconds for the frame clock. A missing Performance API
/// freezes the clock rather than crashing; input still works.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Map a mouse event's page pixels to a terminal cell via the DOM grid
/// container's bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend renders the grid into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    input::pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(App::new(SessionStore::open())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let frame_clock = Rc::new(RefCell::new(FrameClock::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Keyboard
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c.to_ascii_lowercase()),
                KeyCode::Up => InputEvent::Up,
                KeyCode::Down => InputEvent::Down,
                KeyCode::Left => InputEvent::Left,
                KeyCode::Right => InputEvent::Right,
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Esc => InputEvent::Esc,
                KeyCode::Tab => InputEvent::Tab,
                _ => return,
            };
            app.borrow_mut().handle_input(&event);
        }
    });

    // Mouse / touch
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action_id = {
                let cs = click_state.borrow();
                if cs.terminal_cols == 0 || cs.terminal_rows == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.find(col, row))
            };

            if let Some(id) = action_id {
                app.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Render loop: convert frame time into engine ticks, then draw.
    terminal.draw_web({
        let app = app.clone();
        let click_state = click_state.clone();
        let frame_clock = frame_clock.clone();
        move |f| {
            let ticks = frame_clock.borrow_mut().update(now_ms());
            let mut app = app.borrow_mut();
            app.tick(ticks);

            let mut cs = click_state.borrow_mut();
            app.render(f, &mut cs);
        }
    });

    Ok(())
}
