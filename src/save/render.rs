//! Data-management screen: export, import, and clearing the save.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::widgets::{hint, ClickableList};

use super::KEY_BACKUP;

// Action ids owned by this screen.
pub const ACT_EXPORT: u16 = 600;
pub const ACT_IMPORT: u16 = 601;
pub const ACT_CLEAR: u16 = 602;

pub fn render(f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        "Backups",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(Line::from(hint('e', "Export save to a backup")), ACT_EXPORT);
    cl.push_clickable(Line::from(hint('i', "Import save from a backup")), ACT_IMPORT);
    cl.push_clickable(Line::from(hint('c', "Clear all data")), ACT_CLEAR);
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(
            "Export writes one JSON document to the '{}' browser storage key",
            KEY_BACKUP
        ),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(Span::styled(
        "(and to the console). Import reads the same key back; a bundle",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(Span::styled(
        "that fails validation is rejected without touching your save.",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Clearing removes every save key and starts a fresh game.",
        Style::default().fg(Color::Red),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Data ");
    let inner = block.inner(area);
    cl.register_targets(area, cs, 1);
    let widget = Paragraph::new(cl.into_lines()).wrap(Wrap { trim: false });
    f.render_widget(block, area);
    f.render_widget(widget, inner);
}
