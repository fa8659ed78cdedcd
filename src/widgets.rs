//! Reusable clickable UI components.
//!
//! Components here co-locate rendering with click-target registration so a
//! screen cannot draw a button without also making it tappable.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// Styled `[K]` key hint.
pub fn key_span(key: char) -> Span<'static> {
    Span::styled(
        format!("[{}]", key.to_ascii_uppercase()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

/// A one-line `[K] label` hint.
pub fn hint(key: char, label: &str) -> Vec<Span<'static>> {
    vec![
        key_span(key),
        Span::styled(format!(" {}", label), Style::default().fg(Color::Gray)),
    ]
}

// ── TabBar ─────────────────────────────────────────────────────

/// A single-row horizontal tab bar. Labels are ASCII, so display width is
/// just the character count; each tab's click target covers its label plus
/// the separator to its right.
pub struct TabBar<'a> {
    tabs: Vec<(&'a str, u16)>,
    active: usize,
}

impl<'a> TabBar<'a> {
    pub fn new(active: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active,
        }
    }

    pub fn tab(mut self, label: &'a str, action_id: u16) -> Self {
        self.tabs.push((label, action_id));
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let mut x = area.x;

        for (i, (label, action_id)) in self.tabs.iter().enumerate() {
            let padded = format!(" {} ", label);
            let width = padded.chars().count() as u16 + 1; // label + separator
            let style = if i == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

            cs.add(
                Rect::new(x, area.y, width.min((area.x + area.width).saturating_sub(x)), area.height.max(1)),
                *action_id,
            );
            x = x.saturating_add(width);
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Pairs rendered [`Line`]s with click actions so row offsets never need to
/// be hand-counted: a line's target lands on whatever row it renders at.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line bound to a semantic action id.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Render inside `area` (no wrapping) and register targets for every
    /// clickable row still visible. `top_offset` accounts for a border row.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState, top_offset: u16) {
        let content_end = area.y + area.height;
        for &(line_idx, action_id) in &self.actions {
            let row = area.y + top_offset + line_idx;
            if row < content_end.saturating_sub(top_offset.min(1)) {
                cs.add_row(area, row, action_id);
            }
        }
        f.render_widget(Paragraph::new(self.lines), area);
    }

    /// Consume the builder, returning the lines (for callers that render
    /// through their own block widget).
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets without rendering; mirror of the row math in
    /// [`render`](Self::render) for block-wrapped callers.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top_offset: u16) {
        let content_end = area.y + area.height;
        for &(line_idx, action_id) in &self.actions {
            let row = area.y + top_offset + line_idx;
            if row < content_end.saturating_sub(top_offset.min(1)) {
                cs.add_row(area, row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_land_where_rendered() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push_clickable(Line::from("item 1"), 11);

        let area = Rect::new(0, 5, 40, 8);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1);

        // header at row 6 is not clickable; items at rows 7 and 8 are.
        assert_eq!(cs.find(3, 6), None);
        assert_eq!(cs.find(3, 7), Some(10));
        assert_eq!(cs.find(3, 8), Some(11));
    }

    #[test]
    fn rows_outside_area_are_clipped() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("item {i}")), 50 + i as u16);
        }

        let area = Rect::new(0, 0, 40, 4);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1);

        assert_eq!(cs.find(3, 1), Some(50));
        assert_eq!(cs.find(3, 2), Some(51));
        assert_eq!(cs.find(3, 4), None);
    }

    #[test]
    fn inserted_header_shifts_targets() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header 1"));
        cl.push(Line::from("header 2"));
        cl.push_clickable(Line::from("buy"), 42);

        let area = Rect::new(0, 0, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1);

        assert_eq!(cs.find(3, 3), Some(42));
        assert_eq!(cs.find(3, 2), None);
    }

    #[test]
    fn hint_starts_with_key_marker() {
        let spans = hint('t', "Till");
        assert_eq!(spans[0].content.as_ref(), "[T]");
        assert_eq!(spans[1].content.as_ref(), " Till");
    }
}
