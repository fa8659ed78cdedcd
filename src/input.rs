//! Shared input plumbing: normalized events, click targets, and the
//! pixel-to-cell mapping used by the mouse handler.
//!
//! Screens register rectangular click targets while rendering; the mouse
//! handler converts a DOM pixel position into a terminal cell, hit-tests the
//! registered targets, and re-injects the match as [`InputEvent::Click`]
//! with the target's semantic action id. Each screen owns a disjoint range
//! of action ids.

use ratzilla::ratatui::layout::Rect;

/// All input reaching the app, normalized from keyboard, mouse and touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A character key, lowercased.
    Key(char),
    /// A click/tap on a registered target, by semantic action id.
    Click(u16),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
}

/// A clickable region in terminal cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets for the current frame, shared between the render loop and
/// the mouse handler. Cleared and rebuilt every frame.
pub struct ClickState {
    targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn add(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width, one-row target at `row` inside `area`.
    pub fn add_row(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Hit-test a terminal cell. Later registrations win on overlap, so
    /// overlays naturally shadow whatever they cover.
    pub fn find(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Convert a pixel position inside the terminal's DOM container into a
/// terminal cell. Returns `None` outside the grid or for degenerate
/// geometry.
pub fn pixel_to_cell(
    px: f64,
    py: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if px < 0.0 || py < 0.0 {
        return None;
    }

    let col = (px / (grid_width / cols as f64)) as u16;
    let row = (py / (grid_height / rows as f64)) as u16;

    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_hits_inside_rect_only() {
        let mut cs = ClickState::new();
        cs.add(Rect::new(2, 1, 4, 2), 7);
        assert_eq!(cs.find(2, 1), Some(7));
        assert_eq!(cs.find(5, 2), Some(7));
        assert_eq!(cs.find(6, 1), None);
        assert_eq!(cs.find(2, 3), None);
        assert_eq!(cs.find(1, 1), None);
    }

    #[test]
    fn later_targets_shadow_earlier_ones() {
        let mut cs = ClickState::new();
        cs.add(Rect::new(0, 0, 10, 10), 1);
        cs.add(Rect::new(2, 2, 2, 2), 2);
        assert_eq!(cs.find(3, 3), Some(2));
        assert_eq!(cs.find(8, 8), Some(1));
    }

    #[test]
    fn add_row_clips_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(0, 5, 40, 3);
        cs.add_row(area, 6, 11);
        cs.add_row(area, 9, 12); // below the area, ignored
        assert_eq!(cs.find(10, 6), Some(11));
        assert_eq!(cs.find(10, 9), None);
    }

    #[test]
    fn clear_drops_all_targets() {
        let mut cs = ClickState::new();
        cs.add(Rect::new(0, 0, 5, 5), 1);
        cs.clear();
        assert_eq!(cs.find(1, 1), None);
    }

    #[test]
    fn pixel_mapping_basic() {
        // 800x400 px grid, 80x20 cells → 10x20 px per cell.
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 400.0, 80, 20), Some((0, 0)));
        assert_eq!(pixel_to_cell(15.0, 25.0, 800.0, 400.0, 80, 20), Some((1, 1)));
        assert_eq!(
            pixel_to_cell(799.0, 399.0, 800.0, 400.0, 80, 20),
            Some((79, 19))
        );
    }

    #[test]
    fn pixel_mapping_rejects_outside() {
        assert_eq!(pixel_to_cell(-1.0, 5.0, 800.0, 400.0, 80, 20), None);
        assert_eq!(pixel_to_cell(5.0, 401.0, 800.0, 400.0, 80, 20), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 0.0, 400.0, 80, 20), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 800.0, 400.0, 0, 20), None);
    }
}
