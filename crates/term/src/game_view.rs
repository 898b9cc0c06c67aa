//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellState, ShapeKind, COLUMNS, ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal layout for the board and its side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells look roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_help: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            show_help: true,
        }
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Board frame size in terminal cells, border included.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            COLUMNS as u16 * self.cell_w + 2,
            ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the board frame for a viewport (centered, clamped at 0).
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, v) in cells.iter().enumerate() {
                let (ch, style) = cell_glyph(CellState::from_u8(*v).unwrap_or_default());
                let px = start_x + 1 + col as u16 * self.cell_w;
                let py = start_y + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.overlapping {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "STACK FULL");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
        fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
        fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
        fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "PIECE", label);
        fb.put_str(panel_x, y + 1, kind_label(snap.active.kind), value);
        y += 3;

        fb.put_str(panel_x, y, "LOCKED", label);
        fb.put_u32(panel_x, y + 1, snap.pieces_locked, value);
        y += 3;

        fb.put_str(panel_x, y, "SEED", label);
        fb.put_u32(panel_x, y + 1, snap.seed, value);
        y += 3;

        if self.show_help {
            let help = value.dim();
            for line in ["←/→ move", "↓ down", "↑ rotate", "r restart", "q quit"] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y += 1;
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, start_y + frame_h / 2, text, style);
    }
}

fn cell_glyph(state: CellState) -> (char, CellStyle) {
    match state {
        CellState::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
        CellState::Locked => ('█', CellStyle::new(Rgb::new(110, 130, 160), BOARD_BG)),
        CellState::Active => ('█', CellStyle::new(Rgb::new(240, 200, 80), BOARD_BG).bold()),
    }
}

fn kind_label(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Bar => "BAR",
        ShapeKind::Square => "SQUARE",
        ShapeKind::S => "S",
        ShapeKind::Z => "Z",
        ShapeKind::T => "T",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_differ_per_state() {
        let (e, _) = cell_glyph(CellState::Empty);
        let (l, ls) = cell_glyph(CellState::Locked);
        let (a, as_) = cell_glyph(CellState::Active);
        assert_ne!(e, l);
        assert_eq!(l, a);
        assert_ne!(ls, as_);
    }

    #[test]
    fn frame_fits_board_plus_border() {
        let view = GameView::default();
        assert_eq!(view.frame_size(), (22, 22));
        assert_eq!(view.frame_origin(Viewport::new(10, 10)), (0, 0));
        assert_eq!(view.frame_origin(Viewport::new(42, 24)), (10, 1));
    }
}
