//! GameView: lays a [`GameSnapshot`] out on a framebuffer.
//!
//! Pure, no I/O.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{ParticleBurst, LINE_CLEAR_BURST};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const EMPTY: Style = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Board-cell to terminal-cell layout.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the cells in most fonts.
        Self { cell_w: 2 }
    }
}

/// Widest cell the view will draw.
pub const MAX_CELL_W: u16 = 8;

impl GameView {
    /// `cell_w` is clamped to `1..=MAX_CELL_W`.
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Draw a full frame into `fb`, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        bursts: &[ParticleBurst],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let well_w = (snap.width as u16).saturating_mul(self.cell_w);
        let well_h = snap.height as u16;
        let frame_w = well_w.saturating_add(2);
        let frame_h = well_h.saturating_add(2);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for y in 0..snap.height {
            for x in 0..snap.width {
                let (px, py) = self.cell_origin(origin_x, origin_y, x as u16, y as u16);
                match snap.cell_at(x as i32, y as i32) {
                    Some(color) => {
                        let style = Style::new(color.into(), WELL_BG).bold();
                        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
                    }
                    None => fb.fill_rect(px, py, self.cell_w, 1, '·', EMPTY),
                }
            }
        }

        for burst in bursts {
            if burst.x < 0 || burst.y < 0 {
                continue;
            }
            let (x, y) = (burst.x as usize, burst.y as usize);
            if x >= snap.width || y >= snap.height {
                continue;
            }
            let (px, py) = self.cell_origin(origin_x, origin_y, x as u16, y as u16);
            let ch = if burst.count >= LINE_CLEAR_BURST { '✦' } else { '+' };
            let style = Style::new(burst.color.into(), WELL_BG).bold();
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }

        let panel_x = origin_x.saturating_add(frame_w).saturating_add(2);
        self.draw_panel(fb, snap, panel_x, origin_y);

        if snap.game_over {
            let mid = origin_y.saturating_add(frame_h / 2);
            draw_centered(fb, origin_x, frame_w, mid, "GAME OVER");
            draw_centered(fb, origin_x, frame_w, mid.saturating_add(1), "SPACE to restart");
        }
    }

    /// Allocating convenience wrapper around [`GameView::render_into`].
    pub fn render(
        &self,
        snap: &GameSnapshot,
        bursts: &[ParticleBurst],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, bursts, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, origin_x: u16, origin_y: u16, x: u16, y: u16) -> (u16, u16) {
        (
            origin_x
                .saturating_add(1)
                .saturating_add(x.saturating_mul(self.cell_w)),
            origin_y.saturating_add(1).saturating_add(y),
        )
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16) {
        if x >= fb.width() {
            return;
        }

        let mut y = top;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "NEXT", LABEL);
        y = y.saturating_add(1);
        let next = snap.next;
        let style = Style::new(next.color.into(), Rgb::new(0, 0, 0)).bold();
        for row in 0..next.shape.rows() {
            for col in 0..next.shape.cols() {
                if next.shape.is_filled(row, col) {
                    let px = x.saturating_add((col as u16).saturating_mul(self.cell_w));
                    fb.fill_rect(px, y.saturating_add(row as u16), self.cell_w, 1, '█', style);
                }
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', BORDER);
    fb.put_char(right, y, '┐', BORDER);
    fb.put_char(x, bottom, '└', BORDER);
    fb.put_char(right, bottom, '┘', BORDER);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', BORDER);
        fb.put_char(cx, bottom, '─', BORDER);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', BORDER);
        fb.put_char(right, cy, '│', BORDER);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x.saturating_add(w.saturating_sub(text_w) / 2), y, text, OVERLAY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivePiece, ActiveSnapshot};
    use crate::types::{Phase, PieceColor, PieceKind, HARD_DROP_BURST};

    fn find(fb: &FrameBuffer, needle: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn draws_border_sized_to_board() {
        let fb = GameView::default().render(&GameSnapshot::default(), &[], Viewport::new(22, 22));
        assert_eq!(fb.row_text(0), format!("┌{}┐", "─".repeat(20)));
        assert_eq!(fb.row_text(21), format!("└{}┘", "─".repeat(20)));
    }

    #[test]
    fn draws_locked_and_active_cells() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(PieceColor::Red);
        snap.active = Some(ActiveSnapshot::from(ActivePiece::spawn(PieceKind::O, 10)));

        let fb = GameView::default().render(&snap, &[], Viewport::new(22, 22));

        // Row 19 of the well is terminal row 20; cell 0 starts at column 1.
        let locked = fb.get(1, 20).unwrap();
        assert_eq!(locked.ch, '█');
        assert_eq!(locked.style.fg, Rgb::from(PieceColor::Red));

        // O spawns at x=4: columns 9..=12 on terminal row 1.
        let active = fb.get(9, 1).unwrap();
        assert_eq!(active.style.fg, Rgb::from(PieceColor::Yellow));
        assert_eq!(fb.get(1, 1).unwrap().ch, '·');
    }

    #[test]
    fn draws_bursts_over_cells() {
        let snap = GameSnapshot::default();
        let bursts = [
            ParticleBurst {
                x: 0,
                y: 0,
                color: PieceColor::Cyan,
                count: LINE_CLEAR_BURST,
            },
            ParticleBurst {
                x: 1,
                y: 0,
                color: PieceColor::Blue,
                count: HARD_DROP_BURST,
            },
            ParticleBurst {
                x: 99,
                y: -3,
                color: PieceColor::Blue,
                count: HARD_DROP_BURST,
            },
        ];

        let fb = GameView::default().render(&snap, &bursts, Viewport::new(22, 22));
        assert_eq!(fb.get(1, 1).unwrap().ch, '✦');
        assert_eq!(fb.get(3, 1).unwrap().ch, '+');
    }

    #[test]
    fn side_panel_shows_stats_and_next() {
        let mut snap = GameSnapshot::default();
        snap.score = 1200;
        snap.level = 3;

        let fb = GameView::default().render(&snap, &[], Viewport::new(40, 22));
        let score_row = find(&fb, "SCORE").unwrap();
        assert!(fb.row_text(score_row + 1).contains("1200"));
        assert!(find(&fb, "NEXT").is_some());
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = GameSnapshot::default();
        snap.phase = Phase::GameOver;
        snap.game_over = true;

        let fb = GameView::default().render(&snap, &[], Viewport::new(22, 22));
        assert!(find(&fb, "GAME OVER").is_some());
        assert!(find(&fb, "SPACE to restart").is_some());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&GameSnapshot::default(), &[], Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }

    #[test]
    fn huge_cell_width_is_clamped() {
        let view = GameView::new(u16::MAX);
        assert_eq!(view.cell_w(), MAX_CELL_W);
        assert_eq!(GameView::new(0).cell_w(), 1);

        let fb = view.render(&GameSnapshot::default(), &[], Viewport::new(82, 22));
        assert_eq!(fb.row_text(0), format!("┌{}┐", "─".repeat(80)));
    }
}
