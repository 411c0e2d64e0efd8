//! TerminalRenderer: pushes frames to a real terminal with crossterm.
//!
//! Frames are double-buffered; after the first full paint only changed runs
//! of glyphs are written.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::engine::Renderer;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::game_view::{GameView, Viewport};
use crate::types::ParticleBurst;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    /// Frame being drawn.
    next: FrameBuffer,
    /// Frame on screen; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            view: GameView::default(),
            next: FrameBuffer::new(0, 0),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    fn present(&mut self) -> Result<()> {
        self.buf.clear();
        match self.shown.as_ref() {
            Some(shown)
                if shown.width() == self.next.width() && shown.height() == self.next.height() =>
            {
                encode_diff_into(shown, &self.next, &mut self.buf)?
            }
            _ => encode_full_into(&self.next, &mut self.buf)?,
        }
        self.flush_buf()?;

        // Keep both allocations: the old screen becomes the next canvas.
        let mut canvas = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(self.next.width(), self.next.height()));
        std::mem::swap(&mut canvas, &mut self.next);
        self.shown = Some(canvas);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &GameSnapshot, bursts: &[ParticleBurst]) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.view
            .render_into(snapshot, bursts, Viewport::new(width, height), &mut self.next);
        self.present()
    }
}

/// Encode a full repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let glyph = fb.get(x, y).unwrap_or_default();
            queue_glyph(out, &mut style, glyph.ch, glyph.style)?;
        }
    }

    finish(out)
}

/// Encode only the glyphs that differ between two same-sized frames.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x + len {
            let glyph = next.get(cx, y).unwrap_or_default();
            queue_glyph(out, &mut style, glyph.ch, glyph.style)?;
        }
    }

    finish(out)
}

fn queue_glyph(out: &mut Vec<u8>, current: &mut Option<Style>, ch: char, style: Style) -> Result<()> {
    if *current != Some(style) {
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(to_color(style.fg)))?;
        out.queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *current = Some(style);
    }
    out.queue(Print(ch))?;
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Runs of changed glyphs as `(x, y, len)`, row by row.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut run_start: Option<u16> = None;
        for x in 0..next.width() {
            let same = prev.get(x, y) == next.get(x, y);
            match (same, run_start) {
                (false, None) => run_start = Some(x),
                (true, Some(start)) => {
                    runs.push((start, y, x - start));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            runs.push((start, y, next.width() - start));
        }
    }
    runs
}
