//! Terminal backend for the sprite batch
//!
//! Sprites are rasterised into a grid of character cells. `present`
//! compares the composed frame with the previous one and only writes the
//! cells that changed, all queued and flushed at once.
//!
//! A terminal cell is roughly twice as tall as it is wide, so the batch
//! reports a "pixel" size of `cols x rows * 2` and halves y when mapping
//! back to rows.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
    terminal,
};
use glam::{Mat4, Vec2};

use super::camera::{ScreenRect, project};
use super::{Batch, Color};
use crate::assets::Sprite;
use crate::sim::Rect;

/// Pixels per terminal row
pub const CELL_ASPECT: u32 = 2;

const C_BOMBER: style::Color = style::Color::White;
const C_BOMB: style::Color = style::Color::Red;
const C_TOWER: style::Color = style::Color::Grey;
const C_TOWER_DAMAGED: style::Color = style::Color::DarkYellow;
const C_STARS: style::Color = style::Color::DarkGrey;
const C_GROUND: style::Color = style::Color::DarkGreen;
const C_TEXT: style::Color = style::Color::Yellow;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: style::Color,
    bg: style::Color,
}

impl Cell {
    fn blank(bg: style::Color) -> Self {
        Self {
            ch: ' ',
            fg: style::Color::White,
            bg,
        }
    }

    /// Never equal to a drawn cell, forces a full redraw
    const INVALID: Cell = Cell {
        ch: '\0',
        fg: style::Color::Magenta,
        bg: style::Color::Magenta,
    };
}

/// A 2D grid of cells
#[derive(Debug)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    fn set(&mut self, x: usize, y: usize, ch: char, fg: style::Color) {
        if x < self.width && y < self.height {
            let cell = &mut self.cells[y * self.width + x];
            cell.ch = ch;
            cell.fg = fg;
        }
    }
}

/// Sprite batch that draws into a terminal
pub struct TerminalBatch<W: Write> {
    out: W,
    front: FrameBuffer,
    back: FrameBuffer,
    clear_bg: style::Color,
    viewport: ScreenRect,
    projection: Mat4,
    error: Option<io::Error>,
}

impl<W: Write> TerminalBatch<W> {
    /// Batch for a terminal of `cols x rows` cells
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize, rows as usize);
        let clear_bg = style::Color::Black;
        Self {
            out,
            front: FrameBuffer::new(w, h, Cell::blank(clear_bg)),
            back: FrameBuffer::new(w, h, Cell::INVALID),
            clear_bg,
            viewport: ScreenRect::default(),
            projection: Mat4::IDENTITY,
            error: None,
        }
    }

    /// Drawable area in pixels (`cols`, `rows * CELL_ASPECT`)
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.front.width as u32, self.front.height as u32 * CELL_ASPECT)
    }

    /// Terminal was resized: reallocate and force a full redraw
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (w, h) = (cols as usize, rows as usize);
        self.front = FrameBuffer::new(w, h, Cell::blank(self.clear_bg));
        self.back = FrameBuffer::new(w, h, Cell::INVALID);
        let result = self
            .out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(|_| ());
        self.record(result);
    }

    /// First I/O error since the last call, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Character shown at a cell of the last composed frame (for tests)
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.front.get(col, row).map(|c| c.ch)
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }

    /// Cell range covered by a world rectangle, clipped to the viewport
    fn cell_span(&self, dest: &Rect) -> Option<(usize, usize, usize, usize)> {
        let top_left = project(
            &self.projection,
            &self.viewport,
            Vec2::new(dest.min().x, dest.max().y),
        );
        let bottom_right = project(
            &self.projection,
            &self.viewport,
            Vec2::new(dest.max().x, dest.min().y),
        );

        let aspect = CELL_ASPECT as f32;
        let clip_x0 = self.viewport.pos.x as f32;
        let clip_y0 = self.viewport.pos.y as f32;
        let clip_x1 = clip_x0 + self.viewport.size.x as f32;
        let clip_y1 = clip_y0 + self.viewport.size.y as f32;

        if top_left.x >= clip_x1
            || bottom_right.x <= clip_x0
            || top_left.y >= clip_y1
            || bottom_right.y <= clip_y0
        {
            return None;
        }

        let x0 = top_left.x.max(clip_x0).round();
        let x1 = bottom_right.x.min(clip_x1).round().max(x0 + 1.0);
        let y0 = (top_left.y.max(clip_y0) / aspect).round();
        let y1 = (bottom_right.y.min(clip_y1) / aspect).round().max(y0 + 1.0);
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Write the composed frame to the terminal
    pub fn present(&mut self) -> io::Result<()> {
        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let idx = y * self.front.width + x;
                let cell = self.front.cells[idx];
                if self.back.cells[idx] == cell {
                    continue;
                }
                self.out.queue(cursor::MoveTo(x as u16, y as u16))?;
                if last_fg != Some(cell.fg) {
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                    last_fg = Some(cell.fg);
                }
                if last_bg != Some(cell.bg) {
                    self.out.queue(style::SetBackgroundColor(cell.bg))?;
                    last_bg = Some(cell.bg);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        self.front.cells.copy_from_slice(&self.back.cells);
        Ok(())
    }
}

/// Glyph for a sprite cell; `col`/`row` are relative to the sprite's top-left
fn glyph(
    sprite: Sprite,
    frame: usize,
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
) -> Option<(char, style::Color)> {
    match sprite {
        Sprite::Background => {
            if row + 1 == rows {
                Some(('▁', C_GROUND))
            } else if (col * 7 + row * 13) % 29 == 0 {
                Some(('.', C_STARS))
            } else {
                None
            }
        }
        Sprite::Bomber => {
            let ch = if col + 1 == cols {
                '►'
            } else if col == 0 {
                if frame == 0 { '|' } else { '-' }
            } else {
                '▬'
            };
            Some((ch, C_BOMBER))
        }
        Sprite::Bomb => Some(('▼', C_BOMB)),
        Sprite::Skyscraper => {
            let damaged = frame == 1 && row == 0;
            let window = col % 2 == 1 && row % 2 == 1 && col + 1 < cols && row + 1 < rows;
            if damaged {
                Some(('▓', C_TOWER_DAMAGED))
            } else if window {
                Some(('▒', C_TOWER))
            } else {
                Some(('█', C_TOWER))
            }
        }
    }
}

impl<W: Write> Batch for TerminalBatch<W> {
    fn clear(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb8();
        self.clear_bg = style::Color::Rgb { r, g, b };
        self.front.fill(Cell::blank(self.clear_bg));
    }

    fn set_viewport(&mut self, viewport: ScreenRect) {
        self.viewport = viewport;
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn begin(&mut self) {}

    fn draw(&mut self, sprite: Sprite, frame: usize, dest: Rect) {
        let Some((x0, y0, x1, y1)) = self.cell_span(&dest) else {
            return;
        };
        let (cols, rows) = (x1 - x0, y1 - y0);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some((ch, fg)) = glyph(sprite, frame, x - x0, y - y0, cols, rows) {
                    self.front.set(x, y, ch, fg);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        let at = project(&self.projection, &self.viewport, pos);
        if at.x < 0.0 || at.y < 0.0 {
            return;
        }
        let row = ((at.y / CELL_ASPECT as f32).floor() as usize).saturating_sub(1);
        let col = at.x.round() as usize;
        for (i, ch) in text.chars().enumerate() {
            self.front.set(col + i, row, ch, C_TEXT);
        }
    }

    fn end(&mut self) {}
}
