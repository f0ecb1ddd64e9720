//! Rendering layer. All terminal output lives here.
//!
//! The renderer redraws only what changed: each frame it blanks the cells it
//! painted last frame, then paints every live entity and the score. Playfield
//! pixels map to cells through `CELL_WIDTH` x `CELL_HEIGHT`.

use std::io::Write;
use std::thread;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use space_defenders::assets::SpriteSet;
use space_defenders::constants::{CELL_HEIGHT, CELL_WIDTH, FADE_OUT};
use space_defenders::entities::{GameState, SpriteId};
use space_defenders::score::ScoreDisplay;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::White;
const C_SMALL_ALIEN: Color = Color::Grey;
const C_MEDIUM_ALIEN: Color = Color::Magenta;
const C_BIG_ALIEN: Color = Color::Green;
const C_SHOT: Color = Color::Cyan;
const C_BOMB: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;
const C_SCORE: Color = Color::White;

const FADE_STEPS: u32 = 10;

fn color_for(id: SpriteId) -> Color {
    match id {
        SpriteId::Ship => C_SHIP,
        SpriteId::SmallAlien => C_SMALL_ALIEN,
        SpriteId::MediumAlien => C_MEDIUM_ALIEN,
        SpriteId::BigAlien => C_BIG_ALIEN,
        SpriteId::Shot => C_SHOT,
        SpriteId::Bomb => C_BOMB,
        SpriteId::Explosion => C_EXPLOSION,
    }
}

/// Something painted last frame, kept so it can be erased or faded.
struct Drawn {
    col: i32,
    row: i32,
    rows: Vec<String>,
}

pub struct Renderer {
    cols: u16,
    rows: u16,
    drawn: Vec<Drawn>,
}

impl Renderer {
    /// Start from a blank screen of the current terminal size.
    pub fn new<W: Write>(out: &mut W) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Renderer { cols, rows, drawn: Vec::new() };
        renderer.resize(out, cols, rows)?;
        Ok(renderer)
    }

    /// Adopt a new terminal size. Everything is cleared and redrawn next frame.
    pub fn resize<W: Write>(&mut self, out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
        self.cols = cols;
        self.rows = rows;
        self.drawn.clear();
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.flush()
    }

    /// Blank every cell painted last frame.
    pub fn erase<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        for drawn in std::mem::take(&mut self.drawn) {
            for (dy, line) in drawn.rows.iter().enumerate() {
                for (dx, run) in runs(line) {
                    let blank = " ".repeat(run.chars().count());
                    self.put(out, drawn.col + dx as i32, drawn.row + dy as i32, &blank)?;
                }
            }
        }
        Ok(())
    }

    /// Paint one frame: every live entity, then the score, then any bells.
    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        state: &GameState,
        sprites: &SpriteSet,
        score: &ScoreDisplay,
        bells: u32,
    ) -> std::io::Result<()> {
        for entity in state.entities.values() {
            let id = entity.sprite_id();
            let Some(sprite) = sprites.frame(id, entity.visual) else {
                continue;
            };
            let col = entity.rect.left.div_euclid(CELL_WIDTH);
            let row = entity.rect.top.div_euclid(CELL_HEIGHT);
            self.paint(out, col, row, sprite.rows().to_vec(), color_for(id))?;
        }

        let (left, top) = score.position();
        self.paint(
            out,
            left.div_euclid(CELL_WIDTH),
            top.div_euclid(CELL_HEIGHT),
            vec![score.text().to_string()],
            C_SCORE,
        )?;

        for _ in 0..bells {
            out.queue(Print('\u{7}'))?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()
    }

    /// Dim the last frame to black over `FADE_OUT`, then erase it.
    pub fn fade_out<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let pause = FADE_OUT / FADE_STEPS;
        let drawn = std::mem::take(&mut self.drawn);
        for step in 1..=FADE_STEPS {
            let level = (255 * (FADE_STEPS - step) / FADE_STEPS) as u8;
            let shade = Color::Rgb { r: level, g: level, b: level };
            for d in &drawn {
                self.paint_rows(out, d.col, d.row, &d.rows, shade)?;
            }
            out.queue(style::ResetColor)?;
            out.flush()?;
            thread::sleep(pause);
        }
        self.drawn = drawn;
        self.erase(out)?;
        out.flush()
    }

    fn paint<W: Write>(
        &mut self,
        out: &mut W,
        col: i32,
        row: i32,
        rows: Vec<String>,
        color: Color,
    ) -> std::io::Result<()> {
        self.paint_rows(out, col, row, &rows, color)?;
        self.drawn.push(Drawn { col, row, rows });
        Ok(())
    }

    fn paint_rows<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        rows: &[String],
        color: Color,
    ) -> std::io::Result<()> {
        out.queue(style::SetForegroundColor(color))?;
        for (dy, line) in rows.iter().enumerate() {
            for (dx, run) in runs(line) {
                self.put(out, col + dx as i32, row + dy as i32, run)?;
            }
        }
        Ok(())
    }

    /// Print `text` at a cell, clipped to the terminal.
    fn put<W: Write>(&self, out: &mut W, col: i32, row: i32, text: &str) -> std::io::Result<()> {
        if row < 0 || row >= i32::from(self.rows) {
            return Ok(());
        }
        let skip = (-col).max(0) as usize;
        let start = col.max(0);
        let room = (i32::from(self.cols) - start).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        out.queue(cursor::MoveTo(start as u16, row as u16))?;
        out.queue(Print(visible))?;
        Ok(())
    }
}

/// Runs of non-space characters in a sprite row, with their column offset.
/// Spaces are transparent and never painted.
fn runs(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut col = 0;
    for (byte, ch) in line.char_indices() {
        match (ch == ' ', start) {
            (false, None) => start = Some((col, byte)),
            (true, Some((c, b))) => {
                out.push((c, &line[b..byte]));
                start = None;
            }
            _ => {}
        }
        col += 1;
    }
    if let Some((c, b)) = start {
        out.push((c, &line[b..]));
    }
    out
}
