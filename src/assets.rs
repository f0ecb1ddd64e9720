//! Sprite loading.
//!
//! A sprite file is ASCII art. One file may hold several animation frames
//! separated by a `---` line; all frames of a file share one size. Each
//! character covers one `CELL_WIDTH` x `CELL_HEIGHT` block of the playfield,
//! and spaces are transparent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::{ALIEN_FRAMES, CELL_HEIGHT, CELL_WIDTH, FRAME_SEPARATOR};
use crate::entities::{EntitySizes, SpriteId};
use crate::error::GameError;
use crate::geometry::Size;

pub const PLAYER_FILE: &str = "player.txt";
pub const EXPLOSION_FILE: &str = "explosion1.txt";
pub const SMALL_ALIEN_FILE: &str = "small_white.txt";
pub const MEDIUM_ALIEN_FILE: &str = "big_pink.txt";
pub const BIG_ALIEN_FILE: &str = "big.txt";
pub const BOMB_FILE: &str = "bombs.txt";
pub const SHOT_FILE: &str = "bullet.txt";

/// The `data/` directory shipped next to the crate manifest.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

// ── Sprite ────────────────────────────────────────────────────────────────────

/// One animation frame. Rows are right-padded to a common width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<String>,
    cols: usize,
}

impl Sprite {
    /// Build a frame from raw rows. Fails if there is nothing visible.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Sprite, String> {
        let trimmed: Vec<&str> = rows.iter().map(|r| r.as_ref().trim_end()).collect();
        let start = trimmed.iter().position(|r| !r.is_empty());
        let end = trimmed.iter().rposition(|r| !r.is_empty());
        let (Some(start), Some(end)) = (start, end) else {
            return Err("frame has no visible characters".to_string());
        };

        let body = &trimmed[start..=end];
        let cols = body.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let rows = body
            .iter()
            .map(|r| format!("{:<width$}", r, width = cols))
            .collect();
        Ok(Sprite { rows, cols })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height in cells.
    pub fn lines(&self) -> usize {
        self.rows.len()
    }

    /// Collision size in playfield pixels.
    pub fn size(&self) -> Size {
        Size::new(self.cols as i32 * CELL_WIDTH, self.rows.len() as i32 * CELL_HEIGHT)
    }

    /// Left-right mirror image.
    pub fn mirrored(&self) -> Sprite {
        let rows = self
            .rows
            .iter()
            .map(|r| r.chars().rev().map(mirror_char).collect())
            .collect();
        Sprite { rows, cols: self.cols }
    }

    /// Flipped on both axes.
    pub fn flipped(&self) -> Sprite {
        let rows = self
            .rows
            .iter()
            .rev()
            .map(|r| r.chars().rev().map(|c| vflip_char(mirror_char(c))).collect())
            .collect();
        Sprite { rows, cols: self.cols }
    }
}

fn mirror_char(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        other => other,
    }
}

fn vflip_char(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '^' => 'v',
        'v' => '^',
        '\'' => '.',
        '.' => '\'',
        other => other,
    }
}

/// Split a sprite file into frames and check they all have one size.
pub fn parse_frames(text: &str) -> Result<Vec<Sprite>, String> {
    let mut groups: Vec<Vec<&str>> = vec![Vec::new()];
    for line in text.lines() {
        if line.trim_end() == FRAME_SEPARATOR {
            groups.push(Vec::new());
        } else if let Some(group) = groups.last_mut() {
            group.push(line);
        }
    }

    let mut frames = Vec::with_capacity(groups.len());
    for (i, group) in groups.iter().enumerate() {
        let frame = Sprite::from_rows(group.as_slice()).map_err(|e| format!("frame {}: {}", i, e))?;
        frames.push(frame);
    }

    let first = frames[0].size();
    if let Some((i, odd)) = frames.iter().enumerate().find(|(_, f)| f.size() != first) {
        return Err(format!(
            "frame {} is {}x{} cells, expected {}x{}",
            i,
            odd.cols(),
            odd.lines(),
            frames[0].cols(),
            frames[0].lines()
        ));
    }
    Ok(frames)
}

/// Read and parse one sprite file from `dir`.
pub fn load_sprite_file(dir: &Path, name: &str) -> Result<Vec<Sprite>, GameError> {
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path).map_err(|source| GameError::MissingAsset {
        path: path.clone(),
        source,
    })?;
    let frames =
        parse_frames(&text).map_err(|reason| GameError::MalformedAsset { path: path.clone(), reason })?;
    log::debug!("loaded {} ({} frame(s))", path.display(), frames.len());
    Ok(frames)
}

// ── Sprite set ────────────────────────────────────────────────────────────────

/// Every sprite sheet the game draws, keyed by entity sprite.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    sheets: HashMap<SpriteId, Vec<Sprite>>,
}

impl SpriteSet {
    /// Load all sprites from `dir`. Any missing or malformed file is fatal.
    pub fn load(dir: &Path) -> Result<Self, GameError> {
        let mut sheets = HashMap::new();

        let player = first_frame(dir, PLAYER_FILE)?;
        let mirrored = player.mirrored();
        sheets.insert(SpriteId::Ship, vec![player, mirrored]);

        let explosion = first_frame(dir, EXPLOSION_FILE)?;
        let flipped = explosion.flipped();
        sheets.insert(SpriteId::Explosion, vec![explosion, flipped]);

        for (id, file) in [
            (SpriteId::SmallAlien, SMALL_ALIEN_FILE),
            (SpriteId::MediumAlien, MEDIUM_ALIEN_FILE),
            (SpriteId::BigAlien, BIG_ALIEN_FILE),
        ] {
            let frames = load_sprite_file(dir, file)?;
            let cycle = (0..ALIEN_FRAMES).map(|i| frames[i % frames.len()].clone()).collect();
            sheets.insert(id, cycle);
        }

        sheets.insert(SpriteId::Bomb, vec![first_frame(dir, BOMB_FILE)?]);
        sheets.insert(SpriteId::Shot, vec![first_frame(dir, SHOT_FILE)?]);

        log::info!("loaded sprites from {}", dir.display());
        Ok(SpriteSet { sheets })
    }

    pub fn frames(&self, id: SpriteId) -> &[Sprite] {
        self.sheets.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The frame for `visual`, wrapping past the end of the sheet.
    pub fn frame(&self, id: SpriteId, visual: usize) -> Option<&Sprite> {
        let frames = self.frames(id);
        if frames.is_empty() {
            None
        } else {
            frames.get(visual % frames.len())
        }
    }

    /// Collision boxes for every entity kind, from each sheet's first frame.
    pub fn sizes(&self) -> EntitySizes {
        let size = |id| self.frame(id, 0).map(Sprite::size).unwrap_or(Size::new(0, 0));
        EntitySizes {
            ship: size(SpriteId::Ship),
            small_alien: size(SpriteId::SmallAlien),
            medium_alien: size(SpriteId::MediumAlien),
            big_alien: size(SpriteId::BigAlien),
            shot: size(SpriteId::Shot),
            bomb: size(SpriteId::Bomb),
            explosion: size(SpriteId::Explosion),
        }
    }
}

fn first_frame(dir: &Path, name: &str) -> Result<Sprite, GameError> {
    let mut frames = load_sprite_file(dir, name)?;
    Ok(frames.swap_remove(0))
}
