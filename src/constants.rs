//! All of the tuning constants used in the game.

use std::time::Duration;

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 1280;
pub const SCREEN_HEIGHT: i32 = 720;

/// Pixels covered by one terminal cell.
pub const CELL_WIDTH: i32 = 10;
pub const CELL_HEIGHT: i32 = 20;

// ── Loop timing ───────────────────────────────────────────────────────────────

pub const FRAME_RATE: u64 = 70;
pub const FRAME: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE);
pub const FADE_OUT: Duration = Duration::from_millis(1000);
pub const GAME_OVER_PAUSE: Duration = Duration::from_millis(1000);

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_SPEED: i32 = 10;
/// Horizontal distance per step of the cosmetic up/down wobble.
pub const SHIP_BOUNCE: i32 = 24;
pub const GUN_OFFSET: i32 = 1;
pub const MAX_SHOTS: usize = 4;

// ── Aliens ────────────────────────────────────────────────────────────────────

pub const SMALL_ALIEN_SPEED: i32 = 12;
pub const MEDIUM_ALIEN_SPEED: i32 = 8;
pub const BIG_ALIEN_SPEED: i32 = 4;
pub const ALIEN_ANIM_CYCLE: u32 = 12;
pub const ALIEN_FRAMES: usize = 3;

/// Frames to wait after a spawn before the next spawn trial.
pub const ALIEN_RESPAWN: u32 = 12;
/// One-in-N chance per frame of a spawn once the respawn timer is spent.
pub const ALIENS_CHANCE: u32 = 22;
/// One-in-N chance per frame of the tracked small alien dropping a bomb.
pub const BOMBS_CHANCE: u32 = 40;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const SHOT_SPEED: i32 = -11;
pub const BOMB_SPEED: i32 = 5;
pub const BOMB_DROP_OFFSET: i32 = 5;
/// Bombs burst once their bottom edge reaches this row, just above the edge.
pub const BOMB_FLOOR: i32 = 710;

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_LIFE: u32 = 12;
pub const EXPLOSION_ANIM_CYCLE: u32 = 3;

// ── Score ─────────────────────────────────────────────────────────────────────

pub const SCORE_LEFT: i32 = 10;
pub const SCORE_TOP: i32 = 700;

// ── Assets ────────────────────────────────────────────────────────────────────

pub const FRAME_SEPARATOR: &str = "---";
pub const MAX_BELLS: u8 = 3;
