//! Space Defenders: a terminal arcade shooter.
//!
//! The library holds everything that can run without a terminal: the entity
//! arena, per-frame rules, spawn/collision policies, asset parsing and the
//! sound fallback. The binary owns the screen, the input thread and the loop.

pub mod assets;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod score;
pub mod sound;
