//! Sound effects through the terminal bell.
//!
//! A sound file holds the number of bell strokes to ring (1 to `MAX_BELLS`).
//! When there is no usable terminal the mixer is silent, and a sound that
//! cannot be loaded plays as nothing. Neither case stops the game.

use std::path::Path;

use crossterm::tty::IsTty;

use crate::constants::MAX_BELLS;
use crate::entities::SoundCue;
use crate::error::AudioError;

pub const BOOM_FILE: &str = "boom.snd";
pub const SHOOT_FILE: &str = "car_door.snd";

/// A loaded sound. Zero strokes is the no-op sound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sound {
    bells: u8,
}

impl Sound {
    pub fn silent() -> Self {
        Sound { bells: 0 }
    }

    pub fn is_silent(&self) -> bool {
        self.bells == 0
    }

    pub fn bells(&self) -> u8 {
        self.bells
    }
}

/// Parse a sound file's stroke count.
pub fn parse_sound(text: &str) -> Result<Sound, String> {
    let bells: u8 = text
        .trim()
        .parse()
        .map_err(|_| format!("expected a bell count, got {:?}", text.trim()))?;
    if bells == 0 || bells > MAX_BELLS {
        return Err(format!("bell count {} outside 1..={}", bells, MAX_BELLS));
    }
    Ok(Sound { bells })
}

/// Collects bell strokes for the renderer to emit with the next frame.
#[derive(Debug)]
pub struct Mixer {
    available: bool,
    queued: u32,
}

impl Mixer {
    /// Probe the real stdout and `TERM`.
    pub fn init() -> Result<Mixer, AudioError> {
        let term = std::env::var("TERM").ok();
        Mixer::detect(std::io::stdout().is_tty(), term.as_deref())
    }

    pub fn detect(is_tty: bool, term: Option<&str>) -> Result<Mixer, AudioError> {
        if !is_tty {
            return Err(AudioError::MissingAudioDevice("stdout is not a terminal".into()));
        }
        if term == Some("dumb") {
            return Err(AudioError::MissingAudioDevice("terminal has no bell".into()));
        }
        Ok(Mixer { available: true, queued: 0 })
    }

    pub fn silent() -> Mixer {
        Mixer { available: false, queued: 0 }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Load `name` from `dir`. Without a mixer nothing is read.
    pub fn load(&self, dir: &Path, name: &str) -> Result<Sound, AudioError> {
        if !self.available {
            return Ok(Sound::silent());
        }
        let path = dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(|e| AudioError::Unloadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        parse_sound(&text).map_err(|reason| AudioError::Unloadable { path, reason })
    }

    pub fn play(&mut self, sound: &Sound) {
        if self.available {
            self.queued += u32::from(sound.bells);
        }
    }

    /// Strokes queued since the last call.
    pub fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.queued)
    }
}

/// The game's two effects plus the mixer that plays them.
#[derive(Debug)]
pub struct SoundBank {
    mixer: Mixer,
    shoot: Sound,
    boom: Sound,
}

impl SoundBank {
    /// Load both effects, substituting silence for any that fail.
    pub fn load(mixer: Mixer, dir: &Path) -> SoundBank {
        let load = |name| {
            mixer.load(dir, name).unwrap_or_else(|e| {
                log::warn!("{}", e);
                Sound::silent()
            })
        };
        let shoot = load(SHOOT_FILE);
        let boom = load(BOOM_FILE);
        SoundBank { mixer, shoot, boom }
    }

    pub fn play(&mut self, cue: SoundCue) {
        let sound = match cue {
            SoundCue::Shoot => self.shoot,
            SoundCue::Boom => self.boom,
        };
        self.mixer.play(&sound);
    }

    pub fn take_bells(&mut self) -> u32 {
        self.mixer.take_bells()
    }
}
