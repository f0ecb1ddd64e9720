use std::fs;
use std::path::PathBuf;

use space_defenders::assets::*;
use space_defenders::constants::*;
use space_defenders::entities::{SoundCue, SpriteId};
use space_defenders::error::{AudioError, GameError};
use space_defenders::geometry::Size;
use space_defenders::sound::*;

/// A fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("space_defenders_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ── Sprite parsing ────────────────────────────────────────────────────────────

#[test]
fn single_frame_is_padded_to_widest_row() {
    let frames = parse_frames("  ^\n<=#=>\n").unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].rows(), &["  ^  ".to_string(), "<=#=>".to_string()]);
    assert_eq!(frames[0].size(), Size::new(5 * CELL_WIDTH, 2 * CELL_HEIGHT));
}

#[test]
fn frames_split_on_separator() {
    let frames = parse_frames("/o\\\n---\n(o)\n---\n\\o/\n").unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1].rows(), &["(o)".to_string()]);
}

#[test]
fn blank_edges_of_a_frame_are_dropped() {
    let frames = parse_frames("\n\n |\n\n").unwrap();
    assert_eq!(frames[0].lines(), 1);
    assert_eq!(frames[0].rows(), &[" |".to_string()]);
}

#[test]
fn empty_sprite_is_rejected() {
    assert!(parse_frames("").is_err());
    assert!(parse_frames("  \n   \n").is_err());
    assert!(parse_frames("ab\n---\n").is_err());
}

#[test]
fn ragged_frames_are_rejected() {
    let err = parse_frames("ab\n---\nabc\n").unwrap_err();
    assert!(err.contains("frame 1"), "{}", err);
}

#[test]
fn mirror_swaps_directional_characters() {
    let sprite = Sprite::from_rows(&["/#>", "(  "]).unwrap();
    let mirrored = sprite.mirrored();
    assert_eq!(mirrored.rows(), &["<#\\".to_string(), "  )".to_string()]);
    assert_eq!(mirrored.mirrored(), sprite);
}

#[test]
fn flip_turns_sprite_upside_down() {
    let sprite = Sprite::from_rows(&["^ '", "ab "]).unwrap();
    let flipped = sprite.flipped();
    assert_eq!(flipped.rows(), &[" ba".to_string(), ". v".to_string()]);
    assert_eq!(flipped.flipped(), sprite);
    assert_eq!(flipped.size(), sprite.size());
}

// ── Sprite set ────────────────────────────────────────────────────────────────

#[test]
fn shipped_sprites_load() {
    let sprites = SpriteSet::load(&data_dir()).unwrap();
    assert_eq!(sprites.frames(SpriteId::Ship).len(), 2);
    assert_eq!(sprites.frames(SpriteId::Explosion).len(), 2);
    for id in [SpriteId::SmallAlien, SpriteId::MediumAlien, SpriteId::BigAlien] {
        assert_eq!(sprites.frames(id).len(), ALIEN_FRAMES);
    }
    for id in SpriteId::ALL {
        assert!(sprites.frame(id, 0).is_some(), "{:?}", id);
    }

    let sizes = sprites.sizes();
    assert!(sizes.small_alien.width < sizes.medium_alien.width);
    assert!(sizes.medium_alien.width < sizes.big_alien.width);
    assert!(sizes.ship.height > 0 && sizes.shot.height > 0);
}

#[test]
fn right_facing_ship_is_the_mirror_image() {
    let sprites = SpriteSet::load(&data_dir()).unwrap();
    let ship = sprites.frames(SpriteId::Ship);
    assert_eq!(ship[1], ship[0].mirrored());
}

#[test]
fn frame_lookup_wraps() {
    let sprites = SpriteSet::load(&data_dir()).unwrap();
    assert_eq!(sprites.frame(SpriteId::Explosion, 2), sprites.frame(SpriteId::Explosion, 0));
}

#[test]
fn single_frame_alien_cycles_to_three() {
    let dir = scratch("single_frame_alien");
    for entry in fs::read_dir(data_dir()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.join(entry.file_name())).unwrap();
    }
    fs::write(dir.join(BIG_ALIEN_FILE), "[##]\n").unwrap();

    let sprites = SpriteSet::load(&dir).unwrap();
    let big = sprites.frames(SpriteId::BigAlien);
    assert_eq!(big.len(), ALIEN_FRAMES);
    assert!(big.iter().all(|f| f == &big[0]));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_sprite_is_fatal() {
    let dir = scratch("missing_sprite");
    match SpriteSet::load(&dir) {
        Err(GameError::MissingAsset { path, .. }) => assert!(path.ends_with(PLAYER_FILE)),
        other => panic!("expected MissingAsset, got {:?}", other.map(|_| ())),
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_sprite_is_fatal() {
    let dir = scratch("malformed_sprite");
    fs::write(dir.join("bad.txt"), "   \n").unwrap();
    match load_sprite_file(&dir, "bad.txt") {
        Err(GameError::MalformedAsset { path, reason }) => {
            assert!(path.ends_with("bad.txt"));
            assert!(!reason.is_empty());
        }
        other => panic!("expected MalformedAsset, got {:?}", other.map(|_| ())),
    }
    let _ = fs::remove_dir_all(&dir);
}

// ── Sound ─────────────────────────────────────────────────────────────────────

#[test]
fn sound_file_holds_a_bell_count() {
    assert_eq!(parse_sound("2\n").unwrap().bells(), 2);
    assert!(parse_sound("0").is_err());
    assert!(parse_sound("9").is_err());
    assert!(parse_sound("boom").is_err());
}

#[test]
fn no_terminal_means_no_mixer() {
    assert!(matches!(
        Mixer::detect(false, Some("xterm")),
        Err(AudioError::MissingAudioDevice(_))
    ));
    assert!(matches!(
        Mixer::detect(true, Some("dumb")),
        Err(AudioError::MissingAudioDevice(_))
    ));
    assert!(Mixer::detect(true, Some("xterm-256color")).unwrap().is_available());
}

#[test]
fn silent_mixer_plays_nothing() {
    let mut bank = SoundBank::load(Mixer::silent(), &data_dir());
    bank.play(SoundCue::Boom);
    bank.play(SoundCue::Shoot);
    assert_eq!(bank.take_bells(), 0);
}

#[test]
fn bank_queues_bells_until_taken() {
    let mixer = Mixer::detect(true, None).unwrap();
    let mut bank = SoundBank::load(mixer, &data_dir());
    bank.play(SoundCue::Boom);
    bank.play(SoundCue::Shoot);
    assert_eq!(bank.take_bells(), 3);
    assert_eq!(bank.take_bells(), 0);
}

#[test]
fn unloadable_sound_falls_back_to_silence() {
    let dir = scratch("unloadable_sound");
    fs::write(dir.join(BOOM_FILE), "loud\n").unwrap();
    let mixer = Mixer::detect(true, None).unwrap();
    assert!(matches!(mixer.load(&dir, BOOM_FILE), Err(AudioError::Unloadable { .. })));

    let mut bank = SoundBank::load(mixer, &dir);
    bank.play(SoundCue::Boom);
    bank.play(SoundCue::Shoot);
    assert_eq!(bank.take_bells(), 0);
    let _ = fs::remove_dir_all(&dir);
}
