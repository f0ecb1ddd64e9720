//! Per-frame game logic.
//!
//! Every public function takes the current `GameState` by mutable reference
//! and, where needed, an injected RNG. Nothing here touches the terminal, so
//! tests drive a whole game with a seeded RNG.

use rand::Rng;

use crate::constants::*;
use crate::entities::{
    AlienSize, Entity, EntityId, EntitySizes, Fate, GameState, GameStatus, Kind, SoundCue,
};
use crate::geometry::Rect;

/// Player input for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    /// -1 left, 0 still, 1 right.
    pub direction: i32,
    pub firing: bool,
}

impl Controls {
    pub fn from_keys(left: bool, right: bool, firing: bool) -> Self {
        Controls {
            direction: i32::from(right) - i32::from(left),
            firing,
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The opening playfield: the ship plus one alien of each size.
pub fn init_state(sizes: EntitySizes, rng: &mut impl Rng) -> GameState {
    let mut state = GameState::new(sizes);
    let ship = Entity::ship(sizes.ship, &state.screen);
    state.player = Some(state.entities.insert(ship));
    for size in AlienSize::ALL {
        spawn_alien(&mut state, size, rng);
    }
    state
}

/// Add an alien heading in a random direction. A small alien becomes the
/// tracked bomb dropper.
pub fn spawn_alien(state: &mut GameState, size: AlienSize, rng: &mut impl Rng) -> EntityId {
    let alien = Entity::alien(size, state.sizes.alien(size), rng.gen_bool(0.5), &state.screen);
    let id = state.entities.insert(alien);
    if size == AlienSize::Small {
        state.last_small_alien = Some(id);
    }
    id
}

// ── Entity advance ───────────────────────────────────────────────────────────

/// Move, animate and age every live entity by one tick. Explosions left by
/// bursting bombs are created afterwards, so they first age next tick.
pub fn advance_entities(state: &mut GameState) {
    let screen = state.screen;
    let mut removed = Vec::new();
    let mut bursts = Vec::new();

    for (id, entity) in state.entities.iter_mut() {
        match entity.advance(&screen) {
            Fate::Live => {}
            Fate::Remove => removed.push(id),
            Fate::Burst => {
                removed.push(id);
                bursts.push(entity.rect);
            }
        }
    }

    for id in removed {
        state.entities.remove(id);
    }
    for rect in bursts {
        state.spawn_explosion_on(&rect);
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Steer the ship and fire. A shot leaves only on the frame the trigger goes
/// from released to pressed, and only while fewer than `MAX_SHOTS` are live.
pub fn apply_controls(state: &mut GameState, controls: Controls) {
    let Some(player_id) = state.player else {
        return;
    };
    let screen = state.screen;
    let live_shots = state.count(Entity::is_shot);

    let Some(player) = state.entities.get_mut(player_id) else {
        return;
    };
    player.steer(controls.direction, &screen);

    let gun = player.gun_position();
    let Kind::Ship(ship) = &mut player.kind else {
        return;
    };
    let fire = !ship.reloading && controls.firing && live_shots < MAX_SHOTS;
    ship.reloading = controls.firing;

    if let (true, Some(gun)) = (fire, gun) {
        let shot = Entity::shot(state.sizes.shot, gun);
        state.entities.insert(shot);
        state.sound_cues.push(SoundCue::Shoot);
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Count the respawn timer down; once spent, roll for a new wave. A wave is
/// always a small alien, sometimes a medium one too, and a big one only when
/// the medium one came. Returns the sizes spawned this frame.
pub fn spawn_policy(state: &mut GameState, rng: &mut impl Rng) -> Vec<AlienSize> {
    let mut spawned = Vec::new();
    if state.alien_respawn_timer > 0 {
        state.alien_respawn_timer -= 1;
        return spawned;
    }
    if !rng.gen_ratio(1, ALIENS_CHANCE) {
        return spawned;
    }

    spawned.push(AlienSize::Small);
    if rng.gen_bool(0.5) {
        spawned.push(AlienSize::Medium);
        if rng.gen_bool(0.5) {
            spawned.push(AlienSize::Big);
        }
    }
    for &size in &spawned {
        spawn_alien(state, size, rng);
    }
    state.alien_respawn_timer = ALIEN_RESPAWN;
    log::debug!("frame {}: spawned {:?}", state.frame, spawned);
    spawned
}

/// Maybe drop a bomb from the most recent small alien. Returns the bomb id.
pub fn bomb_drop_policy(state: &mut GameState, rng: &mut impl Rng) -> Option<EntityId> {
    let dropper = state.bomb_dropper()?.rect;
    if !rng.gen_ratio(1, BOMBS_CHANCE) {
        return None;
    }
    let bomb = Entity::bomb(state.sizes.bomb, &dropper);
    Some(state.entities.insert(bomb))
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Resolve this frame's hits: ship against aliens, shots against aliens,
/// then ship against bombs. Only alien kills score. Both ship checks use the
/// ship's rect from before the first check, even if it died in between.
pub fn collision_policy(state: &mut GameState) {
    let ship_rect = state.player_entity().map(|p| p.rect);
    if let Some(rect) = ship_rect {
        ship_vs_aliens(state, &rect);
    }
    shots_vs_aliens(state);
    if let Some(rect) = ship_rect {
        ship_vs_bombs(state, &rect);
    }
}

fn ship_vs_aliens(state: &mut GameState, ship_rect: &Rect) {
    let hits = state.ids_where(|e| e.is_alien() && e.rect.collides(ship_rect));
    if hits.is_empty() {
        return;
    }
    for id in hits {
        if let Some(alien) = state.entities.remove(id) {
            kill_alien(state, &alien);
            state.spawn_explosion_on(ship_rect);
        }
    }
    destroy_player(state);
}

/// Every shot takes down every alien it overlaps, and is spent once.
fn shots_vs_aliens(state: &mut GameState) {
    for shot_id in state.ids_where(Entity::is_shot) {
        let Some(shot_rect) = state.entities.get(shot_id).map(|s| s.rect) else {
            continue;
        };
        let hits = state.ids_where(|e| e.is_alien() && e.rect.collides(&shot_rect));
        if hits.is_empty() {
            continue;
        }
        state.entities.remove(shot_id);
        for alien_id in hits {
            if let Some(alien) = state.entities.remove(alien_id) {
                kill_alien(state, &alien);
            }
        }
    }
}

fn ship_vs_bombs(state: &mut GameState, ship_rect: &Rect) {
    let hits = state.ids_where(|e| e.is_bomb() && e.rect.collides(ship_rect));
    if hits.is_empty() {
        return;
    }
    for id in hits {
        if let Some(bomb) = state.entities.remove(id) {
            state.sound_cues.push(SoundCue::Boom);
            state.spawn_explosion_on(ship_rect);
            state.spawn_explosion_on(&bomb.rect);
        }
    }
    destroy_player(state);
}

fn kill_alien(state: &mut GameState, alien: &Entity) {
    state.sound_cues.push(SoundCue::Boom);
    state.spawn_explosion_on(&alien.rect);
    state.score += 1;
    if let Kind::Alien(a) = &alien.kind {
        state.kills.record(a.size);
    }
}

fn destroy_player(state: &mut GameState) {
    let Some(id) = state.player.take() else {
        return;
    };
    state.entities.remove(id);
    state.status = GameStatus::GameOver;
    log::info!("ship destroyed on frame {} with score {}", state.frame, state.score);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. Does nothing once the game is over.
pub fn tick(state: &mut GameState, controls: Controls, rng: &mut impl Rng) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.frame += 1;
    advance_entities(state);
    apply_controls(state, controls);
    spawn_policy(state, rng);
    bomb_drop_policy(state, rng);
    collision_policy(state);
}
