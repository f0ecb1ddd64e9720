//! Game entities and their per-kind movement, animation and lifetime rules.
//!
//! Every live entity sits in one arena keyed by a stable [`EntityId`].
//! Policies that need a particular kind filter the arena instead of keeping
//! their own collections.

use slotmap::{new_key_type, SlotMap};

use crate::constants::*;
use crate::geometry::{Rect, Size};

new_key_type! {
    /// Versioned handle into the entity arena. A handle to a destroyed
    /// entity never resolves to a newer one that reused its slot.
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlienSize {
    Small,
    Medium,
    Big,
}

impl AlienSize {
    pub const ALL: [AlienSize; 3] = [AlienSize::Small, AlienSize::Medium, AlienSize::Big];

    /// Speed magnitude in pixels per tick. Bigger aliens are slower.
    pub fn speed(self) -> i32 {
        match self {
            AlienSize::Small => SMALL_ALIEN_SPEED,
            AlienSize::Medium => MEDIUM_ALIEN_SPEED,
            AlienSize::Big => BIG_ALIEN_SPEED,
        }
    }
}

/// Which sprite sheet an entity draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Ship,
    SmallAlien,
    MediumAlien,
    BigAlien,
    Shot,
    Bomb,
    Explosion,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::Ship,
        SpriteId::SmallAlien,
        SpriteId::MediumAlien,
        SpriteId::BigAlien,
        SpriteId::Shot,
        SpriteId::Bomb,
        SpriteId::Explosion,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Sound effects requested by the simulation, played by the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Boom,
}

// ── Entity kinds ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// -1 facing left, 1 facing right.
    pub facing: i32,
    pub reloading: bool,
    pub origin_top: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub size: AlienSize,
    /// Signed horizontal speed; the sign is the direction of travel.
    pub velocity: i32,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub life: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Ship(Ship),
    Alien(Alien),
    Shot,
    Bomb,
    Explosion(Explosion),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub rect: Rect,
    pub kind: Kind,
    /// Index of the current animation frame in this entity's sprite sheet.
    pub visual: usize,
}

/// What happens to an entity after it advances one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Live,
    Remove,
    /// Remove, leaving an explosion behind (a bomb reaching the floor).
    Burst,
}

impl Entity {
    pub fn ship(size: Size, screen: &Rect) -> Self {
        let mut rect = Rect::at_origin(size);
        rect.set_mid_bottom(screen.mid_bottom());
        Entity {
            rect,
            kind: Kind::Ship(Ship {
                facing: -1,
                reloading: false,
                origin_top: rect.top,
            }),
            visual: 0,
        }
    }

    /// An alien at the top edge. Leftward aliens start against the right edge.
    pub fn alien(size: AlienSize, dims: Size, moving_right: bool, screen: &Rect) -> Self {
        let mut rect = Rect::at_origin(dims);
        let velocity = if moving_right { size.speed() } else { -size.speed() };
        if velocity < 0 {
            rect.set_right(screen.right());
        }
        Entity {
            rect,
            kind: Kind::Alien(Alien { size, velocity, frame: 0 }),
            visual: 0,
        }
    }

    /// A shot whose bottom centre sits on the gun.
    pub fn shot(size: Size, gun: (i32, i32)) -> Self {
        let mut rect = Rect::at_origin(size);
        rect.set_mid_bottom(gun);
        Entity { rect, kind: Kind::Shot, visual: 0 }
    }

    /// A bomb hanging just below the dropping alien.
    pub fn bomb(size: Size, dropper: &Rect) -> Self {
        let mut rect = Rect::at_origin(size);
        rect.set_mid_bottom(dropper.translated(0, BOMB_DROP_OFFSET).mid_bottom());
        Entity { rect, kind: Kind::Bomb, visual: 0 }
    }

    pub fn explosion(size: Size, on: &Rect) -> Self {
        let mut rect = Rect::at_origin(size);
        rect.set_center(on.center());
        Entity {
            rect,
            kind: Kind::Explosion(Explosion { life: EXPLOSION_LIFE }),
            visual: 0,
        }
    }

    pub fn sprite_id(&self) -> SpriteId {
        match &self.kind {
            Kind::Ship(_) => SpriteId::Ship,
            Kind::Alien(alien) => match alien.size {
                AlienSize::Small => SpriteId::SmallAlien,
                AlienSize::Medium => SpriteId::MediumAlien,
                AlienSize::Big => SpriteId::BigAlien,
            },
            Kind::Shot => SpriteId::Shot,
            Kind::Bomb => SpriteId::Bomb,
            Kind::Explosion(_) => SpriteId::Explosion,
        }
    }

    pub fn is_alien(&self) -> bool {
        matches!(self.kind, Kind::Alien(_))
    }

    pub fn is_shot(&self) -> bool {
        matches!(self.kind, Kind::Shot)
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self.kind, Kind::Bomb)
    }

    /// Advance one tick. The ship only moves on input, so it is left alone.
    pub fn advance(&mut self, screen: &Rect) -> Fate {
        match &mut self.kind {
            Kind::Ship(_) => Fate::Live,
            Kind::Alien(alien) => {
                self.rect.translate(alien.velocity, 0);
                if !screen.contains(&self.rect) {
                    alien.velocity = -alien.velocity;
                    self.rect.top = self.rect.bottom() + 1;
                    self.rect = self.rect.clamp(screen);
                }
                alien.frame += 1;
                self.visual = (alien.frame / ALIEN_ANIM_CYCLE) as usize % ALIEN_FRAMES;
                Fate::Live
            }
            Kind::Shot => {
                self.rect.translate(0, SHOT_SPEED);
                if self.rect.top < screen.top {
                    Fate::Remove
                } else {
                    Fate::Live
                }
            }
            Kind::Bomb => {
                self.rect.translate(0, BOMB_SPEED);
                if self.rect.bottom() >= BOMB_FLOOR {
                    Fate::Burst
                } else {
                    Fate::Live
                }
            }
            Kind::Explosion(explosion) => {
                explosion.life = explosion.life.saturating_sub(1);
                self.visual = (explosion.life / EXPLOSION_ANIM_CYCLE) as usize % 2;
                if explosion.life == 0 {
                    Fate::Remove
                } else {
                    Fate::Live
                }
            }
        }
    }

    /// Steer the ship. `direction` is -1, 0 or 1; other entities ignore it.
    pub fn steer(&mut self, direction: i32, screen: &Rect) {
        let Kind::Ship(ship) = &mut self.kind else {
            return;
        };
        if direction != 0 {
            ship.facing = direction;
        }
        self.rect.translate(direction * SHIP_SPEED, 0);
        self.rect = self.rect.clamp(screen);
        if direction < 0 {
            self.visual = 0;
        } else if direction > 0 {
            self.visual = 1;
        }
        self.rect.top = ship.origin_top - self.rect.left.div_euclid(SHIP_BOUNCE).rem_euclid(2);
    }

    /// The ship's firing point: offset toward its facing, on its top edge.
    pub fn gun_position(&self) -> Option<(i32, i32)> {
        match &self.kind {
            Kind::Ship(ship) => Some((ship.facing * GUN_OFFSET + self.rect.center_x(), self.rect.top)),
            _ => None,
        }
    }
}

// ── Sizes ─────────────────────────────────────────────────────────────────────

/// Collision box sizes, taken from the loaded sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitySizes {
    pub ship: Size,
    pub small_alien: Size,
    pub medium_alien: Size,
    pub big_alien: Size,
    pub shot: Size,
    pub bomb: Size,
    pub explosion: Size,
}

impl EntitySizes {
    pub fn alien(&self, size: AlienSize) -> Size {
        match size {
            AlienSize::Small => self.small_alien,
            AlienSize::Medium => self.medium_alien,
            AlienSize::Big => self.big_alien,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KillTally {
    pub small: u32,
    pub medium: u32,
    pub big: u32,
}

impl KillTally {
    pub fn record(&mut self, size: AlienSize) {
        match size {
            AlienSize::Small => self.small += 1,
            AlienSize::Medium => self.medium += 1,
            AlienSize::Big => self.big += 1,
        }
    }
}

/// Everything the loop mutates between frames.
#[derive(Clone, Debug)]
pub struct GameState {
    pub entities: SlotMap<EntityId, Entity>,
    /// `None` once the ship is destroyed.
    pub player: Option<EntityId>,
    /// The most recently spawned small alien, used as the bomb dropper.
    pub last_small_alien: Option<EntityId>,
    pub alien_respawn_timer: u32,
    pub score: u32,
    pub kills: KillTally,
    pub status: GameStatus,
    pub frame: u64,
    pub sizes: EntitySizes,
    pub screen: Rect,
    pub sound_cues: Vec<SoundCue>,
}

impl GameState {
    /// An empty playfield with no ship.
    pub fn new(sizes: EntitySizes) -> Self {
        GameState {
            entities: SlotMap::with_key(),
            player: None,
            last_small_alien: None,
            alien_respawn_timer: ALIEN_RESPAWN,
            score: 0,
            kills: KillTally::default(),
            status: GameStatus::Running,
            frame: 0,
            sizes,
            screen: Rect::screen(),
            sound_cues: Vec::new(),
        }
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(id))
    }

    /// The tracked bomb dropper, if it is still alive.
    pub fn bomb_dropper(&self) -> Option<&Entity> {
        self.last_small_alien.and_then(|id| self.entities.get(id))
    }

    pub fn count(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.entities.values().filter(|&e| pred(e)).count()
    }

    pub fn ids_where(&self, pred: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|&(_, e)| pred(e))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn spawn_explosion_on(&mut self, rect: &Rect) -> EntityId {
        let explosion = Entity::explosion(self.sizes.explosion, rect);
        self.entities.insert(explosion)
    }

    pub fn take_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }
}
