//! All game entity types: plain data plus their derived bounding rects.
//!
//! Positions are playfield pixels with the origin at the top-left corner and
//! `y` growing downward.

use crate::assets::SpriteId;
use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::player::FireTrigger;

pub const BULLET_WIDTH: i32 = 6;
pub const BULLET_HEIGHT: i32 = 12;
pub const INVADER_WIDTH: i32 = 40;
pub const INVADER_HEIGHT: i32 = 30;
pub const DEFENDER_WIDTH: i32 = 70;
pub const DEFENDER_HEIGHT: i32 = 60;
pub const BLOCK_SIZE: i32 = 6;
pub const LIFE_ICON_SIZE: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Which side fired a bullet.  Player bullets can only hurt invaders, enemy
/// bullets can only hurt the defender; both chip barriers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    /// Pixels per tick; negative travels up.
    pub vy: i32,
    pub side: Side,
}

impl Bullet {
    pub fn new(x: i32, y: i32, vy: i32, side: Side) -> Self {
        Bullet { x, y, vy, side }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn advance(&mut self) {
        self.y += self.vy;
    }
}

// ── Formation members ─────────────────────────────────────────────────────────

/// One member of the enemy formation.
///
/// The position is fractional so the slow early sweep speed accumulates
/// between ticks; the collision rect truncates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Invader {
    pub x: f32,
    pub y: f32,
    pub points: u32,
    pub sprite: SpriteId,
}

impl Invader {
    pub fn new(x: f32, y: f32, points: u32, sprite: SpriteId) -> Self {
        Invader { x, y, points, sprite }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.x, self.y, INVADER_WIDTH, INVADER_HEIGHT)
    }

    /// Spawn point for a bullet leaving the bottom-center of this invader.
    pub fn muzzle(&self) -> (i32, i32) {
        let r = self.rect();
        (r.x + INVADER_WIDTH / 2 - BULLET_WIDTH / 2, r.bottom())
    }
}

/// Horizontal sweep direction of the whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Movement and firing state shared by every invader.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationState {
    pub direction: Direction,
    /// Current sweep speed in pixels per tick.
    pub speed: f32,
    /// Number of invaders the formation started with.
    pub initial_count: usize,
    /// Clock reading of the last time the cadence timer elapsed.
    pub last_shot_ms: u64,
}

impl FormationState {
    pub fn killed(&self, live: usize) -> usize {
        self.initial_count.saturating_sub(live)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Defender {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub lives: u32,
}

impl Defender {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, DEFENDER_WIDTH, DEFENDER_HEIGHT)
    }

    /// Spawn point for a bullet leaving the top-center of the ship.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.x + DEFENDER_WIDTH / 2 - BULLET_WIDTH / 2, self.y)
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

// ── Barriers ──────────────────────────────────────────────────────────────────

/// A single destructible 6×6 cell of a barrier.
#[derive(Clone, Debug, PartialEq)]
pub struct BarrierBlock {
    pub x: i32,
    pub y: i32,
    /// Once false it stays false; dead blocks keep their slot.
    pub exists: bool,
}

impl BarrierBlock {
    pub fn new(x: i32, y: i32) -> Self {
        BarrierBlock { x, y, exists: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BLOCK_SIZE, BLOCK_SIZE)
    }

    pub fn destroy(&mut self) {
        self.exists = false;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrier {
    pub blocks: Vec<BarrierBlock>,
}

impl Barrier {
    pub fn live_blocks(&self) -> impl Iterator<Item = &BarrierBlock> {
        self.blocks.iter().filter(|b| b.exists)
    }

    pub fn live_count(&self) -> usize {
        self.live_blocks().count()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state, owned by the frame-loop driver and threaded
/// explicitly through every update function.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Defender,
    pub invaders: Vec<Invader>,
    pub formation: FormationState,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub barriers: Vec<Barrier>,
    /// Sum of the point values of every invader destroyed.
    pub score: u32,
    pub fire_trigger: FireTrigger,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn formation_cleared(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn screen_width(&self) -> i32 {
        self.config.screen.width
    }

    pub fn screen_height(&self) -> i32 {
        self.config.screen.height
    }
}
