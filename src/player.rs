//! Defender movement, firing and damage.

use log::debug;

use crate::config::GameConfig;
use crate::entities::{Bullet, Defender, Side, DEFENDER_WIDTH};

/// Logical controls sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Turns the level-triggered fire signal into one shot per press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FireTrigger {
    held: bool,
}

impl FireTrigger {
    /// Returns true only on the tick the fire signal goes from released to
    /// pressed.
    pub fn press_edge(&mut self, fire: bool) -> bool {
        let edge = fire && !self.held;
        self.held = fire;
        edge
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Result of an enemy bullet striking the defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// A life was lost and the ship moved back to the respawn anchor.
    Respawned,
    /// The last life was lost.
    Destroyed,
}

pub fn spawn_defender(config: &GameConfig) -> Defender {
    let (x, y) = respawn_anchor(config.screen.width, config.screen.height);
    Defender {
        x,
        y,
        speed: config.player.speed,
        lives: config.player.lives,
    }
}

/// Fixed position the ship returns to after every non-fatal hit.
pub fn respawn_anchor(screen_width: i32, screen_height: i32) -> (i32, i32) {
    (screen_width / 2 - DEFENDER_WIDTH / 2, screen_height - 80)
}

/// Inclusive horizontal range the ship's left edge may occupy.
pub fn x_bounds(screen_width: i32, margin: i32) -> (i32, i32) {
    let lo = margin;
    let hi = (screen_width - DEFENDER_WIDTH - margin).max(lo);
    (lo, hi)
}

/// Apply one tick of horizontal input.  Holding both directions cancels out.
pub fn steer(player: &mut Defender, input: &InputSnapshot, screen_width: i32, margin: i32) {
    let mut dx = 0;
    if input.move_left {
        dx -= player.speed;
    }
    if input.move_right {
        dx += player.speed;
    }
    let (lo, hi) = x_bounds(screen_width, margin);
    player.x = (player.x + dx).clamp(lo, hi);
}

pub fn fire(player: &Defender, bullet_speed: i32) -> Bullet {
    let (x, y) = player.muzzle();
    Bullet::new(x, y, -bullet_speed, Side::Player)
}

/// Take one hit: lose a life and either respawn or die where hit.
pub fn take_hit(player: &mut Defender, screen_width: i32, screen_height: i32) -> HitOutcome {
    player.lives = player.lives.saturating_sub(1);
    if player.is_alive() {
        let (x, y) = respawn_anchor(screen_width, screen_height);
        player.x = x;
        player.y = y;
        debug!("defender hit, {} lives left", player.lives);
        HitOutcome::Respawned
    } else {
        debug!("defender destroyed");
        HitOutcome::Destroyed
    }
}

