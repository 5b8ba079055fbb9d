//! Enemy formation controller.
//!
//! The formation sweeps sideways as one unit.  When any member is about to
//! cross the edge margin in the direction of travel, the whole formation
//! drops instead of moving and reverses for the next tick.  The sweep speed
//! grows with every invader destroyed.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::SpriteId;
use crate::config::{FormationConfig, MAX_FORMATION_COLUMNS, MAX_FORMATION_ROWS};
use crate::entities::{Bullet, Direction, FormationState, Invader, Side, INVADER_WIDTH};

/// What the formation did on one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    /// Every invader moved sideways by the current speed.
    Shifted,
    /// Every invader dropped; nobody moved sideways.
    Dropped,
    /// No invaders left.
    Idle,
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Lay out the starting grid, row by row from the top.
pub fn spawn_invaders(config: &FormationConfig) -> Vec<Invader> {
    let count = config.row_points.len().saturating_mul(config.columns);
    let mut invaders = Vec::with_capacity(count.min(MAX_FORMATION_ROWS * MAX_FORMATION_COLUMNS));
    for (row, &points) in config.row_points.iter().enumerate() {
        let y = config.origin_y + row as f32 * config.spacing_y;
        let sprite = SpriteId::for_row(row);
        for col in 0..config.columns {
            let x = config.origin_x + col as f32 * config.spacing_x;
            invaders.push(Invader::new(x, y, points, sprite));
        }
    }
    invaders
}

pub fn new_formation(config: &FormationConfig, invader_count: usize, now_ms: u64) -> FormationState {
    FormationState {
        direction: Direction::Right,
        speed: config.base_speed,
        initial_count: invader_count,
        last_shot_ms: now_ms,
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Sweep speed after `killed` invaders have been destroyed.
pub fn speed_for(config: &FormationConfig, killed: usize) -> f32 {
    config.base_speed + killed as f32 * config.speed_increment
}

/// Whether `x` (an invader's left edge) lies past the margin on the side the
/// formation is heading toward.
fn crosses_margin(x: f32, direction: Direction, screen_width: f32, margin: f32) -> bool {
    match direction {
        Direction::Left => x <= margin,
        Direction::Right => x + INVADER_WIDTH as f32 >= screen_width - margin,
    }
}

/// Advance the formation by one tick.
///
/// The bounce decision looks only at prospective positions, before any
/// invader moves.
pub fn advance(
    state: &mut FormationState,
    invaders: &mut [Invader],
    config: &FormationConfig,
    screen_width: i32,
) -> Sweep {
    if invaders.is_empty() {
        return Sweep::Idle;
    }

    state.speed = speed_for(config, state.killed(invaders.len()));
    let dx = state.speed * state.direction.sign();
    let width = screen_width as f32;

    let bounce = invaders
        .iter()
        .any(|inv| crosses_margin(inv.x + dx, state.direction, width, config.edge_margin));

    if bounce {
        state.direction = state.direction.flipped();
        for inv in invaders.iter_mut() {
            inv.y += config.drop;
        }
        debug!(
            "formation bounced, now heading {:?} at speed {:.2}",
            state.direction, state.speed
        );
        Sweep::Dropped
    } else {
        for inv in invaders.iter_mut() {
            inv.x += dx;
        }
        Sweep::Shifted
    }
}

// ── Shooting ──────────────────────────────────────────────────────────────────

/// Fire from a random live invader once the cadence interval has elapsed.
///
/// The timer restarts whenever the interval elapses, even if nobody is left
/// to shoot.
pub fn try_fire<R: Rng + ?Sized>(
    state: &mut FormationState,
    invaders: &[Invader],
    config: &FormationConfig,
    now_ms: u64,
    bullet_speed: i32,
    rng: &mut R,
) -> Option<Bullet> {
    if now_ms.saturating_sub(state.last_shot_ms) <= config.shot_interval_ms {
        return None;
    }
    state.last_shot_ms = now_ms;

    let shooter = invaders.choose(rng)?;
    let (x, y) = shooter.muzzle();
    debug!("invader at ({x}, {y}) fired");
    Some(Bullet::new(x, y, bullet_speed, Side::Enemy))
}
