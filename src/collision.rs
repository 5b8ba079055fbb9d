//! Per-tick bullet movement and collision resolution.
//!
//! Each bullet is handled on its own, testing in a fixed order: leaving the
//! playfield, then the opposing moving target, then barrier blocks.  The
//! first match removes the bullet, so one bullet destroys at most one thing.
//! Bullets are filtered with `retain_mut`, which visits every element exactly
//! once even while entries are dropped.

use log::debug;

use crate::entities::{Barrier, Bullet, Defender, GameState, Invader, Side};
use crate::geometry::Rect;
use crate::player::{self, HitOutcome};

/// What the resolver destroyed this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub invaders_destroyed: usize,
    pub points: u32,
    pub blocks_destroyed: usize,
    pub bullets_expired: usize,
    pub player_hits: u32,
    pub player_destroyed: bool,
}

pub fn advance_bullets(bullets: &mut [Bullet]) {
    for b in bullets.iter_mut() {
        b.advance();
    }
}

/// Whether the bullet has travelled more than `slack` pixels past the edge it
/// is heading toward.
pub fn is_off_screen(bullet: &Bullet, screen_height: i32, slack: i32) -> bool {
    match bullet.side {
        Side::Player => bullet.y < -slack,
        Side::Enemy => bullet.y > screen_height + slack,
    }
}

/// Deactivate the first live block, across all barriers in order, that the
/// rect overlaps.  Returns whether a block was hit.
pub fn strike_barriers(rect: &Rect, barriers: &mut [Barrier]) -> bool {
    let hit = barriers
        .iter_mut()
        .flat_map(|barrier| barrier.blocks.iter_mut())
        .find(|block| block.exists && block.rect().intersects(rect));
    match hit {
        Some(block) => {
            block.destroy();
            true
        }
        None => false,
    }
}

pub fn resolve_player_bullets(
    bullets: &mut Vec<Bullet>,
    invaders: &mut Vec<Invader>,
    barriers: &mut [Barrier],
    screen_height: i32,
    slack: i32,
    report: &mut CollisionReport,
) {
    bullets.retain_mut(|bullet| {
        if is_off_screen(bullet, screen_height, slack) {
            report.bullets_expired += 1;
            return false;
        }

        let rect = bullet.rect();
        if let Some(idx) = invaders.iter().position(|inv| inv.rect().intersects(&rect)) {
            let inv = invaders.remove(idx);
            debug!("invader worth {} destroyed at ({:.1}, {:.1})", inv.points, inv.x, inv.y);
            report.invaders_destroyed += 1;
            report.points += inv.points;
            return false;
        }

        if strike_barriers(&rect, barriers) {
            report.blocks_destroyed += 1;
            return false;
        }
        true
    });
}

pub fn resolve_enemy_bullets(
    bullets: &mut Vec<Bullet>,
    player: &mut Defender,
    barriers: &mut [Barrier],
    screen: (i32, i32),
    slack: i32,
    report: &mut CollisionReport,
) {
    let (screen_width, screen_height) = screen;
    bullets.retain_mut(|bullet| {
        if is_off_screen(bullet, screen_height, slack) {
            report.bullets_expired += 1;
            return false;
        }

        let rect = bullet.rect();
        if player.is_alive() && player.rect().intersects(&rect) {
            report.player_hits += 1;
            if player::take_hit(player, screen_width, screen_height) == HitOutcome::Destroyed {
                report.player_destroyed = true;
            }
            return false;
        }

        if strike_barriers(&rect, barriers) {
            report.blocks_destroyed += 1;
            return false;
        }
        true
    });
}

/// Run both passes over the current state.  Bullets must already have moved.
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let screen = (state.screen_width(), state.screen_height());
    let slack = state.config.bullets.offscreen_slack;

    resolve_player_bullets(
        &mut state.player_bullets,
        &mut state.invaders,
        &mut state.barriers,
        screen.1,
        slack,
        &mut report,
    );
    resolve_enemy_bullets(
        &mut state.enemy_bullets,
        &mut state.player,
        &mut state.barriers,
        screen,
        slack,
        &mut report,
    );

    report
}
