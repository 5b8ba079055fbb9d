//! Pure game-logic entry points.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the input, time and RNG it needs) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use log::{info, trace};
use rand::Rng;

use crate::barrier::layout_barriers;
use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::formation;
use crate::player::{self, FireTrigger, InputSnapshot};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: full formation, four barriers, ship at the
/// respawn anchor.  `now_ms` starts the enemy cadence timer.
pub fn init_state(config: GameConfig, now_ms: u64) -> GameState {
    let invaders = formation::spawn_invaders(&config.formation);
    let formation = formation::new_formation(&config.formation, invaders.len(), now_ms);
    let barriers = layout_barriers(config.screen.width, config.screen.height);
    let player = player::spawn_defender(&config);

    info!(
        "new game: {} invaders, {} barriers, {} lives",
        invaders.len(),
        barriers.len(),
        player.lives
    );

    GameState {
        config,
        player,
        invaders,
        formation,
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        barriers,
        score: 0,
        fire_trigger: FireTrigger::default(),
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Player phase ─────────────────────────────────────────────────────────────

/// Steer the ship and fire on a fresh press of the fire control.
fn player_phase(state: &mut GameState, input: &InputSnapshot) {
    player::steer(
        &mut state.player,
        input,
        state.config.screen.width,
        state.config.player.edge_margin,
    );
    if state.fire_trigger.press_edge(input.fire) {
        let bullet = player::fire(&state.player, state.config.bullets.player_speed);
        state.player_bullets.push(bullet);
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.
///
/// Order: player input, formation sweep, enemy fire, bullet movement, then
/// collision resolution.  A finished game is returned unchanged.
pub fn tick(
    state: &GameState,
    input: &InputSnapshot,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    next.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    player_phase(&mut next, input);

    // ── 2. Formation sweep ───────────────────────────────────────────────────
    let sweep = formation::advance(
        &mut next.formation,
        &mut next.invaders,
        &next.config.formation,
        next.config.screen.width,
    );

    // ── 3. Enemy fire ────────────────────────────────────────────────────────
    if let Some(bullet) = formation::try_fire(
        &mut next.formation,
        &next.invaders,
        &next.config.formation,
        now_ms,
        next.config.bullets.enemy_speed,
        rng,
    ) {
        next.enemy_bullets.push(bullet);
    }

    // ── 4. Bullets move, then collide ────────────────────────────────────────
    collision::advance_bullets(&mut next.player_bullets);
    collision::advance_bullets(&mut next.enemy_bullets);
    let report = collision::resolve(&mut next);

    // ── 5. Score & status ────────────────────────────────────────────────────
    apply_report(&mut next, &report);

    trace!(
        "tick {}: sweep={:?} invaders={} bullets={}/{}",
        next.frame,
        sweep,
        next.invaders.len(),
        next.player_bullets.len(),
        next.enemy_bullets.len()
    );
    next
}

fn apply_report(state: &mut GameState, report: &CollisionReport) {
    state.score += report.points;
    if !state.player.is_alive() {
        state.status = GameStatus::GameOver;
    }
}
