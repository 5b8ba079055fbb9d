use space_invaders::config::GameConfig;
use space_invaders::entities::*;
use space_invaders::player::*;

const SCREEN_W: i32 = 600;
const SCREEN_H: i32 = 700;
const MARGIN: i32 = 8;

fn defender() -> Defender {
    spawn_defender(&GameConfig::default())
}

fn input(left: bool, right: bool, fire: bool) -> InputSnapshot {
    InputSnapshot {
        move_left: left,
        move_right: right,
        fire,
    }
}

// ── spawn & respawn ───────────────────────────────────────────────────────────

#[test]
fn spawn_at_respawn_anchor() {
    let d = defender();
    assert_eq!((d.x, d.y), (265, 620));
    assert_eq!(d.speed, 6);
    assert_eq!(d.lives, 3);
    assert_eq!(respawn_anchor(SCREEN_W, SCREEN_H), (265, 620));
}

// ── steering ──────────────────────────────────────────────────────────────────

#[test]
fn steer_moves_by_speed() {
    let mut d = defender();
    steer(&mut d, &input(true, false, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 259);
    steer(&mut d, &input(false, true, false), SCREEN_W, MARGIN);
    steer(&mut d, &input(false, true, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 271);
}

#[test]
fn steer_both_directions_cancel() {
    let mut d = defender();
    steer(&mut d, &input(true, true, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 265);
}

#[test]
fn steer_clamps_left_margin() {
    let mut d = defender();
    d.x = 10;
    steer(&mut d, &input(true, false, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 8);
    steer(&mut d, &input(true, false, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 8);
}

#[test]
fn steer_clamps_right_margin() {
    let mut d = defender();
    d.x = 520;
    steer(&mut d, &input(false, true, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 522); // 600 - 70 - 8
    steer(&mut d, &input(false, true, false), SCREEN_W, MARGIN);
    assert_eq!(d.x, 522);
}

#[test]
fn steer_always_within_bounds() {
    let mut d = defender();
    let (lo, hi) = x_bounds(SCREEN_W, MARGIN);
    for i in 0..500 {
        let left = (i / 37) % 2 == 0;
        steer(&mut d, &input(left, !left, false), SCREEN_W, MARGIN);
        assert!(d.x >= lo && d.x <= hi, "x={} out of [{lo}, {hi}]", d.x);
    }
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_trigger_fires_once_per_press() {
    let mut t = FireTrigger::default();
    assert!(t.press_edge(true));
    assert!(!t.press_edge(true)); // still held
    assert!(t.is_held());
    assert!(!t.press_edge(false));
    assert!(!t.is_held());
    assert!(t.press_edge(true));
}

#[test]
fn fire_spawns_upward_bullet_at_muzzle() {
    let d = defender();
    let b = fire(&d, 8);
    assert_eq!((b.x, b.y), (297, 620));
    assert_eq!(b.vy, -8);
    assert_eq!(b.side, Side::Player);
}

// ── damage ────────────────────────────────────────────────────────────────────

#[test]
fn hit_with_lives_left_respawns() {
    let mut d = defender();
    d.lives = 2;
    d.x = 100;
    d.y = 500;
    assert_eq!(take_hit(&mut d, SCREEN_W, SCREEN_H), HitOutcome::Respawned);
    assert_eq!(d.lives, 1);
    assert_eq!((d.x, d.y), (265, 620));
}

#[test]
fn last_life_destroys() {
    let mut d = defender();
    d.lives = 1;
    d.x = 100;
    assert_eq!(take_hit(&mut d, SCREEN_W, SCREEN_H), HitOutcome::Destroyed);
    assert_eq!(d.lives, 0);
    assert!(!d.is_alive());
    assert_eq!(d.x, 100); // not moved
}

#[test]
fn lives_saturate_at_zero() {
    let mut d = defender();
    d.lives = 0;
    assert_eq!(take_hit(&mut d, SCREEN_W, SCREEN_H), HitOutcome::Destroyed);
    assert_eq!(d.lives, 0);
}
