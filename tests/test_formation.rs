use space_invaders::assets::SpriteId;
use space_invaders::config::FormationConfig;
use space_invaders::entities::*;
use space_invaders::formation::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const SCREEN_W: i32 = 600;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn invader_at(x: f32, y: f32) -> Invader {
    Invader::new(x, y, 10, SpriteId::Invader3)
}

fn formation(direction: Direction, initial_count: usize) -> FormationState {
    FormationState {
        direction,
        speed: 0.3,
        initial_count,
        last_shot_ms: 0,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── spawn_invaders ────────────────────────────────────────────────────────────

#[test]
fn spawn_full_grid() {
    let invaders = spawn_invaders(&FormationConfig::default());
    assert_eq!(invaders.len(), 40);

    let first = &invaders[0];
    assert_eq!((first.x, first.y), (40.0, 80.0));
    assert_eq!(first.points, 30);
    assert_eq!(first.sprite, SpriteId::Invader1);

    let last = &invaders[39];
    assert_eq!((last.x, last.y), (472.0, 224.0));
    assert_eq!(last.points, 10);
}

#[test]
fn spawn_row_points_and_sprites() {
    let invaders = spawn_invaders(&FormationConfig::default());
    let row = |r: usize| &invaders[r * 10];
    assert_eq!((row(0).points, row(0).sprite), (30, SpriteId::Invader1));
    assert_eq!((row(1).points, row(1).sprite), (20, SpriteId::Invader2));
    assert_eq!((row(2).points, row(2).sprite), (10, SpriteId::Invader3));
    assert_eq!((row(3).points, row(3).sprite), (10, SpriteId::Invader3));
}

#[test]
fn new_formation_starts_right_at_base_speed() {
    let f = new_formation(&FormationConfig::default(), 40, 1234);
    assert_eq!(f.direction, Direction::Right);
    assert!(approx(f.speed, 0.3));
    assert_eq!(f.initial_count, 40);
    assert_eq!(f.last_shot_ms, 1234);
}

// ── speed ─────────────────────────────────────────────────────────────────────

#[test]
fn speed_grows_with_kills() {
    let cfg = FormationConfig::default();
    assert!(approx(speed_for(&cfg, 0), 0.3));
    assert!(approx(speed_for(&cfg, 10), 1.0));
    for killed in 1..=40 {
        assert!(speed_for(&cfg, killed) > speed_for(&cfg, killed - 1));
    }
}

#[test]
fn advance_uses_kill_count_for_speed() {
    let cfg = FormationConfig::default();
    let mut invaders = spawn_invaders(&cfg);
    invaders.truncate(35);
    let mut f = formation(Direction::Right, 40);
    advance(&mut f, &mut invaders, &cfg, SCREEN_W);
    assert!(approx(f.speed, 0.3 + 5.0 * 0.07));
    assert!(approx(invaders[0].x, 40.0 + 0.65));
}

// ── movement & bounce ─────────────────────────────────────────────────────────

#[test]
fn advance_shifts_every_invader() {
    let cfg = FormationConfig::default();
    let mut invaders = spawn_invaders(&cfg);
    let before = invaders.clone();
    let mut f = formation(Direction::Right, 40);

    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Shifted);
    for (b, a) in before.iter().zip(&invaders) {
        assert!(approx(a.x, b.x + 0.3));
        assert_eq!(a.y, b.y);
    }
    assert_eq!(f.direction, Direction::Right);
}

#[test]
fn left_edge_bounce_drops_without_moving() {
    // Left-most invader at x=4 heading left: the whole formation drops and
    // turns around, and nobody moves sideways this tick.
    let cfg = FormationConfig::default();
    let mut invaders = vec![invader_at(4.0, 80.0), invader_at(100.0, 80.0), invader_at(200.0, 128.0)];
    let before = invaders.clone();
    let mut f = formation(Direction::Left, 3);

    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Dropped);
    assert_eq!(f.direction, Direction::Right);
    for (b, a) in before.iter().zip(&invaders) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y + 18.0);
    }
}

#[test]
fn right_edge_bounce_drops_without_moving() {
    let cfg = FormationConfig::default();
    // prospective right edge 555.3 + 40 passes 600 - 8
    let mut invaders = vec![invader_at(100.0, 80.0), invader_at(555.0, 80.0)];
    let mut f = formation(Direction::Right, 2);

    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Dropped);
    assert_eq!(f.direction, Direction::Left);
    assert_eq!(invaders[0].x, 100.0);
    assert_eq!(invaders[1].x, 555.0);
    assert_eq!(invaders[0].y, 98.0);
    assert_eq!(invaders[1].y, 98.0);
}

#[test]
fn no_bounce_just_inside_margin() {
    let cfg = FormationConfig::default();
    // prospective 8.5 is still right of the margin
    let mut invaders = vec![invader_at(8.8, 80.0)];
    let mut f = formation(Direction::Left, 1);
    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Shifted);
    assert!(approx(invaders[0].x, 8.5));
    assert_eq!(invaders[0].y, 80.0);
}

#[test]
fn bounce_is_followed_by_sweep_in_new_direction() {
    let cfg = FormationConfig::default();
    let mut invaders = vec![invader_at(4.0, 80.0)];
    let mut f = formation(Direction::Left, 1);

    advance(&mut f, &mut invaders, &cfg, SCREEN_W);
    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Shifted);
    assert!(approx(invaders[0].x, 4.3));
    assert_eq!(invaders[0].y, 98.0);
}

#[test]
fn one_member_triggers_bounce_for_all() {
    let cfg = FormationConfig::default();
    let mut invaders = spawn_invaders(&cfg);
    // Only the right-most column is near the edge
    for inv in invaders.iter_mut().filter(|i| i.x > 400.0) {
        inv.x = 555.0;
    }
    let mut f = formation(Direction::Right, 40);
    assert_eq!(advance(&mut f, &mut invaders, &cfg, SCREEN_W), Sweep::Dropped);
    assert!(invaders.iter().all(|i| (i.y - 80.0) % 48.0 == 18.0));
}

#[test]
fn empty_formation_is_idle() {
    let cfg = FormationConfig::default();
    let mut f = formation(Direction::Right, 40);
    assert_eq!(advance(&mut f, &mut [], &cfg, SCREEN_W), Sweep::Idle);
    assert_eq!(f.direction, Direction::Right);
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fire_waits_for_interval() {
    let cfg = FormationConfig::default();
    let invaders = spawn_invaders(&cfg);
    let mut f = formation(Direction::Right, 40);
    let mut rng = seeded_rng();

    assert!(try_fire(&mut f, &invaders, &cfg, 2500, 6, &mut rng).is_none());
    assert_eq!(f.last_shot_ms, 0);

    let bullet = try_fire(&mut f, &invaders, &cfg, 2501, 6, &mut rng).expect("shot due");
    assert_eq!(bullet.side, Side::Enemy);
    assert_eq!(bullet.vy, 6);
    assert!(invaders.iter().any(|i| i.muzzle() == (bullet.x, bullet.y)));
    assert_eq!(f.last_shot_ms, 2501);

    assert!(try_fire(&mut f, &invaders, &cfg, 2600, 6, &mut rng).is_none());
}

#[test]
fn empty_formation_never_fires_but_timer_advances() {
    let cfg = FormationConfig::default();
    let mut f = formation(Direction::Right, 40);
    let mut rng = seeded_rng();
    assert!(try_fire(&mut f, &[], &cfg, 3000, 6, &mut rng).is_none());
    assert_eq!(f.last_shot_ms, 3000);
}

fn count_shots(step_ms: u64) -> Vec<u64> {
    let cfg = FormationConfig::default();
    let invaders = spawn_invaders(&cfg);
    let mut f = formation(Direction::Right, 40);
    let mut rng = seeded_rng();
    let mut shots = Vec::new();
    let mut now = 0;
    while now < 10_000 {
        if try_fire(&mut f, &invaders, &cfg, now, 6, &mut rng).is_some() {
            shots.push(now);
        }
        now += step_ms;
    }
    shots
}

#[test]
fn cadence_independent_of_tick_rate() {
    let slow = count_shots(16);
    let fast = count_shots(1);
    assert_eq!(slow.len(), 3);
    assert_eq!(fast.len(), 3);
    for shots in [&slow, &fast] {
        for pair in shots.windows(2) {
            assert!(pair[1] - pair[0] > 2500);
        }
    }
}

#[test]
fn shooter_choice_is_seed_deterministic() {
    let cfg = FormationConfig::default();
    let invaders = spawn_invaders(&cfg);
    let shoot = || {
        let mut f = formation(Direction::Right, 40);
        try_fire(&mut f, &invaders, &cfg, 5000, 6, &mut seeded_rng())
    };
    assert_eq!(shoot(), shoot());
}
