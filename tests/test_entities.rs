use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sharkie::anim::PufferColor;
use sharkie::config::GameConfig;
use sharkie::entities::*;
use sharkie::geometry::{collides, Body, Inset};
use sharkie::input::InputState;
use sharkie::level::Bounds;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Health & invulnerability ──────────────────────────────────────────────────

#[test]
fn health_stays_within_bounds() {
    let mut rng = seeded_rng();
    let mut v = Vitals::new();
    let mut now = 0.0;
    for _ in 0..500 {
        now += 700.0;
        v.hit(rng.gen_range(-50..=60), now, 600.0);
        assert!((0..=Vitals::MAX_HEALTH).contains(&v.health()));
    }
}

#[test]
fn second_hit_inside_window_is_ignored() {
    let mut v = Vitals::new();
    assert!(v.hit(5, 0.0, 600.0));
    assert!(!v.hit(5, 599.0, 600.0));
    assert_eq!(v.health(), 95);
    assert_eq!(v.last_hit_at_ms(), Some(0.0));
    assert!(v.hit(5, 600.0, 600.0));
    assert_eq!(v.last_hit_at_ms(), Some(600.0));
}

#[test]
fn dead_at_zero_health() {
    let mut v = Vitals::new();
    v.hit(250, 0.0, 600.0);
    assert_eq!(v.health(), 0);
    assert!(v.is_dead());
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn collision_symmetric_with_equal_insets() {
    let mut rng = seeded_rng();
    let inset = Inset::new(4.0, 3.0, 2.0, 1.0);
    for _ in 0..1000 {
        let mut body = || {
            Body::new(
                rng.gen_range(0.0..200.0),
                rng.gen_range(0.0..200.0),
                rng.gen_range(1.0..80.0),
                rng.gen_range(1.0..80.0),
            )
            .with_inset(inset)
        };
        let a = body();
        let b = body();
        assert_eq!(collides(&a, &b), collides(&b, &a));
    }
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Body::new(0.0, 0.0, 10.0, 10.0);
    let b = Body::new(10.0, 0.0, 10.0, 10.0);
    assert!(!collides(&a, &b));
}

// ── Puffer fish ───────────────────────────────────────────────────────────────

#[test]
fn puffer_cycle_never_skips_a_mode() {
    let mut rng = seeded_rng();
    let mut puffer = PufferFish::new(500.0, 200.0, PufferColor::Green, &mut rng);
    let mut modes = vec![puffer.mode()];
    // start delay + longest normal phase + transition + inflated, twice over
    for _ in 0..(40_000 / 16) {
        puffer.update(16.0, &mut rng);
        if modes.last() != Some(&puffer.mode()) {
            modes.push(puffer.mode());
        }
    }
    assert!(modes.len() >= 4);
    assert_eq!(
        &modes[..4],
        &[PufferMode::Normal, PufferMode::Transitioning, PufferMode::Inflated, PufferMode::Normal]
    );
    for pair in modes.windows(2) {
        let ok = matches!(
            (pair[0], pair[1]),
            (PufferMode::Normal, PufferMode::Transitioning)
                | (PufferMode::Transitioning, PufferMode::Inflated)
                | (PufferMode::Inflated, PufferMode::Normal)
        );
        assert!(ok, "illegal transition {:?}", pair);
    }
}

#[test]
fn puffer_death_is_terminal_and_floats_away() {
    let mut rng = seeded_rng();
    let mut puffer = PufferFish::new(500.0, 200.0, PufferColor::Red, &mut rng);
    assert!(puffer.die());
    assert!(!puffer.die());
    let x = puffer.motion.body.x;
    for _ in 0..200 {
        puffer.update(16.0, &mut rng);
    }
    assert!(puffer.is_pending_removal());
    assert_relative_eq!(puffer.motion.body.x, x);
    assert_relative_eq!(puffer.motion.body.y, 200.0 - 36.0 * 5.0);
}

// ── Jellyfish ─────────────────────────────────────────────────────────────────

#[test]
fn jelly_toggles_once_per_danger_period() {
    let mut jelly = JellyFish::with_phase(800.0, 200.0, 0.0);
    let mut toggles = 0;
    let mut last = jelly.is_dangerous();
    for _ in 0..(60_000 / 16) {
        jelly.update(16.0);
        if jelly.is_dangerous() != last {
            toggles += 1;
            last = jelly.is_dangerous();
        }
    }
    assert_eq!(toggles, 10);
}

#[test]
fn jelly_oscillates_around_baseline() {
    let mut jelly = JellyFish::with_phase(800.0, 200.0, 0.0);
    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for _ in 0..1000 {
        jelly.update(16.0);
        lo = lo.min(jelly.motion.body.y);
        hi = hi.max(jelly.motion.body.y);
    }
    assert!(lo >= 200.0 - 155.0 - 1e-9);
    assert!(hi <= 200.0 + 155.0 + 1e-9);
    assert!(hi - lo > 300.0);
}

#[test]
fn harmless_jelly_contact_never_electrocutes() {
    let config = GameConfig::default();
    let jelly = Enemy::from(JellyFish::with_phase(0.0, 0.0, 0.0));
    let contact = jelly.contact(&config).expect("live jelly is harmful");
    assert_eq!(contact.status, Some(Status::Poisoned));

    let mut character = Character::new(&config);
    if let Some(status) = contact.status {
        character.apply_status(status, config.status_duration_ms);
    }
    assert!(character.is_poisoned());
    assert!(!character.is_electrocuted());
}

#[test]
fn dangerous_jelly_survives_bubbles() {
    let mut jelly = JellyFish::with_phase(0.0, 0.0, 0.0);
    jelly.update(6000.0);
    assert!(jelly.is_dangerous());
    let mut enemy = Enemy::from(jelly);
    assert_eq!(enemy.on_projectile(true), ProjectileHit::Popped);
    assert!(!enemy.is_dead());
}

#[test]
fn jelly_death_stops_oscillation() {
    let mut jelly = JellyFish::with_phase(0.0, 200.0, 0.0);
    jelly.update(500.0);
    assert!(jelly.die());
    let y = jelly.motion.body.y;
    jelly.update(100.0);
    assert_relative_eq!(jelly.motion.body.y, y);
    assert!(!jelly.is_dangerous());
}

// ── Boss ──────────────────────────────────────────────────────────────────────

fn far_target() -> Body {
    Body::new(0.0, 40.0, 230.0, 280.0)
}

#[test]
fn hidden_boss_ignores_update_and_hits() {
    let mut boss = Boss::new(5);
    boss.update(10_000.0, &far_target());
    assert_eq!(boss.state(), BossState::Hidden);
    assert_eq!(boss.take_hit(), BossHit::Ignored);
    assert_eq!(boss.hits_remaining(), 5);
}

#[test]
fn boss_intro_swims_then_chases() {
    let mut boss = Boss::new(5);
    assert!(boss.start_intro());
    assert!(!boss.start_intro());
    let mut seen = vec![boss.state()];
    for _ in 0..300 {
        boss.update(16.0, &far_target());
        if seen.last() != Some(&boss.state()) {
            seen.push(boss.state());
        }
    }
    assert_eq!(seen, vec![BossState::Intro, BossState::Swim, BossState::Chase]);
}

#[test]
fn boss_attacks_in_range_and_backs_off_out_of_range() {
    let mut boss = Boss::new(5);
    boss.start_intro();
    for _ in 0..300 {
        boss.update(16.0, &far_target());
    }
    assert_eq!(boss.state(), BossState::Chase);

    let near = boss.motion.body;
    boss.update(16.0, &near);
    assert_eq!(boss.state(), BossState::Attack);

    boss.update(16.0, &far_target());
    assert_eq!(boss.state(), BossState::Swim);
}

#[test]
fn boss_stays_inside_vertical_limits() {
    let mut boss = Boss::new(5);
    boss.start_intro();
    let deep = Body::new(4000.0, 5000.0, 230.0, 280.0);
    for _ in 0..2000 {
        boss.update(16.0, &deep);
    }
    assert!(boss.motion.body.y <= 270.0);
}

#[test]
fn only_poison_bubbles_wound_the_boss() {
    let mut boss = Boss::new(5);
    boss.start_intro();
    let mut enemy = Enemy::from(boss);
    for _ in 0..10 {
        enemy.on_projectile(false);
    }
    let boss = enemy.as_boss().expect("boss");
    assert_eq!(boss.hits_remaining(), 5);
    assert_eq!(boss.state(), BossState::Intro);

    let outcomes: Vec<ProjectileHit> = (0..5).map(|_| enemy.on_projectile(true)).collect();
    assert_eq!(outcomes[..4], [ProjectileHit::Boss(BossHit::Hurt); 4]);
    assert_eq!(outcomes[4], ProjectileHit::Boss(BossHit::Killed));
}

#[test]
fn dead_boss_is_terminal() {
    let mut boss = Boss::new(1);
    boss.start_intro();
    assert_eq!(boss.take_hit(), BossHit::Killed);
    assert_eq!(boss.state(), BossState::Dead);
    for _ in 0..5 {
        assert_eq!(boss.take_hit(), BossHit::Ignored);
    }
    assert_eq!(boss.hits_remaining(), 0);
    assert_eq!(boss.state(), BossState::Dead);
}

#[test]
fn boss_defeat_reported_once_after_death_clip() {
    let mut boss = Boss::new(1);
    boss.start_intro();
    boss.take_hit();
    assert!(!boss.take_defeat());
    for _ in 0..100 {
        boss.update(16.0, &far_target());
    }
    assert!(boss.is_pending_removal());
    assert!(boss.take_defeat());
    assert!(!boss.take_defeat());
}

#[test]
fn boss_contact_only_while_attacking() {
    let config = GameConfig::default();
    let mut boss = Boss::new(5);
    boss.start_intro();
    assert_eq!(Enemy::from(boss.clone()).contact(&config), None);
    for _ in 0..300 {
        boss.update(16.0, &far_target());
    }
    let near = boss.motion.body;
    boss.update(16.0, &near);
    let contact = Enemy::from(boss).contact(&config).expect("attacking boss hurts");
    assert_eq!(contact.damage, config.boss_contact_damage);
}

// ── Character ─────────────────────────────────────────────────────────────────

#[test]
fn statuses_are_mutually_exclusive() {
    let config = GameConfig::default();
    let mut c = Character::new(&config);
    c.apply_status(Status::Poisoned, 800.0);
    c.apply_status(Status::Electrocuted, 800.0);
    assert!(c.is_electrocuted());
    assert!(!c.is_poisoned());
}

#[test]
fn wind_up_cannot_be_retriggered() {
    let config = GameConfig::default();
    let mut c = Character::new(&config);
    assert!(c.start_attack(AttackKind::Normal, &config));
    assert!(!c.start_attack(AttackKind::Poison, &config));
    assert_eq!(c.attack_kind(), Some(AttackKind::Normal));
}

fn step_character(c: &mut Character, input: &InputState, config: &GameConfig, ms: f64, now: &mut f64) {
    let bounds = Bounds::default();
    for _ in 0..(ms / 16.0).ceil() as usize {
        *now += 16.0;
        c.update(16.0, *now, input, &bounds, config);
    }
}

#[test]
fn movement_is_clamped_to_level_bounds() {
    let config = GameConfig::default();
    let bounds = Bounds::default();
    let mut c = Character::new(&config);
    let mut now = 0.0;
    c.motion.body.x = bounds.end_x - 5.0;
    c.motion.body.y = bounds.top_y + 5.0;
    let up_right = InputState { right: true, up: true, ..InputState::default() };
    step_character(&mut c, &up_right, &config, 500.0, &mut now);
    assert_relative_eq!(c.motion.body.x, bounds.end_x);
    assert_relative_eq!(c.motion.body.y, bounds.top_y);

    c.motion.body.x = 5.0;
    c.motion.body.y = bounds.bottom_y - 5.0;
    let down_left = InputState { left: true, down: true, ..InputState::default() };
    step_character(&mut c, &down_left, &config, 500.0, &mut now);
    assert_relative_eq!(c.motion.body.x, 0.0);
    assert_relative_eq!(c.motion.body.y, bounds.bottom_y);
}

#[test]
fn idle_time_resets_on_movement_and_during_attacks() {
    let config = GameConfig::default();
    let mut c = Character::new(&config);
    let mut now = 0.0;
    let idle = InputState::default();

    step_character(&mut c, &idle, &config, 1000.0, &mut now);
    assert!(c.idle_ms() >= 1000.0);

    let right = InputState { right: true, ..InputState::default() };
    step_character(&mut c, &right, &config, 16.0, &mut now);
    assert_eq!(c.idle_ms(), 0.0);

    assert!(c.start_attack(AttackKind::Normal, &config));
    for _ in 0..20 {
        step_character(&mut c, &idle, &config, 16.0, &mut now);
        if c.is_attacking() {
            assert_eq!(c.idle_ms(), 0.0);
        }
    }
}

#[test]
fn long_idle_falls_asleep_and_movement_wakes() {
    let config = GameConfig::default();
    let mut c = Character::new(&config);
    let mut now = 0.0;
    step_character(&mut c, &InputState::default(), &config, 3000.0, &mut now);
    assert!(!c.is_asleep());
    step_character(&mut c, &InputState::default(), &config, 2000.0, &mut now);
    assert!(c.is_asleep());
    assert_eq!(c.pose(), CharacterPose::Sleeping);

    let down = InputState { down: true, ..InputState::default() };
    step_character(&mut c, &down, &config, 160.0, &mut now);
    assert!(!c.is_asleep());
    assert_eq!(c.pose(), CharacterPose::Swimming);
}
