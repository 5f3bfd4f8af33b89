//! The world: owns every entity and runs the simulation.
//!
//! Three clocks drive it, all fed from [`World::advance`]:
//!
//! - the physics sub-tick (~60 Hz): character movement, enemy motion, bubble
//!   travel, animation timers;
//! - the gameplay tick (200 ms): contacts, attack latches, pickups, the boss
//!   trigger, bubble hits and the removal sweep, in that order;
//! - the character's animation step, owned by the character itself.
//!
//! [`World::render`] is called once per display frame. Besides drawing it
//! advances the boss, which chases the player at display rate.

use log::{debug, info, trace};
use rand::rngs::StdRng;

use crate::audio::Audio;
use crate::config::GameConfig;
use crate::entities::{
    AttackKind, BossHit, Bubble, Character, CollectableKind, Enemy, ProjectileHit, WindUpEnd,
};
use crate::error::Result;
use crate::geometry::collides;
use crate::hud::{fill_percentage, StatusBar};
use crate::input::{InputState, Latch};
use crate::level::Level;
use crate::render::{Frame, RenderSurface};
use crate::schedule::FixedStep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Lose,
}

/// Receives the end of the session. Called at most once per world.
pub trait GameEndListener {
    fn notify_game_end(&mut self, result: GameResult);
}

pub struct World {
    config: GameConfig,
    level: Level,
    character: Character,
    bubbles: Vec<Bubble>,

    coins_collected: u32,
    poison_ammo: u32,
    health_bar: StatusBar,
    coins_bar: StatusBar,
    poison_bar: StatusBar,
    camera_x: f64,

    input: InputState,
    primary_latch: Latch,
    secondary_latch: Latch,
    /// Held from the start of a poison wind-up until it ends.
    fire_lock: bool,

    endboss_triggered: bool,
    game_ended: bool,
    outcome: Option<GameResult>,

    now_ms: f64,
    physics: FixedStep,
    gameplay: FixedStep,
    rng: StdRng,

    audio: Audio,
    end_listener: Option<Box<dyn GameEndListener>>,
}

impl World {
    pub fn new(level: Level, config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        level.validate()?;
        info!(
            "world created: {} enemies, {} collectables, level end at x={}",
            level.enemies.len(),
            level.collectables.len(),
            level.bounds.end_x
        );
        let character = Character::new(&config);
        let camera_x = character.camera_x();
        Ok(World {
            physics: FixedStep::new(config.physics_step_ms),
            gameplay: FixedStep::new(config.gameplay_tick_ms),
            config,
            level,
            character,
            bubbles: Vec::new(),
            coins_collected: 0,
            poison_ammo: 0,
            health_bar: StatusBar::health(),
            coins_bar: StatusBar::coins(),
            poison_bar: StatusBar::poison(),
            camera_x,
            input: InputState::default(),
            primary_latch: Latch::new(),
            secondary_latch: Latch::new(),
            fire_lock: false,
            endboss_triggered: false,
            game_ended: false,
            outcome: None,
            now_ms: 0.0,
            rng,
            audio: Audio::silent(),
            end_listener: None,
        })
    }

    pub fn with_audio(mut self, audio: Audio) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_end_listener(mut self, listener: Box<dyn GameEndListener>) -> Self {
        self.end_listener = Some(listener);
        self
    }

    /// Start background music.
    pub fn start(&mut self) {
        self.audio.play_bgm();
    }

    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn poison_ammo(&self) -> u32 {
        self.poison_ammo
    }

    pub fn health_bar(&self) -> &StatusBar {
        &self.health_bar
    }

    pub fn coins_bar(&self) -> &StatusBar {
        &self.coins_bar
    }

    pub fn poison_bar(&self) -> &StatusBar {
        &self.poison_bar
    }

    pub fn camera_x(&self) -> f64 {
        self.camera_x
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_fire_locked(&self) -> bool {
        self.fire_lock
    }

    pub fn endboss_triggered(&self) -> bool {
        self.endboss_triggered
    }

    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    pub fn outcome(&self) -> Option<GameResult> {
        self.outcome
    }

    pub fn boss(&self) -> Option<&crate::entities::Boss> {
        self.level.enemies.iter().find_map(Enemy::as_boss)
    }

    // ── Clocks ───────────────────────────────────────────────────────────────

    /// Advance simulated time. Runs every whole physics sub-tick that fits and
    /// every gameplay tick that falls due along the way.
    pub fn advance(&mut self, dt_ms: f64) {
        let step = self.physics.period_ms();
        for _ in 0..self.physics.advance(dt_ms) {
            self.now_ms += step;
            self.physics_step(step);
            for _ in 0..self.gameplay.advance(step) {
                self.gameplay_tick();
            }
        }
    }

    /// One physics sub-tick.
    pub fn physics_step(&mut self, dt_ms: f64) {
        let ended = self.character.update(dt_ms, self.now_ms, &self.input, &self.level.bounds, &self.config);
        if let Some(end) = ended {
            self.finish_wind_up(end);
        }
        self.camera_x = self.character.camera_x();

        for enemy in &mut self.level.enemies {
            enemy.update(dt_ms, &mut self.rng);
        }
        let lifetime = self.config.projectile_lifetime_ms;
        for bubble in &mut self.bubbles {
            bubble.update(dt_ms, lifetime);
        }
        for item in &mut self.level.collectables {
            item.update(dt_ms);
        }

        if self.character.death_animation_finished() {
            self.end_game(GameResult::Lose);
        }
    }

    fn finish_wind_up(&mut self, end: WindUpEnd) {
        if end.kind == AttackKind::Poison {
            self.fire_lock = false;
        }
        if !end.released {
            trace!("{:?} wind-up aborted", end.kind);
            return;
        }
        match end.kind {
            AttackKind::Normal => self.spawn_bubble(false),
            AttackKind::Poison => {
                if self.poison_ammo == 0 {
                    return;
                }
                self.poison_ammo -= 1;
                self.update_poison_bar();
                self.spawn_bubble(true);
            }
        }
    }

    fn spawn_bubble(&mut self, poison: bool) {
        let (x, y, left) = self.character.mouth();
        debug!("bubble spawned at ({x:.0}, {y:.0}), poison={poison}");
        self.bubbles.push(Bubble::new(x, y, poison, left, self.config.projectile_speed));
    }

    // ── Gameplay tick ────────────────────────────────────────────────────────

    /// One gameplay tick. Skipped entirely once the game has ended.
    pub fn gameplay_tick(&mut self) {
        if self.game_ended {
            return;
        }
        self.resolve_contacts();
        self.process_attacks();
        self.collect_pickups();
        self.check_boss_trigger();
        self.resolve_bubble_hits();
        self.sweep();
    }

    fn resolve_contacts(&mut self) {
        if self.character.is_dead() {
            return;
        }
        let inv = self.config.invulnerability_ms;
        for enemy in &self.level.enemies {
            let body = enemy.body();
            if !body.is_valid() {
                trace!("skipping {:?} with invalid body", enemy.kind());
                continue;
            }
            if !collides(&self.character.motion.body, body) {
                continue;
            }
            if self.character.motion.vitals.is_hurt(self.now_ms, inv) {
                continue;
            }
            let Some(contact) = enemy.contact(&self.config) else {
                continue;
            };
            if let Some(status) = contact.status {
                self.character.apply_status(status, self.config.status_duration_ms);
            }
            if self.character.hit(contact.damage, self.now_ms, &self.config) {
                debug!("{:?} hit the character for {}", enemy.kind(), contact.damage);
                self.audio.play_hurt();
                self.health_bar.set_percentage(f64::from(self.character.health()));
            }
        }
    }

    fn process_attacks(&mut self) {
        let primary = self.primary_latch.sample(self.input.primary_fire);
        let secondary = self.secondary_latch.sample(self.input.secondary_fire);
        if self.character.is_dead() {
            return;
        }
        if primary {
            self.character.start_attack(AttackKind::Normal, &self.config);
        }
        if secondary
            && self.poison_ammo > 0
            && !self.fire_lock
            && self.character.start_attack(AttackKind::Poison, &self.config)
        {
            self.fire_lock = true;
        }
    }

    fn collect_pickups(&mut self) {
        let hitbox = self.character.motion.body;
        let mut picked = Vec::new();
        self.level.collectables.retain(|item| {
            if !item.body.is_valid() || !collides(&hitbox, &item.body) {
                return true;
            }
            picked.push(item.kind);
            false
        });
        for kind in picked {
            match kind {
                CollectableKind::Coin => {
                    self.coins_collected += 1;
                    self.coins_bar
                        .set_percentage(fill_percentage(self.coins_collected, self.config.coins_target));
                    self.audio.play_coin();
                }
                CollectableKind::Poison => {
                    self.poison_ammo = (self.poison_ammo + 1).min(self.config.poison_max);
                    self.update_poison_bar();
                    self.audio.play_poison();
                }
            }
            debug!("picked up {kind:?}: coins={} poison={}", self.coins_collected, self.poison_ammo);
        }
    }

    fn update_poison_bar(&mut self) {
        self.poison_bar.set_percentage(fill_percentage(self.poison_ammo, self.config.poison_max));
    }

    fn check_boss_trigger(&mut self) {
        if self.endboss_triggered || self.character.motion.body.x < self.config.boss_trigger_x {
            return;
        }
        let Some(boss) = self.level.enemies.iter_mut().find_map(Enemy::as_boss_mut) else {
            return;
        };
        self.endboss_triggered = true;
        if boss.start_intro() {
            info!("boss intro triggered at x={:.0}", self.character.motion.body.x);
        }
    }

    fn resolve_bubble_hits(&mut self) {
        for bubble in self.bubbles.iter_mut().filter(|b| !b.is_pending_removal()) {
            if !bubble.motion.body.is_valid() {
                continue;
            }
            let target = self
                .level
                .enemies
                .iter_mut()
                .rev()
                .find(|e| e.is_collidable() && collides(&bubble.motion.body, e.body()));
            let Some(enemy) = target else {
                continue;
            };
            bubble.destroy();
            match enemy.on_projectile(bubble.poison) {
                ProjectileHit::Killed => {
                    debug!("{:?} killed by bubble", enemy.kind());
                    self.audio.play_hurt();
                }
                ProjectileHit::Boss(BossHit::Killed) => {
                    info!("boss defeated");
                    self.audio.play_hurt();
                }
                ProjectileHit::Boss(BossHit::Hurt) => {
                    debug!("boss wounded");
                    self.audio.play_hurt();
                }
                ProjectileHit::Boss(BossHit::Ignored) => trace!("boss ignored bubble"),
                ProjectileHit::Popped => trace!("bubble popped on {:?}", enemy.kind()),
            }
        }
    }

    fn sweep(&mut self) {
        self.level.enemies.retain(|e| !e.is_pending_removal());
        self.bubbles.retain(|b| !b.is_pending_removal());
    }

    // ── End of game ──────────────────────────────────────────────────────────

    /// Halt gameplay, stop music and hide the actors. Only the first call has
    /// any effect.
    pub fn end_game(&mut self, result: GameResult) {
        if self.game_ended {
            return;
        }
        info!("game over: {result:?}");
        self.game_ended = true;
        self.outcome = Some(result);
        self.audio.stop_bgm();
        if let Some(listener) = self.end_listener.as_mut() {
            listener.notify_game_end(result);
        }
    }

    // ── Render loop ──────────────────────────────────────────────────────────

    /// Draw one frame. `dt_ms` is the time since the previous frame and
    /// drives the boss.
    pub fn render(&mut self, dt_ms: f64, surface: &mut dyn RenderSurface) {
        let mut frame = Frame::begin(surface);

        if !self.game_ended {
            self.update_boss(dt_ms);
        }

        frame.translate(self.camera_x);
        frame.draw_all(&self.level.backgrounds);
        frame.draw_all(&self.level.collectables);
        if let Some(barrier) = &self.level.barrier {
            frame.draw(barrier);
        }
        frame.translate(-self.camera_x);

        if !self.game_ended {
            frame.draw(&self.poison_bar);
            frame.draw(&self.health_bar);
            frame.draw(&self.coins_bar);

            frame.translate(self.camera_x);
            frame.draw(&self.character);
            frame.draw_all(&self.level.enemies);
            frame.draw_all(&self.bubbles);
            frame.translate(-self.camera_x);
        }

        frame.finish();
    }

    fn update_boss(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() || dt_ms < 0.0 {
            return;
        }
        let target = self.character.motion.body;
        let Some(boss) = self.level.enemies.iter_mut().find_map(Enemy::as_boss_mut) else {
            return;
        };
        boss.update(dt_ms, &target);
        if boss.take_defeat() {
            self.end_game(GameResult::Win);
        }
    }
}
