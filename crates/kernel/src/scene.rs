use arena_common::{AngleTransform, QuatTransform, FORWARD, RIGHT, UP};
use arena_input::{InputSource, Key};
use glam::{Quat, Vec2, Vec3};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;
use std::f32::consts::{PI, TAU};

use crate::collision;
use crate::config::{SceneConfig, SpawnPolicy};
use crate::dying::{DyingKind, DyingObject};
use crate::event::SceneEvent;

/// The game state: one player, enemies, projectiles and dying objects.
///
/// All lists are owned and mutated here only, inside [`update`](Self::update)
/// and [`spawn_projectile`](Self::spawn_projectile). Renderers and HUDs read
/// them between updates.
///
/// Spawn randomness comes from a generator seeded once at construction, so
/// two scenes with the same seed, config and inputs stay bit-identical.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    player: AngleTransform,
    enemies: Vec<QuatTransform>,
    projectiles: Vec<QuatTransform>,
    dying_objects: Vec<DyingObject>,
    killed_count: u64,
    seed: u64,
    rng: Pcg64Mcg,
    /// Mouse position seen at the previous tick.
    cursor: Vec2,
    since_last_spawn: f64,
    time: f64,
    tick: u64,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Scene with reference tunables.
    pub fn new(input: &impl InputSource, seed: u64) -> Self {
        Self::with_config(SceneConfig::default(), input, seed)
    }

    /// Scene with custom tunables. The config should have passed
    /// [`SceneConfig::validate`].
    pub fn with_config(config: SceneConfig, input: &impl InputSource, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid scene config");
        tracing::debug!(seed, policy = ?config.spawn_policy, "scene created");
        Self {
            // Primed so the very first tick may spawn.
            since_last_spawn: config.spawn_delay,
            config,
            player: AngleTransform::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            dying_objects: Vec::new(),
            killed_count: 0,
            seed,
            rng: Pcg64Mcg::seed_from_u64(seed),
            cursor: input.mouse_position(),
            time: 0.0,
            tick: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn player(&self) -> &AngleTransform {
        &self.player
    }

    /// Living enemies in spawn order.
    pub fn enemies(&self) -> &[QuatTransform] {
        &self.enemies
    }

    /// Live projectiles in firing order.
    pub fn projectiles(&self) -> &[QuatTransform] {
        &self.projectiles
    }

    /// Recent deaths still being animated.
    pub fn dying_objects(&self) -> &[DyingObject] {
        &self.dying_objects
    }

    /// Total kills since construction. Never decreases.
    pub fn killed_count(&self) -> u64 {
        self.killed_count
    }

    /// Simulation clock: sum of all elapsed times passed to `update`.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of `update` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the player to a pose directly (level start, scripted scenes).
    pub fn set_player(&mut self, player: AngleTransform) {
        debug_assert!(player.pitch_in_range(), "pitch out of range");
        self.player = player;
    }

    /// Place an enemy directly, bypassing the spawner.
    pub fn insert_enemy(&mut self, enemy: QuatTransform) {
        self.enemies.push(enemy);
    }

    /// Place a projectile directly, bypassing the player's muzzle.
    pub fn insert_projectile(&mut self, projectile: QuatTransform) {
        self.projectiles.push(projectile);
    }

    /// Fire one projectile from the player's eye along the look direction.
    ///
    /// No rate limit: every call fires.
    pub fn spawn_projectile(&mut self) {
        let look = self.player.look_direction();
        let muzzle = look * FORWARD * self.config.muzzle_offset;
        let transform = QuatTransform::new(
            self.player.position + self.config.head_offset + muzzle,
            look,
        );
        self.projectiles.push(transform);
        self.events.push(SceneEvent::ProjectileFired {
            transform,
            at: self.time,
        });
        tracing::trace!(position = ?transform.position, "projectile fired");
    }

    /// Advance the simulation by `elapsed` seconds.
    ///
    /// `elapsed` must be finite and non-negative; callers clamp clock
    /// anomalies before getting here.
    pub fn update(&mut self, input: &impl InputSource, elapsed: f64) {
        debug_assert!(
            elapsed.is_finite() && elapsed >= 0.0,
            "elapsed time must be finite and non-negative, got {elapsed}"
        );
        let _span = tracing::trace_span!("scene_update", tick = self.tick).entered();

        self.tick += 1;
        self.time += elapsed;
        self.move_player(input, elapsed);
        self.spawn_enemies(elapsed);
        self.advance_enemies(elapsed);
        self.move_projectiles(elapsed);
        self.resolve_collisions();
        self.cull_projectiles();
        self.prune_dying();

        debug_assert!(self.player.pitch_in_range());
    }

    fn move_player(&mut self, input: &impl InputSource, elapsed: f64) {
        // Key directions add up without renormalizing: diagonal movement is
        // faster than straight movement. That is the intended feel.
        let mut intent = Vec3::ZERO;
        if input.is_pressed(Key::Right) {
            intent += RIGHT;
        }
        if input.is_pressed(Key::Left) {
            intent -= RIGHT;
        }
        if input.is_pressed(Key::Forward) {
            intent += FORWARD;
        }
        if input.is_pressed(Key::Back) {
            intent -= FORWARD;
        }
        if input.is_pressed(Key::Up) {
            intent += UP;
        }
        if input.is_pressed(Key::Down) {
            intent -= UP;
        }
        if input.is_pressed(Key::Slow) {
            intent *= self.config.slow_factor;
        }

        let cursor = input.mouse_position();
        let delta = cursor - self.cursor;
        self.cursor = cursor;
        let yaw_shift = TAU * delta.x / self.config.x_sensitivity;
        let pitch_shift = -TAU * delta.y / self.config.y_sensitivity;
        self.player.look(yaw_shift, pitch_shift);

        self.player.position +=
            self.player.forward_direction() * intent * elapsed as f32 * self.config.move_speed;
    }

    fn spawn_enemies(&mut self, elapsed: f64) {
        self.since_last_spawn += elapsed;
        if self.since_last_spawn < self.config.spawn_delay
            || self.enemies.len() >= self.config.max_enemies
        {
            return;
        }
        self.since_last_spawn = 0.0;

        // All samples are drawn for both policies so the random stream does
        // not depend on the policy or on how many enemies are alive.
        let distance = self
            .rng
            .gen_range(self.config.spawn_distance_min..self.config.spawn_distance_max);
        let wing = self.config.spawn_cone_half_angle;
        let angle = if wing > 0.0 {
            self.rng.gen_range(-wing..wing)
        } else {
            0.0
        };
        let facing = self.rng.gen_range(0.0..TAU) - PI;

        let leader = match self.config.spawn_policy {
            SpawnPolicy::Scatter => None,
            SpawnPolicy::Column => self.enemies.last().copied(),
        };
        let enemy = match leader {
            Some(leader) => QuatTransform::new(
                leader.position - leader.orientation * FORWARD * self.config.column_spacing,
                leader.orientation * Quat::from_axis_angle(UP, facing / 10.0),
            ),
            None => QuatTransform::new(
                self.player.position
                    + self.player.forward_direction()
                        * Quat::from_axis_angle(UP, angle)
                        * FORWARD
                        * distance,
                Quat::from_axis_angle(UP, facing),
            ),
        };

        self.enemies.push(enemy);
        self.events.push(SceneEvent::EnemySpawned {
            transform: enemy,
            at: self.time,
        });
        tracing::debug!(
            position = ?enemy.position,
            alive = self.enemies.len(),
            "enemy spawned"
        );
    }

    fn advance_enemies(&mut self, elapsed: f64) {
        if self.config.enemy_speed == 0.0 {
            return;
        }
        let step = elapsed as f32 * self.config.enemy_speed;
        for enemy in &mut self.enemies {
            enemy.position += enemy.orientation * FORWARD * step;
        }
    }

    fn move_projectiles(&mut self, elapsed: f64) {
        let step = elapsed as f32 * self.config.projectile_speed;
        for projectile in &mut self.projectiles {
            projectile.position += projectile.orientation * FORWARD * step;
        }
    }

    /// Each projectile kills at most one enemy per tick: the first living one
    /// in list order it overlaps. Hits are flagged first and both lists are
    /// compacted afterwards.
    fn resolve_collisions(&mut self) {
        if self.projectiles.is_empty() || self.enemies.is_empty() {
            return;
        }
        let mut enemy_hit = vec![false; self.enemies.len()];
        let mut projectile_hit = vec![false; self.projectiles.len()];

        for (ip, projectile) in self.projectiles.iter().enumerate() {
            let victim = self.enemies.iter().enumerate().position(|(ie, enemy)| {
                !enemy_hit[ie]
                    && collision::hits(
                        projectile.position,
                        enemy.position,
                        self.config.head_offset,
                        self.config.collision_focal_sum,
                    )
            });
            let Some(ie) = victim else {
                continue;
            };
            enemy_hit[ie] = true;
            projectile_hit[ip] = true;

            let enemy = self.enemies[ie];
            let explosion_origin = projectile.position;
            let explosion_direction = projectile.facing() * self.config.projectile_speed;
            for (transform, kind) in [
                (enemy, DyingKind::Enemy),
                (*projectile, DyingKind::Projectile),
            ] {
                self.dying_objects.push(DyingObject {
                    transform,
                    explosion_origin,
                    explosion_direction,
                    kind,
                    death_start: self.time,
                    duration: self.config.death_duration,
                });
            }
            self.killed_count += 1;
            self.events.push(SceneEvent::Killed {
                enemy,
                projectile: *projectile,
                at: self.time,
            });
            tracing::debug!(killed = self.killed_count, at = ?explosion_origin, "enemy killed");
        }

        compact(&mut self.enemies, &enemy_hit);
        compact(&mut self.projectiles, &projectile_hit);
    }

    fn cull_projectiles(&mut self) {
        let center = self.player.position;
        let limit = self.config.cull_distance;
        let at = self.time;
        let events = &mut self.events;
        self.projectiles.retain(|p| {
            let keep = p.position.distance(center) <= limit;
            if !keep {
                events.push(SceneEvent::ProjectileCulled {
                    position: p.position,
                    at,
                });
            }
            keep
        });
    }

    fn prune_dying(&mut self) {
        let now = self.time;
        let events = &mut self.events;
        self.dying_objects.retain(|d| {
            let keep = !d.is_expired(now);
            if !keep {
                events.push(SceneEvent::DyingExpired { at: now });
            }
            keep
        });
    }

    /// Deterministic hash of the full simulation state, bit-exact.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_pose = |h: &mut u64, t: &QuatTransform| {
            for v in t.position.to_array() {
                mix(h, &v.to_le_bytes());
            }
            for v in t.orientation.to_array() {
                mix(h, &v.to_le_bytes());
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.time.to_le_bytes());
        mix(&mut h, &self.killed_count.to_le_bytes());
        for v in self.player.position.to_array() {
            mix(&mut h, &v.to_le_bytes());
        }
        mix(&mut h, &self.player.yaw.to_le_bytes());
        mix(&mut h, &self.player.pitch.to_le_bytes());
        mix(&mut h, &(self.enemies.len() as u64).to_le_bytes());
        for enemy in &self.enemies {
            mix_pose(&mut h, enemy);
        }
        mix(&mut h, &(self.projectiles.len() as u64).to_le_bytes());
        for projectile in &self.projectiles {
            mix_pose(&mut h, projectile);
        }
        mix(&mut h, &(self.dying_objects.len() as u64).to_le_bytes());
        for dying in &self.dying_objects {
            mix_pose(&mut h, &dying.transform);
            mix(&mut h, &dying.death_start.to_le_bytes());
        }
        h
    }
}

/// Drop every item whose flag is set, keeping order.
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    debug_assert_eq!(items.len(), remove.len());
    let mut flags = remove.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
