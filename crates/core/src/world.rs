//! World module - player, enemies, AI, and the round state machine.
//!
//! `World` owns everything a round needs: the generated map, the player, the
//! enemy list, the injected RNG, and the cosmetic flash timers. It is built
//! fully generated (`World::new` cannot produce a map-less world, so "tick
//! before generation" is unrepresentable) and is driven by the host once per
//! tick: `apply_input` then `update_ai_and_state`, then rendering reads it.
//!
//! Once the state reaches `GameOver` the simulation halts; input and AI are
//! ignored until an external `reset` regenerates the round.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::los::has_los;
use crate::map::{self, Generated, MazeMap};
use crate::rng::SimpleRng;
use maze_raider_types::{
    normalize_angle, wrap_angle, Difficulty, DifficultyParams, EngineConfig, GameEvent, GameState,
    Glyph, MovementIntent, ENEMY_GLYPH, ENEMY_HEALTH, ENEMY_MOVE_COOLDOWN, GUN_FLASH_TICKS,
    HIT_FLASH_TICKS, LOS_EPSILON, MAX_HP, SPAWN_LOS_RANGE, SPAWN_MIN_DISTANCE,
};

/// Player state, in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Facing, wrapped into `[0, 2π)`.
    pub angle: f32,
    pub hp: u8,
    pub running: bool,
}

impl Player {
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let (dx, dy) = (x - self.x, y - self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Dead,
}

/// One enemy. Dead enemies stay in the list (stable indices) and are skipped
/// by AI and rendering; the list only resets with the world.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub state: EnemyState,
    pub health: u8,
    move_timer: u32,
    shoot_timer: u32,
    pub glyph: &'static Glyph,
    pub height_scale: f32,
}

impl Enemy {
    fn spawn(x: f32, y: f32, params: &DifficultyParams, rng: &mut SimpleRng) -> Self {
        Self {
            x,
            y,
            state: EnemyState::Alive,
            health: ENEMY_HEALTH,
            move_timer: rng.next_between(ENEMY_MOVE_COOLDOWN.0, ENEMY_MOVE_COOLDOWN.1),
            shoot_timer: rng.next_between(params.shoot_cooldown.0, params.shoot_cooldown.1),
            glyph: &ENEMY_GLYPH,
            height_scale: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }
}

/// Complete round state.
#[derive(Debug, Clone)]
pub struct World {
    config: EngineConfig,
    difficulty: Difficulty,
    /// Resolved at generation time; difficulty changes only apply on reset.
    params: DifficultyParams,
    map: MazeMap,
    player: Player,
    enemies: Vec<Enemy>,
    state: GameState,
    rng: SimpleRng,
    hit_flash: u32,
    gun_flash: u32,
    events: Vec<GameEvent>,
}

impl World {
    /// Generate a fresh round from a seed.
    pub fn new(config: EngineConfig, difficulty: Difficulty, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let params = difficulty.params();
        let generated = map::generate(config.map_width, config.map_height, &mut rng);

        let player = Player {
            x: generated.player_start.0,
            y: generated.player_start.1,
            angle: generated.player_angle,
            hp: MAX_HP,
            running: false,
        };
        let enemies = spawn_enemies(&generated, &params, &mut rng);

        Self {
            config,
            difficulty,
            params,
            map: generated.map,
            player,
            enemies,
            state: GameState::Playing,
            rng,
            hit_flash: 0,
            gun_flash: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn map(&self) -> &MazeMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Remaining hit-flash ticks (player was shot recently).
    pub fn hit_flash(&self) -> u32 {
        self.hit_flash
    }

    /// Remaining gun-flash ticks (player fired recently).
    pub fn gun_flash(&self) -> u32 {
        self.gun_flash
    }

    /// Select the difficulty used by subsequent `reset` calls. Entities
    /// already alive are unaffected.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Discard the round and regenerate map, player, and enemies.
    pub fn reset(&mut self, seed: u32) {
        *self = World::new(self.config, self.difficulty, seed);
    }

    /// Drain pending notifications for the host.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one tick's input snapshot. Ignored once the round is over.
    pub fn apply_input(&mut self, intent: &MovementIntent) {
        if !self.state.is_playing() {
            return;
        }

        self.player.running = intent.run;
        if intent.turn_left {
            self.player.angle = wrap_angle(self.player.angle - self.config.turn_speed);
        }
        if intent.turn_right {
            self.player.angle = wrap_angle(self.player.angle + self.config.turn_speed);
        }

        let speed = self.config.move_speed
            * if intent.run {
                self.config.run_multiplier
            } else {
                1.0
            };
        let facing = self.player.angle;
        if intent.forward {
            self.try_step(facing, speed);
        }
        if intent.backward {
            self.try_step(facing + PI, speed);
        }
        if intent.strafe_left {
            self.try_step(facing - FRAC_PI_2, speed);
        }
        if intent.strafe_right {
            self.try_step(facing + FRAC_PI_2, speed);
        }

        if intent.fire {
            self.fire_gun();
        }
    }

    /// Atomic move: the candidate position is taken in full or not at all.
    /// There is deliberately no axis-separated sliding along walls.
    fn try_step(&mut self, angle: f32, speed: f32) {
        let nx = self.player.x + angle.cos() * speed;
        let ny = self.player.y + angle.sin() * speed;
        if self.map.is_floor(nx.floor() as i32, ny.floor() as i32) {
            self.player.x = nx;
            self.player.y = ny;
        }
    }

    /// Hitscan attack: nearest living enemy inside `fire_range` and the
    /// `fire_cone` half-angle around the facing takes one damage.
    pub fn fire_gun(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.gun_flash = GUN_FLASH_TICKS;

        let mut best: Option<(usize, f32)> = None;
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            let dist = self.player.distance_to(enemy.x, enemy.y);
            if dist > self.config.fire_range {
                continue;
            }
            let bearing = (enemy.y - self.player.y).atan2(enemy.x - self.player.x);
            let rel = normalize_angle(bearing - self.player.angle);
            if rel.abs() >= self.config.fire_cone {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }

        if let Some((i, _)) = best {
            let enemy = &mut self.enemies[i];
            enemy.health = enemy.health.saturating_sub(1);
            if enemy.health == 0 {
                enemy.state = EnemyState::Dead;
            }
        }
    }

    /// Run one tick of enemy AI, then the win/lose checks.
    ///
    /// A lethal hit transitions to `GameOver { won: false }` immediately and
    /// no further enemy acts within the same tick. The win check runs after
    /// all enemy updates: at least one enemy existed and none remain alive.
    pub fn update_ai_and_state(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        self.hit_flash = self.hit_flash.saturating_sub(1);
        self.gun_flash = self.gun_flash.saturating_sub(1);

        for i in 0..self.enemies.len() {
            let enemy = &mut self.enemies[i];
            if !enemy.is_alive() {
                continue;
            }

            // Wander: on expiry, try a one-tile offset onto floor.
            if enemy.move_timer == 0 {
                let dx = self.rng.next_range(3) as i32 - 1;
                let dy = self.rng.next_range(3) as i32 - 1;
                let nx = enemy.x + dx as f32;
                let ny = enemy.y + dy as f32;
                if self.map.is_floor(nx.floor() as i32, ny.floor() as i32) {
                    enemy.x = nx;
                    enemy.y = ny;
                }
                enemy.move_timer =
                    self.rng.next_between(ENEMY_MOVE_COOLDOWN.0, ENEMY_MOVE_COOLDOWN.1);
            } else {
                enemy.move_timer -= 1;
            }

            // Shoot: on expiry, reschedule, then fire only when the player is
            // in range, visible, and the difficulty roll passes.
            if enemy.shoot_timer == 0 {
                enemy.shoot_timer = self
                    .rng
                    .next_between(self.params.shoot_cooldown.0, self.params.shoot_cooldown.1);

                let dist = self.player.distance_to(enemy.x, enemy.y);
                let in_range = dist < self.config.engagement_range;
                if in_range
                    && has_los(
                        &self.map,
                        (enemy.x, enemy.y),
                        (self.player.x, self.player.y),
                        dist + LOS_EPSILON,
                    )
                    && self.rng.chance(self.params.shoot_chance)
                {
                    self.player.hp = self.player.hp.saturating_sub(1);
                    self.hit_flash = HIT_FLASH_TICKS;
                    self.events.push(GameEvent::PlayerHit {
                        hp_left: self.player.hp,
                    });
                    if self.player.hp == 0 {
                        self.state = GameState::GameOver {
                            won: false,
                            message: "YOU DIED",
                        };
                        self.events.push(GameEvent::GameOver { won: false });
                        return;
                    }
                }
            } else {
                enemy.shoot_timer -= 1;
            }
        }

        if !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive()) {
            self.state = GameState::GameOver {
                won: true,
                message: "YOU WIN",
            };
            self.events.push(GameEvent::GameOver { won: true });
        }
    }
}

/// Place enemies on shuffled spawn candidates: never closer than
/// [`SPAWN_MIN_DISTANCE`] to the start, and never with line of sight to it
/// within [`SPAWN_LOS_RANGE`]. If the maze is too open to satisfy both, the
/// remaining slots relax to the distance filter alone - placement never fails.
fn spawn_enemies(
    generated: &Generated,
    params: &DifficultyParams,
    rng: &mut SimpleRng,
) -> Vec<Enemy> {
    let start = generated.player_start;
    let mut pool = generated.spawn_candidates.clone();
    rng.shuffle(&mut pool);

    let centers: Vec<(f32, f32)> = pool
        .iter()
        .map(|&(x, y)| (x as f32 + 0.5, y as f32 + 0.5))
        .collect();

    let mut enemies: Vec<Enemy> = Vec::with_capacity(params.enemy_count);
    for &(cx, cy) in &centers {
        if enemies.len() == params.enemy_count {
            break;
        }
        let (dx, dy) = (cx - start.0, cy - start.1);
        if (dx * dx + dy * dy).sqrt() < SPAWN_MIN_DISTANCE {
            continue;
        }
        if has_los(&generated.map, (cx, cy), start, SPAWN_LOS_RANGE) {
            continue;
        }
        enemies.push(Enemy::spawn(cx, cy, params, rng));
    }

    if enemies.len() < params.enemy_count {
        for &(cx, cy) in &centers {
            if enemies.len() == params.enemy_count {
                break;
            }
            let (dx, dy) = (cx - start.0, cy - start.1);
            if (dx * dx + dy * dy).sqrt() < SPAWN_MIN_DISTANCE {
                continue;
            }
            if enemies.iter().any(|e| e.x == cx && e.y == cy) {
                continue;
            }
            enemies.push(Enemy::spawn(cx, cy, params, rng));
        }
    }

    enemies
}
