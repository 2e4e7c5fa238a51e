//! Game state and core simulation types
//!
//! One `GameState` owns every entity of a run. It is built at startup,
//! mutated once per frame by `tick`, and dropped at exit.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rules::Rules;
use super::upgrades::BulletStats;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Enemy defeated, waiting for the player to pick an upgrade
    ChoosingUpgrade,
    /// Player ran out of hit points (terminal)
    GameOver,
}

/// Static play-field rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Arena {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edges as floats: (left, top, right, bottom)
    #[inline]
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.left as f32,
            self.top as f32,
            self.right as f32,
            self.bottom as f32,
        )
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Centre point (integer division, matching pixel placement)
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            ((self.left + self.right) / 2) as f32,
            ((self.top + self.bottom) / 2) as f32,
        )
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_LEFT, ARENA_TOP, ARENA_RIGHT, ARENA_BOTTOM)
    }
}

/// The player-controlled circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub hp: i32,
}

impl Player {
    pub fn new(pos: Vec2, hp: i32) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            hp,
        }
    }
}

/// The single AI enemy. Gets tougher every time it is defeated.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub hp: i32,
    pub level: u32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: ENEMY_BASE_SPEED,
            radius: ENEMY_RADIUS,
            hp: ENEMY_BASE_HP,
            level: 0,
        }
    }

    /// Recompute hp and speed for the current level
    pub fn restat(&mut self, hp_per_level: i32) {
        self.hp = ENEMY_BASE_HP + hp_per_level * self.level as i32;
        self.speed = ENEMY_BASE_SPEED + ENEMY_SPEED_PER_LEVEL * self.level as f32;
    }

    /// Seek: step straight toward `target` at the current speed
    pub fn seek(&mut self, target: Vec2) {
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed;
    }
}

/// A projectile slot
#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
    pub alive: bool,
}

/// Fixed-capacity bullet arena.
///
/// Slots are allocated by scanning for the first dead one and freed by
/// clearing `alive`. The slot count is set once and never changes.
#[derive(Debug, Clone)]
pub struct BulletPool {
    slots: Box<[Bullet]>,
}

impl BulletPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Bullet::default(); capacity].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Place a bullet in the first free slot. Returns the slot index, or
    /// `None` when every slot is in use.
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, radius: f32, damage: i32) -> Option<usize> {
        let index = self.slots.iter().position(|b| !b.alive)?;
        self.slots[index] = Bullet {
            pos,
            vel,
            radius,
            damage,
            alive: true,
        };
        Some(index)
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.slots.get(index)
    }

    pub fn free(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.alive = false;
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.alive = false;
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|b| b.alive).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|b| b.alive)
    }

    /// Live bullets in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.alive)
    }

    /// Mutable access to live bullets with their slot indices
    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (usize, &mut Bullet)> {
        self.slots.iter_mut().enumerate().filter(|(_, b)| b.alive)
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Rules this run was started with (never changes mid-run)
    pub rules: Rules,
    pub arena: Arena,
    pub phase: GamePhase,
    pub player: Player,
    pub enemy: Enemy,
    pub bullets: BulletPool,
    /// Base stats for newly fired bullets (upgrades modify these)
    pub bullet_stats: BulletStats,
    /// Frames until the next shot is allowed
    pub fire_cooldown: u32,
    /// Simulation tick counter
    pub frame: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given rules and seed
    pub fn new(rules: Rules, seed: u64) -> Self {
        let arena = Arena::default();
        Self {
            seed,
            player: Player::new(arena.center(), rules.player_hp),
            enemy: Enemy::new(enemy_start(&arena)),
            bullets: BulletPool::with_capacity(rules.bullet_capacity),
            bullet_stats: BulletStats::default(),
            fire_cooldown: 0,
            frame: 0,
            phase: GamePhase::Playing,
            arena,
            rules,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Put every entity back to its starting values. The arena, rules and
    /// RNG stream carry over.
    pub fn reset(&mut self) {
        self.player = Player::new(self.arena.center(), self.rules.player_hp);
        self.enemy = Enemy::new(enemy_start(&self.arena));
        self.bullets.clear();
        self.bullet_stats = BulletStats::default();
        self.fire_cooldown = 0;
        self.phase = GamePhase::Playing;
    }

    /// Level the enemy up and drop it on a random point just inside one of the four edges
    pub fn respawn_enemy_on_edge(&mut self) {
        self.enemy.level += 1;
        self.enemy.restat(self.rules.enemy_hp_per_level);

        let a = self.arena;
        let (left, top, right, bottom) = a.bounds();
        let along_y = top + self.rng.random_range(0..a.height()) as f32;
        let along_x = left + self.rng.random_range(0..a.width()) as f32;
        self.enemy.pos = match self.rng.random_range(0..4) {
            0 => Vec2::new(left + ENEMY_EDGE_INSET, along_y),
            1 => Vec2::new(right - ENEMY_EDGE_INSET, along_y),
            2 => Vec2::new(along_x, top + ENEMY_EDGE_INSET),
            _ => Vec2::new(along_x, bottom - ENEMY_EDGE_INSET),
        };
    }

    /// Level the enemy up and drop it on a random interior point
    pub fn respawn_enemy_inside(&mut self) {
        self.enemy.level += 1;
        self.enemy.restat(self.rules.enemy_hp_per_level);

        let a = self.arena;
        let x = a.left + self.rng.random_range(0..a.width());
        let y = a.top + self.rng.random_range(0..a.height());
        self.enemy.pos = Vec2::new(x as f32, y as f32);
    }
}

fn enemy_start(arena: &Arena) -> Vec2 {
    Vec2::new(
        arena.left as f32 + ENEMY_START_OFFSET,
        arena.top as f32 + ENEMY_START_OFFSET,
    )
}
