//! Rule sets
//!
//! Both game variants run through the same tick; everything that differs
//! between them is a field here so a settings file can mix and match.

use serde::{Deserialize, Serialize};

/// Which built-in rule preset to start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Wrap-around arena, enemy levels up on defeat, full reset on death
    #[default]
    Classic,
    /// Edge teleport, upgrade choice on defeat, terminal game over
    Upgrades,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Upgrades => "upgrades",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "1" => Some(Variant::Classic),
            "upgrades" | "upgrade" | "2" => Some(Variant::Upgrades),
            _ => None,
        }
    }

    /// Preset rules for this variant
    pub fn rules(&self) -> Rules {
        match self {
            Variant::Classic => Rules::classic(),
            Variant::Upgrades => Rules::upgrades(),
        }
    }
}

/// What happens when an entity crosses the arena rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Cross `edge ± radius`, reappear at the opposite edge offset by the same radius.
    /// Bullets wrap too.
    Wrap,
    /// Cross the bare edge, reappear on the opposite bare edge.
    /// Bullets leaving the rectangle are deactivated.
    ClampWrap,
}

/// What happens when the enemy's hit points reach zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatPolicy {
    /// Level up and reappear on a random arena edge immediately
    RespawnOnEdge,
    /// Pause for an upgrade pick, then respawn at a random interior point
    ChooseUpgrade,
}

/// What happens when the player dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathPolicy {
    /// Restore the initial state and keep playing
    Reset,
    /// Enter the terminal game over phase
    GameOver,
}

/// Firing with the cursor exactly on the player's centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroAimPolicy {
    /// No bullet is fired
    Suppress,
    /// A zero-velocity bullet is placed at the spawn point
    FireStationary,
}

/// Every tunable rule of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub boundary: BoundaryPolicy,
    pub on_enemy_defeat: DefeatPolicy,
    pub on_player_death: DeathPolicy,
    pub zero_aim: ZeroAimPolicy,
    /// Bullet slots available (fixed for the run)
    pub bullet_capacity: usize,
    /// Frames between shots (0 = only the pool limits firing)
    pub fire_cooldown_frames: u32,
    /// Spawn bullets at `player.radius + gap` along the aim instead of at the centre
    pub offset_bullet_spawn: bool,
    pub player_hp: i32,
    /// Distance the player is pushed away from the enemy on contact
    pub knockback: f32,
    /// Extra enemy hp per level (`hp = 5 + per_level * level`)
    pub enemy_hp_per_level: i32,
    /// Escape ends the run
    pub escape_quits: bool,
}

impl Rules {
    pub fn classic() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            on_enemy_defeat: DefeatPolicy::RespawnOnEdge,
            on_player_death: DeathPolicy::Reset,
            zero_aim: ZeroAimPolicy::Suppress,
            bullet_capacity: 64,
            fire_cooldown_frames: 6,
            offset_bullet_spawn: true,
            player_hp: 5,
            knockback: 24.0,
            enemy_hp_per_level: 1,
            escape_quits: true,
        }
    }

    pub fn upgrades() -> Self {
        Self {
            boundary: BoundaryPolicy::ClampWrap,
            on_enemy_defeat: DefeatPolicy::ChooseUpgrade,
            on_player_death: DeathPolicy::GameOver,
            zero_aim: ZeroAimPolicy::FireStationary,
            bullet_capacity: 50,
            fire_cooldown_frames: 0,
            offset_bullet_spawn: false,
            player_hp: 20,
            knockback: 0.0,
            enemy_hp_per_level: 2,
            escape_quits: false,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}
