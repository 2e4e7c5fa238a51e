//! Circle Arena - a top-down survive-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `input`: Double-buffered keyboard snapshots and rising-edge detection
//! - `renderer`: Draw list generation for the host
//! - `platform`: Host abstraction (terminal and scripted hosts)
//! - `game_loop`: Frame driver tying a host to the simulation
//! - `settings`: JSON settings and rule overrides

pub mod game_loop;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{GamePhase, GameState, Rules, Variant};

/// Game configuration constants
pub mod consts {
    /// Logical window size the renderer draws into
    pub const WINDOW_WIDTH: i32 = 1280;
    pub const WINDOW_HEIGHT: i32 = 720;
    pub const WINDOW_TITLE: &str = "Circle Arena";

    /// Arena rectangle (left, top, right, bottom) centred in the window
    pub const ARENA_LEFT: i32 = 140;
    pub const ARENA_TOP: i32 = 60;
    pub const ARENA_RIGHT: i32 = 1140;
    pub const ARENA_BOTTOM: i32 = 660;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_RADIUS: f32 = 14.0;

    /// Enemy defaults (level 0)
    pub const ENEMY_RADIUS: f32 = 18.0;
    pub const ENEMY_BASE_SPEED: f32 = 3.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.2;
    pub const ENEMY_BASE_HP: i32 = 5;
    /// Enemy spawn offset from the arena's top-left corner
    pub const ENEMY_START_OFFSET: f32 = 80.0;
    /// Respawn distance inside the chosen edge
    pub const ENEMY_EDGE_INSET: f32 = 10.0;

    /// Bullet base stats before upgrades
    pub const BULLET_RADIUS: f32 = 6.0;
    pub const BULLET_DAMAGE: i32 = 1;
    pub const BULLET_SPEED: f32 = 12.0;
    /// Gap between the player's edge and a freshly fired bullet
    pub const BULLET_SPAWN_GAP: f32 = 4.0;

    /// Frame rate the hosts pace to
    pub const TARGET_FPS: u32 = 60;
}
