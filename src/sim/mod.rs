//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Fixed bullet pool, no per-frame allocation
//! - No rendering or platform dependencies

pub mod collision;
pub mod rules;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use collision::{circles_overlap, inside_arena, wrap_to_edge, wrap_with_radius};
pub use rules::{BoundaryPolicy, DeathPolicy, DefeatPolicy, Rules, Variant, ZeroAimPolicy};
pub use state::{Arena, Bullet, BulletPool, Enemy, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
pub use upgrades::{BulletStats, UPGRADES, Upgrade, UpgradeKind};
