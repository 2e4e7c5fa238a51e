//! Between-level upgrades
//!
//! Upgrades permanently raise the base stats of every bullet fired afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::{BULLET_DAMAGE, BULLET_RADIUS, BULLET_SPEED};

/// Base stats copied into each newly fired bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletStats {
    pub radius: f32,
    pub damage: i32,
    pub speed: f32,
}

impl Default for BulletStats {
    fn default() -> Self {
        Self {
            radius: BULLET_RADIUS,
            damage: BULLET_DAMAGE,
            speed: BULLET_SPEED,
        }
    }
}

/// The stat an upgrade modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    BulletSize,
    BulletDamage,
    BulletSpeed,
}

/// A selectable upgrade shown on the interstitial screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub description: &'static str,
}

/// Options in menu order; the player picks with keys 1..=3
pub const UPGRADES: [Upgrade; 3] = [
    Upgrade {
        kind: UpgradeKind::BulletSize,
        name: "Big Shot",
        description: "Bullet radius +2",
    },
    Upgrade {
        kind: UpgradeKind::BulletDamage,
        name: "Power Shot",
        description: "Bullet damage +1",
    },
    Upgrade {
        kind: UpgradeKind::BulletSpeed,
        name: "Quick Shot",
        description: "Bullet speed +3",
    },
];

const RADIUS_STEP: f32 = 2.0;
const DAMAGE_STEP: i32 = 1;
const SPEED_STEP: f32 = 3.0;

impl Upgrade {
    /// Look up a menu option by its 1-based key number
    pub fn from_choice(choice: u8) -> Option<&'static Upgrade> {
        let index = usize::from(choice).checked_sub(1)?;
        UPGRADES.get(index)
    }

    pub fn apply(&self, stats: &mut BulletStats) {
        match self.kind {
            UpgradeKind::BulletSize => stats.radius += RADIUS_STEP,
            UpgradeKind::BulletDamage => stats.damage += DAMAGE_STEP,
            UpgradeKind::BulletSpeed => stats.speed += SPEED_STEP,
        }
    }
}
