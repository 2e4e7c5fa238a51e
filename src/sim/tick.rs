//! Per-frame simulation tick
//!
//! One call advances the run by exactly one rendered frame:
//! move player, fire, seek, boundaries, bullets, collisions.

use glam::Vec2;

use super::collision::{circles_overlap, inside_arena, wrap_to_edge, wrap_with_radius};
use super::rules::{BoundaryPolicy, DeathPolicy, DefeatPolicy, ZeroAimPolicy};
use super::state::{GamePhase, GameState};
use super::upgrades::Upgrade;
use crate::consts::BULLET_SPAWN_GAP;

/// Input commands for a single tick
///
/// `fire` and `upgrade_choice` are one-shot: the caller sets them only on the
/// frame the key went down.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw movement axis (each component -1, 0 or 1); normalized here
    pub move_dir: Vec2,
    /// Cursor position in arena coordinates
    pub aim: Vec2,
    /// Fire key pressed this frame
    pub fire: bool,
    /// Upgrade menu key pressed this frame (1-based)
    pub upgrade_choice: Option<u8>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::ChoosingUpgrade => {
            choose_upgrade(state, input.upgrade_choice);
            return;
        }
        GamePhase::Playing => {}
    }

    // Player movement
    let step = input.move_dir.normalize_or_zero() * state.player.speed;
    state.player.pos += step;

    // Shooting
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
    if input.fire && state.fire_cooldown == 0 {
        fire(state, input.aim);
    }

    // Enemy AI: head straight for the player
    state.enemy.seek(state.player.pos);

    apply_boundaries(state);
    advance_bullets(state);

    resolve_bullet_hits(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    resolve_contact(state);
}

/// Try to put a bullet in flight toward `aim`
fn fire(state: &mut GameState, aim: Vec2) {
    let player = &state.player;
    let dir = (aim - player.pos).normalize_or_zero();
    if dir == Vec2::ZERO && state.rules.zero_aim == ZeroAimPolicy::Suppress {
        return;
    }

    let spawn = if state.rules.offset_bullet_spawn {
        player.pos + dir * (player.radius + BULLET_SPAWN_GAP)
    } else {
        player.pos
    };
    let stats = state.bullet_stats;

    match state
        .bullets
        .spawn(spawn, dir * stats.speed, stats.radius, stats.damage)
    {
        Some(slot) => {
            state.fire_cooldown = state.rules.fire_cooldown_frames;
            if dir == Vec2::ZERO {
                log::debug!("Fired stationary bullet into slot {slot} (cursor on player)");
            } else {
                log::debug!("Fired bullet into slot {slot}");
            }
        }
        None => log::debug!("Bullet pool exhausted ({} slots)", state.bullets.capacity()),
    }
}

fn apply_boundaries(state: &mut GameState) {
    let arena = state.arena;
    match state.rules.boundary {
        BoundaryPolicy::Wrap => {
            wrap_with_radius(&mut state.player.pos, state.player.radius, &arena);
            wrap_with_radius(&mut state.enemy.pos, state.enemy.radius, &arena);
        }
        BoundaryPolicy::ClampWrap => {
            wrap_to_edge(&mut state.player.pos, &arena);
            wrap_to_edge(&mut state.enemy.pos, &arena);
        }
    }
}

fn advance_bullets(state: &mut GameState) {
    let arena = state.arena;
    let boundary = state.rules.boundary;

    for (_, bullet) in state.bullets.iter_live_mut() {
        bullet.pos += bullet.vel;
        match boundary {
            BoundaryPolicy::Wrap => wrap_with_radius(&mut bullet.pos, bullet.radius, &arena),
            BoundaryPolicy::ClampWrap => {
                if !inside_arena(bullet.pos, &arena) {
                    bullet.alive = false;
                }
            }
        }
    }
}

fn resolve_bullet_hits(state: &mut GameState) {
    for slot in 0..state.bullets.capacity() {
        let Some(bullet) = state.bullets.get(slot).copied() else {
            break;
        };
        if !bullet.alive {
            continue;
        }
        if !circles_overlap(bullet.pos, bullet.radius, state.enemy.pos, state.enemy.radius) {
            continue;
        }

        state.bullets.free(slot);
        state.enemy.hp -= bullet.damage;
        if state.enemy.hp > 0 {
            continue;
        }

        match state.rules.on_enemy_defeat {
            DefeatPolicy::RespawnOnEdge => {
                state.respawn_enemy_on_edge();
                log::info!(
                    "Enemy defeated, respawned at level {} (hp {}, speed {:.1})",
                    state.enemy.level,
                    state.enemy.hp,
                    state.enemy.speed
                );
            }
            DefeatPolicy::ChooseUpgrade => {
                state.phase = GamePhase::ChoosingUpgrade;
                log::info!("Enemy defeated at level {}, choosing upgrade", state.enemy.level);
                break;
            }
        }
    }
}

/// Touching the enemy costs one hit point per frame of contact
fn resolve_contact(state: &mut GameState) {
    let (player, enemy) = (&mut state.player, &state.enemy);
    if !circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius) {
        return;
    }

    player.hp -= 1;
    if state.rules.knockback > 0.0 {
        let away = (player.pos - enemy.pos).normalize_or_zero();
        player.pos += away * state.rules.knockback;
    }
    if player.hp > 0 {
        return;
    }

    match state.rules.on_player_death {
        DeathPolicy::Reset => {
            log::info!("Player defeated at enemy level {}, resetting", state.enemy.level);
            state.reset();
        }
        DeathPolicy::GameOver => {
            log::info!("Player defeated at enemy level {}, game over", state.enemy.level);
            state.phase = GamePhase::GameOver;
        }
    }
}

fn choose_upgrade(state: &mut GameState, choice: Option<u8>) {
    let Some(choice) = choice else {
        return;
    };
    let Some(upgrade) = Upgrade::from_choice(choice) else {
        log::warn!("Ignoring upgrade choice {choice}");
        return;
    };

    upgrade.apply(&mut state.bullet_stats);
    state.respawn_enemy_inside();
    state.phase = GamePhase::Playing;
    log::info!(
        "Picked {}; enemy back at level {} (hp {})",
        upgrade.name,
        state.enemy.level,
        state.enemy.hp
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rules;

    fn aim_right(state: &GameState) -> Vec2 {
        state.player.pos + Vec2::new(100.0, 0.0)
    }

    #[test]
    fn test_diagonal_move_is_normalized() {
        let mut state = GameState::new(Rules::classic(), 1);
        let start = state.player.pos;
        let input = TickInput {
            move_dir: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(((state.player.pos - start).length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_input_no_move() {
        let mut state = GameState::new(Rules::classic(), 1);
        let start = state.player.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_classic_fire_offsets_and_cools_down() {
        let mut state = GameState::new(Rules::classic(), 1);
        let fire = TickInput {
            fire: true,
            aim: aim_right(&state),
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.bullets.live_count(), 1);
        let bullet = state.bullets.iter_live().next().copied().unwrap();
        // Spawned 18 ahead, then advanced 12
        assert_eq!(bullet.pos, Vec2::new(640.0 + 18.0 + 12.0, 360.0));
        assert_eq!(bullet.vel, Vec2::new(12.0, 0.0));
        assert_eq!(state.fire_cooldown, 6);

        // Cooldown blocks the next five presses, the sixth goes through
        for _ in 0..5 {
            tick(&mut state, &fire);
        }
        assert_eq!(state.bullets.live_count(), 1);
        tick(&mut state, &fire);
        assert_eq!(state.bullets.live_count(), 2);
    }

    #[test]
    fn test_classic_zero_aim_does_not_fire() {
        let mut state = GameState::new(Rules::classic(), 1);
        let input = TickInput {
            fire: true,
            aim: state.player.pos,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.live_count(), 0);
        assert_eq!(state.fire_cooldown, 0);
    }

    #[test]
    fn test_upgrades_zero_aim_fires_stationary_bullet() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        let input = TickInput {
            fire: true,
            aim: state.player.pos,
            ..Default::default()
        };
        tick(&mut state, &input);
        let bullet = state.bullets.iter_live().next().copied().unwrap();
        assert_eq!(bullet.vel, Vec2::ZERO);
        assert_eq!(bullet.pos, state.player.pos);
    }

    #[test]
    fn test_upgrades_fire_limited_only_by_pool() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        // Park the enemy out of the way so nothing gets hit
        state.enemy.speed = 0.0;
        state.enemy.pos = Vec2::new(1100.0, 640.0);
        let input = TickInput {
            fire: true,
            aim: state.player.pos,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &input);
        }
        assert_eq!(state.bullets.live_count(), 50);
        assert_eq!(state.bullets.capacity(), 50);
    }

    #[test]
    fn test_upgrades_bullets_culled_at_edge() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        state.enemy.speed = 0.0;
        state.enemy.pos = Vec2::new(1100.0, 640.0);
        let input = TickInput {
            fire: true,
            aim: state.player.pos - Vec2::new(0.0, 100.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.live_count(), 1);
        // 300 px to the top edge at 12 px per frame
        for _ in 0..25 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.bullets.live_count(), 0);
    }

    #[test]
    fn test_classic_bullets_wrap() {
        let mut state = GameState::new(Rules::classic(), 1);
        state.enemy.speed = 0.0;
        state.enemy.pos = Vec2::new(1100.0, 640.0);
        let input = TickInput {
            fire: true,
            aim: state.player.pos - Vec2::new(0.0, 100.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        let bullet = state.bullets.iter_live().next().copied().unwrap();
        assert_eq!(bullet.pos.x, 640.0);
        // Went off the top and came back in from the bottom
        assert!(bullet.pos.y > 360.0);
    }

    #[test]
    fn test_clamp_wrap_player() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        state.enemy.speed = 0.0;
        state.player.pos = Vec2::new(142.0, 300.0);
        let input = TickInput {
            move_dir: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, Vec2::new(1140.0, 300.0));
    }

    #[test]
    fn test_classic_enemy_defeat_levels_up() {
        let mut state = GameState::new(Rules::classic(), 3);
        state.enemy.hp = 1;
        state.enemy.speed = 0.0;
        state.enemy.pos = state.player.pos + Vec2::new(60.0, 0.0);
        let input = TickInput {
            fire: true,
            aim: state.enemy.pos,
            ..Default::default()
        };
        tick(&mut state, &input);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy.level, 1);
        assert_eq!(state.enemy.hp, 6);
        assert!((state.enemy.speed - 3.2).abs() < 1e-5);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bullets.live_count(), 0);
    }

    #[test]
    fn test_classic_later_bullets_hit_respawned_enemy() {
        let mut state = GameState::new(Rules::classic(), 7);
        state.enemy.hp = 1;
        let at = state.enemy.pos;
        state.bullets.spawn(at, Vec2::ZERO, 6.0, 1);
        // Big enough to reach the enemy wherever it respawns
        state.bullets.spawn(at, Vec2::ZERO, 2000.0, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy.level, 1);
        assert_eq!(state.enemy.hp, 6 - 1);
        assert_eq!(state.bullets.live_count(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_upgrades_defeat_stops_bullet_checks() {
        let mut state = GameState::new(Rules::upgrades(), 7);
        state.enemy.hp = 1;
        let at = state.enemy.pos;
        state.bullets.spawn(at, Vec2::ZERO, 6.0, 1);
        state.bullets.spawn(at, Vec2::ZERO, 6.0, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::ChoosingUpgrade);
        assert_eq!(state.enemy.hp, 0);
        assert_eq!(state.enemy.level, 0);
        assert_eq!(state.bullets.live_count(), 1);
    }

    #[test]
    fn test_contact_knockback() {
        let mut state = GameState::new(Rules::classic(), 1);
        state.enemy.speed = 0.0;
        state.enemy.pos = state.player.pos + Vec2::new(20.0, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.hp, 4);
        assert_eq!(state.player.pos, Vec2::new(640.0 - 24.0, 360.0));
    }

    #[test]
    fn test_upgrades_contact_no_knockback_then_game_over() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        state.enemy.pos = state.player.pos;
        for _ in 0..19 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.hp, 1);
        assert_eq!(state.player.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.phase, GamePhase::Playing);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal: further input changes nothing
        let input = TickInput {
            move_dir: Vec2::X,
            fire: true,
            aim: Vec2::ZERO,
            upgrade_choice: Some(1),
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.bullets.live_count(), 0);
    }

    #[test]
    fn test_choosing_upgrade_freezes_and_ignores_bad_keys() {
        let mut state = GameState::new(Rules::upgrades(), 1);
        state.phase = GamePhase::ChoosingUpgrade;
        let before = state.enemy.pos;
        let input = TickInput {
            move_dir: Vec2::X,
            upgrade_choice: Some(7),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::ChoosingUpgrade);
        assert_eq!(state.player.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.enemy.pos, before);
    }

    #[test]
    fn test_classic_scenario_reset_after_five_contact_frames() {
        let mut state = GameState::new(Rules::classic(), 5);
        state.enemy.level = 3;
        state.enemy.restat(1);
        state.bullets.spawn(Vec2::new(300.0, 300.0), Vec2::ZERO, 6.0, 1);

        for frame in 1..=5 {
            // Keep the enemy overlapping the player every frame
            state.enemy.pos = state.player.pos;
            tick(&mut state, &TickInput::default());
            if frame < 5 {
                assert_eq!(state.player.hp, 5 - frame);
            }
        }

        assert_eq!(state.player.hp, 5);
        assert_eq!(state.player.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.enemy.level, 0);
        assert_eq!(state.enemy.hp, 5);
        assert_eq!(state.enemy.speed, 3.0);
        assert_eq!(state.enemy.pos, Vec2::new(220.0, 140.0));
        assert_eq!(state.bullets.live_count(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_upgrades_scenario_five_hits_then_pick_damage() {
        let mut state = GameState::new(Rules::upgrades(), 11);
        state.enemy.pos = state.player.pos + Vec2::new(100.0, 0.0);
        assert_eq!(state.enemy.hp, 5);
        assert_eq!(state.bullet_stats.damage, 1);

        let mut shots = 0;
        for _ in 0..60 {
            let input = TickInput {
                fire: shots < 5,
                aim: state.enemy.pos,
                ..Default::default()
            };
            if input.fire {
                shots += 1;
            }
            tick(&mut state, &input);
            if state.phase != GamePhase::Playing {
                break;
            }
        }

        assert_eq!(shots, 5);
        assert_eq!(state.phase, GamePhase::ChoosingUpgrade);
        assert_eq!(state.enemy.hp, 0);
        assert_eq!(state.enemy.level, 0);
        assert_eq!(state.player.hp, 20);

        let pick = TickInput {
            upgrade_choice: Some(2),
            ..Default::default()
        };
        tick(&mut state, &pick);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bullet_stats.damage, 2);
        assert_eq!(state.enemy.level, 1);
        assert_eq!(state.enemy.hp, 5 + 2 * 1);
    }
}
