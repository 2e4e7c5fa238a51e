//! Text overlay: controls, stats, upgrade menu and game over banner

use super::DrawCommand;
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::{BoundaryPolicy, BulletStats, GamePhase, GameState, UPGRADES};

const MARGIN: i32 = 20;
const LINE_HEIGHT: i32 = 20;

fn text(out: &mut Vec<DrawCommand>, x: i32, y: i32, text: impl Into<String>) {
    out.push(DrawCommand::Text {
        x,
        y,
        text: text.into(),
    });
}

/// Push the status lines and any phase-specific panel
pub fn status(state: &GameState, out: &mut Vec<DrawCommand>) {
    let rules = &state.rules;

    text(out, MARGIN, MARGIN, "WASD/Arrow: Move");
    text(out, MARGIN, MARGIN + LINE_HEIGHT, "Mouse: Aim   Space: Shoot");
    let edge_hint = match rules.boundary {
        BoundaryPolicy::Wrap => "Wrap: Leave the box -> appear from the opposite side",
        BoundaryPolicy::ClampWrap => "Edge: Cross a wall -> come out the opposite wall",
    };
    text(out, MARGIN, MARGIN + 2 * LINE_HEIGHT, edge_hint);

    text(
        out,
        MARGIN,
        MARGIN + 4 * LINE_HEIGHT - 10,
        format!("Player HP: {}", state.player.hp),
    );
    let enemy = &state.enemy;
    text(
        out,
        MARGIN,
        MARGIN + 5 * LINE_HEIGHT - 10,
        format!(
            "Enemy HP: {}  LV: {}  SPD: {:.1}",
            enemy.hp, enemy.level, enemy.speed
        ),
    );
    if state.bullet_stats != BulletStats::default() {
        let stats = &state.bullet_stats;
        text(
            out,
            MARGIN,
            MARGIN + 6 * LINE_HEIGHT - 10,
            format!(
                "Bullet SIZE: {:.0}  DMG: {}  SPD: {:.0}",
                stats.radius, stats.damage, stats.speed
            ),
        );
    }

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::ChoosingUpgrade => upgrade_menu(out),
        GamePhase::GameOver => game_over(state, out),
    }
}

fn upgrade_menu(out: &mut Vec<DrawCommand>) {
    let x = WINDOW_WIDTH / 2 - 160;
    let mut y = WINDOW_HEIGHT / 2 - 60;

    text(out, x, y, "ENEMY DEFEATED! Choose an upgrade:");
    y += 2 * LINE_HEIGHT;
    for (i, upgrade) in UPGRADES.iter().enumerate() {
        text(
            out,
            x,
            y,
            format!("[{}] {} - {}", i + 1, upgrade.name, upgrade.description),
        );
        y += LINE_HEIGHT;
    }
}

fn game_over(state: &GameState, out: &mut Vec<DrawCommand>) {
    let x = WINDOW_WIDTH / 2 - 80;
    let y = WINDOW_HEIGHT / 2 - LINE_HEIGHT;
    text(out, x, y, "GAME OVER");
    text(
        out,
        x,
        y + LINE_HEIGHT,
        format!("Reached enemy level {}", state.enemy.level),
    );
}
