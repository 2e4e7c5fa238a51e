//! Scene shapes: background, arena outline and the circles

use glam::Vec2;

use super::{Color, DrawCommand, FillMode};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::{Arena, GamePhase, GameState};

/// Push the background, arena and every visible entity
pub fn scene(state: &GameState, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Rect {
        x: 0,
        y: 0,
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
        color: Color::BACKGROUND,
        fill: FillMode::Solid,
    });
    out.push(arena_outline(&state.arena));

    out.push(circle(state.player.pos, state.player.radius, Color::PLAYER));

    // The defeated enemy is gone while the upgrade menu is up
    if state.phase != GamePhase::ChoosingUpgrade {
        out.push(circle(state.enemy.pos, state.enemy.radius, Color::ENEMY));
    }

    for bullet in state.bullets.iter_live() {
        out.push(circle(bullet.pos, bullet.radius, Color::WHITE));
    }
}

fn arena_outline(arena: &Arena) -> DrawCommand {
    DrawCommand::Rect {
        x: arena.left,
        y: arena.top,
        width: arena.width(),
        height: arena.height(),
        color: Color::WHITE,
        fill: FillMode::Wireframe,
    }
}

/// Filled circle, truncated to whole pixels
pub fn circle(center: Vec2, radius: f32, color: Color) -> DrawCommand {
    DrawCommand::Ellipse {
        x: center.x as i32,
        y: center.y as i32,
        radius_x: radius as i32,
        radius_y: radius as i32,
        rotation: 0.0,
        color,
        fill: FillMode::Solid,
    }
}
