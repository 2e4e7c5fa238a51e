//! Draw list generation
//!
//! The simulation never draws. Each frame the renderer turns a `GameState`
//! into a flat list of primitive commands that a `Host` knows how to paint.

pub mod overlay;
pub mod shapes;

use crate::sim::GameState;

/// RGBA color packed as 0xRRGGBBAA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BACKGROUND: Color = Color(0x101018FF);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const PLAYER: Color = Color(0x44CCFFFF);
    pub const ENEMY: Color = Color(0xFF4444FF);

    /// (r, g, b, a) components
    pub fn rgba(self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = self.0.to_be_bytes();
        (r, g, b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe,
}

/// A single drawing primitive in window pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned box from its top-left corner
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
        fill: FillMode,
    },
    /// Ellipse around a centre point
    Ellipse {
        x: i32,
        y: i32,
        radius_x: i32,
        radius_y: i32,
        rotation: f32,
        color: Color,
        fill: FillMode,
    },
    /// Text overlay anchored at its top-left corner
    Text { x: i32, y: i32, text: String },
}

/// Build the complete draw list for one frame: scene first, overlay last
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(8 + state.bullets.live_count());
    shapes::scene(state, &mut commands);
    overlay::status(state, &mut commands);
    commands
}
