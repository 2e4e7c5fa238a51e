//! Circle overlap and arena boundary handling
//!
//! Everything in the arena is a circle, so collision is a single squared
//! distance comparison. The boundary functions implement the two
//! `BoundaryPolicy` variants.

use glam::Vec2;

use super::state::Arena;

/// Two circles collide iff the squared centre distance is at most the squared radius sum
#[inline]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    p1.distance_squared(p2) <= reach * reach
}

/// Wrap policy: leaving past `edge ± radius` reappears on the opposite side,
/// offset by the same radius. A position exactly on the threshold stays put.
pub fn wrap_with_radius(pos: &mut Vec2, radius: f32, arena: &Arena) {
    let (left, top, right, bottom) = arena.bounds();

    if pos.x < left - radius {
        pos.x = right + radius;
    }
    if pos.x > right + radius {
        pos.x = left - radius;
    }
    if pos.y < top - radius {
        pos.y = bottom + radius;
    }
    if pos.y > bottom + radius {
        pos.y = top - radius;
    }
}

/// Clamp-wrap policy: crossing a bare edge teleports to the opposite bare edge
pub fn wrap_to_edge(pos: &mut Vec2, arena: &Arena) {
    let (left, top, right, bottom) = arena.bounds();

    if pos.x < left {
        pos.x = right;
    } else if pos.x > right {
        pos.x = left;
    }
    if pos.y < top {
        pos.y = bottom;
    } else if pos.y > bottom {
        pos.y = top;
    }
}

/// Whether a point lies inside the arena rectangle (edges inclusive)
#[inline]
pub fn inside_arena(pos: Vec2, arena: &Arena) -> bool {
    let (left, top, right, bottom) = arena.bounds();
    pos.x >= left && pos.x <= right && pos.y >= top && pos.y <= bottom
}
