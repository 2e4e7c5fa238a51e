//! Keyboard snapshots and rising-edge detection
//!
//! Hosts hand over a full boolean-per-key snapshot each frame. The tracker
//! keeps the previous one so actions fire only on the frame a key goes down.

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Digit1,
    Digit2,
    Digit3,
    Escape,
}

impl Key {
    pub const COUNT: usize = 13;

    pub const ALL: [Key; Key::COUNT] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Space,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Escape,
    ];

    const fn index(self) -> usize {
        match self {
            Key::W => 0,
            Key::A => 1,
            Key::S => 2,
            Key::D => 3,
            Key::Up => 4,
            Key::Down => 5,
            Key::Left => 6,
            Key::Right => 7,
            Key::Space => 8,
            Key::Digit1 => 9,
            Key::Digit2 => 10,
            Key::Digit3 => 11,
            Key::Escape => 12,
        }
    }
}

/// Fixed-size snapshot of which keys are down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    down: [bool; Key::COUNT],
}

impl KeyboardState {
    pub fn set(&mut self, key: Key, is_down: bool) {
        self.down[key.index()] = is_down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// Snapshot with exactly the given keys held
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut state = Self::default();
        for &key in keys {
            state.set(key, true);
        }
        state
    }
}

/// Current and previous keyboard snapshots
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    current: KeyboardState,
    previous: KeyboardState,
}

impl InputTracker {
    /// Start a new frame: the current snapshot becomes the previous one
    pub fn advance(&mut self, snapshot: KeyboardState) {
        self.previous = self.current;
        self.current = snapshot;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.current.is_down(key)
    }

    /// Down this frame, up last frame
    pub fn just_pressed(&self, key: Key) -> bool {
        self.current.is_down(key) && !self.previous.is_down(key)
    }

    /// Movement axis from WASD / arrows (not normalized)
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.is_down(Key::W) || self.is_down(Key::Up) {
            axis.y -= 1.0;
        }
        if self.is_down(Key::S) || self.is_down(Key::Down) {
            axis.y += 1.0;
        }
        if self.is_down(Key::A) || self.is_down(Key::Left) {
            axis.x -= 1.0;
        }
        if self.is_down(Key::D) || self.is_down(Key::Right) {
            axis.x += 1.0;
        }
        axis
    }

    /// Lowest upgrade digit pressed this frame
    pub fn upgrade_choice(&self) -> Option<u8> {
        [Key::Digit1, Key::Digit2, Key::Digit3]
            .iter()
            .position(|&key| self.just_pressed(key))
            .map(|i| i as u8 + 1)
    }

    pub fn quit_pressed(&self) -> bool {
        self.just_pressed(Key::Escape)
    }

    /// Build the simulation input for this frame
    pub fn tick_input(&self, mouse: (i32, i32)) -> TickInput {
        TickInput {
            move_dir: self.move_axis(),
            aim: Vec2::new(mouse.0 as f32, mouse.1 as f32),
            fire: self.just_pressed(Key::Space),
            upgrade_choice: self.upgrade_choice(),
        }
    }
}
