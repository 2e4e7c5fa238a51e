//! Platform abstraction layer
//!
//! The game only talks to its surroundings through the `Host` trait:
//! - Message pump / close signal
//! - Frame begin/end bracketing
//! - Keyboard snapshot and mouse position
//! - Primitive drawing
//!
//! `TerminalHost` plays in a terminal, `ScriptedHost` replays canned input
//! for tests and headless runs.

pub mod scripted;
pub mod terminal;

pub use scripted::{ScriptedFrame, ScriptedHost};
pub use terminal::TerminalHost;

use thiserror::Error;

use crate::input::KeyboardState;
use crate::renderer::DrawCommand;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input thread disconnected")]
    InputDisconnected,
}

/// Window, input and drawing services the game loop depends on
pub trait Host {
    /// Pump pending system messages. `Ok(false)` means the window was closed.
    fn process_messages(&mut self) -> Result<bool, HostError>;

    fn begin_frame(&mut self);

    /// Full keyboard snapshot for the current frame
    fn keyboard(&self) -> KeyboardState;

    /// Cursor position in window pixels
    fn mouse_position(&self) -> (i32, i32);

    fn draw(&mut self, command: &DrawCommand);

    /// Present the frame (and pace to the target frame rate)
    fn end_frame(&mut self) -> Result<(), HostError>;

    /// Release the window / terminal
    fn finalize(&mut self) -> Result<(), HostError>;
}
