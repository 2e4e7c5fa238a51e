//! Scripted host
//!
//! Replays a fixed list of per-frame inputs and keeps every frame's draw
//! list. The "window" closes once the script runs out.

use super::{Host, HostError};
use crate::input::{Key, KeyboardState};
use crate::renderer::DrawCommand;

/// Input for one scripted frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub keys: KeyboardState,
    pub mouse: (i32, i32),
}

impl ScriptedFrame {
    pub fn new(keys: &[Key], mouse: (i32, i32)) -> Self {
        Self {
            keys: KeyboardState::with_keys(keys),
            mouse,
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
pub struct ScriptedHost {
    script: Vec<ScriptedFrame>,
    /// Index of the frame being played (valid after the first `process_messages`)
    cursor: usize,
    started: bool,
    pending: Vec<DrawCommand>,
    /// Draw lists of every completed frame
    pub frames: Vec<Vec<DrawCommand>>,
    pub finalized: bool,
}

impl ScriptedHost {
    pub fn new(script: Vec<ScriptedFrame>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    fn current(&self) -> Option<&ScriptedFrame> {
        self.script.get(self.cursor)
    }

    /// The last presented frame's draw list
    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Host for ScriptedHost {
    fn process_messages(&mut self) -> Result<bool, HostError> {
        if self.started {
            self.cursor += 1;
        }
        self.started = true;
        Ok(self.cursor < self.script.len())
    }

    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn keyboard(&self) -> KeyboardState {
        self.current().map(|f| f.keys).unwrap_or_default()
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.current().map(|f| f.mouse).unwrap_or_default()
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.pending.push(command.clone());
    }

    fn end_frame(&mut self) -> Result<(), HostError> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), HostError> {
        self.finalized = true;
        Ok(())
    }
}
