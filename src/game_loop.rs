//! Frame driver
//!
//! Each frame: pump messages, read input, tick the simulation, draw.

use crate::input::InputTracker;
use crate::platform::{Host, HostError};
use crate::renderer;
use crate::sim::{GamePhase, GameState, tick};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The host's window was closed
    WindowClosed,
    /// Escape was pressed and the rules allow quitting
    QuitRequested,
}

/// Play until the host closes or the player quits. The state is handed back
/// for end-of-run reporting.
pub fn run<H: Host>(host: &mut H, mut state: GameState) -> Result<(GameState, ExitReason), HostError> {
    let mut input = InputTracker::default();
    let mut last_phase = state.phase;

    log::info!(
        "Starting run: seed {}, {:?} boundary, {} bullet slots",
        state.seed,
        state.rules.boundary,
        state.rules.bullet_capacity
    );

    let reason = loop {
        if !host.process_messages()? {
            break ExitReason::WindowClosed;
        }
        host.begin_frame();

        input.advance(host.keyboard());
        let tick_input = input.tick_input(host.mouse_position());
        tick(&mut state, &tick_input);

        if state.phase != last_phase {
            log::info!("Phase {:?} -> {:?} at frame {}", last_phase, state.phase, state.frame);
            last_phase = state.phase;
        }

        for command in renderer::build_frame(&state) {
            host.draw(&command);
        }
        host.end_frame()?;

        if state.rules.escape_quits && input.quit_pressed() {
            break ExitReason::QuitRequested;
        }
    };

    if state.phase == GamePhase::GameOver {
        log::info!("Run ended in game over at enemy level {}", state.enemy.level);
    }
    log::info!("Loop exited after {} frames ({:?})", state.frame, reason);
    Ok((state, reason))
}

/// Run the loop, then hand the host back to the user whatever the outcome.
/// A loop error wins over a finalize error.
pub fn play<H: Host>(host: &mut H, state: GameState) -> Result<(GameState, ExitReason), HostError> {
    let result = run(host, state);
    let restored = host.finalize();
    let outcome = result?;
    restored?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::platform::{ScriptedFrame, ScriptedHost};
    use crate::sim::Rules;

    #[test]
    fn test_runs_every_scripted_frame() {
        let mut host = ScriptedHost::new(vec![ScriptedFrame::idle(); 10]);
        let state = GameState::new(Rules::classic(), 1);
        let (state, reason) = run(&mut host, state).unwrap();
        assert_eq!(reason, ExitReason::WindowClosed);
        assert_eq!(state.frame, 10);
        assert_eq!(host.frames.len(), 10);
    }

    #[test]
    fn test_play_finalizes_host() {
        let mut host = ScriptedHost::new(vec![ScriptedFrame::idle(); 3]);
        let (state, _) = play(&mut host, GameState::new(Rules::upgrades(), 1)).unwrap();
        assert_eq!(state.frame, 3);
        assert!(host.finalized);
    }

    #[test]
    fn test_escape_quits_classic_only() {
        let script = vec![
            ScriptedFrame::idle(),
            ScriptedFrame::new(&[Key::Escape], (0, 0)),
            ScriptedFrame::idle(),
        ];

        let mut host = ScriptedHost::new(script.clone());
        let (state, reason) = run(&mut host, GameState::new(Rules::classic(), 1)).unwrap();
        assert_eq!(reason, ExitReason::QuitRequested);
        assert_eq!(state.frame, 2);

        let mut host = ScriptedHost::new(script);
        let (state, reason) = run(&mut host, GameState::new(Rules::upgrades(), 1)).unwrap();
        assert_eq!(reason, ExitReason::WindowClosed);
        assert_eq!(state.frame, 3);
    }
}
