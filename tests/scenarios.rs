use circle_arena::game_loop::{self, ExitReason};
use circle_arena::input::Key;
use circle_arena::platform::{ScriptedFrame, ScriptedHost};
use circle_arena::renderer::DrawCommand;
use circle_arena::sim::{GamePhase, GameState, Rules};
use glam::Vec2;

/// Cursor straight to the right of the player's starting point
const AIM_RIGHT: (i32, i32) = (1000, 360);

fn texts(frame: &[DrawCommand]) -> Vec<&str> {
    frame
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn held_fire_key_shoots_once() {
    let script = vec![ScriptedFrame::new(&[Key::Space], AIM_RIGHT); 10];
    let mut host = ScriptedHost::new(script);
    let state = GameState::new(Rules::upgrades(), 1);

    let (state, reason) = game_loop::run(&mut host, state).unwrap();
    assert_eq!(reason, ExitReason::WindowClosed);
    assert_eq!(state.bullets.live_count(), 1);
}

#[test]
fn classic_player_death_resets_everything() {
    let mut state = GameState::new(Rules::classic(), 2);
    state.enemy.level = 4;
    state.enemy.speed = 0.0;
    state.enemy.pos = state.player.pos;
    state.bullets.spawn(Vec2::new(300.0, 600.0), Vec2::ZERO, 6.0, 1);

    let mut host = ScriptedHost::new(vec![ScriptedFrame::idle(); 5]);
    let (state, _) = game_loop::run(&mut host, state).unwrap();

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.player.hp, 5);
    assert_eq!(state.enemy.level, 0);
    assert_eq!(state.enemy.speed, 3.0);
    assert_eq!(state.bullets.live_count(), 0);

    let last = texts(host.last_frame().unwrap());
    assert!(last.contains(&"Player HP: 5"));
}

#[test]
fn upgrades_defeat_choose_damage_and_continue() {
    let mut state = GameState::new(Rules::upgrades(), 3);
    state.enemy.pos = Vec2::new(740.0, 360.0);

    // Tap Space five times (frames 1, 3, 5, 7, 9), wait, then pick upgrade 2
    let mut script = Vec::new();
    for _ in 0..5 {
        script.push(ScriptedFrame::new(&[Key::Space], AIM_RIGHT));
        script.push(ScriptedFrame::new(&[], AIM_RIGHT));
    }
    script.extend(std::iter::repeat_n(ScriptedFrame::new(&[], AIM_RIGHT), 4));
    script.push(ScriptedFrame::new(&[Key::Digit2], AIM_RIGHT));
    script.push(ScriptedFrame::new(&[Key::Digit2], AIM_RIGHT));

    let mut host = ScriptedHost::new(script);
    let (state, _) = game_loop::run(&mut host, state).unwrap();

    // The menu was on screen just before the pick
    let menu = texts(&host.frames[13]);
    assert!(menu.iter().any(|t| t.starts_with("[2] Power Shot")));

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.bullet_stats.damage, 2);
    assert_eq!(state.enemy.level, 1);
}

#[test]
fn upgrades_game_over_is_terminal() {
    let mut state = GameState::new(Rules::upgrades(), 4);
    state.enemy.pos = state.player.pos;

    let mut script = vec![ScriptedFrame::idle(); 25];
    script.push(ScriptedFrame::new(&[Key::Digit1, Key::Space, Key::D], (0, 0)));
    let mut host = ScriptedHost::new(script);
    let (state, _) = game_loop::run(&mut host, state).unwrap();

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.player.hp, 0);
    assert_eq!(state.bullets.live_count(), 0);
    assert!(texts(host.last_frame().unwrap()).contains(&"GAME OVER"));
}
