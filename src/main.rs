//! Circle Arena entry point
//!
//! Parses the command line, loads settings and runs the game in the terminal.
//! Logs go to stderr; set `RUST_LOG=info` and redirect stderr to a file to
//! keep them off the play field.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use circle_arena::consts::WINDOW_TITLE;
use circle_arena::game_loop::{self, ExitReason};
use circle_arena::platform::{HostError, TerminalHost};
use circle_arena::{GamePhase, GameState, Settings, SettingsError, Variant};

const USAGE: &str = "usage: circle-arena [--variant classic|upgrades] [--config PATH] [--seed N]";
const DEFAULT_CONFIG: &str = "circle-arena.json";

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Host(#[from] HostError),
}

#[derive(Debug, Default)]
struct CliArgs {
    variant: Option<Variant>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    help: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs, AppError> {
    let mut cli = CliArgs::default();
    let mut args = args;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| AppError::Usage(format!("{name} needs a value")))
        };
        match arg.as_str() {
            "--variant" => {
                let v = value("--variant")?;
                cli.variant = Some(
                    Variant::from_str(&v)
                        .ok_or_else(|| AppError::Usage(format!("unknown variant '{v}'")))?,
                );
            }
            "--config" => cli.config = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                let v = value("--seed")?;
                cli.seed = Some(
                    v.parse()
                        .map_err(|_| AppError::Usage(format!("invalid seed '{v}'")))?,
                );
            }
            "-h" | "--help" => cli.help = true,
            other => return Err(AppError::Usage(format!("unexpected argument '{other}'"))),
        }
    }
    Ok(cli)
}

fn load_settings(cli: &CliArgs) -> Result<Settings, AppError> {
    let mut settings = match &cli.config {
        // An explicit path must exist
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(&PathBuf::from(DEFAULT_CONFIG))?,
    };
    if let Some(variant) = cli.variant {
        settings.variant = variant;
        settings.rules = None;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

fn run() -> Result<(), AppError> {
    let cli = parse_args(std::env::args().skip(1))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let settings = load_settings(&cli)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    let state = GameState::new(settings.effective_rules(), seed);
    log::info!("Variant {} with seed {}", settings.variant.as_str(), seed);

    let mut host = TerminalHost::initialize(WINDOW_TITLE, settings.target_fps)?;
    let (state, reason) = game_loop::play(&mut host, state)?;

    let outcome = match (state.phase, reason) {
        (GamePhase::GameOver, _) => "Game over",
        (_, ExitReason::QuitRequested) => "Quit",
        (_, ExitReason::WindowClosed) => "Closed",
    };
    println!(
        "{outcome} after {} frames - enemy level {}, player hp {}",
        state.frame, state.enemy.level, state.player.hp
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Circle Arena starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            if matches!(err, AppError::Usage(_)) {
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
