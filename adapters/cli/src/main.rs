#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Hue Hunt in the terminal.
//!
//! Player input is read on a background thread and forwarded over a channel.
//! The main loop is the only owner of the session: it interleaves those lines
//! with countdown ticks, and only delivers ticks while a game is active.

mod input;
mod render;

use std::{
    io::{self, BufRead, Write},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use hue_hunt_core::{Command, SessionState};
use hue_hunt_session::{self as session, query, GameSession};
use hue_hunt_system_round_generation::SeededRandom;
use log::{debug, info, warn};

use self::{input::PlayerInput, render::Renderer};

/// Spot the one cell that is a shade off before the clock runs out.
#[derive(Debug, Parser)]
#[command(name = "hue-hunt", version, about)]
struct Args {
    /// Seed for round generation; a random seed is picked and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between countdown ticks.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Print cells as hsl() strings instead of colored blocks.
    #[arg(long)]
    no_color: bool,
}

/// Entry point for the Hue Hunt command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("round generation seed {seed}");

    let mut game = GameSession::new(SeededRandom::new(seed));
    let grid_size = query::rules(&game).grid_size;
    let mut renderer = Renderer::new(io::stdout().lock(), !args.no_color, grid_size);
    renderer
        .welcome(seed)
        .context("failed to write to the terminal")?;

    let lines = spawn_line_reader();
    let tick = Duration::from_millis(args.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        let received = if query::state(&game) == SessionState::Active {
            lines.recv_timeout(tick.saturating_sub(last_tick.elapsed()))
        } else {
            lines.recv().map_err(|_| RecvTimeoutError::Disconnected)
        };

        let command = match received {
            Ok(line) => match input::parse(&line, grid_size) {
                Ok(PlayerInput::Command(command)) => command,
                Ok(PlayerInput::Help) => {
                    renderer.help()?;
                    continue;
                }
                Ok(PlayerInput::Quit) => break,
                Err(error) => {
                    warn!("ignoring input {line:?}: {error}");
                    renderer.rejected(&error)?;
                    continue;
                }
            },
            Err(RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                let dt = now.duration_since(last_tick);
                last_tick = now;
                Command::Tick { dt }
            }
            Err(RecvTimeoutError::Disconnected) => {
                debug!("input closed");
                break;
            }
        };

        if command == Command::Start {
            last_tick = Instant::now();
        }
        dispatch(&mut game, command, &mut renderer).context("failed to write to the terminal")?;
    }

    Ok(())
}

fn dispatch<W: Write>(
    game: &mut GameSession<SeededRandom>,
    command: Command,
    renderer: &mut Renderer<W>,
) -> Result<()> {
    let mut events = Vec::new();
    let snapshot = session::apply(game, command, &mut events);
    renderer.present(&snapshot, &events)
}

fn spawn_line_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
