//! Terminal runner (default binary).
//!
//! Owns the fixed ~15 Hz tick timer and drives the engine once per tick:
//! sample input, apply it, update AI and game state, render the one-bit
//! frame, flush it to the terminal. Everything here is host wiring; the
//! simulation itself lives in the core crates.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use maze_raider::core::World;
use maze_raider::input::{host_command, should_quit, HostCommand, InputHandler};
use maze_raider::render::{PixelBuffer, Renderer};
use maze_raider::term::TerminalRenderer;
use maze_raider::types::{
    Difficulty, EngineConfig, GameEvent, GameState, SCREEN_HEIGHT, SCREEN_WIDTH, TICK_MS,
};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Seed for the next round; the core itself never reads the clock.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut world = World::new(EngineConfig::default(), Difficulty::Normal, clock_seed());
    let mut renderer = Renderer::new();
    let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut input = InputHandler::new();
    let mut notice = String::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    renderer.render(&world, &mut fb);

    loop {
        term.draw(&fb, &status_line(&world, &notice))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        match host_command(key) {
                            Some(HostCommand::Reset) => {
                                world.reset(clock_seed());
                                input.reset();
                                notice.clear();
                            }
                            Some(HostCommand::SetDifficulty(difficulty)) => {
                                world.set_difficulty(difficulty);
                                world.reset(clock_seed());
                                input.reset();
                                notice.clear();
                            }
                            None => input.handle_key_press(key.code),
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat; held state is already tracked.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let intent = input.sample();
            world.apply_input(&intent);
            world.update_ai_and_state();

            for event in world.take_events() {
                notice = match event {
                    GameEvent::PlayerHit { hp_left } => format!("HIT! {hp_left} HP LEFT"),
                    GameEvent::GameOver { won: true } => "CLEARED - R TO RESTART".to_string(),
                    GameEvent::GameOver { won: false } => "DOWN - R TO RESTART".to_string(),
                };
            }

            renderer.render(&world, &mut fb);
        }
    }
}

fn status_line(world: &World, notice: &str) -> String {
    let alive = world.enemies().iter().filter(|e| e.is_alive()).count();
    let state = match world.state() {
        GameState::Playing => "",
        GameState::GameOver { won: true, .. } => " [WON]",
        GameState::GameOver { won: false, .. } => " [LOST]",
    };
    format!(
        "HP {}  FOES {}  {}{}  {}  wasd/arrows move  space fire  x run  1-3 difficulty  r reset  q quit",
        world.player().hp,
        alive,
        world.difficulty().as_str(),
        state,
        notice,
    )
}
