//! Held-key tracking that samples one [`MovementIntent`] per tick.
//!
//! Supports terminals that do not emit key release events by auto-releasing
//! every held control after a timeout, so a single tap cannot turn into a
//! permanently held direction.

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::map::{movement_key, MoveKey};
use maze_raider_types::MovementIntent;

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 200;

const KEY_COUNT: usize = 8;

/// Tracks held movement controls between ticks.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: [bool; KEY_COUNT],
    /// Fire is edge-triggered: one pending shot per press, repeats ignored
    /// while the key stays held.
    fire_pending: bool,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: [false; KEY_COUNT],
            fire_pending: false,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn handle_key_press(&mut self, code: KeyCode) {
        let Some(key) = movement_key(code) else {
            return;
        };
        self.last_key_time = Instant::now();
        if key == MoveKey::Fire && !self.held[key as usize] {
            self.fire_pending = true;
        }
        self.held[key as usize] = true;
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(key) = movement_key(code) {
            self.held[key as usize] = false;
        }
    }

    /// Take the per-tick snapshot. Call exactly once per tick.
    pub fn sample(&mut self) -> MovementIntent {
        // Auto-release when the terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.held = [false; KEY_COUNT];
        }

        MovementIntent {
            forward: self.held[MoveKey::Forward as usize],
            backward: self.held[MoveKey::Backward as usize],
            strafe_left: self.held[MoveKey::StrafeLeft as usize],
            strafe_right: self.held[MoveKey::StrafeRight as usize],
            turn_left: self.held[MoveKey::TurnLeft as usize],
            turn_right: self.held[MoveKey::TurnRight as usize],
            run: self.held[MoveKey::Run as usize],
            fire: std::mem::take(&mut self.fire_pending),
        }
    }

    pub fn reset(&mut self) {
        self.held = [false; KEY_COUNT];
        self.fire_pending = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
