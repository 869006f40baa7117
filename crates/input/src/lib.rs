//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into held movement controls and host commands,
//! and samples one [`maze_raider_types::MovementIntent`] snapshot per tick.
//! Works in terminals without key-release events via an auto-release timeout.

pub mod handler;
pub mod map;

pub use maze_raider_types as types;

pub use handler::InputHandler;
pub use map::{host_command, movement_key, should_quit, HostCommand, MoveKey};
