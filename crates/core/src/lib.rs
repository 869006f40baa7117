//! Core simulation - pure, deterministic, and testable.
//!
//! This crate contains the whole game simulation and nothing else: no I/O,
//! no terminal, no clocks. A fixed RNG seed plus a fixed per-tick input
//! sequence replays an identical round, which is what the tests lean on.
//!
//! # Module Structure
//!
//! - [`rng`]: seedable LCG injected into generation and AI
//! - [`map`]: tile grid and randomized-DFS perfect-maze generation
//! - [`los`]: shared line-of-sight ray march (spawn filtering, AI targeting)
//! - [`world`]: player movement/collision, enemy AI, win/lose state machine
//!
//! # Tick protocol
//!
//! The host drives one [`world::World`] at a fixed rate:
//!
//! ```
//! use maze_raider_core::World;
//! use maze_raider_types::{Difficulty, EngineConfig, MovementIntent};
//!
//! let mut world = World::new(EngineConfig::default(), Difficulty::Normal, 12345);
//! let intent = MovementIntent {
//!     forward: true,
//!     ..MovementIntent::default()
//! };
//! world.apply_input(&intent);
//! world.update_ai_and_state();
//! // ...then hand `&world` to the renderer.
//! ```

pub mod los;
pub mod map;
pub mod rng;
pub mod world;

pub use maze_raider_types as types;

// Re-export commonly used items for convenience
pub use los::has_los;
pub use map::{generate, Generated, MazeMap};
pub use rng::SimpleRng;
pub use world::{Enemy, EnemyState, Player, World};
