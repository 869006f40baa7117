//! Maze Raider (workspace facade crate).
//!
//! This package keeps a single `maze_raider::{core,render,input,term,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use maze_raider_core as core;
pub use maze_raider_input as input;
pub use maze_raider_render as render;
pub use maze_raider_term as term;
pub use maze_raider_types as types;
