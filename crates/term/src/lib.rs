//! Terminal presentation for the one-bit framebuffer.
//!
//! This crate stands in for the hardware display encoder during terminal
//! play: it packs two pixel rows per character cell with half-block glyphs
//! and flushes diffs to the terminal. The render crates never depend on it,
//! so any other encoder can consume `PixelBuffer::bytes()` instead.

pub mod renderer;

pub use maze_raider_render as render;
pub use maze_raider_types as types;

pub use renderer::TerminalRenderer;
