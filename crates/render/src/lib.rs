//! Frame rendering for the one-bit display.
//!
//! Everything here is pure pixel work over a [`fb::PixelBuffer`]; no
//! terminal, no device. The pipeline per frame is fixed:
//!
//! 1. [`walls`] casts one ray per column and fills the depth buffer.
//! 2. [`sprites`] projects billboards back to front against that depth.
//! 3. [`hud`] draws pips, weapon, flashes, and the end-of-round overlay.
//!
//! [`Renderer`] wires the passes together for a whole [`World`] and keeps the
//! per-frame scratch (billboard list, sprite mask) alive between frames.

pub mod fb;
pub mod hud;
pub mod sprites;
pub mod walls;

pub use maze_raider_core as core;
pub use maze_raider_types as types;

pub use fb::PixelBuffer;
pub use sprites::{Billboard, SpriteRenderer};
pub use walls::{render_walls, DepthBuffer, MIN_WALL_DIST};

use maze_raider_core::World;
use maze_raider_types::EXIT_GLYPH;

/// On-screen height of the exit marker relative to a wall slice.
const EXIT_MARKER_SCALE: f32 = 0.5;

/// Full-frame renderer with reusable scratch buffers.
pub struct Renderer {
    sprites: SpriteRenderer,
    billboards: Vec<Billboard>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            sprites: SpriteRenderer::new(),
            billboards: Vec::new(),
        }
    }

    /// Render one frame of `world` into `fb`.
    ///
    /// After `GameOver` the world stops simulating, so this keeps producing
    /// the same backdrop with the message overlay on top until the host
    /// resets the round.
    pub fn render(&mut self, world: &World, fb: &mut PixelBuffer) {
        fb.clear(false);
        let depth = render_walls(world.map(), world.player(), world.config(), fb);

        self.billboards.clear();
        for enemy in world.enemies() {
            if enemy.is_alive() {
                self.billboards.push(Billboard {
                    x: enemy.x,
                    y: enemy.y,
                    glyph: enemy.glyph,
                    height_scale: enemy.height_scale,
                });
            }
        }
        let (ex, ey) = world.map().exit();
        self.billboards.push(Billboard {
            x: ex as f32 + 0.5,
            y: ey as f32 + 0.5,
            glyph: &EXIT_GLYPH,
            height_scale: EXIT_MARKER_SCALE,
        });
        self.sprites.draw(
            world.player(),
            world.config(),
            &mut self.billboards,
            &depth,
            fb,
        );

        hud::draw_hud(world, fb);
        hud::draw_state_overlay(world.state(), fb);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
