//! Sprite pass - billboard projection with per-pixel occlusion.
//!
//! Billboards are drawn back to front so nearer sprites overwrite farther
//! ones, and every pixel is tested against the wall depth buffer for its
//! screen column, which is all it takes for sprites to disappear behind
//! walls without any real 3-D geometry. Glyphs are scaled with plain
//! nearest-neighbor block replication - chunky pixels are the look, not a
//! compromise.
//!
//! After the body pass a one-pixel 8-neighbor outline is *cleared* around
//! the drawn pixels (same per-column depth test): on a one-bit surface a
//! dark halo is what separates a lit sprite from dithered walls.

use maze_raider_core::Player;
use maze_raider_types::{
    normalize_angle, EngineConfig, Glyph, MIN_SPRITE_DISTANCE, SCREEN_HEIGHT, SCREEN_WIDTH,
};

use crate::fb::PixelBuffer;
use crate::walls::DepthBuffer;

/// One camera-facing sprite to project this frame.
#[derive(Debug, Clone, Copy)]
pub struct Billboard {
    pub x: f32,
    pub y: f32,
    pub glyph: &'static Glyph,
    /// On-screen height multiplier relative to a full wall slice.
    pub height_scale: f32,
}

/// Sprite pass with a reusable screen-sized scratch mask for the outline
/// dilation.
pub struct SpriteRenderer {
    body: Vec<bool>,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self {
            body: vec![false; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Draw `billboards` (reordered in place back-to-front) against the wall
    /// depth of the current frame.
    pub fn draw(
        &mut self,
        player: &Player,
        config: &EngineConfig,
        billboards: &mut [Billboard],
        depth: &DepthBuffer,
        fb: &mut PixelBuffer,
    ) {
        billboards.sort_unstable_by(|a, b| {
            let da = player.distance_to(a.x, a.y);
            let db = player.distance_to(b.x, b.y);
            db.total_cmp(&da)
        });

        for billboard in billboards.iter() {
            self.draw_one(player, config, billboard, depth, fb);
        }
    }

    fn draw_one(
        &mut self,
        player: &Player,
        config: &EngineConfig,
        billboard: &Billboard,
        depth: &DepthBuffer,
        fb: &mut PixelBuffer,
    ) {
        let (w, h) = (fb.width(), fb.height());
        let dist = player.distance_to(billboard.x, billboard.y);
        if dist < MIN_SPRITE_DISTANCE {
            return;
        }
        let bearing = (billboard.y - player.y).atan2(billboard.x - player.x);
        let rel = normalize_angle(bearing - player.angle);
        if rel.abs() > config.fov / 1.8 {
            return;
        }

        // Project the sprite center onto the screen.
        let half_fov_tan = (config.fov * 0.5).tan();
        let screen_x = (w as f32 / 2.0) * (1.0 + rel.tan() / half_fov_tan);

        let sprite_h = (h as f32 / dist * billboard.height_scale) as i32;
        if sprite_h < 1 {
            return;
        }
        // Uniform scale from the glyph's native height; width follows.
        let scale = sprite_h as f32 / billboard.glyph.height as f32;
        let sprite_w = ((billboard.glyph.width as f32 * scale) as i32).max(1);

        let x0 = screen_x as i32 - sprite_w / 2;
        let y0 = (h - sprite_h) / 2;

        // Body pass: nearest-neighbor sample, depth-tested per column.
        for sy in 0..sprite_h {
            let py = y0 + sy;
            if py < 0 || py >= h {
                continue;
            }
            let gy = (sy as f32 / scale) as usize;
            for sx in 0..sprite_w {
                let px = x0 + sx;
                if px < 0 || px >= w {
                    continue;
                }
                if dist >= depth[px as usize] {
                    continue;
                }
                let gx = (sx as f32 / scale) as usize;
                if billboard.glyph.pixel(gx, gy) {
                    fb.set(px, py, true);
                    self.body[py as usize * SCREEN_WIDTH + px as usize] = true;
                }
            }
        }

        // Outline pass: clear every non-body pixel touching a body pixel,
        // with the same depth test so the halo stays behind nearer walls.
        let ox0 = (x0 - 1).max(0);
        let ox1 = (x0 + sprite_w).min(w - 1);
        let oy0 = (y0 - 1).max(0);
        let oy1 = (y0 + sprite_h).min(h - 1);
        for py in oy0..=oy1 {
            for px in ox0..=ox1 {
                if self.body[py as usize * SCREEN_WIDTH + px as usize] {
                    continue;
                }
                if dist >= depth[px as usize] {
                    continue;
                }
                if self.touches_body(px, py, w, h) {
                    fb.set(px, py, false);
                }
            }
        }

        // Reset the scratch mask for the next billboard.
        for py in oy0..=oy1 {
            for px in ox0..=ox1 {
                self.body[py as usize * SCREEN_WIDTH + px as usize] = false;
            }
        }
    }

    fn touches_body(&self, px: i32, py: i32, w: i32, h: i32) -> bool {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (px + dx, py + dy);
                if nx < 0 || nx >= w || ny < 0 || ny >= h {
                    continue;
                }
                if self.body[ny as usize * SCREEN_WIDTH + nx as usize] {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walls::render_walls;
    use maze_raider_core::MazeMap;
    use maze_raider_types::MAX_HP;

    /// Solid 8x8 block, so body coverage is predictable.
    static BLOCK: Glyph = Glyph::new(8, &[0xFF; 8]);

    fn player_at(x: f32, y: f32, angle: f32) -> Player {
        Player {
            x,
            y,
            angle,
            hp: MAX_HP,
            running: false,
        }
    }

    fn open_depth(value: f32) -> DepthBuffer {
        [value; SCREEN_WIDTH]
    }

    #[test]
    fn test_sprite_in_the_open_draws_pixels() {
        let player = player_at(1.5, 2.5, 0.0);
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let depth = open_depth(16.0);
        let mut sprites = [Billboard {
            x: 4.5,
            y: 2.5,
            glyph: &BLOCK,
            height_scale: 1.0,
        }];

        SpriteRenderer::new().draw(&player, &EngineConfig::default(), &mut sprites, &depth, &mut fb);
        assert!(fb.lit() > 0);
        // Centered on the middle column and the horizon.
        assert_eq!(fb.get((SCREEN_WIDTH / 2) as i32, (SCREEN_HEIGHT / 2) as i32), Some(true));
    }

    #[test]
    fn test_sprite_behind_player_is_culled() {
        let player = player_at(4.5, 2.5, 0.0);
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let depth = open_depth(16.0);
        let mut sprites = [Billboard {
            x: 1.5,
            y: 2.5,
            glyph: &BLOCK,
            height_scale: 1.0,
        }];

        SpriteRenderer::new().draw(&player, &EngineConfig::default(), &mut sprites, &depth, &mut fb);
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_too_close_sprite_is_culled() {
        let player = player_at(4.5, 2.5, 0.0);
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let depth = open_depth(16.0);
        let mut sprites = [Billboard {
            x: 4.55,
            y: 2.5,
            glyph: &BLOCK,
            height_scale: 1.0,
        }];

        SpriteRenderer::new().draw(&player, &EngineConfig::default(), &mut sprites, &depth, &mut fb);
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_sprite_fully_behind_wall_contributes_nothing() {
        // Wall at x=5 splits the corridor; sprite on the far side.
        let map = MazeMap::from_layout(&[
            "##########", //
            "#...#....#",
            "#...#....#",
            "#...#....#",
            "##########",
        ]);
        let player = player_at(1.5, 2.5, 0.0);
        let cfg = EngineConfig::default();

        let mut walls_only = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let depth = render_walls(&map, &player, &cfg, &mut walls_only);

        let mut with_sprite = walls_only.clone();
        let mut sprites = [Billboard {
            x: 7.5,
            y: 2.5,
            glyph: &BLOCK,
            height_scale: 1.0,
        }];
        SpriteRenderer::new().draw(&player, &cfg, &mut sprites, &depth, &mut with_sprite);

        assert_eq!(walls_only, with_sprite, "occluded sprite drew pixels");
    }

    #[test]
    fn test_sprite_in_front_of_wall_cuts_an_outline_into_it() {
        // Facing wall 4.5 away; the sprite at distance 2 is scaled so its
        // outline ring lands inside the wall slice.
        let map = MazeMap::from_layout(&[
            "#######", //
            "#.....#",
            "#.....#",
            "#.....#",
            "#######",
        ]);
        let player = player_at(1.5, 2.5, 0.0);
        let cfg = EngineConfig::default();

        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let depth = render_walls(&map, &player, &cfg, &mut fb);

        let x = (SCREEN_WIDTH / 2) as i32;
        let h = SCREEN_HEIGHT as i32;
        let sprite_h = (SCREEN_HEIGHT as f32 / 2.0 * 0.4) as i32;
        let y0 = (h - sprite_h) / 2;
        // The wall slice covers the row just above the sprite top...
        assert_eq!(fb.get(x, y0 - 1), Some(true));

        let mut sprites = [Billboard {
            x: 3.5,
            y: 2.5,
            glyph: &BLOCK,
            height_scale: 0.4,
        }];
        SpriteRenderer::new().draw(&player, &cfg, &mut sprites, &depth, &mut fb);

        // ...and the outline pass cuts it back out, while the body row stays lit.
        assert_eq!(fb.get(x, y0), Some(true));
        assert_eq!(fb.get(x, y0 - 1), Some(false));
    }

    #[test]
    fn test_nearer_sprite_overwrites_farther() {
        let player = player_at(1.5, 2.5, 0.0);
        let cfg = EngineConfig::default();
        let depth = open_depth(16.0);

        // Same line of sight, different distances; drawn in either order the
        // result must favor the nearer one at the shared center pixel.
        let mut sprites = [
            Billboard {
                x: 3.5,
                y: 2.5,
                glyph: &BLOCK,
                height_scale: 1.0,
            },
            Billboard {
                x: 6.5,
                y: 2.5,
                glyph: &BLOCK,
                height_scale: 1.0,
            },
        ];
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        SpriteRenderer::new().draw(&player, &cfg, &mut sprites, &depth, &mut fb);

        // After draw the slice is sorted farthest-first.
        let d0 = player.distance_to(sprites[0].x, sprites[0].y);
        let d1 = player.distance_to(sprites[1].x, sprites[1].y);
        assert!(d0 > d1, "sort order is back to front");
        assert_eq!(fb.get((SCREEN_WIDTH / 2) as i32, (SCREEN_HEIGHT / 2) as i32), Some(true));
    }
}
