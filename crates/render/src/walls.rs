//! Wall pass - per-column DDA raycasting.
//!
//! Each screen column casts one ray through the tile grid with the classic
//! DDA voxel traversal and draws a vertically centered wall slice whose
//! height is inversely proportional to the *perpendicular* hit distance
//! (computed from the hit axis, which is what keeps straight walls straight
//! instead of fish-eyed). The surface is one bit deep, so orientation stands
//! in for shading: slices from x-axis crossings are solid, slices from
//! y-axis crossings are drawn with a `(x + y) % 2` checkerboard dither. That
//! two-tone pattern is what makes corners readable.
//!
//! The pass also fills the per-column depth buffer the sprite pass tests
//! against.

use maze_raider_core::{MazeMap, Player};
use maze_raider_types::{EngineConfig, SCREEN_WIDTH};

use crate::fb::PixelBuffer;

/// Nearest wall distance per screen column.
pub type DepthBuffer = [f32; SCREEN_WIDTH];

/// Depth values never drop below this, keeping `height = h / dist` finite.
pub const MIN_WALL_DIST: f32 = 1e-4;

/// Cast all columns, drawing wall slices into `fb` and returning the depth
/// buffer. Rays that leave the grid leave their column blank with the depth
/// entry parked at `config.max_depth`.
pub fn render_walls(
    map: &MazeMap,
    player: &Player,
    config: &EngineConfig,
    fb: &mut PixelBuffer,
) -> DepthBuffer {
    let mut depth = [config.max_depth; SCREEN_WIDTH];
    let h = fb.height();
    let half_fov_tan = (config.fov * 0.5).tan();
    // Termination backstop even on pathological geometry.
    let max_steps = (config.max_depth as i32 * map.width().max(map.height())).max(1);

    for x in 0..SCREEN_WIDTH.min(fb.width() as usize) {
        let camera_x = 2.0 * x as f32 / SCREEN_WIDTH as f32 - 1.0;
        let ray_angle = player.angle + (camera_x * half_fov_tan).atan();
        let dir = (ray_angle.cos(), ray_angle.sin());

        let mut cell_x = player.x.floor() as i32;
        let mut cell_y = player.y.floor() as i32;
        let step_x: i32 = if dir.0 < 0.0 { -1 } else { 1 };
        let step_y: i32 = if dir.1 < 0.0 { -1 } else { 1 };
        let delta_x = if dir.0 == 0.0 {
            f32::INFINITY
        } else {
            (1.0 / dir.0).abs()
        };
        let delta_y = if dir.1 == 0.0 {
            f32::INFINITY
        } else {
            (1.0 / dir.1).abs()
        };
        let mut side_x = if dir.0 < 0.0 {
            (player.x - cell_x as f32) * delta_x
        } else {
            (cell_x as f32 + 1.0 - player.x) * delta_x
        };
        let mut side_y = if dir.1 < 0.0 {
            (player.y - cell_y as f32) * delta_y
        } else {
            (cell_y as f32 + 1.0 - player.y) * delta_y
        };

        // side_hit_y: the crossing that produced the hit was on the y axis.
        let mut hit: Option<bool> = None;
        for _ in 0..max_steps {
            let side_hit_y = side_x >= side_y;
            if side_hit_y {
                side_y += delta_y;
                cell_y += step_y;
            } else {
                side_x += delta_x;
                cell_x += step_x;
            }

            if !map.in_bounds(cell_x, cell_y) {
                break;
            }
            if map.is_wall(cell_x, cell_y) {
                hit = Some(side_hit_y);
                break;
            }
        }

        let Some(side_hit_y) = hit else {
            continue;
        };

        // Perpendicular distance from the axis of the hit (no fish-eye).
        let perp = if side_hit_y {
            (cell_y as f32 - player.y + (1.0 - step_y as f32) / 2.0) / dir.1
        } else {
            (cell_x as f32 - player.x + (1.0 - step_x as f32) / 2.0) / dir.0
        }
        .max(MIN_WALL_DIST);
        depth[x] = perp;

        let line_h = (h as f32 / perp) as i32;
        let top = (h - line_h) / 2;
        let y0 = top.max(0);
        let y1 = (top + line_h).min(h);
        for y in y0..y1 {
            let on = if side_hit_y {
                (x as i32 + y) % 2 == 0
            } else {
                true
            };
            if on {
                fb.set(x as i32, y, true);
            }
        }
    }

    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_raider_types::{MAX_HP, SCREEN_HEIGHT};

    fn player_at(x: f32, y: f32, angle: f32) -> Player {
        Player {
            x,
            y,
            angle,
            hp: MAX_HP,
            running: false,
        }
    }

    fn room() -> MazeMap {
        MazeMap::from_layout(&[
            "#########", //
            "#.......#",
            "#.......#",
            "#.......#",
            "#########",
        ])
    }

    #[test]
    fn test_every_column_hits_in_a_closed_room() {
        let map = room();
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let cfg = EngineConfig::default();
        let depth = render_walls(&map, &player_at(4.5, 2.5, 0.0), &cfg, &mut fb);

        for (x, &d) in depth.iter().enumerate() {
            assert!(d > 0.0, "depth must stay positive (column {x})");
            assert!(d < cfg.max_depth, "closed room: every ray hits (column {x})");
        }
        assert!(fb.lit() > 0);
    }

    #[test]
    fn test_center_column_distance_matches_facing_wall() {
        let map = room();
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let cfg = EngineConfig::default();
        // Facing +x from (1.5, 2.5): the east wall face is at x=8, 6.5 away.
        let depth = render_walls(&map, &player_at(1.5, 2.5, 0.0), &cfg, &mut fb);

        let center = depth[SCREEN_WIDTH / 2];
        assert!((center - 6.5).abs() < 0.1, "got {center}");
    }

    #[test]
    fn test_facing_wall_slice_is_solid_and_centered() {
        let map = room();
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let cfg = EngineConfig::default();
        let depth = render_walls(&map, &player_at(4.5, 2.5, 0.0), &cfg, &mut fb);

        let x = (SCREEN_WIDTH / 2) as i32;
        let line_h = (SCREEN_HEIGHT as f32 / depth[SCREEN_WIDTH / 2]) as i32;
        let top = (SCREEN_HEIGHT as i32 - line_h) / 2;
        // An x-axis hit paints every pixel of the slice.
        for y in top.max(0)..(top + line_h).min(SCREEN_HEIGHT as i32) {
            assert_eq!(fb.get(x, y), Some(true), "hole at y={y}");
        }
        // Above and below the slice stays blank.
        if top > 0 {
            assert_eq!(fb.get(x, top - 1), Some(false));
        }
    }

    #[test]
    fn test_sideways_wall_is_dithered() {
        let map = room();
        let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let cfg = EngineConfig::default();
        // Facing +y: the south wall is a y-axis crossing.
        let depth = render_walls(
            &map,
            &player_at(4.5, 1.5, std::f32::consts::FRAC_PI_2),
            &cfg,
            &mut fb,
        );

        let x = (SCREEN_WIDTH / 2) as i32;
        let line_h = (SCREEN_HEIGHT as f32 / depth[SCREEN_WIDTH / 2]) as i32;
        let top = ((SCREEN_HEIGHT as i32 - line_h) / 2).max(0);
        // Checkerboard: adjacent rows alternate.
        let a = fb.get(x, top + 1).unwrap();
        let b = fb.get(x, top + 2).unwrap();
        assert_ne!(a, b, "expected dither in a y-side slice");
    }

    #[test]
    fn test_nearer_wall_yields_taller_slice() {
        let map = room();
        let cfg = EngineConfig::default();
        let mut near_fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let mut far_fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let near = render_walls(&map, &player_at(6.5, 2.5, 0.0), &cfg, &mut near_fb);
        let far = render_walls(&map, &player_at(1.5, 2.5, 0.0), &cfg, &mut far_fb);

        assert!(near[SCREEN_WIDTH / 2] < far[SCREEN_WIDTH / 2]);
        let column_lit = |fb: &PixelBuffer| {
            (0..SCREEN_HEIGHT as i32)
                .filter(|&y| fb.get((SCREEN_WIDTH / 2) as i32, y) == Some(true))
                .count()
        };
        assert!(column_lit(&near_fb) > column_lit(&far_fb));
    }
}
