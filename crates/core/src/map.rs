//! Map module - tile grid and procedural maze generation.
//!
//! The map is a flat row-major grid of [`Tile`]s with a forced wall border.
//! Generation carves a "perfect" maze (exactly one path between any two
//! reachable cells) with an iterative randomized depth-first search on the
//! odd-coordinate lattice: only odd cells become corridor centers, so every
//! corridor is one tile wide with walls between.
//!
//! The carve order is the generator's only source of variation, and it is
//! driven entirely by the injected [`SimpleRng`], so a seed fully determines
//! the level.

use std::f32::consts::{FRAC_PI_2, PI};

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use maze_raider_types::Tile;

/// Requested dimensions below this are silently clamped.
pub const MIN_MAP_DIM: usize = 5;

/// Immutable-after-generation tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    exit: (i32, i32),
}

impl MazeMap {
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Tile at `(x, y)`; everything outside the grid reads as `Wall`.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.get(x, y).unwrap_or(Tile::Wall)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_wall()
    }

    /// In-bounds and walkable.
    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(Tile::Floor)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// The distinguished farthest-from-start tile. Render-only: reaching it
    /// does not end the round.
    pub fn exit(&self) -> (i32, i32) {
        self.exit
    }

    fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Build a map from a character layout: `#` wall, anything else floor,
    /// `E` marks the exit tile. Rows must share one width.
    pub fn from_layout(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        let mut map = Self {
            width,
            height,
            tiles: vec![Tile::Wall; (width * height) as usize],
            exit: (0, 0),
        };
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len() as i32, width, "ragged layout row {y}");
            for (x, ch) in row.chars().enumerate() {
                let (x, y) = (x as i32, y as i32);
                match ch {
                    '#' => map.set(x, y, Tile::Wall),
                    'E' => {
                        map.set(x, y, Tile::Floor);
                        map.exit = (x, y);
                    }
                    _ => map.set(x, y, Tile::Floor),
                }
            }
        }
        map
    }
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub map: MazeMap,
    /// Center of the start tile, in tile units.
    pub player_start: (f32, f32),
    /// Facing fixed by the very first carve direction.
    pub player_angle: f32,
    /// Every carved tile, in carve order. Spawn placement filters these.
    pub spawn_candidates: Vec<(i32, i32)>,
}

/// Candidate moves on the lattice: two tiles out, with the facing angle a
/// player looking that way would have.
const CARVE_DIRS: [(i32, i32, f32); 4] = [
    (2, 0, 0.0),
    (0, 2, FRAC_PI_2),
    (-2, 0, PI),
    (0, -2, PI + FRAC_PI_2),
];

/// Carve a maze of the given dimensions.
///
/// Dimensions below [`MIN_MAP_DIM`] are clamped, and even dimensions round up
/// to the next odd value so the lattice lines up with the border. Generation
/// cannot fail: the walk terminates once every reachable cell is visited.
pub fn generate(width: usize, height: usize, rng: &mut SimpleRng) -> Generated {
    let width = force_odd(width.max(MIN_MAP_DIM)) as i32;
    let height = force_odd(height.max(MIN_MAP_DIM)) as i32;

    let mut map = MazeMap {
        width,
        height,
        tiles: vec![Tile::Wall; (width * height) as usize],
        exit: (1, 1),
    };

    let start = (1, 1);
    map.set(start.0, start.1, Tile::Floor);

    let mut stack = vec![start];
    let mut spawn_candidates = vec![start];
    let mut player_angle = 0.0_f32;
    let mut first_carve = true;

    while let Some(&(cx, cy)) = stack.last() {
        let mut moves: ArrayVec<(i32, i32, f32), 4> = CARVE_DIRS.iter().copied().collect();
        rng.shuffle(&mut moves);

        let mut advanced = false;
        for (dx, dy, angle) in moves {
            let (tx, ty) = (cx + dx, cy + dy);
            // Target must sit strictly inside the border and still be solid.
            if tx < 1 || tx > width - 2 || ty < 1 || ty > height - 2 {
                continue;
            }
            if map.tile(tx, ty) != Tile::Wall {
                continue;
            }

            let (wx, wy) = (cx + dx / 2, cy + dy / 2);
            map.set(wx, wy, Tile::Floor);
            map.set(tx, ty, Tile::Floor);
            spawn_candidates.push((wx, wy));
            spawn_candidates.push((tx, ty));
            stack.push((tx, ty));

            if first_carve {
                player_angle = angle;
                first_carve = false;
            }
            advanced = true;
            break;
        }

        if !advanced {
            stack.pop();
        }
    }

    // Re-wall the outer border, guarding against lattice leakage at the edges.
    for x in 0..width {
        map.set(x, 0, Tile::Wall);
        map.set(x, height - 1, Tile::Wall);
    }
    for y in 0..height {
        map.set(0, y, Tile::Wall);
        map.set(width - 1, y, Tile::Wall);
    }

    map.exit = farthest_from(start, &spawn_candidates);

    Generated {
        map,
        player_start: (start.0 as f32 + 0.5, start.1 as f32 + 0.5),
        player_angle,
        spawn_candidates,
    }
}

fn force_odd(v: usize) -> usize {
    if v % 2 == 0 {
        v + 1
    } else {
        v
    }
}

/// Candidate maximizing Euclidean distance from `from`, excluding `from`
/// itself. Falls back to `from` if there is nothing else.
fn farthest_from(from: (i32, i32), candidates: &[(i32, i32)]) -> (i32, i32) {
    let mut best = from;
    let mut best_d2 = -1_i64;
    for &(x, y) in candidates {
        if (x, y) == from {
            continue;
        }
        let (dx, dy) = ((x - from.0) as i64, (y - from.1) as i64);
        let d2 = dx * dx + dy * dy;
        if d2 > best_d2 {
            best_d2 = d2;
            best = (x, y);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic_for_seed() {
        let a = generate(17, 11, &mut SimpleRng::new(1234));
        let b = generate(17, 11, &mut SimpleRng::new(1234));
        assert_eq!(a.map, b.map);
        assert_eq!(a.player_angle, b.player_angle);
        assert_eq!(a.spawn_candidates, b.spawn_candidates);
    }

    #[test]
    fn test_small_dimensions_clamp_to_minimum() {
        let g = generate(3, 0, &mut SimpleRng::new(1));
        assert_eq!(g.map.width(), MIN_MAP_DIM as i32);
        assert_eq!(g.map.height(), MIN_MAP_DIM as i32);
    }

    #[test]
    fn test_even_dimensions_round_up_to_odd() {
        let g = generate(6, 10, &mut SimpleRng::new(1));
        assert_eq!(g.map.width(), 7);
        assert_eq!(g.map.height(), 11);
    }

    #[test]
    fn test_start_is_floor_and_centered() {
        let g = generate(17, 11, &mut SimpleRng::new(9));
        assert!(g.map.is_floor(1, 1));
        assert_eq!(g.player_start, (1.5, 1.5));
    }

    #[test]
    fn test_first_carve_fixes_facing() {
        let g = generate(17, 11, &mut SimpleRng::new(77));
        let angle = g.player_angle;
        let dir = CARVE_DIRS
            .iter()
            .find(|&&(_, _, a)| a == angle)
            .expect("facing matches a lattice direction");
        // The corridor actually carved in that direction must be open.
        assert!(g.map.is_floor(1 + dir.0 / 2, 1 + dir.1 / 2));
        assert!(g.map.is_floor(1 + dir.0, 1 + dir.1));
    }

    #[test]
    fn test_spawn_candidates_are_floor() {
        let g = generate(13, 13, &mut SimpleRng::new(5));
        for &(x, y) in &g.spawn_candidates {
            assert!(g.map.is_floor(x, y), "candidate ({x},{y}) is not floor");
        }
    }

    #[test]
    fn test_exit_is_floor_away_from_start() {
        let g = generate(17, 11, &mut SimpleRng::new(3));
        let (ex, ey) = g.map.exit();
        assert!(g.map.is_floor(ex, ey));
        assert_ne!((ex, ey), (1, 1));
    }

    #[test]
    fn test_outside_reads_as_wall() {
        let g = generate(9, 9, &mut SimpleRng::new(2));
        assert!(g.map.is_wall(-1, 4));
        assert!(g.map.is_wall(4, -1));
        assert!(g.map.is_wall(9, 0));
        assert_eq!(g.map.get(-1, 0), None);
    }

    #[test]
    fn test_from_layout_roundtrip() {
        let map = MazeMap::from_layout(&[
            "#####", //
            "#...#",
            "#.#E#",
            "#####",
        ]);
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 4);
        assert!(map.is_wall(2, 2));
        assert!(map.is_floor(1, 1));
        assert_eq!(map.exit(), (3, 2));
    }
}
