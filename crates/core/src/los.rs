//! Line of sight - shared visibility test.
//!
//! The same DDA cell march the wall renderer uses, instantiated for a ray
//! between two arbitrary points instead of a fixed-angle camera ray. It is a
//! pure function with no side effects, consumed by spawn placement (rejecting
//! candidates the player could see immediately) and by enemy targeting.

use crate::map::MazeMap;

/// True if an unobstructed straight line no longer than `max_distance`
/// connects `from` to `to`.
///
/// Same-point inputs are trivially visible. The march stops with `false` the
/// moment a wall cell is entered before the destination's cell, and with
/// `true` once the destination's cell is reached; leaving the grid is a
/// normal `false`, not an error.
pub fn has_los(map: &MazeMap, from: (f32, f32), to: (f32, f32), max_distance: f32) -> bool {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= f32::EPSILON {
        return true;
    }
    if distance > max_distance {
        return false;
    }

    let dir = (dx / distance, dy / distance);
    let mut cell_x = from.0.floor() as i32;
    let mut cell_y = from.1.floor() as i32;
    let target = (to.0.floor() as i32, to.1.floor() as i32);
    if (cell_x, cell_y) == target {
        return true;
    }

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
        (from.0 - cell_x as f32) * delta_x
    } else {
        (cell_x as f32 + 1.0 - from.0) * delta_x
    };
    let mut side_y = if dir.1 < 0.0 {
        (from.1 - cell_y as f32) * delta_y
    } else {
        (cell_y as f32 + 1.0 - from.1) * delta_y
    };

    loop {
        if side_x < side_y {
            side_x += delta_x;
            cell_x += step_x;
        } else {
            side_y += delta_y;
            cell_y += step_y;
        }

        if !map.in_bounds(cell_x, cell_y) {
            return false;
        }
        if (cell_x, cell_y) == target {
            return true;
        }
        if map.is_wall(cell_x, cell_y) {
            return false;
        }
    }
}
