//! HUD and overlay drawing: hit points, weapon, flashes, end-of-round text.

use maze_raider_core::World;
use maze_raider_types::{GameState, Glyph, GUN_GLYPH, MUZZLE_GLYPH};

use crate::fb::PixelBuffer;

/// 3x5 caps font used by overlays. Rows are 3-bit masks, leftmost pixel in
/// the most significant bit.
fn font_rows(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        _ => return None,
    };
    Some(rows)
}

/// Pixel width of `text` at `scale` (spaces advance, unknown chars skip).
pub fn text_width(text: &str, scale: i32) -> i32 {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    chars * 4 * scale - scale
}

/// Draw `text` with its top-left corner at `(x, y)`.
pub fn draw_text(fb: &mut PixelBuffer, x: i32, y: i32, text: &str, scale: i32) {
    let mut cx = x;
    for c in text.chars() {
        if let Some(rows) = font_rows(c) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..3 {
                    if (row >> (2 - rx)) & 1 == 1 {
                        fb.fill_rect(
                            cx + rx * scale,
                            y + ry as i32 * scale,
                            scale,
                            scale,
                            true,
                        );
                    }
                }
            }
        }
        cx += 4 * scale;
    }
}

fn blit_glyph(fb: &mut PixelBuffer, x: i32, y: i32, glyph: &Glyph) {
    for gy in 0..glyph.height {
        for gx in 0..glyph.width {
            if glyph.pixel(gx, gy) {
                fb.set(x + gx as i32, y + gy as i32, true);
            }
        }
    }
}

/// Overlay pass: HP pips, damage flash border, weapon, muzzle flash.
pub fn draw_hud(world: &World, fb: &mut PixelBuffer) {
    let (w, h) = (fb.width(), fb.height());

    // HP pips, top-left.
    for i in 0..world.player().hp as i32 {
        fb.fill_rect(2 + i * 6, 2, 4, 4, true);
    }

    // Damage flash: a bright frame around the whole view.
    if world.hit_flash() > 0 {
        fb.fill_rect(0, 0, w, 2, true);
        fb.fill_rect(0, h - 2, w, 2, true);
        fb.fill_rect(0, 0, 2, h, true);
        fb.fill_rect(w - 2, 0, 2, h, true);
    }

    // Weapon, bottom center; recoil lift plus muzzle flash while firing.
    let firing = world.gun_flash() > 0;
    let gun_x = (w - GUN_GLYPH.width as i32) / 2;
    let gun_y = h - GUN_GLYPH.height as i32 - if firing { 2 } else { 0 };
    blit_glyph(fb, gun_x, gun_y, &GUN_GLYPH);
    if firing {
        let mx = (w - MUZZLE_GLYPH.width as i32) / 2;
        blit_glyph(fb, mx, gun_y - MUZZLE_GLYPH.height as i32 - 1, &MUZZLE_GLYPH);
    }
}

/// Centered boxed message over the frozen backdrop.
pub fn draw_game_over(fb: &mut PixelBuffer, message: &str) {
    let (w, h) = (fb.width(), fb.height());
    let scale = 2;
    let tw = text_width(message, scale);
    let th = 5 * scale;
    let pad = 4;

    let bx = (w - tw) / 2 - pad;
    let by = (h - th) / 2 - pad;
    let bw = tw + pad * 2;
    let bh = th + pad * 2;

    fb.fill_rect(bx, by, bw, bh, false);
    fb.fill_rect(bx, by, bw, 1, true);
    fb.fill_rect(bx, by + bh - 1, bw, 1, true);
    fb.fill_rect(bx, by, 1, bh, true);
    fb.fill_rect(bx + bw - 1, by, 1, bh, true);
    draw_text(fb, (w - tw) / 2, (h - th) / 2, message, scale);
}

/// Draw the end-of-round overlay if the round is over.
pub fn draw_state_overlay(state: GameState, fb: &mut PixelBuffer) {
    if let GameState::GameOver { message, .. } = state {
        draw_game_over(fb, message);
    }
}
