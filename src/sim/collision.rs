//! Collision queries between sprites
//!
//! Everything here is a read-only query; responses (landing, death, pickup)
//! are applied by the tick.

use glam::Vec2;

use super::mask::Mask;
use super::rect::Rect;

/// Bounding-box overlap
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Pixel-precise collision between two masked sprites.
///
/// The cheap rectangle test runs first; masks are compared only when the
/// boxes overlap, at the whole-pixel offset between the two top-left corners.
pub fn mask_collide(a_rect: &Rect, a_mask: &Mask, b_rect: &Rect, b_mask: &Mask) -> bool {
    if !rects_overlap(a_rect, b_rect) {
        return false;
    }
    let offset = (
        (b_rect.x - a_rect.x).floor() as i32,
        (b_rect.y - a_rect.y).floor() as i32,
    );
    a_mask.overlaps(b_mask, offset)
}

/// Whether `rect`, temporarily shifted by `nudge`, overlaps any of `others`.
///
/// Used as a ground probe: the hitbox itself is never moved.
pub fn probe_overlap<'a>(
    rect: &Rect,
    nudge: Vec2,
    others: impl IntoIterator<Item = &'a Rect>,
) -> bool {
    let mut probe = *rect;
    probe.translate(nudge);
    others.into_iter().any(|other| probe.overlaps(other))
}

/// Among the platforms overlapping `player`, the index of the one with the
/// greatest bottom edge. Ties keep the earliest.
pub fn find_landing_platform<'a>(
    player: &Rect,
    platforms: impl IntoIterator<Item = &'a Rect>,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, rect) in platforms.into_iter().enumerate() {
        if !player.overlaps(rect) {
            continue;
        }
        match best {
            Some((_, bottom)) if rect.bottom() <= bottom => {}
            _ => best = Some((i, rect.bottom())),
        }
    }
    best.map(|(i, _)| i)
}
