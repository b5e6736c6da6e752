use magnitude_protocol::{Point, Rect, Viewport};

use crate::scene::SceneObject;

/// Screen extents at or beyond this are treated as "effectively infinite"
/// and skipped — a numeric-overflow guard, not a visual choice.
pub const CULL_EXTENT: f64 = 1e8;
/// Below this screen width an object is fully opaque; above it opacity
/// decays logarithmically, reaching zero at `CULL_EXTENT` (a 3-decade fade).
pub const FADE_START: f64 = 1e5;

/// Where one object lands on screen for the current scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectLayout {
    pub rect: Rect,
    pub alpha: u8,
    /// Label font size, derived from the on-screen area.
    pub font_size: f64,
    /// Label top-left corner (the object's bottom-left, raised by one font
    /// size).
    pub label_pos: Point,
}

/// Map one object into screen space for the given scale and viewport.
///
/// Returns `None` when the object should not be drawn at all: its computed
/// extent is non-finite or at least [`CULL_EXTENT`] pixels in either
/// dimension.
///
/// Y is deliberately scaled by the viewport *width*, like X, so zoom stays
/// aspect-correct regardless of window shape.
pub fn layout_object(object: &SceneObject, scale: f64, viewport: &Viewport) -> Option<ObjectLayout> {
    let w = viewport.width * object.true_size / scale;
    let h = w * object.aspect;
    if !w.is_finite() || !h.is_finite() || w >= CULL_EXTENT || h >= CULL_EXTENT {
        return None;
    }

    let x = viewport.width * (object.position.x / scale + 0.5);
    let y = viewport.width * (object.position.y / scale + viewport.height / (2.0 * viewport.width));

    let font_size = (w * h).sqrt() / 5.0;
    Some(ObjectLayout {
        rect: Rect::new(x, y, w, h),
        alpha: opacity(w),
        font_size,
        label_pos: Point::new(x, y + h - font_size),
    })
}

/// Opacity for an object of the given screen width: fully opaque below
/// [`FADE_START`], then `255 - 85·log10(w / FADE_START)` clamped at zero.
pub fn opacity(screen_width: f64) -> u8 {
    if screen_width < FADE_START {
        return 255;
    }
    (255.0 - 85.0 * (screen_width / FADE_START).log10()).max(0.0) as u8
}
