use crate::constants::{POINTER_SCALE, POINTER_X_OFFSET, POINTER_Y_OFFSET};

/// Latest mapped pointer position; the camera eases toward it every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTarget {
    pub x: f32,
    pub y: f32,
}

/// Map viewport-relative pixel coordinates into camera target space.
///
/// The range is deliberately lopsided (`[-1, 4]` horizontally, `[-4, 1]`
/// vertically). Coordinates outside the viewport are not clamped. Returns
/// `None` for a degenerate viewport.
#[inline]
pub fn map_pointer(px: f32, py: f32, width: f32, height: f32) -> Option<PointerTarget> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(PointerTarget {
        x: (px / width) * POINTER_SCALE + POINTER_X_OFFSET,
        y: -(py / height) * POINTER_SCALE + POINTER_Y_OFFSET,
    })
}

impl PointerTarget {
    /// Overwrite the target from a pointer-move event; later events win.
    pub fn track(&mut self, px: f32, py: f32, width: f32, height: f32) {
        match map_pointer(px, py, width, height) {
            Some(t) => *self = t,
            None => log::debug!("[pointer] ignoring move on {}x{} viewport", width, height),
        }
    }
}
