use crate::{
    foundation::core::{AspectRatio, CanvasSize, Rgba8Premul},
    render::surface::Surface,
};

/// Height of the legacy bottom scrim for a canvas; taller formats get more room for copy.
pub fn scrim_height(size: CanvasSize) -> u32 {
    let frac = match size.aspect() {
        AspectRatio::Story => 0.40,
        AspectRatio::Portrait => 0.34,
        AspectRatio::Square => 0.30,
    };
    (f64::from(size.height) * frac) as u32
}

/// First row of the legacy bottom scrim.
pub fn scrim_start(size: CanvasSize) -> u32 {
    size.height - scrim_height(size)
}

/// Black gradient from fully transparent at row `y0` to `max_alpha` at the bottom edge.
///
/// Row `i` of the ramp (counted from `max(0, y0)`) gets alpha `floor(i / ramp * max_alpha)`,
/// so the first row is untouched and the last row stays just below `max_alpha`.
pub fn apply_bottom_scrim(surface: &mut Surface, y0: i64, max_alpha: u8) {
    let h = i64::from(surface.size().height);
    let start = y0.max(0);
    let ramp = (h - start).max(1);
    for i in 0..ramp {
        let y = start + i;
        if y >= h {
            break;
        }
        let a = ((i as f64 / ramp as f64) * f64::from(max_alpha)) as u8;
        surface.blend_row(y as u32, Rgba8Premul::from_straight_rgba(0, 0, 0, a));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scrim.rs"]
mod tests;
