use std::sync::Arc;

use image::RgbaImage;

use crate::{
    compose::report::{SkipReason, layer_rect},
    foundation::core::NormalizedBox,
    placement::canvas::{MAX_BOX_OVERFLOW, resize_exact},
    render::surface::Surface,
};

/// An inserted raster (logo, product cutout) placed at a normalized box.
#[derive(Clone, Debug)]
pub struct ElementSpec {
    pub image: Arc<RgbaImage>,
    pub bbox: NormalizedBox,
    pub opacity: f32,
}

/// Paste an element at the top-left of its box.
///
/// The box width drives the resize and the height follows the source aspect ratio, so the
/// element may extend past the bottom of its box; the canvas clips it.
pub fn draw_element(surface: &mut Surface, element: &ElementSpec) -> Result<(), SkipReason> {
    let rect = layer_rect(&element.bbox, surface.size())?;
    let (iw, ih) = element.image.dimensions();
    if iw == 0 || ih == 0 {
        return Err(SkipReason::EmptyImage);
    }

    let w = rect.width().max(1) as u32;
    let h = (f64::from(w) * f64::from(ih) / f64::from(iw)).round().max(1.0);
    if h > MAX_BOX_OVERFLOW * f64::from(surface.size().height) {
        return Err(SkipReason::InvalidBox);
    }
    let h = h as u32;
    let resized = resize_exact(&element.image, w, h);
    surface.draw_image(&resized, rect.x0, rect.y0, element.opacity);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/draw/elements.rs"]
mod tests;
