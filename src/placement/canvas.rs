//! Base-image placement strategies.
//!
//! All functions take a straight-alpha source raster and return a raster of exactly the
//! requested canvas size.

use image::{RgbaImage, imageops};

use crate::foundation::core::{CanvasSize, NormalizedBox};

const FILTER: imageops::FilterType = imageops::FilterType::Lanczos3;

/// Scale factor and resized dimensions chosen by a placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledSize {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

/// Dimensions used by [`cover_crop`]: `scale = max(tw/iw, th/ih)`.
///
/// Both resized dimensions are at least the target so the crop never comes up short.
pub fn cover_size(src_w: u32, src_h: u32, size: CanvasSize) -> Option<ScaledSize> {
    if src_w == 0 || src_h == 0 || size.width == 0 || size.height == 0 {
        return None;
    }
    let (tw, th) = (f64::from(size.width), f64::from(size.height));
    let scale = (tw / f64::from(src_w)).max(th / f64::from(src_h));
    let width = ((f64::from(src_w) * scale).round() as u32).max(size.width);
    let height = ((f64::from(src_h) * scale).round() as u32).max(size.height);
    Some(ScaledSize {
        scale,
        width,
        height,
    })
}

/// Dimensions used by [`contain_fit`]: `scale = min(tw/iw, th/ih)`.
pub fn contain_size(src_w: u32, src_h: u32, size: CanvasSize) -> Option<ScaledSize> {
    if src_w == 0 || src_h == 0 || size.width == 0 || size.height == 0 {
        return None;
    }
    let (tw, th) = (f64::from(size.width), f64::from(size.height));
    let scale = (tw / f64::from(src_w)).min(th / f64::from(src_h));
    let width = ((f64::from(src_w) * scale).round() as u32)
        .min(size.width)
        .max(1);
    let height = ((f64::from(src_h) * scale).round() as u32)
        .min(size.height)
        .max(1);
    Some(ScaledSize {
        scale,
        width,
        height,
    })
}

/// Scale to fill the canvas, then center-crop the overflow.
pub fn cover_crop(img: &RgbaImage, size: CanvasSize) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    let Some(scaled) = cover_size(iw, ih, size) else {
        return stretch(img, size);
    };
    let resized = resize_exact(img, scaled.width, scaled.height);
    let left = (scaled.width - size.width) / 2;
    let top = (scaled.height - size.height) / 2;
    imageops::crop_imm(&resized, left, top, size.width, size.height).to_image()
}

/// Scale to fit inside the canvas and center on a transparent background.
pub fn contain_fit(img: &RgbaImage, size: CanvasSize) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    let Some(scaled) = contain_size(iw, ih, size) else {
        return stretch(img, size);
    };
    let resized = resize_exact(img, scaled.width, scaled.height);
    let mut canvas = RgbaImage::new(size.width, size.height);
    let left = i64::from((size.width - scaled.width) / 2);
    let top = i64::from((size.height - scaled.height) / 2);
    imageops::replace(&mut canvas, &resized, left, top);
    canvas
}

/// Resize so that the image fits within `(max_w, max_h)` preserving aspect ratio.
///
/// Unlike [`contain_fit`] there is no padding; the returned raster has the scaled dimensions.
pub fn contain_resize(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let bounds = CanvasSize {
        width: max_w.max(1),
        height: max_h.max(1),
    };
    let (iw, ih) = img.dimensions();
    match contain_size(iw, ih, bounds) {
        Some(scaled) => resize_exact(img, scaled.width, scaled.height),
        None => stretch(img, bounds),
    }
}

/// Largest extent, in canvas widths or heights, a boxed base image may be resized to.
///
/// Boxes may overflow the canvas, but anything beyond this is treated as an unusable box.
pub const MAX_BOX_OVERFLOW: f64 = 4.0;

/// Resized `(width, height)` for a boxed placement, or `None` when the box is unusable.
pub fn boxed_size(
    src_w: u32,
    src_h: u32,
    size: CanvasSize,
    b: &NormalizedBox,
) -> Option<(f64, f64)> {
    if !b.is_valid() || src_w == 0 || src_h == 0 || b.w > MAX_BOX_OVERFLOW {
        return None;
    }
    let target_w = (b.w * f64::from(size.width)).round().max(1.0);
    let target_h = (target_w * f64::from(src_h) / f64::from(src_w)).round().max(1.0);
    (target_h <= MAX_BOX_OVERFLOW * f64::from(size.height.max(1))).then_some((target_w, target_h))
}

/// Place the image according to an explicit normalized box.
///
/// The image is scaled so its width equals `box.w * canvas_width` and centered on the box's
/// center. Overflow is clipped by the canvas; nothing is cropped beforehand. Without a usable
/// box (see [`boxed_size`]) this is [`contain_fit`].
pub fn place_with_box(
    img: &RgbaImage,
    size: CanvasSize,
    placement: Option<&NormalizedBox>,
) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 {
        return stretch(img, size);
    }
    let Some(b) = placement else {
        return contain_fit(img, size);
    };
    let Some((target_w, target_h)) = boxed_size(iw, ih, size, b) else {
        return contain_fit(img, size);
    };
    let resized = resize_exact(img, target_w as u32, target_h as u32);

    let (cx, cy) = b.center();
    let left = (cx * f64::from(size.width) - target_w / 2.0).round() as i64;
    let top = (cy * f64::from(size.height) - target_h / 2.0).round() as i64;

    let mut canvas = RgbaImage::new(size.width, size.height);
    imageops::replace(&mut canvas, &resized, left, top);
    canvas
}

/// Non-aspect-preserving resize; the degenerate fallback for zero-area sources or canvases.
pub fn stretch(img: &RgbaImage, size: CanvasSize) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || size.width == 0 || size.height == 0 {
        return RgbaImage::new(size.width, size.height);
    }
    resize_exact(img, size.width, size.height)
}

pub(crate) fn resize_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width.max(1), height.max(1), FILTER)
}

#[cfg(test)]
#[path = "../../tests/unit/placement/canvas.rs"]
mod tests;
