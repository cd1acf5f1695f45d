//! Brand motif overlay: placement, tint, opacity and subject protection.

use std::sync::Arc;

use image::RgbaImage;

use crate::{
    foundation::color::Rgb8,
    foundation::core::{CanvasSize, PixelRect},
    placement::canvas::{contain_resize, cover_crop},
    render::surface::Surface,
};

/// Brand teal used when a caller does not pick a tint.
pub const DEFAULT_MOTIF_TINT: Rgb8 = Rgb8::new(0x26, 0x61, 0x56);
pub const DEFAULT_MOTIF_OPACITY: f32 = 0.14;

/// Where the motif goes on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotifPlacement {
    /// Legacy full-bleed mode: cover-crop over the whole canvas.
    Full,
    Left,
    Center,
    #[default]
    Right,
}

impl MotifPlacement {
    /// Parse a placement name. Unknown names fall back to [`MotifPlacement::Right`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" | "cover" => Self::Full,
            "left" | "l" => Self::Left,
            "center" | "c" | "middle" => Self::Center,
            _ => Self::Right,
        }
    }
}

/// Rectangular no-draw zone that keeps decoration off the photographed subject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubjectProtection {
    None,
    Left,
    Center,
    #[default]
    Right,
}

impl SubjectProtection {
    /// Parse a preset name. Unknown names fall back to [`SubjectProtection::Right`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" | "false" | "0" => Self::None,
            "left" | "l" => Self::Left,
            "center" | "c" | "middle" => Self::Center,
            _ => Self::Right,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MotifSpec {
    pub image: Arc<RgbaImage>,
    /// Global opacity, clamped to `[0, 1]` when applied.
    pub opacity: f32,
    /// `None` keeps the motif's own colors.
    pub tint: Option<Rgb8>,
    pub placement: MotifPlacement,
    pub protection: SubjectProtection,
}

impl MotifSpec {
    /// Motif with the house defaults: faint brand-teal tint on the right, subject on the right.
    pub fn new(image: Arc<RgbaImage>) -> Self {
        Self {
            image,
            opacity: DEFAULT_MOTIF_OPACITY,
            tint: Some(DEFAULT_MOTIF_TINT),
            placement: MotifPlacement::Right,
            protection: SubjectProtection::Right,
        }
    }
}

/// A prepared motif raster (straight alpha) and its top-left corner in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifLayer {
    pub image: RgbaImage,
    pub x: i64,
    pub y: i64,
}

/// Canvas-space protection rectangle for a preset, or `None` when protection is off.
pub fn protection_rect(size: CanvasSize, preset: SubjectProtection) -> Option<PixelRect> {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let box_w = (w * 0.44) as i64;
    let box_h = (h * 0.82) as i64;
    let top = (h * 0.12) as i64;
    let left = match preset {
        SubjectProtection::None => return None,
        SubjectProtection::Left => (w * 0.06) as i64,
        SubjectProtection::Center => (i64::from(size.width) - box_w) / 2,
        SubjectProtection::Right => (w - box_w as f64 - w * 0.06) as i64,
    };
    Some(PixelRect::from_origin_size(left, top, box_w, box_h))
}

/// Side box a positioned motif is fitted into.
fn side_box(size: CanvasSize, placement: MotifPlacement) -> PixelRect {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let box_w = (w * 0.56) as i64;
    let box_h = (h * 0.90) as i64;
    let pad_x = (w * 0.04) as i64;
    let pad_y = (h * 0.05) as i64;
    let cw = i64::from(size.width);
    let left = match placement {
        MotifPlacement::Left => pad_x,
        MotifPlacement::Center => (cw - box_w) / 2,
        MotifPlacement::Right | MotifPlacement::Full => cw - pad_x - box_w,
    };
    PixelRect::from_origin_size(left, pad_y, box_w, box_h)
}

/// Place, recolor, fade and punch out the motif, ready to composite.
pub fn prepare_motif_layer(spec: &MotifSpec, size: CanvasSize) -> MotifLayer {
    let (mut image, x, y) = match spec.placement {
        MotifPlacement::Full => (cover_crop(&spec.image, size), 0, 0),
        side => {
            let b = side_box(size, side);
            let bw = b.width().max(1);
            let bh = b.height().max(1);
            let fitted = contain_resize(&spec.image, bw as u32, bh as u32);
            // Right-aligned inside the box, vertically centered.
            let x = b.x1 - i64::from(fitted.width());
            let y = b.y0 + (bh - i64::from(fitted.height())) / 2;
            (fitted, x, y)
        }
    };

    if let Some(tint) = spec.tint {
        recolor(&mut image, tint);
    }
    scale_alpha(&mut image, spec.opacity);

    if let Some(protect) = protection_rect(size, spec.protection) {
        clear_alpha(&mut image, &protect.translate(-x, -y));
    }

    MotifLayer { image, x, y }
}

/// Composite a motif over the base.
pub fn apply_motif(surface: &mut Surface, spec: &MotifSpec) {
    let layer = prepare_motif_layer(spec, surface.size());
    surface.draw_image(&layer.image, layer.x, layer.y, 1.0);
}

/// Replace RGB with `tint`, keeping the shape in alpha.
///
/// Line art often ships without any alpha; when every pixel is transparent the luma of the
/// original colors becomes the mask instead.
fn recolor(img: &mut RgbaImage, tint: Rgb8) {
    let alpha_empty = img.pixels().all(|p| p.0[3] == 0);
    for p in img.pixels_mut() {
        let [r, g, b, a] = p.0;
        let a = if alpha_empty {
            Rgb8::new(r, g, b).luma()
        } else {
            a
        };
        p.0 = [tint.r, tint.g, tint.b, a];
    }
}

fn scale_alpha(img: &mut RgbaImage, opacity: f32) {
    let k = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if k >= 1.0 {
        return;
    }
    for p in img.pixels_mut() {
        p.0[3] = (f32::from(p.0[3]) * k) as u8;
    }
}

fn clear_alpha(img: &mut RgbaImage, local: &PixelRect) {
    let bounds = PixelRect::new(0, 0, i64::from(img.width()), i64::from(img.height()));
    let Some(r) = local.intersect(&bounds) else {
        return;
    };
    for y in r.y0..r.y1 {
        for x in r.x0..r.x1 {
            img.get_pixel_mut(x as u32, y as u32).0[3] = 0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/motif.rs"]
mod tests;
