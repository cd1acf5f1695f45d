use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    render::composite::unpremultiply_rgba8_in_place,
};

/// Largest raster edge an SVG may be rendered at.
const MAX_SVG_DIM: u32 = 16_384;

/// Decode any raster format `image` understands into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> ComposeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

pub fn parse_svg(bytes: &[u8]) -> ComposeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize an SVG so its longer edge is `max_dim` pixels.
pub fn rasterize_svg(bytes: &[u8], max_dim: u32) -> ComposeResult<RgbaImage> {
    let tree = parse_svg(bytes)?;
    let (width, height) = svg_raster_size(&tree, max_dim)?;
    rasterize_tree(&tree, width, height)
}

fn svg_raster_size(tree: &usvg::Tree, max_dim: u32) -> ComposeResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(ComposeError::validation("svg has invalid width/height"));
    }
    let max_dim = max_dim.clamp(1, MAX_SVG_DIM) as f32;
    let scale = max_dim / w.max(h);
    let width = ((w * scale).round() as u32).max(1);
    let height = ((h * scale).round() as u32).max(1);
    Ok((width, height))
}

fn rasterize_tree(tree: &usvg::Tree, width: u32, height: u32) -> ComposeResult<RgbaImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ComposeError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| ComposeError::render("svg pixmap size mismatch"))
}

/// Load a raster or SVG file; SVGs are rendered with their longer edge at `svg_max_dim`.
pub fn load_image_file(path: &Path, svg_max_dim: u32) -> ComposeResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    if is_svg(path) {
        rasterize_svg(&bytes, svg_max_dim)
    } else {
        decode_image(&bytes)
    }
}

pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
