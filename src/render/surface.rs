use image::RgbaImage;

use crate::{
    foundation::core::{CanvasSize, PixelRect, Rgba8Premul},
    foundation::error::ComposeResult,
    render::composite::{self, over, premultiply},
};

/// Owned premultiplied RGBA8 canvas threaded through every composition step.
///
/// A render call owns exactly one surface; steps borrow it mutably in order, so there is never
/// more than one writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(size: CanvasSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.width as usize * size.height as usize * 4],
        }
    }

    pub fn from_straight(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        composite::premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert back to a straight-alpha raster for encoding.
    pub fn to_straight(&self) -> RgbaImage {
        let mut data = self.data.clone();
        composite::unpremultiply_rgba8_in_place(&mut data);
        // Length always matches width*height*4 by construction.
        RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel, or transparent when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Composite a raw premultiplied buffer of identical dimensions over this surface.
    pub fn over_premul_bytes(&mut self, src: &[u8], opacity: f32) -> ComposeResult<()> {
        composite::over_in_place(&mut self.data, src, opacity)
    }

    /// Composite a straight-alpha raster with its top-left corner at `(x, y)`.
    ///
    /// Parts falling outside the surface are clipped.
    pub fn draw_image(&mut self, img: &RgbaImage, x: i64, y: i64, opacity: f32) {
        let (iw, ih) = img.dimensions();
        let placed = PixelRect::from_origin_size(x, y, i64::from(iw), i64::from(ih));
        let Some(visible) = placed.intersect(&self.size().full_rect()) else {
            return;
        };

        for dy in visible.y0..visible.y1 {
            for dx in visible.x0..visible.x1 {
                let src = img.get_pixel((dx - x) as u32, (dy - y) as u32).0;
                if src[3] == 0 {
                    continue;
                }
                let i = self.index(dx as u32, dy as u32);
                let dst = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                let out = over(dst, premultiply(src), opacity);
                self.data[i..i + 4].copy_from_slice(&out);
            }
        }
    }

    /// Composite a single premultiplied color over every pixel of row `y`.
    pub fn blend_row(&mut self, y: u32, color: Rgba8Premul) {
        if y >= self.height || color.a == 0 {
            return;
        }
        let src = color.to_array();
        let start = self.index(0, y);
        let end = start + self.width as usize * 4;
        for d in self.data[start..end].chunks_exact_mut(4) {
            let out = over([d[0], d[1], d[2], d[3]], src, 1.0);
            d.copy_from_slice(&out);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
