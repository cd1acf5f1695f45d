use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::{
    foundation::core::CanvasSize,
    placement::canvas::{contain_size, resize_exact},
};

/// Build the seed canvas handed to an outpainting model.
///
/// The image is contain-fitted and centered; every padding pixel takes the color of the nearest
/// pixel of the placed image, jittered per channel by uniform noise in `[-amplitude, amplitude]`.
/// Padding is fully opaque so the model sees texture rather than a hole.
///
/// The randomness source is injected so callers can seed it for reproducible output.
pub fn outpaint_canvas<R: Rng + ?Sized>(
    img: &RgbaImage,
    size: CanvasSize,
    amplitude: u8,
    rng: &mut R,
) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    let Some(scaled) = contain_size(iw, ih, size) else {
        let gray = Rgba([128, 128, 128, 255]);
        return RgbaImage::from_fn(size.width, size.height, |_, _| jitter(gray, amplitude, rng));
    };

    let placed = resize_exact(img, scaled.width, scaled.height);
    let left = (size.width - scaled.width) / 2;
    let top = (size.height - scaled.height) / 2;
    let right = left + scaled.width - 1;
    let bottom = top + scaled.height - 1;

    RgbaImage::from_fn(size.width, size.height, |x, y| {
        let inside = (left..=right).contains(&x) && (top..=bottom).contains(&y);
        if inside {
            return *placed.get_pixel(x - left, y - top);
        }
        let sx = x.clamp(left, right) - left;
        let sy = y.clamp(top, bottom) - top;
        jitter(*placed.get_pixel(sx, sy), amplitude, rng)
    })
}

fn jitter<R: Rng + ?Sized>(px: Rgba<u8>, amplitude: u8, rng: &mut R) -> Rgba<u8> {
    let amp = i16::from(amplitude);
    let mut out = [0u8, 0, 0, 255];
    for (o, c) in out.iter_mut().zip(px.0.iter()).take(3) {
        let noise = if amp == 0 { 0 } else { rng.gen_range(-amp..=amp) };
        *o = (i16::from(*c) + noise).clamp(0, 255) as u8;
    }
    Rgba(out)
}

#[cfg(test)]
#[path = "../../tests/unit/placement/outpaint.rs"]
mod tests;
