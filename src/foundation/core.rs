use crate::foundation::error::{ComposeError, ComposeResult};

pub use kurbo::{BezPath, Point, Rect};

/// Target canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> ComposeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposeError::validation(format!(
                "canvas size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Canonical ratio this size maps back to.
    pub fn aspect(self) -> AspectRatio {
        AspectRatio::classify(self)
    }

    pub fn full_rect(self) -> PixelRect {
        PixelRect::new(0, 0, i64::from(self.width), i64::from(self.height))
    }
}

/// Canonical aspect-ratio labels used to size the legacy scrim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// `1:1`, also the fallback for anything unrecognised.
    Square,
    /// `4:5`
    Portrait,
    /// `9:16`
    Story,
}

impl AspectRatio {
    const TOLERANCE: f64 = 0.02;

    /// Classify a size by its width/height ratio with a small tolerance.
    pub fn classify(size: CanvasSize) -> Self {
        if size.width == 0 || size.height == 0 {
            return Self::Square;
        }
        let r = f64::from(size.width) / f64::from(size.height);
        if (r - 9.0 / 16.0).abs() < Self::TOLERANCE {
            Self::Story
        } else if (r - 4.0 / 5.0).abs() < Self::TOLERANCE {
            Self::Portrait
        } else {
            Self::Square
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
        }
    }
}

/// A rectangle expressed as fractions of the canvas, independent of resolution.
///
/// A box with a non-positive (or non-finite) dimension is invalid; layers carrying one are
/// skipped at render time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| v.is_finite())
            && self.w > 0.0
            && self.h > 0.0
    }

    /// Normalized center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Convert to a pixel rectangle clamped to the canvas.
    ///
    /// The top-left corner is clamped to `[0, dim)` and the bottom-right corner to `dim`.
    /// Returns `None` when the box is invalid or collapses to an empty rectangle.
    pub fn to_pixels(&self, canvas: CanvasSize) -> Option<PixelRect> {
        if !self.is_valid() {
            return None;
        }
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);

        let x0 = (self.x * cw).round().clamp(0.0, (cw - 1.0).max(0.0));
        let y0 = (self.y * ch).round().clamp(0.0, (ch - 1.0).max(0.0));
        let x1 = ((self.x + self.w) * cw).round().min(cw);
        let y1 = ((self.y + self.h) * ch).round().min(ch);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect::new(x0 as i64, y0 as i64, x1 as i64, y1 as i64))
    }
}

/// Integer pixel rectangle `[x0, x1) x [y0, y1)`.
///
/// Coordinates are signed so rectangles can be translated into local spaces whose origin is
/// off-canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_origin_size(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    pub fn width(&self) -> i64 {
        (self.x1 - self.x0).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y1 - self.y0).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn translate(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let r = PixelRect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        (!r.is_empty()).then_some(r)
    }

    pub fn to_kurbo(&self) -> Rect {
        Rect::new(self.x0 as f64, self.y0 as f64, self.x1 as f64, self.y1 as f64)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
