use std::f64::consts::PI;

use kurbo::{Ellipse, Shape};

use crate::{
    compose::report::{SkipReason, layer_rect},
    foundation::color::Rgb8,
    foundation::core::{BezPath, CanvasSize, NormalizedBox, PixelRect, Point},
    render::vector::VectorPass,
};

const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Rect,
    Square,
    Circle,
    Triangle,
    Star,
}

impl ShapeKind {
    /// Parse a shape name; anything unrecognised is a rectangle.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "circle" | "ellipse" => Self::Circle,
            "triangle" => Self::Triangle,
            "star" => Self::Star,
            _ => Self::Rect,
        }
    }
}

/// A solid-filled vector primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub bbox: NormalizedBox,
    pub color: Rgb8,
    pub opacity: f32,
}

/// Outline of a shape inside a pixel rectangle.
pub fn shape_path(kind: ShapeKind, rect: &PixelRect) -> BezPath {
    let r = rect.to_kurbo();
    match kind {
        ShapeKind::Rect => r.to_path(PATH_TOLERANCE),
        ShapeKind::Square => {
            let side = r.width().min(r.height());
            kurbo::Rect::new(r.x0, r.y0, r.x0 + side, r.y0 + side).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Circle => Ellipse::from_rect(r).to_path(PATH_TOLERANCE),
        ShapeKind::Triangle => polygon(&[
            Point::new(r.x0, r.y1),
            Point::new(r.center().x, r.y0),
            Point::new(r.x1, r.y1),
        ]),
        ShapeKind::Star => {
            let outer = r.width().min(r.height()) / 2.0;
            polygon(&star_points(r.center(), outer))
        }
    }
}

/// Five-point star vertices, alternating outer and inner (half) radius, starting at the top.
pub fn star_points(center: Point, outer: f64) -> [Point; 10] {
    let inner = outer * 0.5;
    std::array::from_fn(|i| {
        let radius = if i % 2 == 0 { outer } else { inner };
        let theta = -PI / 2.0 + i as f64 * PI / 5.0;
        Point::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        )
    })
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    path
}

/// Record one shape into the pass.
pub fn draw_shape(
    pass: &mut VectorPass,
    shape: &ShapeSpec,
    size: CanvasSize,
) -> Result<(), SkipReason> {
    let rect = layer_rect(&shape.bbox, size)?;
    pass.fill_path(
        &shape_path(shape.kind, &rect),
        shape.color.with_opacity(shape.opacity),
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shapes.rs"]
mod tests;
