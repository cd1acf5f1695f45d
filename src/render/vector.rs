use crate::{
    foundation::core::{BezPath, CanvasSize, Rect},
    foundation::error::{ComposeError, ComposeResult},
    render::surface::Surface,
};

/// One batch of vector drawing (paths, rects, glyph runs) rasterized with `vello_cpu` and then
/// composited over a [`Surface`] in a single source-over step.
pub struct VectorPass {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    ops: usize,
}

impl VectorPass {
    pub fn new(size: CanvasSize) -> ComposeResult<Self> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| ComposeError::render("canvas width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| ComposeError::render("canvas height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            ops: 0,
        })
    }

    /// Number of draw calls recorded so far.
    pub fn op_count(&self) -> usize {
        self.ops
    }

    /// Fill a path with a straight-alpha RGBA8 color.
    pub fn fill_path(&mut self, path: &BezPath, rgba: [u8; 4]) {
        if rgba[3] == 0 {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.ops += 1;
    }

    pub fn fill_rect(&mut self, rect: &Rect, rgba: [u8; 4]) {
        if rgba[3] == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        self.ops += 1;
    }

    /// Fill a run of outline glyphs positioned relative to `origin`.
    pub fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size_px: f32,
        origin: (f64, f64),
        rgba: [u8; 4],
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
    ) {
        if rgba[3] == 0 {
            return;
        }
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.0, origin.1)));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx
            .glyph_run(font)
            .font_size(size_px)
            .fill_glyphs(glyphs);
        self.ops += 1;
    }

    /// Rasterize everything recorded and composite it over `dst`.
    pub fn composite_onto(mut self, dst: &mut Surface) -> ComposeResult<()> {
        if self.ops == 0 {
            return Ok(());
        }
        if dst.size().width != u32::from(self.width) || dst.size().height != u32::from(self.height)
        {
            return Err(ComposeError::render(
                "vector pass size does not match target surface",
            ));
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        dst.over_premul_bytes(pixmap.data_as_u8_slice(), 1.0)
    }
}

fn point_to_cpu(p: crate::foundation::core::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
