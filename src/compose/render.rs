use image::RgbaImage;

use crate::{
    compose::{
        fields::{draw_fixed_fields, draw_master_copy},
        model::{LayoutDescriptor, MasterCopy},
        plan::{BasePlacement, ComposeOp, layout_plan, master_plan},
        report::{LayerKind, RenderReport, SkipReason},
    },
    draw::{elements::draw_element, shapes::draw_shape},
    effects::{motif::apply_motif, scrim::apply_bottom_scrim},
    foundation::color::Rgb8,
    foundation::config::RenderConfig,
    foundation::core::CanvasSize,
    foundation::error::ComposeResult,
    placement::canvas::{boxed_size, cover_crop, place_with_box},
    render::{surface::Surface, vector::VectorPass},
    text::{engine::Typesetter, fonts::FontResolver, layers::draw_text_layer},
};

/// A finished composite.
#[derive(Clone, Debug)]
pub struct RenderedOutput {
    /// Straight-alpha RGBA8 raster of exactly the requested size.
    pub image: RgbaImage,
    /// Whether the legacy bottom scrim was drawn.
    pub scrim_applied: bool,
    pub report: RenderReport,
}

/// Renders layouts onto fresh canvases.
///
/// Holds the typesetter (font cache and shaping contexts) so consecutive renders reuse loaded
/// fonts. One renderer per thread.
pub struct LayoutRenderer {
    config: RenderConfig,
    typesetter: Typesetter,
    cta_fill: Rgb8,
}

impl LayoutRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let fonts = FontResolver::new(&config);
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: RenderConfig, fonts: FontResolver) -> Self {
        let cta_fill = Rgb8::from_hex_or_fallback(&config.cta_fill);
        Self {
            config,
            typesetter: Typesetter::new(fonts),
            cta_fill,
        }
    }

    /// Legacy master: cover-cropped key visual, optional motif, bottom scrim, headline and CTA.
    #[tracing::instrument(
        skip_all,
        fields(width = size.width, height = size.height, aspect = size.aspect().label())
    )]
    pub fn render_master(
        &mut self,
        kv: &RgbaImage,
        size: CanvasSize,
        copy: &MasterCopy,
    ) -> ComposeResult<RenderedOutput> {
        let size = CanvasSize::new(size.width, size.height)?;
        let ops = master_plan(copy, size);
        self.execute(kv, size, &ops)
    }

    /// Free-form or fixed-field layout over a placed base image.
    #[tracing::instrument(skip_all, fields(width = size.width, height = size.height))]
    pub fn render_layout(
        &mut self,
        kv: &RgbaImage,
        size: CanvasSize,
        layout: &LayoutDescriptor,
    ) -> ComposeResult<RenderedOutput> {
        let size = CanvasSize::new(size.width, size.height)?;
        let ops = layout_plan(layout, size);
        self.execute(kv, size, &ops)
    }

    fn execute(
        &mut self,
        kv: &RgbaImage,
        size: CanvasSize,
        ops: &[ComposeOp<'_>],
    ) -> ComposeResult<RenderedOutput> {
        let mut surface = Surface::new(size);
        let mut report = RenderReport::default();
        let mut scrim_applied = false;
        self.typesetter.take_used_builtin();

        for op in ops {
            match *op {
                ComposeOp::Base(placement) => {
                    let (iw, ih) = kv.dimensions();
                    if iw == 0 || ih == 0 {
                        report.skip(LayerKind::Base, 0, SkipReason::EmptyImage);
                        continue;
                    }
                    let placed = match placement {
                        BasePlacement::Cover => {
                            let mut placed = cover_crop(kv, size);
                            for px in placed.pixels_mut() {
                                px.0[3] = 255;
                            }
                            placed
                        }
                        BasePlacement::Boxed(b) => {
                            if b.is_some_and(|b| boxed_size(iw, ih, size, b).is_none()) {
                                tracing::warn!("base box unusable, falling back to contain fit");
                                report.skip(LayerKind::Base, 0, SkipReason::InvalidBox);
                            }
                            place_with_box(kv, size, b)
                        }
                    };
                    surface.draw_image(&placed, 0, 0, 1.0);
                }
                ComposeOp::Motif(motif) => {
                    let (mw, mh) = motif.image.dimensions();
                    if mw == 0 || mh == 0 {
                        report.skip(LayerKind::Motif, 0, SkipReason::EmptyImage);
                        continue;
                    }
                    apply_motif(&mut surface, motif);
                }
                ComposeOp::Shapes(shapes) => {
                    let mut pass = VectorPass::new(size)?;
                    for (i, shape) in shapes.iter().enumerate() {
                        if let Err(reason) = draw_shape(&mut pass, shape, size) {
                            report.skip(LayerKind::Shape, i, reason);
                        }
                    }
                    pass.composite_onto(&mut surface)?;
                }
                ComposeOp::Elements(elements) => {
                    for (i, element) in elements.iter().enumerate() {
                        if let Err(reason) = draw_element(&mut surface, element) {
                            report.skip(LayerKind::Element, i, reason);
                        }
                    }
                }
                ComposeOp::Scrim { y0 } => {
                    apply_bottom_scrim(&mut surface, y0, self.config.scrim_max_alpha);
                    scrim_applied = true;
                }
                ComposeOp::MasterCopy {
                    headline,
                    cta,
                    scrim_y0,
                } => {
                    let mut pass = VectorPass::new(size)?;
                    draw_master_copy(
                        &mut self.typesetter,
                        &mut pass,
                        &mut report,
                        size,
                        headline,
                        cta,
                        scrim_y0,
                        self.cta_fill,
                    );
                    pass.composite_onto(&mut surface)?;
                }
                ComposeOp::FixedFields(fields) => {
                    let mut pass = VectorPass::new(size)?;
                    draw_fixed_fields(
                        &mut self.typesetter,
                        &mut pass,
                        &mut report,
                        size,
                        fields,
                        self.cta_fill,
                    );
                    pass.composite_onto(&mut surface)?;
                }
                ComposeOp::TextLayers(layers) => {
                    let mut pass = VectorPass::new(size)?;
                    for (i, layer) in layers.iter().enumerate() {
                        if let Err(reason) =
                            draw_text_layer(&mut self.typesetter, &mut pass, layer, size)
                        {
                            report.skip(LayerKind::Text, i, reason);
                        }
                    }
                    pass.composite_onto(&mut surface)?;
                }
            }
        }

        report.used_builtin_font = self.typesetter.take_used_builtin();
        tracing::debug!(
            skipped = report.skipped.len(),
            scrim_applied,
            builtin_font = report.used_builtin_font,
            "render complete"
        );
        Ok(RenderedOutput {
            image: surface.to_straight(),
            scrim_applied,
            report,
        })
    }
}

/// One-shot master render with a fresh renderer.
pub fn render_master(
    kv: &RgbaImage,
    size: CanvasSize,
    copy: &MasterCopy,
    config: &RenderConfig,
) -> ComposeResult<RenderedOutput> {
    LayoutRenderer::new(config.clone()).render_master(kv, size, copy)
}

/// One-shot layout render with a fresh renderer.
pub fn render_layout(
    kv: &RgbaImage,
    size: CanvasSize,
    layout: &LayoutDescriptor,
    config: &RenderConfig,
) -> ComposeResult<RenderedOutput> {
    LayoutRenderer::new(config.clone()).render_layout(kv, size, layout)
}
