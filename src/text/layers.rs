//! Free-form text layers with per-layer size, alignment and background pill.

use kurbo::{RoundedRect, Shape};

use crate::{
    compose::report::{SkipReason, layer_rect},
    foundation::color::Rgb8,
    foundation::core::{CanvasSize, NormalizedBox, Rect},
    render::vector::VectorPass,
    text::{
        engine::{Align, Typesetter},
        fit::{fallback_block, line_spacing},
        fonts::FontFamily,
    },
};

/// How a length (font size, padding, radius) is derived for a given canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SizeSpec {
    /// Pixels authored against a canvas `reference_width` wide, rescaled to the target width.
    Scaled { px: f64, reference_width: f64 },
    /// Fraction of the layer box height.
    BoxRelative(f64),
    /// Fraction of the canvas width.
    CanvasRelative(f64),
    /// The caller-supplied default for this length.
    #[default]
    Auto,
}

impl SizeSpec {
    /// Resolve to pixels. `auto` is used for [`SizeSpec::Auto`] and for a zero reference width.
    pub fn resolve(self, canvas_width: u32, box_height: f64, auto: f64) -> f64 {
        match self {
            Self::Scaled {
                px,
                reference_width,
            } if reference_width > 0.0 => px * f64::from(canvas_width) / reference_width,
            Self::Scaled { .. } | Self::Auto => auto,
            Self::BoxRelative(f) => f * box_height,
            Self::CanvasRelative(f) => f * f64::from(canvas_width),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBackground {
    pub color: Rgb8,
    pub opacity: f32,
    /// Defaults to half the font size.
    pub radius: SizeSpec,
    /// Defaults to 0.3 of the font size.
    pub padding: SizeSpec,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub text: String,
    /// Line breaks chosen by the author; when present no wrapping is done.
    pub wrapped_text: Option<String>,
    pub bbox: NormalizedBox,
    pub family: FontFamily,
    /// [`SizeSpec::Auto`] means half the box height.
    pub size: SizeSpec,
    pub color: Rgb8,
    pub align: Align,
    pub background: Option<TextBackground>,
}

impl TextLayer {
    pub fn new(text: impl Into<String>, bbox: NormalizedBox) -> Self {
        Self {
            text: text.into(),
            wrapped_text: None,
            bbox,
            family: FontFamily::Sans,
            size: SizeSpec::Auto,
            color: Rgb8::WHITE,
            align: Align::Left,
            background: None,
        }
    }

    /// Font size in pixels for this layer on `canvas`, given its pixel box height.
    pub fn font_px(&self, canvas: CanvasSize, box_height: f64) -> f64 {
        self.size
            .resolve(canvas.width, box_height, box_height * 0.5)
            .round()
    }

    fn authored_lines(&self) -> Option<Vec<String>> {
        let wrapped = self.wrapped_text.as_deref()?;
        if wrapped.trim().is_empty() {
            return None;
        }
        Some(wrapped.lines().map(|l| l.trim_end().to_string()).collect())
    }
}

/// Record one text layer (background first, then glyphs) into the pass.
pub fn draw_text_layer(
    ts: &mut Typesetter,
    pass: &mut VectorPass,
    layer: &TextLayer,
    canvas: CanvasSize,
) -> Result<(), SkipReason> {
    let rect = layer_rect(&layer.bbox, canvas)?;
    let authored = layer.authored_lines();
    if authored.is_none() && layer.text.trim().is_empty() {
        return Err(SkipReason::EmptyText);
    }

    let box_h = rect.height() as f64;
    let box_w = rect.width() as f64;
    let px = layer.font_px(canvas, box_h);
    if !px.is_finite() || px < 1.0 || px > f64::from(u16::MAX) {
        return Err(SkipReason::InvalidFontSize);
    }
    let px = px as u32;

    let font = ts.resolve(layer.family, px);
    let lines = match authored {
        Some(lines) => lines,
        None => ts.wrap_to_width(&font, &layer.text, box_w),
    };
    let spacing = line_spacing(px);
    let block = match ts.layout_block(font.clone(), lines.clone(), spacing) {
        Ok(block) => block,
        Err(err) => {
            tracing::debug!(error = %err, "text layer measurement failed, using nominal metrics");
            fallback_block(font, lines, spacing)
        }
    };

    let x = rect.x0 as f64 + layer.align.offset(box_w, block.width);
    let y = rect.y0 as f64;

    if let Some(bg) = &layer.background {
        let size = f64::from(px);
        let pad = bg.padding.resolve(canvas.width, box_h, size * 0.3).max(0.0);
        let pill = Rect::new(x - pad, y - pad, x + block.width + pad, y + block.height + pad);
        let max_radius = pill.width().min(pill.height()) / 2.0;
        let radius = bg
            .radius
            .resolve(canvas.width, box_h, size * 0.5)
            .clamp(0.0, max_radius);
        let path = RoundedRect::from_rect(pill, radius).to_path(0.1);
        pass.fill_path(&path, bg.color.with_opacity(bg.opacity));
    }

    let c = layer.color;
    ts.draw_block(pass, &block, (x, y), layer.align, [c.r, c.g, c.b, 255]);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/layers.rs"]
mod tests;
