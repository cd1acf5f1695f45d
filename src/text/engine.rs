use std::{borrow::Cow, collections::HashMap, path::PathBuf};

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    render::vector::VectorPass,
    text::{
        bitmap,
        fonts::{FontFace, FontFamily, FontResolver, OutlineFace, ResolvedFont},
    },
};

/// Horizontal alignment of a text block inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" | "middle" => Self::Center,
            "right" | "end" => Self::Right,
            _ => Self::Left,
        }
    }

    /// Offset that places `inner` within `outer`; never negative.
    pub fn offset(self, outer: f64, inner: f64) -> f64 {
        let slack = (outer - inner).max(0.0);
        match self {
            Self::Left => 0.0,
            Self::Center => slack / 2.0,
            Self::Right => slack,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub width: f64,
    pub height: f64,
}

/// Wrapped, measured text at one font size.
#[derive(Clone, Debug)]
pub struct TextBlock {
    pub font: ResolvedFont,
    pub lines: Vec<String>,
    pub line_metrics: Vec<LineMetrics>,
    /// Extra gap between consecutive lines.
    pub spacing: f64,
    pub width: f64,
    pub height: f64,
}

/// Stateful helper for building Parley layouts of single lines from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<[u8; 4]>,
    family_names: HashMap<PathBuf, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_names: HashMap::new(),
        }
    }

    /// Shape one unwrapped line.
    pub fn layout_line(
        &mut self,
        face: &OutlineFace,
        text: &str,
        size_px: f32,
    ) -> ComposeResult<parley::Layout<[u8; 4]>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ComposeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_name(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<[u8; 4]> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Register a face once and remember the family name it exposes.
    fn family_name(&mut self, face: &OutlineFace) -> ComposeResult<String> {
        if let Some(name) = self.family_names.get(&face.path) {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ComposeError::font(format!(
                "no font families registered from '{}'",
                face.path.display()
            ))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ComposeError::font("registered font family has no name"))?
            .to_string();
        self.family_names.insert(face.path.clone(), name.clone());
        Ok(name)
    }
}

/// Measures, wraps and draws text for one render. Owns the font resolver and the shaping
/// contexts, so it is created per worker and never shared.
pub struct Typesetter {
    fonts: FontResolver,
    engine: TextLayoutEngine,
    used_builtin: bool,
}

impl Typesetter {
    pub fn new(fonts: FontResolver) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
            used_builtin: false,
        }
    }

    pub fn resolve(&mut self, family: FontFamily, size_px: u32) -> ResolvedFont {
        self.fonts.resolve(family, size_px)
    }

    /// Whether any text since the last call was drawn with the bitmap font; resets the flag.
    pub fn take_used_builtin(&mut self) -> bool {
        std::mem::take(&mut self.used_builtin)
    }

    pub fn measure_line(&mut self, font: &ResolvedFont, text: &str) -> ComposeResult<LineMetrics> {
        match &font.face {
            FontFace::Builtin => Ok(LineMetrics {
                width: bitmap::line_width(text, font.size_px),
                height: bitmap::line_height(font.size_px),
            }),
            FontFace::Outline(face) => {
                let layout = self.engine.layout_line(face, text, font.size_px as f32)?;
                Ok(LineMetrics {
                    width: f64::from(layout.width()),
                    height: f64::from(layout.height()),
                })
            }
        }
    }

    /// Greedy word wrap: keep appending words while the line still fits in `max_w`.
    ///
    /// A word wider than `max_w` gets a line of its own. If a line cannot be measured the
    /// decision falls back to a character budget of `max(10, max_w / 12)`.
    pub fn wrap_to_width(&mut self, font: &ResolvedFont, text: &str, max_w: f64) -> Vec<String> {
        let mut words = text.split_whitespace();
        let Some(first) = words.next() else {
            return Vec::new();
        };
        let char_budget = ((max_w / 12.0) as usize).max(10);

        let mut lines = Vec::new();
        let mut cur = first.to_string();
        for word in words {
            let trial = format!("{cur} {word}");
            let fits = match self.measure_line(font, &trial) {
                Ok(m) => m.width <= max_w,
                Err(err) => {
                    tracing::trace!(error = %err, "line measurement failed, using char budget");
                    trial.chars().count() <= char_budget
                }
            };
            if fits {
                cur = trial;
            } else {
                lines.push(std::mem::replace(&mut cur, word.to_string()));
            }
        }
        lines.push(cur);
        lines
    }

    /// Measure pre-wrapped lines as one block.
    pub fn layout_block(
        &mut self,
        font: ResolvedFont,
        lines: Vec<String>,
        spacing: f64,
    ) -> ComposeResult<TextBlock> {
        let mut line_metrics = Vec::with_capacity(lines.len());
        for line in &lines {
            line_metrics.push(self.measure_line(&font, line)?);
        }
        let width = line_metrics.iter().map(|m| m.width).fold(0.0, f64::max);
        let gaps = line_metrics.len().saturating_sub(1) as f64;
        let height = line_metrics.iter().map(|m| m.height).sum::<f64>() + spacing * gaps;
        Ok(TextBlock {
            font,
            lines,
            line_metrics,
            spacing,
            width,
            height,
        })
    }

    /// Record a block with its top-left corner at `origin`.
    ///
    /// Lines are aligned within the block's own width, so a centered block has centered lines.
    pub fn draw_block(
        &mut self,
        pass: &mut VectorPass,
        block: &TextBlock,
        origin: (f64, f64),
        align: Align,
        rgba: [u8; 4],
    ) {
        let mut y = origin.1;
        for (line, m) in block.lines.iter().zip(&block.line_metrics) {
            let x = origin.0 + align.offset(block.width, m.width);
            self.draw_line(pass, &block.font, line, (x, y), rgba);
            y += m.height + block.spacing;
        }
    }

    fn draw_line(
        &mut self,
        pass: &mut VectorPass,
        font: &ResolvedFont,
        text: &str,
        origin: (f64, f64),
        rgba: [u8; 4],
    ) {
        let face = match &font.face {
            FontFace::Outline(face) => face.clone(),
            FontFace::Builtin => {
                self.used_builtin = true;
                bitmap::draw_line(pass, text, font.size_px, origin.0, origin.1, rgba);
                return;
            }
        };
        let layout = match self.engine.layout_line(&face, text, font.size_px as f32) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "outline text failed to shape, drawing bitmap fallback"
                );
                self.used_builtin = true;
                bitmap::draw_line(pass, text, font.size_px, origin.0, origin.1, rgba);
                return;
            }
        };
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                pass.fill_glyphs(
                    &face.data,
                    run.run().font_size(),
                    origin,
                    rgba,
                    glyphs,
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
