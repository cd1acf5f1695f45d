use std::fmt;

use crate::foundation::core::{CanvasSize, NormalizedBox, PixelRect};

/// Layer families that can be dropped during a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Base,
    Motif,
    Shape,
    Element,
    Text,
    Headline,
    Subhead,
    Cta,
}

/// Why a layer was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Zero, negative or non-finite box dimensions.
    InvalidBox,
    /// The box maps to an empty pixel rectangle on this canvas.
    OffCanvas,
    /// The referenced raster has no pixels.
    EmptyImage,
    /// Nothing but whitespace to draw.
    EmptyText,
    /// The resolved font size is not a usable positive number.
    InvalidFontSize,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidBox => "invalid box",
            Self::OffCanvas => "box falls outside the canvas",
            Self::EmptyImage => "empty image",
            Self::EmptyText => "empty text",
            Self::InvalidFontSize => "invalid font size",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SkippedLayer {
    pub kind: LayerKind,
    /// Position within its own list (0 for singletons).
    pub index: usize,
    pub reason: SkipReason,
}

/// What a render did besides producing pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderReport {
    pub skipped: Vec<SkippedLayer>,
    /// Text was drawn with the built-in bitmap font because no font file resolved.
    pub used_builtin_font: bool,
}

impl RenderReport {
    pub(crate) fn skip(&mut self, kind: LayerKind, index: usize, reason: SkipReason) {
        tracing::debug!(?kind, index, %reason, "layer skipped");
        self.skipped.push(SkippedLayer {
            kind,
            index,
            reason,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Pixel rectangle for a layer box, or the reason the layer cannot be drawn.
pub(crate) fn layer_rect(b: &NormalizedBox, size: CanvasSize) -> Result<PixelRect, SkipReason> {
    if !b.is_valid() {
        return Err(SkipReason::InvalidBox);
    }
    b.to_pixels(size).ok_or(SkipReason::OffCanvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/report.rs"]
mod tests;
