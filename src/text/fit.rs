use crate::text::{
    engine::{LineMetrics, TextBlock, Typesetter},
    fonts::{FontFamily, ResolvedFont},
};

/// Outcome of a fit search.
#[derive(Clone, Debug)]
pub struct FittedText {
    pub block: TextBlock,
    /// `false` when no candidate fit and the minimum size was taken anyway.
    pub fits: bool,
}

impl FittedText {
    pub fn size_px(&self) -> u32 {
        self.block.font.size_px
    }
}

/// Gap between wrapped lines at a given font size.
pub fn line_spacing(size_px: u32) -> f64 {
    f64::from((size_px as f64 * 0.18) as u32).max(2.0)
}

/// Find the largest font size, stepping down by 2px from `max_px`, whose wrapped text fits
/// inside `box_w` x `box_h`.
///
/// `max_px` is floored to `min_px`. When nothing fits (or every measurement fails) the text is
/// wrapped at `min_px` and returned as is, so the search always terminates with a usable block.
pub fn fit_text_to_box(
    ts: &mut Typesetter,
    family: FontFamily,
    text: &str,
    box_w: u32,
    box_h: u32,
    max_px: u32,
    min_px: u32,
) -> FittedText {
    let min_px = min_px.max(1);
    let max_px = max_px.max(min_px);
    let max_w = f64::from(box_w.max(1));
    let max_h = f64::from(box_h.max(1));

    for px in (min_px..=max_px).rev().step_by(2) {
        let font = ts.resolve(family, px);
        let lines = ts.wrap_to_width(&font, text, max_w);
        match ts.layout_block(font, lines, line_spacing(px)) {
            Ok(block) if block.width <= max_w && block.height <= max_h => {
                tracing::trace!(px, w = block.width, h = block.height, "text fits");
                return FittedText { block, fits: true };
            }
            Ok(block) => {
                tracing::trace!(px, w = block.width, h = block.height, "text overflows");
            }
            Err(err) => {
                tracing::trace!(px, error = %err, "text measurement failed");
            }
        }
    }

    let font = ts.resolve(family, min_px);
    let lines = ts.wrap_to_width(&font, text, max_w);
    let spacing = line_spacing(min_px);
    let block = match ts.layout_block(font.clone(), lines.clone(), spacing) {
        Ok(block) => block,
        Err(_) => fallback_block(font, lines, spacing),
    };
    FittedText { block, fits: false }
}

/// Block with nominal metrics for text that cannot be measured at all.
pub(crate) fn fallback_block(font: ResolvedFont, lines: Vec<String>, spacing: f64) -> TextBlock {
    let px = f64::from(font.size_px);
    let line_metrics: Vec<_> = lines
        .iter()
        .map(|l| LineMetrics {
            width: l.chars().count() as f64 * px * 0.6,
            height: px * 1.2,
        })
        .collect();
    let width = line_metrics.iter().map(|m| m.width).fold(0.0, f64::max);
    let height = line_metrics.iter().map(|m| m.height).sum::<f64>()
        + spacing * line_metrics.len().saturating_sub(1) as f64;
    TextBlock {
        font,
        lines,
        line_metrics,
        spacing,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
