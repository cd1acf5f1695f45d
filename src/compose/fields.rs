//! Fixed-field copy: headline, subhead and the CTA button.

use kurbo::{RoundedRect, Shape};

use crate::{
    compose::{
        model::{FixedField, FixedFields},
        report::{LayerKind, RenderReport, SkipReason, layer_rect},
    },
    foundation::color::Rgb8,
    foundation::core::{CanvasSize, PixelRect},
    render::vector::VectorPass,
    text::{
        engine::{Align, Typesetter},
        fit::fit_text_to_box,
        fonts::FontFamily,
    },
};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const SHADOW: [u8; 4] = [0, 0, 0, 180];
const SHADOW_OFFSET: f64 = 2.0;

/// Size limits for one fitted copy block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitLimits {
    pub max_px: u32,
    pub min_px: u32,
}

/// Headline sizing used by the master layout: up to 32% of the box height.
pub fn master_headline_limits(size: CanvasSize, rect: &PixelRect) -> FitLimits {
    FitLimits {
        max_px: (rect.height() as f64 * 0.32) as u32,
        min_px: headline_min(size),
    }
}

fn headline_min(size: CanvasSize) -> u32 {
    ((f64::from(size.width) * 0.026) as u32).max(18)
}

/// Fit `text` into `rect` and draw it at the rect's top-left in white.
pub fn draw_copy(
    ts: &mut Typesetter,
    pass: &mut VectorPass,
    text: &str,
    rect: &PixelRect,
    limits: FitLimits,
    shadow: bool,
) -> Result<(), SkipReason> {
    if text.trim().is_empty() {
        return Err(SkipReason::EmptyText);
    }
    let fitted = fit_text_to_box(
        ts,
        FontFamily::Sans,
        text,
        rect.width() as u32,
        rect.height() as u32,
        limits.max_px,
        limits.min_px,
    );
    let origin = (rect.x0 as f64, rect.y0 as f64);
    if shadow {
        let shadow_origin = (origin.0 + SHADOW_OFFSET, origin.1 + SHADOW_OFFSET);
        ts.draw_block(pass, &fitted.block, shadow_origin, Align::Left, SHADOW);
    }
    ts.draw_block(pass, &fitted.block, origin, Align::Left, WHITE);
    Ok(())
}

/// Geometry of a CTA button centered in its box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonGeometry {
    pub rect: PixelRect,
    pub radius: f64,
}

pub fn button_geometry(area: &PixelRect) -> ButtonGeometry {
    let w = area.width().max(1);
    let h = area.height().max(1);
    let btn_h = ((h as f64 * 0.78) as i64).min(110);
    let btn_w = ((w as f64 * 0.62) as i64).min(640);
    let x0 = area.x0 + (w - btn_w) / 2;
    let y0 = area.y0 + (h - btn_h) / 2;
    ButtonGeometry {
        rect: PixelRect::from_origin_size(x0, y0, btn_w, btn_h),
        radius: ((btn_h as f64 * 0.22) as i64).max(10) as f64,
    }
}

/// Rounded button filled with `fill`, with the CTA text fitted and centered on it.
pub fn draw_cta_button(
    ts: &mut Typesetter,
    pass: &mut VectorPass,
    text: &str,
    area: &PixelRect,
    fill: Rgb8,
) -> Result<(), SkipReason> {
    if text.trim().is_empty() {
        return Err(SkipReason::EmptyText);
    }
    let ButtonGeometry { rect: btn, radius } = button_geometry(area);
    if btn.is_empty() {
        return Err(SkipReason::OffCanvas);
    }
    let body = btn.to_kurbo();
    let radius = radius.min(body.width().min(body.height()) / 2.0);
    pass.fill_path(
        &RoundedRect::from_rect(body, radius).to_path(0.1),
        fill.with_opacity(1.0),
    );

    let btn_h = btn.height() as f64;
    let inner_w = (btn.width() - 32).max(1) as u32;
    let inner_h = (btn.height() - 20).max(1) as u32;
    let fitted = fit_text_to_box(
        ts,
        FontFamily::Sans,
        text,
        inner_w,
        inner_h,
        (btn_h * 0.46) as u32,
        ((btn_h * 0.28) as u32).max(16),
    );
    let tx = btn.x0 as f64 + ((btn.width() as f64 - fitted.block.width) / 2.0).max(0.0).floor();
    let ty = btn.y0 as f64 + ((btn_h - fitted.block.height) / 2.0).max(0.0).floor();
    ts.draw_block(pass, &fitted.block, (tx, ty), Align::Center, WHITE);
    Ok(())
}

/// Legacy master copy: headline and CTA boxes carved out of the scrim band.
#[allow(clippy::too_many_arguments)]
pub fn draw_master_copy(
    ts: &mut Typesetter,
    pass: &mut VectorPass,
    report: &mut RenderReport,
    size: CanvasSize,
    headline: &str,
    cta: &str,
    scrim_y0: i64,
    cta_fill: Rgb8,
) {
    let (w, h) = (i64::from(size.width), i64::from(size.height));
    let scrim_h = h - scrim_y0;
    let pad = (f64::from(size.width) * 0.06) as i64;

    let head = PixelRect::new(
        pad,
        scrim_y0 + pad,
        w - pad,
        scrim_y0 + (scrim_h as f64 * 0.58) as i64,
    );
    let head_res = if head.is_empty() {
        Err(SkipReason::OffCanvas)
    } else {
        draw_copy(ts, pass, headline, &head, master_headline_limits(size, &head), true)
    };
    if let Err(reason) = head_res {
        report.skip(LayerKind::Headline, 0, reason);
    }

    let cta_area = PixelRect::new(
        pad,
        scrim_y0 + (scrim_h as f64 * 0.64) as i64,
        w - pad,
        h - pad,
    );
    let cta_res = if cta_area.is_empty() {
        Err(SkipReason::OffCanvas)
    } else {
        draw_cta_button(ts, pass, cta, &cta_area, cta_fill)
    };
    if let Err(reason) = cta_res {
        report.skip(LayerKind::Cta, 0, reason);
    }
}

/// Fixed-field layout copy, each field in its own normalized box.
pub fn draw_fixed_fields(
    ts: &mut Typesetter,
    pass: &mut VectorPass,
    report: &mut RenderReport,
    size: CanvasSize,
    fields: &FixedFields,
    cta_fill: Rgb8,
) {
    let draw = |field: &FixedField,
                ts: &mut Typesetter,
                pass: &mut VectorPass,
                kind: LayerKind|
     -> Result<(), SkipReason> {
        let rect = layer_rect(&field.bbox, size)?;
        let box_h = rect.height() as f64;
        match kind {
            LayerKind::Headline => {
                let limits = FitLimits {
                    max_px: (box_h * 0.6) as u32,
                    min_px: headline_min(size),
                };
                draw_copy(ts, pass, &field.text, &rect, limits, true)
            }
            LayerKind::Subhead => {
                let limits = FitLimits {
                    max_px: (box_h * 0.45) as u32,
                    min_px: ((f64::from(size.width) * 0.018) as u32).max(14),
                };
                draw_copy(ts, pass, &field.text, &rect, limits, false)
            }
            _ => draw_cta_button(ts, pass, &field.text, &rect, cta_fill),
        }
    };

    let slots = [
        (&fields.headline, LayerKind::Headline),
        (&fields.subhead, LayerKind::Subhead),
        (&fields.cta, LayerKind::Cta),
    ];
    for (field, kind) in slots {
        let Some(field) = field else { continue };
        if let Err(reason) = draw(field, ts, pass, kind) {
            report.skip(kind, 0, reason);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fields.rs"]
mod tests;
