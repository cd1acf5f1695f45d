use super::*;
use crate::{
    foundation::core::NormalizedBox, render::surface::Surface, text::fonts::FontResolver,
};

const ORANGE: Rgb8 = Rgb8::new(0xED, 0x89, 0x24);

fn typesetter() -> Typesetter {
    Typesetter::new(FontResolver::builtin_only())
}

#[test]
fn master_cta_button_geometry() {
    // 1080 square: scrim starts at 756, CTA area is (64, 963)..(1016, 1016).
    let area = PixelRect::new(64, 963, 1016, 1016);
    let g = button_geometry(&area);
    assert_eq!(g.rect, PixelRect::from_origin_size(245, 969, 590, 41));
    assert_eq!(g.radius, 10.0);
}

#[test]
fn button_is_capped_on_large_areas() {
    let g = button_geometry(&PixelRect::new(0, 0, 2000, 1000));
    assert_eq!((g.rect.width(), g.rect.height()), (640, 110));
    assert_eq!(g.radius, 24.0);
}

#[test]
fn cta_button_is_filled() {
    let size = CanvasSize::new(1080, 1080).unwrap();
    let mut ts = typesetter();
    let mut pass = VectorPass::new(size).unwrap();
    let area = PixelRect::new(64, 963, 1016, 1016);
    draw_cta_button(&mut ts, &mut pass, "Shop now", &area, ORANGE).unwrap();

    let mut s = Surface::new(size);
    pass.composite_onto(&mut s).unwrap();
    assert_eq!(s.pixel(250, 990), [0xED, 0x89, 0x24, 255]);
    assert_eq!(s.pixel(200, 990), [0, 0, 0, 0]);
}

#[test]
fn blank_cta_draws_nothing() {
    let size = CanvasSize::new(100, 100).unwrap();
    let mut ts = typesetter();
    let mut pass = VectorPass::new(size).unwrap();
    let res = draw_cta_button(&mut ts, &mut pass, "  ", &PixelRect::new(0, 0, 100, 100), ORANGE);
    assert_eq!(res, Err(SkipReason::EmptyText));
    assert_eq!(pass.op_count(), 0);
}

#[test]
fn headline_limits_follow_canvas() {
    let size = CanvasSize::new(1080, 1080).unwrap();
    let head = PixelRect::new(64, 820, 1016, 943);
    assert_eq!(
        master_headline_limits(size, &head),
        FitLimits {
            max_px: 39,
            min_px: 28
        }
    );
    let small = CanvasSize::new(300, 300).unwrap();
    assert_eq!(master_headline_limits(small, &head).min_px, 18);
}

#[test]
fn headline_casts_a_shadow() {
    let size = CanvasSize::new(200, 100).unwrap();
    let mut ts = typesetter();
    let mut pass = VectorPass::new(size).unwrap();
    let rect = PixelRect::new(0, 0, 200, 100);
    let limits = FitLimits {
        max_px: 16,
        min_px: 16,
    };
    draw_copy(&mut ts, &mut pass, "|", &rect, limits, true).unwrap();

    let mut s = Surface::new(size);
    pass.composite_onto(&mut s).unwrap();
    // Glyph column spans x 4..6; the shadow shows at x 6..8.
    assert_eq!(s.pixel(5, 5), [255, 255, 255, 255]);
    assert_eq!(s.pixel(7, 5), [0, 0, 0, 180]);
}

#[test]
fn master_copy_on_tiny_canvas_reports_skips() {
    let size = CanvasSize::new(20, 20).unwrap();
    let mut ts = typesetter();
    let mut pass = VectorPass::new(size).unwrap();
    let mut report = RenderReport::default();
    draw_master_copy(
        &mut ts,
        &mut pass,
        &mut report,
        size,
        "Headline",
        "Go",
        19,
        ORANGE,
    );
    // A one-row scrim band leaves no room for either box.
    let kinds: Vec<_> = report.skipped.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![LayerKind::Headline, LayerKind::Cta]);
    assert!(report.skipped.iter().all(|s| s.reason == SkipReason::OffCanvas));
    assert_eq!(pass.op_count(), 0);
}

#[test]
fn fixed_fields_skip_bad_boxes_and_draw_the_rest() {
    let size = CanvasSize::new(400, 400).unwrap();
    let mut ts = typesetter();
    let mut pass = VectorPass::new(size).unwrap();
    let mut report = RenderReport::default();
    let fields = FixedFields {
        headline: Some(FixedField::new("Big", NormalizedBox::new(0.1, 0.1, 0.8, 0.2))),
        subhead: Some(FixedField::new("small", NormalizedBox::new(0.1, 0.4, 0.0, 0.1))),
        cta: Some(FixedField::new("", NormalizedBox::new(0.1, 0.8, 0.8, 0.1))),
    };
    draw_fixed_fields(&mut ts, &mut pass, &mut report, size, &fields, ORANGE);

    assert!(pass.op_count() > 0);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].kind, LayerKind::Subhead);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidBox);
    assert_eq!(report.skipped[1].kind, LayerKind::Cta);
    assert_eq!(report.skipped[1].reason, SkipReason::EmptyText);
}
