use super::*;

#[test]
fn layer_rect_distinguishes_invalid_from_off_canvas() {
    let size = CanvasSize::new(100, 100).unwrap();
    assert_eq!(
        layer_rect(&NormalizedBox::new(0.1, 0.1, 0.0, 0.5), size),
        Err(SkipReason::InvalidBox)
    );
    assert_eq!(
        layer_rect(&NormalizedBox::new(-0.8, 0.1, 0.5, 0.5), size),
        Err(SkipReason::OffCanvas)
    );
    assert_eq!(
        layer_rect(&NormalizedBox::new(0.1, 0.2, 0.5, 0.5), size),
        Ok(PixelRect::new(10, 20, 60, 70))
    );
}

#[test]
fn skips_are_recorded_in_order() {
    let mut report = RenderReport::default();
    assert!(report.is_clean());
    report.skip(LayerKind::Shape, 2, SkipReason::InvalidBox);
    report.skip(LayerKind::Text, 0, SkipReason::EmptyText);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].kind, LayerKind::Shape);
    assert_eq!(report.skipped[1].reason, SkipReason::EmptyText);
    assert_eq!(SkipReason::OffCanvas.to_string(), "box falls outside the canvas");
}

#[test]
fn report_serializes_with_snake_case_tags() {
    let mut report = RenderReport::default();
    report.skip(LayerKind::Cta, 0, SkipReason::InvalidFontSize);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["skipped"][0]["kind"], "cta");
    assert_eq!(json["skipped"][0]["reason"], "invalid_font_size");
}
