use super::*;

#[test]
fn canvas_size_rejects_zero() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    assert_eq!(CanvasSize::new(1080, 1350).unwrap().width, 1080);
}

#[test]
fn aspect_classification_uses_tolerance() {
    let sq = CanvasSize::new(1080, 1080).unwrap();
    let portrait = CanvasSize::new(1080, 1350).unwrap();
    let story = CanvasSize::new(1080, 1920).unwrap();
    let near_story = CanvasSize::new(1090, 1920).unwrap();
    let landscape = CanvasSize::new(1920, 1080).unwrap();

    assert_eq!(sq.aspect(), AspectRatio::Square);
    assert_eq!(portrait.aspect(), AspectRatio::Portrait);
    assert_eq!(story.aspect(), AspectRatio::Story);
    assert_eq!(near_story.aspect(), AspectRatio::Story);
    assert_eq!(landscape.aspect(), AspectRatio::Square);
    assert_eq!(AspectRatio::Story.label(), "9:16");
}

#[test]
fn invalid_boxes_do_not_convert() {
    let canvas = CanvasSize::new(100, 100).unwrap();
    assert!(NormalizedBox::new(0.1, 0.1, 0.0, 0.5).to_pixels(canvas).is_none());
    assert!(NormalizedBox::new(0.1, 0.1, 0.5, -0.2).to_pixels(canvas).is_none());
    assert!(NormalizedBox::new(f64::NAN, 0.1, 0.5, 0.2).to_pixels(canvas).is_none());
    // Entirely off the left edge collapses after clamping.
    assert!(NormalizedBox::new(-0.8, 0.1, 0.5, 0.2).to_pixels(canvas).is_none());
}

#[test]
fn pixel_conversion_clamps_to_canvas() {
    let canvas = CanvasSize::new(200, 100).unwrap();
    let r = NormalizedBox::new(-0.1, 0.5, 0.5, 0.8)
        .to_pixels(canvas)
        .unwrap();
    assert_eq!(r, PixelRect::new(0, 50, 80, 100));
}

#[test]
fn box_round_trip_is_within_one_pixel() {
    let canvas = CanvasSize::new(1080, 1350).unwrap();
    let boxes = [
        NormalizedBox::new(0.08, 0.62, 0.80, 0.14),
        NormalizedBox::new(0.333, 0.101, 0.2, 0.2),
        NormalizedBox::new(0.0, 0.0, 1.0, 1.0),
        NormalizedBox::new(0.9071, 0.4449, 0.05, 0.05),
    ];
    for b in boxes {
        let px = b.to_pixels(canvas).unwrap();
        let x = px.x0 as f64 / f64::from(canvas.width);
        let y = px.y0 as f64 / f64::from(canvas.height);
        assert!((x - b.x).abs() <= 1.0 / f64::from(canvas.width), "{b:?}");
        assert!((y - b.y).abs() <= 1.0 / f64::from(canvas.height), "{b:?}");
    }
}

#[test]
fn pixel_rect_intersection_and_translation() {
    let a = PixelRect::new(0, 0, 10, 10);
    let b = PixelRect::new(5, 5, 20, 20);
    assert_eq!(a.intersect(&b), Some(PixelRect::new(5, 5, 10, 10)));
    assert_eq!(a.intersect(&PixelRect::new(10, 0, 12, 5)), None);
    assert_eq!(a.translate(-3, 4), PixelRect::new(-3, 4, 7, 14));
    assert!(a.contains(0, 9));
    assert!(!a.contains(10, 0));
}

#[test]
fn premul_from_straight_rounds() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().a, 0);
}
