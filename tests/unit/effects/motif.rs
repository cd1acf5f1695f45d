use image::Rgba;

use super::*;

fn canvas() -> CanvasSize {
    CanvasSize::new(1080, 1080).unwrap()
}

fn opaque_motif(color: [u8; 4]) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(400, 400, Rgba(color)))
}

#[test]
fn preset_names_and_aliases() {
    assert_eq!(MotifPlacement::from_name("COVER"), MotifPlacement::Full);
    assert_eq!(MotifPlacement::from_name(" l "), MotifPlacement::Left);
    assert_eq!(MotifPlacement::from_name("middle"), MotifPlacement::Center);
    assert_eq!(MotifPlacement::from_name("whatever"), MotifPlacement::Right);

    assert_eq!(SubjectProtection::from_name("off"), SubjectProtection::None);
    assert_eq!(SubjectProtection::from_name(""), SubjectProtection::None);
    assert_eq!(SubjectProtection::from_name("c"), SubjectProtection::Center);
    assert_eq!(SubjectProtection::from_name("nonsense"), SubjectProtection::Right);
}

#[test]
fn protection_rect_geometry() {
    let right = protection_rect(canvas(), SubjectProtection::Right).unwrap();
    assert_eq!(right, PixelRect::new(540, 129, 1015, 1014));

    let left = protection_rect(canvas(), SubjectProtection::Left).unwrap();
    assert_eq!((left.x0, left.width()), (64, 475));

    let center = protection_rect(canvas(), SubjectProtection::Center).unwrap();
    assert_eq!(center.x0, (1080 - 475) / 2);

    assert!(protection_rect(canvas(), SubjectProtection::None).is_none());
}

#[test]
fn side_motif_is_right_aligned_and_centered() {
    let mut spec = MotifSpec::new(opaque_motif([255, 0, 0, 255]));
    spec.protection = SubjectProtection::None;
    let layer = prepare_motif_layer(&spec, canvas());

    assert_eq!(layer.image.dimensions(), (604, 604));
    assert_eq!((layer.x, layer.y), (433, 238));
}

#[test]
fn protected_region_is_fully_transparent() {
    let mut spec = MotifSpec::new(opaque_motif([255, 0, 0, 255]));
    spec.opacity = 1.0;
    spec.tint = None;
    let layer = prepare_motif_layer(&spec, canvas());

    let protect = protection_rect(canvas(), SubjectProtection::Right).unwrap();
    let local = protect.translate(-layer.x, -layer.y);
    let mut checked = 0;
    for (x, y, p) in layer.image.enumerate_pixels() {
        if local.contains(i64::from(x), i64::from(y)) {
            assert_eq!(p.0[3], 0, "alpha at local ({x},{y})");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn composited_motif_skips_the_subject() {
    let mut spec = MotifSpec::new(opaque_motif([255, 0, 0, 255]));
    spec.opacity = 1.0;
    spec.tint = None;

    let white = RgbaImage::from_pixel(1080, 1080, Rgba([255, 255, 255, 255]));
    let mut surface = Surface::from_straight(&white);
    apply_motif(&mut surface, &spec);

    // Inside the motif but left of the protection zone.
    let painted = surface.pixel(480, 500);
    assert!(painted[0] >= 250 && painted[1] <= 5, "{painted:?}");
    // Inside both the motif and the protection zone.
    assert_eq!(surface.pixel(700, 500), [255, 255, 255, 255]);
    // Outside the motif.
    assert_eq!(surface.pixel(100, 500), [255, 255, 255, 255]);
}

#[test]
fn tint_keeps_alpha_shape() {
    let mut img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
    img.put_pixel(1, 0, Rgba([200, 200, 200, 128]));
    recolor(&mut img, Rgb8::new(1, 2, 3));
    assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [1, 2, 3, 128]);
}

#[test]
fn tint_uses_luma_when_alpha_is_empty() {
    let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
    recolor(&mut img, Rgb8::new(9, 9, 9));
    assert_eq!(img.get_pixel(0, 0).0, [9, 9, 9, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [9, 9, 9, 255]);
}

#[test]
fn opacity_truncates_alpha() {
    let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    scale_alpha(&mut img, 0.14);
    assert_eq!(img.get_pixel(0, 0).0[3], 35);

    scale_alpha(&mut img, f32::NAN);
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn full_mode_still_honours_protection() {
    let mut spec = MotifSpec::new(opaque_motif([0, 0, 255, 255]));
    spec.placement = MotifPlacement::Full;
    spec.protection = SubjectProtection::Left;
    let layer = prepare_motif_layer(&spec, canvas());
    assert_eq!((layer.x, layer.y), (0, 0));
    assert_eq!(layer.image.dimensions(), (1080, 1080));
    assert_eq!(layer.image.get_pixel(200, 500).0[3], 0);
    assert!(layer.image.get_pixel(1060, 500).0[3] > 0);
}
