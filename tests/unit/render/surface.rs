use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn straight_round_trip_keeps_opaque_pixels() {
    let img = solid(3, 2, [12, 200, 34, 255]);
    let s = Surface::from_straight(&img);
    assert_eq!(s.size(), CanvasSize { width: 3, height: 2 });
    assert_eq!(s.to_straight(), img);
}

#[test]
fn draw_image_clips_negative_offsets() {
    let mut s = Surface::new(CanvasSize { width: 4, height: 4 });
    let red = solid(3, 3, [255, 0, 0, 255]);
    s.draw_image(&red, -2, -1, 1.0);

    assert_eq!(s.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(s.pixel(0, 1), [255, 0, 0, 255]);
    assert_eq!(s.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(s.pixel(0, 2), [0, 0, 0, 0]);
}

#[test]
fn draw_image_entirely_outside_is_noop() {
    let mut s = Surface::new(CanvasSize { width: 4, height: 4 });
    let before = s.clone();
    s.draw_image(&solid(2, 2, [255, 255, 255, 255]), 10, 10, 1.0);
    s.draw_image(&solid(2, 2, [255, 255, 255, 255]), -2, 0, 1.0);
    assert_eq!(s, before);
}

#[test]
fn draw_image_respects_opacity() {
    let mut s = Surface::from_straight(&solid(1, 1, [0, 0, 0, 255]));
    s.draw_image(&solid(1, 1, [255, 255, 255, 255]), 0, 0, 0.5);
    let px = s.pixel(0, 0);
    assert_eq!(px[3], 255);
    assert!((127..=129).contains(&px[0]));
}

#[test]
fn blend_row_only_touches_that_row() {
    let mut s = Surface::from_straight(&solid(2, 3, [255, 255, 255, 255]));
    s.blend_row(1, Rgba8Premul::from_straight_rgba(0, 0, 0, 255));
    assert_eq!(s.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(s.pixel(1, 1), [0, 0, 0, 255]);
    assert_eq!(s.pixel(0, 2), [255, 255, 255, 255]);
    s.blend_row(7, Rgba8Premul::from_straight_rgba(0, 0, 0, 255));
}
