use std::sync::Arc;

use image::RgbaImage;

use super::*;
use crate::{
    compose::model::FixedField,
    draw::shapes::ShapeKind,
    foundation::color::Rgb8,
};

fn tags(ops: &[ComposeOp<'_>]) -> Vec<&'static str> {
    ops.iter()
        .map(|op| match op {
            ComposeOp::Base(_) => "base",
            ComposeOp::Motif(_) => "motif",
            ComposeOp::Shapes(_) => "shapes",
            ComposeOp::Elements(_) => "elements",
            ComposeOp::Scrim { .. } => "scrim",
            ComposeOp::MasterCopy { .. } => "master_copy",
            ComposeOp::FixedFields(_) => "fixed",
            ComposeOp::TextLayers(_) => "layers",
        })
        .collect()
}

fn full() -> NormalizedBox {
    NormalizedBox::new(0.0, 0.0, 1.0, 1.0)
}

fn descriptor(text: TextContent) -> LayoutDescriptor {
    let img = Arc::new(RgbaImage::new(4, 4));
    LayoutDescriptor {
        base_box: None,
        text,
        shapes: vec![ShapeSpec {
            kind: ShapeKind::Rect,
            bbox: full(),
            color: Rgb8::WHITE,
            opacity: 1.0,
        }],
        elements: vec![ElementSpec {
            image: img.clone(),
            bbox: full(),
            opacity: 1.0,
        }],
        motif: Some(MotifSpec::new(img)),
    }
}

#[test]
fn free_form_layers_never_get_a_scrim() {
    let desc = descriptor(TextContent::Layers(vec![TextLayer::new("hi", full())]));
    let size = CanvasSize::new(100, 100).unwrap();
    assert_eq!(
        tags(&layout_plan(&desc, size)),
        ["base", "motif", "shapes", "elements", "layers"]
    );
}

#[test]
fn fixed_fields_put_scrim_before_text() {
    let fields = FixedFields {
        headline: Some(FixedField::new("Hi", NormalizedBox::new(0.1, 0.5, 0.8, 0.2))),
        ..FixedFields::default()
    };
    let desc = descriptor(TextContent::Fixed(fields));
    let size = CanvasSize::new(100, 100).unwrap();
    let ops = layout_plan(&desc, size);
    assert_eq!(
        tags(&ops),
        ["base", "motif", "shapes", "elements", "scrim", "fixed"]
    );
    let ComposeOp::Scrim { y0 } = ops[4] else {
        panic!("expected scrim");
    };
    // Ratio start is 70; the headline box starts higher at 50.
    assert_eq!(y0, 50);
}

#[test]
fn empty_descriptor_is_just_the_base() {
    let desc = LayoutDescriptor::default();
    let size = CanvasSize::new(10, 10).unwrap();
    assert_eq!(tags(&layout_plan(&desc, size)), ["base"]);

    let empty_fixed = LayoutDescriptor {
        text: TextContent::Fixed(FixedFields::default()),
        ..LayoutDescriptor::default()
    };
    assert_eq!(tags(&layout_plan(&empty_fixed, size)), ["base"]);
}

#[test]
fn scrim_start_ignores_unusable_boxes() {
    let size = CanvasSize::new(1080, 1920).unwrap();
    let fields = FixedFields {
        headline: Some(FixedField::new("x", NormalizedBox::new(0.1, 0.1, 0.0, 0.2))),
        cta: Some(FixedField::new("x", NormalizedBox::new(0.1, 0.9, 0.8, 0.05))),
        ..FixedFields::default()
    };
    // 9:16 → scrim 768 tall, starts at 1152; the CTA box is lower so it does not move it.
    assert_eq!(fixed_scrim_start(&fields, size), 1152);
}

#[test]
fn master_plan_order() {
    let size = CanvasSize::new(1080, 1080).unwrap();
    let copy = MasterCopy::new("Save", "Shop");
    assert_eq!(
        tags(&master_plan(&copy, size)),
        ["base", "scrim", "master_copy"]
    );

    let with_motif = copy.with_motif(MotifSpec::new(Arc::new(RgbaImage::new(2, 2))));
    let ops = master_plan(&with_motif, size);
    assert_eq!(tags(&ops), ["base", "motif", "scrim", "master_copy"]);
    let ComposeOp::MasterCopy { scrim_y0, .. } = ops[3] else {
        panic!("expected copy");
    };
    assert_eq!(scrim_y0, 756);
}
