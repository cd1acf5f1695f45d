use image::RgbaImage;

use super::*;

fn library() -> AssetLibrary {
    let mut lib = AssetLibrary::new();
    lib.insert("logo", RgbaImage::new(4, 2));
    lib.insert("motif", RgbaImage::new(8, 8));
    lib
}

fn parse(json: &str) -> LayoutDoc {
    LayoutDoc::from_json(json.as_bytes()).unwrap()
}

#[test]
fn free_form_layers_resolve_size_priority_once() {
    let doc = parse(
        r##"{
        "text_layers": [
            {"text": "a", "box": {"x": 0.1, "y": 0.1, "w": 0.5, "h": 0.2},
             "font_size_px": 48, "reference_width": 1080, "font_size_box_norm": 0.5},
            {"text": "b", "box": {"x": 0.1, "y": 0.1, "w": 0.5, "h": 0.2},
             "font_size_px": 48, "font_size_box_norm": 0.5},
            {"text": "c", "box": {"x": 0.1, "y": 0.1, "w": 0.5, "h": 0.2},
             "font_size_canvas_norm": "0.04", "align": "right", "color": "#000"},
            {"text": "d", "box": {"x": 0.1, "y": 0.1, "w": 0.5, "h": 0.2}}
        ]
    }"##,
    );
    let desc = doc.validate(&library()).unwrap();
    let TextContent::Layers(layers) = desc.text else {
        panic!("expected layers");
    };
    assert_eq!(
        layers[0].size,
        SizeSpec::Scaled {
            px: 48.0,
            reference_width: 1080.0
        }
    );
    // px without a reference width is ignored.
    assert_eq!(layers[1].size, SizeSpec::BoxRelative(0.5));
    assert_eq!(layers[2].size, SizeSpec::CanvasRelative(0.04));
    assert_eq!(layers[2].align, Align::Right);
    assert_eq!(layers[2].color, Rgb8::BLACK);
    assert_eq!(layers[3].size, SizeSpec::Auto);
    assert_eq!(layers[3].color, Rgb8::WHITE);
}

#[test]
fn mixing_text_models_is_rejected_with_a_path() {
    let doc = parse(
        r#"{
        "headline": {"text": "H", "box": {"x": 0, "y": 0, "w": 1, "h": 0.2}},
        "text_layers": [{"text": "x"}]
    }"#,
    );
    let err = doc.validate(&library()).unwrap_err();
    assert!(err.to_string().contains("$.text_layers"), "{err}");
}

#[test]
fn bad_reference_width_is_rejected() {
    let doc = parse(r#"{"text_layers": [{"text": "x", "font_size_px": 10, "reference_width": 0}]}"#);
    let err = doc.validate(&library()).unwrap_err();
    assert!(
        err.to_string().contains("$.text_layers[0].reference_width"),
        "{err}"
    );
}

#[test]
fn unparsable_geometry_yields_invalid_box() {
    let doc = parse(
        r#"{"shapes": [
            {"kind": "star", "box": {"x": 0.1, "y": 0.1, "w": "wide", "h": 0.2}},
            {"kind": "blob", "box": {"x": "0.2", "y": 0.2, "w": "0.3", "h": 0.3}, "color": "zzz"}
        ]}"#,
    );
    let desc = doc.validate(&library()).unwrap();
    assert_eq!(desc.shapes.len(), 2);
    assert!(!desc.shapes[0].bbox.is_valid());
    assert_eq!(desc.shapes[1].kind, ShapeKind::Rect);
    assert_eq!(desc.shapes[1].bbox, NormalizedBox::new(0.2, 0.2, 0.3, 0.3));
    assert_eq!(desc.shapes[1].color, Rgb8::FALLBACK);
    assert!(matches!(desc.text, TextContent::None));
}

#[test]
fn missing_assets_are_dropped() {
    let doc = parse(
        r#"{
        "elements": [
            {"asset": "logo", "box": {"x": 0, "y": 0, "w": 0.2, "h": 0.1}, "opacity": 0.5},
            {"asset": "ghost", "box": {"x": 0, "y": 0, "w": 0.2, "h": 0.1}}
        ],
        "motif": {"asset": "ghost"}
    }"#,
    );
    let desc = doc.validate(&library()).unwrap();
    assert_eq!(desc.elements.len(), 1);
    assert_eq!(desc.elements[0].opacity, 0.5);
    assert!(desc.motif.is_none());
}

#[test]
fn motif_defaults_and_passthrough_tint() {
    let doc = parse(r#"{"motif": {"asset": "motif"}}"#);
    let m = doc.validate(&library()).unwrap().motif.unwrap();
    assert_eq!(m.tint, Some(crate::effects::motif::DEFAULT_MOTIF_TINT));
    assert_eq!(m.opacity, DEFAULT_MOTIF_OPACITY);
    assert_eq!(m.placement, MotifPlacement::Right);
    assert_eq!(m.protection, SubjectProtection::Right);

    let doc = parse(r#"{"motif": {"asset": "motif", "tint": "", "position": "full", "subject": "none"}}"#);
    let m = doc.validate(&library()).unwrap().motif.unwrap();
    assert_eq!(m.tint, None);
    assert_eq!(m.placement, MotifPlacement::Full);
    assert_eq!(m.protection, SubjectProtection::None);
}

#[test]
fn fixed_fields_and_base_box() {
    let doc = parse(
        r#"{
        "base_box": {"x": 0.1, "y": 0.1, "w": 0.8, "h": 0.8},
        "headline": {"text": "Save", "box": {"x": 0.05, "y": 0.6, "w": 0.9, "h": 0.15}},
        "cta": {"text": "Shop", "box": {"x": 0.2, "y": 0.85, "w": 0.6, "h": 0.1}}
    }"#,
    );
    let desc = doc.validate(&library()).unwrap();
    assert_eq!(desc.base_box, Some(NormalizedBox::new(0.1, 0.1, 0.8, 0.8)));
    let TextContent::Fixed(fields) = desc.text else {
        panic!("expected fixed fields");
    };
    assert_eq!(fields.headline.unwrap().text, "Save");
    assert!(fields.subhead.is_none());
    assert_eq!(fields.cta.unwrap().bbox.w, 0.6);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = LayoutDoc::from_json(b"{not json").unwrap_err();
    assert!(matches!(err, ComposeError::Serde(_)));
}
