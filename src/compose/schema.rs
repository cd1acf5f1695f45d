//! JSON layout documents and their validation into a [`LayoutDescriptor`].
//!
//! Documents are deliberately loose: numbers may arrive as strings, keys are optional and
//! unknown keys are ignored. Structural conflicts are errors; bad geometry is carried through
//! as an invalid box so the renderer can report the layer as skipped.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::{
    assets::library::AssetLibrary,
    compose::model::{FixedField, FixedFields, LayoutDescriptor, TextContent},
    draw::{elements::ElementSpec, shapes::ShapeKind, shapes::ShapeSpec},
    effects::motif::{DEFAULT_MOTIF_OPACITY, MotifPlacement, MotifSpec, SubjectProtection},
    foundation::color::Rgb8,
    foundation::core::NormalizedBox,
    foundation::error::{ComposeError, ComposeResult},
    text::{
        engine::Align,
        fonts::FontFamily,
        layers::{SizeSpec, TextBackground, TextLayer},
    },
};

/// Number that tolerates numeric strings; anything else reads as absent.
fn loose_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoxDoc {
    #[serde(deserialize_with = "loose_f64")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub w: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub h: Option<f64>,
}

impl BoxDoc {
    /// Missing or unparsable sizes make the box invalid; a missing origin is 0.
    fn to_box(&self) -> NormalizedBox {
        NormalizedBox::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.w.unwrap_or(f64::NAN),
            self.h.unwrap_or(f64::NAN),
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FieldDoc {
    pub text: String,
    #[serde(rename = "box")]
    pub bbox: BoxDoc,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackgroundDoc {
    pub color: Option<String>,
    #[serde(deserialize_with = "loose_f64")]
    pub opacity: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub radius_px: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub radius_box_norm: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub radius_canvas_norm: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub padding_px: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub padding_box_norm: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub padding_canvas_norm: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextLayerDoc {
    pub text: String,
    pub wrapped_text: Option<String>,
    #[serde(rename = "box")]
    pub bbox: BoxDoc,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "loose_f64")]
    pub font_size_px: Option<f64>,
    /// Canvas width the pixel values were authored against.
    #[serde(deserialize_with = "loose_f64")]
    pub reference_width: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub font_size_box_norm: Option<f64>,
    #[serde(deserialize_with = "loose_f64")]
    pub font_size_canvas_norm: Option<f64>,
    pub color: Option<String>,
    pub align: Option<String>,
    pub background: Option<BackgroundDoc>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShapeDoc {
    pub kind: String,
    #[serde(rename = "box")]
    pub bbox: BoxDoc,
    pub color: Option<String>,
    #[serde(deserialize_with = "loose_f64")]
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ElementDoc {
    pub asset: String,
    #[serde(rename = "box")]
    pub bbox: BoxDoc,
    #[serde(deserialize_with = "loose_f64")]
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MotifDoc {
    pub asset: String,
    #[serde(deserialize_with = "loose_f64")]
    pub opacity: Option<f64>,
    /// Absent means the brand default; an empty string or `"none"` keeps original colors.
    pub tint: Option<String>,
    pub position: Option<String>,
    pub subject: Option<String>,
}

/// A layout as authored in JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LayoutDoc {
    pub base_box: Option<BoxDoc>,
    pub headline: Option<FieldDoc>,
    pub subhead: Option<FieldDoc>,
    pub cta: Option<FieldDoc>,
    pub text_layers: Vec<TextLayerDoc>,
    pub shapes: Vec<ShapeDoc>,
    pub elements: Vec<ElementDoc>,
    pub motif: Option<MotifDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

impl LayoutDoc {
    pub fn from_json(bytes: &[u8]) -> ComposeResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ComposeError::serde(format!("parse layout document: {e}")))
    }

    /// Resolve into a typed descriptor, dropping elements and motifs whose assets are missing.
    pub fn validate(&self, assets: &AssetLibrary) -> ComposeResult<LayoutDescriptor> {
        let mut errors = Vec::new();

        let has_fixed = self.headline.is_some() || self.subhead.is_some() || self.cta.is_some();
        if has_fixed && !self.text_layers.is_empty() {
            errors.push(SchemaError::at(
                &[SchemaPathElem::Field("text_layers")],
                "free-form text layers cannot be combined with headline/subhead/cta",
            ));
        }
        for (i, layer) in self.text_layers.iter().enumerate() {
            if let Some(r) = layer.reference_width
                && r <= 0.0
            {
                errors.push(SchemaError::at(
                    &[
                        SchemaPathElem::Field("text_layers"),
                        SchemaPathElem::Index(i),
                        SchemaPathElem::Field("reference_width"),
                    ],
                    "reference_width must be > 0",
                ));
            }
        }
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(ComposeError::validation(msg));
        }

        let text = if has_fixed {
            let field = |f: &Option<FieldDoc>| {
                f.as_ref()
                    .map(|f| FixedField::new(f.text.clone(), f.bbox.to_box()))
            };
            TextContent::Fixed(FixedFields {
                headline: field(&self.headline),
                subhead: field(&self.subhead),
                cta: field(&self.cta),
            })
        } else if self.text_layers.is_empty() {
            TextContent::None
        } else {
            TextContent::Layers(self.text_layers.iter().map(text_layer).collect())
        };

        let shapes = self
            .shapes
            .iter()
            .map(|s| ShapeSpec {
                kind: ShapeKind::from_name(&s.kind),
                bbox: s.bbox.to_box(),
                color: color_or(s.color.as_deref(), Rgb8::FALLBACK),
                opacity: opacity_or(s.opacity, 1.0),
            })
            .collect();

        let mut elements = Vec::new();
        for (i, e) in self.elements.iter().enumerate() {
            let Some(image) = assets.get(&e.asset) else {
                tracing::warn!(index = i, asset = %e.asset, "element asset missing, dropped");
                continue;
            };
            elements.push(ElementSpec {
                image,
                bbox: e.bbox.to_box(),
                opacity: opacity_or(e.opacity, 1.0),
            });
        }

        let motif = self.motif.as_ref().and_then(|m| {
            let Some(image) = assets.get(&m.asset) else {
                tracing::warn!(asset = %m.asset, "motif asset missing, dropped");
                return None;
            };
            Some(MotifSpec {
                image,
                opacity: opacity_or(m.opacity, DEFAULT_MOTIF_OPACITY),
                tint: motif_tint(m.tint.as_deref()),
                placement: m
                    .position
                    .as_deref()
                    .map(MotifPlacement::from_name)
                    .unwrap_or_default(),
                protection: m
                    .subject
                    .as_deref()
                    .map(SubjectProtection::from_name)
                    .unwrap_or_default(),
            })
        });

        Ok(LayoutDescriptor {
            base_box: self.base_box.as_ref().map(BoxDoc::to_box),
            text,
            shapes,
            elements,
            motif,
        })
    }
}

fn color_or(hex: Option<&str>, default: Rgb8) -> Rgb8 {
    match hex {
        Some(s) => Rgb8::from_hex_or_fallback(s),
        None => default,
    }
}

fn opacity_or(v: Option<f64>, default: f32) -> f32 {
    v.map_or(default, |v| v as f32)
}

pub(crate) fn motif_tint(tint: Option<&str>) -> Option<Rgb8> {
    match tint.map(str::trim) {
        None => Some(crate::effects::motif::DEFAULT_MOTIF_TINT),
        Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("none") => None,
        Some(s) => Some(Rgb8::from_hex_or_fallback(s)),
    }
}

/// First usable mode wins: scaled px, then box-relative, then canvas-relative.
fn size_spec(
    px: Option<f64>,
    reference: Option<f64>,
    box_norm: Option<f64>,
    canvas_norm: Option<f64>,
) -> SizeSpec {
    match (px, reference, box_norm, canvas_norm) {
        (Some(px), Some(reference_width), _, _) if reference_width > 0.0 => SizeSpec::Scaled {
            px,
            reference_width,
        },
        (_, _, Some(f), _) => SizeSpec::BoxRelative(f),
        (_, _, _, Some(f)) => SizeSpec::CanvasRelative(f),
        _ => SizeSpec::Auto,
    }
}

fn text_layer(doc: &TextLayerDoc) -> TextLayer {
    let background = doc.background.as_ref().map(|bg| TextBackground {
        color: color_or(bg.color.as_deref(), Rgb8::BLACK),
        opacity: opacity_or(bg.opacity, 1.0),
        radius: size_spec(
            bg.radius_px,
            doc.reference_width,
            bg.radius_box_norm,
            bg.radius_canvas_norm,
        ),
        padding: size_spec(
            bg.padding_px,
            doc.reference_width,
            bg.padding_box_norm,
            bg.padding_canvas_norm,
        ),
    });
    TextLayer {
        text: doc.text.clone(),
        wrapped_text: doc.wrapped_text.clone(),
        bbox: doc.bbox.to_box(),
        family: doc
            .font_family
            .as_deref()
            .map(FontFamily::from_name)
            .unwrap_or_default(),
        size: size_spec(
            doc.font_size_px,
            doc.reference_width,
            doc.font_size_box_norm,
            doc.font_size_canvas_norm,
        ),
        color: color_or(doc.color.as_deref(), Rgb8::WHITE),
        align: doc.align.as_deref().map(Align::from_name).unwrap_or_default(),
        background,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/schema.rs"]
mod tests;
