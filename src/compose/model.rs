//! Strongly typed render inputs. Built once at the boundary, read-only during a render.

use crate::{
    draw::{elements::ElementSpec, shapes::ShapeSpec},
    effects::motif::MotifSpec,
    foundation::core::NormalizedBox,
    text::layers::TextLayer,
};

/// One copy block of the fixed-field template.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedField {
    pub text: String,
    pub bbox: NormalizedBox,
}

impl FixedField {
    pub fn new(text: impl Into<String>, bbox: NormalizedBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedFields {
    pub headline: Option<FixedField>,
    pub subhead: Option<FixedField>,
    pub cta: Option<FixedField>,
}

impl FixedFields {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none() && self.subhead.is_none() && self.cta.is_none()
    }
}

/// The two mutually exclusive text models.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextContent {
    #[default]
    None,
    /// Headline / subhead / CTA in preset boxes, with the legacy scrim.
    Fixed(FixedFields),
    /// Independent layers drawn in list order, no implicit scrim.
    Layers(Vec<TextLayer>),
}

#[derive(Clone, Debug, Default)]
pub struct LayoutDescriptor {
    /// Explicit placement for the base image; contain-fit when absent.
    pub base_box: Option<NormalizedBox>,
    pub text: TextContent,
    pub shapes: Vec<ShapeSpec>,
    pub elements: Vec<ElementSpec>,
    pub motif: Option<MotifSpec>,
}

/// Inputs of the legacy master render.
#[derive(Clone, Debug)]
pub struct MasterCopy {
    pub headline: String,
    pub cta: String,
    pub motif: Option<MotifSpec>,
}

impl MasterCopy {
    pub fn new(headline: impl Into<String>, cta: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            cta: cta.into(),
            motif: None,
        }
    }

    pub fn with_motif(mut self, motif: MotifSpec) -> Self {
        self.motif = Some(motif);
        self
    }
}
