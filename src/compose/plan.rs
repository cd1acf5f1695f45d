use crate::{
    compose::model::{FixedFields, LayoutDescriptor, MasterCopy, TextContent},
    draw::{elements::ElementSpec, shapes::ShapeSpec},
    effects::{motif::MotifSpec, scrim},
    foundation::core::{CanvasSize, NormalizedBox},
    text::layers::TextLayer,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasePlacement<'a> {
    /// Fill the canvas, cropping overflow.
    Cover,
    /// Explicit box, or contain-fit when `None`.
    Boxed(Option<&'a NormalizedBox>),
}

/// One step of a composition, executed in list order over a single owned surface.
#[derive(Clone, Copy, Debug)]
pub enum ComposeOp<'a> {
    Base(BasePlacement<'a>),
    Motif(&'a MotifSpec),
    Shapes(&'a [ShapeSpec]),
    Elements(&'a [ElementSpec]),
    Scrim { y0: i64 },
    MasterCopy { headline: &'a str, cta: &'a str, scrim_y0: i64 },
    FixedFields(&'a FixedFields),
    TextLayers(&'a [TextLayer]),
}

/// Base, optional motif, scrim, then headline and CTA.
pub fn master_plan(copy: &MasterCopy, size: CanvasSize) -> Vec<ComposeOp<'_>> {
    let scrim_y0 = i64::from(scrim::scrim_start(size));
    let mut ops = vec![ComposeOp::Base(BasePlacement::Cover)];
    if let Some(motif) = &copy.motif {
        ops.push(ComposeOp::Motif(motif));
    }
    ops.push(ComposeOp::Scrim { y0: scrim_y0 });
    ops.push(ComposeOp::MasterCopy {
        headline: &copy.headline,
        cta: &copy.cta,
        scrim_y0,
    });
    ops
}

/// Base, motif, shapes, elements, the scrim for fixed fields only, then text.
pub fn layout_plan(desc: &LayoutDescriptor, size: CanvasSize) -> Vec<ComposeOp<'_>> {
    let mut ops = vec![ComposeOp::Base(BasePlacement::Boxed(desc.base_box.as_ref()))];
    if let Some(motif) = &desc.motif {
        ops.push(ComposeOp::Motif(motif));
    }
    if !desc.shapes.is_empty() {
        ops.push(ComposeOp::Shapes(&desc.shapes));
    }
    if !desc.elements.is_empty() {
        ops.push(ComposeOp::Elements(&desc.elements));
    }
    match &desc.text {
        TextContent::None => {}
        TextContent::Fixed(fields) if fields.is_empty() => {}
        TextContent::Fixed(fields) => {
            ops.push(ComposeOp::Scrim {
                y0: fixed_scrim_start(fields, size),
            });
            ops.push(ComposeOp::FixedFields(fields));
        }
        TextContent::Layers(layers) => ops.push(ComposeOp::TextLayers(layers)),
    }
    ops
}

/// The ratio-derived scrim start, raised to the top of the highest usable field box.
pub fn fixed_scrim_start(fields: &FixedFields, size: CanvasSize) -> i64 {
    let ratio_start = i64::from(scrim::scrim_start(size));
    [&fields.headline, &fields.subhead, &fields.cta]
        .into_iter()
        .flatten()
        .filter_map(|f| f.bbox.to_pixels(size))
        .map(|r| r.y0)
        .fold(ratio_start, i64::min)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
