//! kvcompose renders creative layouts: a key visual placed on a canvas, an optional brand motif,
//! vector shapes, inserted images and fitted text, for any target aspect ratio.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: a JSON [`LayoutDoc`] (or hand-built values) becomes a [`LayoutDescriptor`].
//! 2. **Plan**: the descriptor becomes an ordered list of composition steps. The order is fixed:
//!    base, motif, shapes, elements, scrim (fixed-field copy only), text.
//! 3. **Render**: steps run over a single owned premultiplied surface and produce a
//!    [`RenderedOutput`] with a straight-alpha raster and a [`RenderReport`] of skipped layers.
//!
//! Bad geometry never fails a render; the layer is dropped and reported. Missing fonts fall
//! back to a built-in bitmap face.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod draw;
mod effects;
mod foundation;
mod placement;
mod render;
mod text;

pub use assets::decode::{decode_image, load_image_file, parse_svg, rasterize_svg};
pub use assets::library::AssetLibrary;
pub use compose::batch::{BatchItem, render_layout_batch, render_master_batch};
pub use compose::model::{FixedField, FixedFields, LayoutDescriptor, MasterCopy, TextContent};
pub use compose::plan::{BasePlacement, ComposeOp, layout_plan, master_plan};
pub use compose::render::{LayoutRenderer, RenderedOutput, render_layout, render_master};
pub use compose::report::{LayerKind, RenderReport, SkipReason, SkippedLayer};
pub use compose::schema::{
    BackgroundDoc, BoxDoc, ElementDoc, FieldDoc, LayoutDoc, MotifDoc, ShapeDoc, TextLayerDoc,
};
pub use draw::elements::ElementSpec;
pub use draw::shapes::{ShapeKind, ShapeSpec, shape_path, star_points};
pub use effects::motif::{
    DEFAULT_MOTIF_OPACITY, DEFAULT_MOTIF_TINT, MotifLayer, MotifPlacement, MotifSpec,
    SubjectProtection, prepare_motif_layer, protection_rect,
};
pub use effects::scrim::{apply_bottom_scrim, scrim_height, scrim_start};
pub use foundation::color::Rgb8;
pub use foundation::config::{FONT_DIR_ENV, RenderConfig, THREADS_ENV};
pub use foundation::core::{
    AspectRatio, BezPath, CanvasSize, NormalizedBox, PixelRect, Point, Rect, Rgba8Premul,
};
pub use foundation::error::{ComposeError, ComposeResult};
pub use placement::canvas::{
    ScaledSize, contain_fit, contain_resize, contain_size, cover_crop, cover_size,
    place_with_box, stretch,
};
pub use placement::outpaint::outpaint_canvas;
pub use render::surface::Surface;
pub use text::engine::{Align, LineMetrics, TextBlock, TextLayoutEngine, Typesetter};
pub use text::fit::{FittedText, fit_text_to_box, line_spacing};
pub use text::fonts::{FontFace, FontFamily, FontResolver, OutlineFace, ResolvedFont};
pub use text::layers::{SizeSpec, TextBackground, TextLayer};
