//! Render one layout at every configured canvas size in parallel.

use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    compose::{
        model::{LayoutDescriptor, MasterCopy},
        render::{LayoutRenderer, RenderedOutput},
    },
    foundation::config::RenderConfig,
    foundation::core::CanvasSize,
    foundation::error::{ComposeError, ComposeResult},
};

/// Output for one labeled size.
#[derive(Clone, Debug)]
pub struct BatchItem {
    pub label: String,
    pub size: CanvasSize,
    pub output: RenderedOutput,
}

/// Render the master template at every `(label, size)` pair. Results keep input order.
pub fn render_master_batch(
    kv: &RgbaImage,
    copy: &MasterCopy,
    sizes: &[(String, CanvasSize)],
    config: &RenderConfig,
) -> ComposeResult<Vec<BatchItem>> {
    run_batch(sizes, config, |renderer, size| {
        renderer.render_master(kv, size, copy)
    })
}

/// Render a layout at every `(label, size)` pair. Results keep input order.
pub fn render_layout_batch(
    kv: &RgbaImage,
    layout: &LayoutDescriptor,
    sizes: &[(String, CanvasSize)],
    config: &RenderConfig,
) -> ComposeResult<Vec<BatchItem>> {
    run_batch(sizes, config, |renderer, size| {
        renderer.render_layout(kv, size, layout)
    })
}

fn run_batch<F>(
    sizes: &[(String, CanvasSize)],
    config: &RenderConfig,
    render: F,
) -> ComposeResult<Vec<BatchItem>>
where
    F: Fn(&mut LayoutRenderer, CanvasSize) -> ComposeResult<RenderedOutput> + Sync,
{
    let pool = build_thread_pool(config.threads)?;
    let rendered = pool.install(|| {
        sizes
            .par_iter()
            .map_init(
                || LayoutRenderer::new(config.clone()),
                |renderer, (label, size)| -> ComposeResult<BatchItem> {
                    let output = render(renderer, *size)?;
                    Ok(BatchItem {
                        label: label.clone(),
                        size: *size,
                        output,
                    })
                },
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ComposeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ComposeError::validation(
            "render 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ComposeError::render(format!("failed to build rayon thread pool: {e}")))
}
