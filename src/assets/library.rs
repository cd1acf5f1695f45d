use std::{
    collections::BTreeMap,
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::decode::{is_svg, load_image_file},
    foundation::error::ComposeResult,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "svg"];

/// Decoded images addressed by asset id, shared read-only across renders.
#[derive(Clone, Debug, Default)]
pub struct AssetLibrary {
    images: BTreeMap<String, Arc<RgbaImage>>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, image: RgbaImage) {
        self.images.insert(id.into(), Arc::new(image));
    }

    pub fn get(&self, id: &str) -> Option<Arc<RgbaImage>> {
        self.images.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Load every image in `dir` (non-recursive), keyed by file stem.
    ///
    /// Files that fail to decode are logged and left out; a later lookup treats them as
    /// missing.
    pub fn load_dir(dir: &Path, svg_max_dim: u32) -> ComposeResult<Self> {
        let mut lib = Self::new();
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("read asset dir '{}'", dir.display()))?;
        let mut paths: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        paths.sort();

        for path in paths {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if lib.contains(id) {
                tracing::warn!(path = %path.display(), "duplicate asset id, keeping the first");
                continue;
            }
            match load_image_file(&path, svg_max_dim) {
                Ok(img) => {
                    tracing::debug!(id, svg = is_svg(&path), "asset loaded");
                    lib.insert(id, img);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "asset failed to load");
                }
            }
        }
        Ok(lib)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
