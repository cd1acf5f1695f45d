//! Font-family resolution against candidate font files on the local filesystem.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::{config::RenderConfig, error::ComposeResult};

/// Logical font families a layout can ask for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    /// Whatever the host has; tries common system fonts only.
    Generic,
}

impl FontFamily {
    /// Parse a family id. Unknown ids map to [`FontFamily::Generic`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" | "inter" | "dejavu" | "dejavu sans" | "arial" | "helvetica" => {
                Self::Sans
            }
            "serif" | "georgia" | "times" | "times new roman" | "dejavu serif" => Self::Serif,
            _ => Self::Generic,
        }
    }

    fn own_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Sans => &[
                "assets/fonts/Inter-Regular.ttf",
                "assets/fonts/DejaVuSans.ttf",
                "fonts/Inter-Regular.ttf",
                "fonts/DejaVuSans.ttf",
            ],
            Self::Serif => &[
                "assets/fonts/DejaVuSerif.ttf",
                "fonts/DejaVuSerif.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
                "/System/Library/Fonts/Supplemental/Georgia.ttf",
                "/Library/Fonts/Georgia.ttf",
                "C:\\Windows\\Fonts\\georgia.ttf",
            ],
            Self::Generic => &[],
        }
    }
}

/// Fallback chain probed after a family's own candidates.
const SYSTEM_FALLBACKS: &[&str] = &[
    "assets/fonts/DejaVuSans.ttf",
    "assets/fonts/Inter-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Helvetica.ttf",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded outline font file.
pub struct OutlineFace {
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
    /// Same bytes, wrapped for the vector rasterizer.
    pub data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum FontFace {
    Outline(Arc<OutlineFace>),
    /// The built-in 5x7 bitmap font; always available.
    Builtin,
}

/// A face at a concrete pixel size.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    pub face: FontFace,
    pub size_px: u32,
}

impl ResolvedFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin)
    }
}

/// Maps a [`FontFamily`] to the first candidate file that exists.
///
/// Relative candidates are looked up under each configured font directory in order. Loaded
/// faces are cached per family for the lifetime of the resolver; resolvers are cheap to create
/// and are never shared between threads.
#[derive(Debug)]
pub struct FontResolver {
    dirs: Vec<PathBuf>,
    extra: HashMap<FontFamily, Vec<PathBuf>>,
    builtin_only: bool,
    resolved: HashMap<FontFamily, FontFace>,
}

impl FontResolver {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            dirs: config.font_dirs.clone(),
            extra: HashMap::new(),
            builtin_only: false,
            resolved: HashMap::new(),
        }
    }

    /// Add candidates that are probed before the built-in list for `family`.
    pub fn with_candidates(mut self, family: FontFamily, paths: Vec<PathBuf>) -> Self {
        self.extra.entry(family).or_default().extend(paths);
        self.resolved.remove(&family);
        self
    }

    /// A resolver that never touches the filesystem and always answers with the bitmap font.
    ///
    /// Text metrics are then identical on every host.
    pub fn builtin_only() -> Self {
        Self {
            dirs: Vec::new(),
            extra: HashMap::new(),
            builtin_only: true,
            resolved: HashMap::new(),
        }
    }

    /// Resolve `family` at `size_px`. Never fails; the built-in font is the last resort.
    pub fn resolve(&mut self, family: FontFamily, size_px: u32) -> ResolvedFont {
        let face = match self.resolved.get(&family) {
            Some(face) => face.clone(),
            None => {
                let face = self.load_face(family);
                self.resolved.insert(family, face.clone());
                face
            }
        };
        ResolvedFont { face, size_px }
    }

    fn load_face(&self, family: FontFamily) -> FontFace {
        if self.builtin_only {
            return FontFace::Builtin;
        }
        for path in self.candidate_paths(family) {
            if !path.is_file() {
                continue;
            }
            match load_outline(&path) {
                Ok(face) => {
                    tracing::debug!(?family, path = %path.display(), "font resolved");
                    return FontFace::Outline(Arc::new(face));
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "font candidate unreadable"
                    );
                }
            }
        }
        tracing::warn!(?family, "no font file found, using built-in bitmap font");
        FontFace::Builtin
    }

    /// Every path probed for `family`, in order.
    pub fn candidate_paths(&self, family: FontFamily) -> Vec<PathBuf> {
        let extra = self.extra.get(&family).into_iter().flatten().cloned();
        let listed = family
            .own_candidates()
            .iter()
            .chain(SYSTEM_FALLBACKS)
            .map(PathBuf::from);

        let mut out = Vec::new();
        for candidate in extra.chain(listed) {
            if candidate.is_absolute() || self.dirs.is_empty() {
                push_unique(&mut out, candidate);
            } else {
                for dir in &self.dirs {
                    push_unique(&mut out, dir.join(&candidate));
                }
            }
        }
        out
    }
}

fn push_unique(out: &mut Vec<PathBuf>, p: PathBuf) {
    if !out.contains(&p) {
        out.push(p);
    }
}

fn load_outline(path: &Path) -> ComposeResult<OutlineFace> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    if bytes.is_empty() {
        return Err(crate::ComposeError::font(format!(
            "font file '{}' is empty",
            path.display()
        )));
    }
    if !has_font_family(&bytes) {
        return Err(crate::ComposeError::font(format!(
            "font file '{}' has no usable font family",
            path.display()
        )));
    }
    let data =
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
    Ok(OutlineFace {
        path: path.to_path_buf(),
        bytes: Arc::new(bytes),
        data,
    })
}

/// Whether the bytes parse into at least one named family.
fn has_font_family(bytes: &[u8]) -> bool {
    use parley::fontique::{Blob, Collection, CollectionOptions};

    let mut collection = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    let families = collection.register_fonts(Blob::from(bytes.to_vec()), None);
    families
        .first()
        .and_then(|(id, _)| collection.family_name(*id))
        .is_some()
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
