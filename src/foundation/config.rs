use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    core::CanvasSize,
    error::{ComposeError, ComposeResult},
};

/// Environment variable that prepends a directory to the font search path.
pub const FONT_DIR_ENV: &str = "KVCOMPOSE_FONT_DIR";
/// Environment variable that overrides the batch worker count.
pub const THREADS_ENV: &str = "KVCOMPOSE_THREADS";

/// Engine-wide rendering configuration.
///
/// Canvas sizes and their ratio keys live here rather than in the engine so that callers can
/// add or retarget formats without touching render code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Ratio label (`"1:1"`, `"4:5"`, ...) to target canvas size.
    pub master_sizes: BTreeMap<String, CanvasSize>,
    /// Directories searched for relative font candidates, in priority order.
    pub font_dirs: Vec<PathBuf>,
    /// Alpha reached at the bottom edge of the legacy scrim.
    pub scrim_max_alpha: u8,
    /// Fill color of the legacy CTA button.
    pub cta_fill: String,
    /// Per-channel noise amplitude of the outpaint filler.
    pub outpaint_noise: u8,
    /// Worker threads used for batch renders; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let mut master_sizes = BTreeMap::new();
        master_sizes.insert(
            "1:1".to_string(),
            CanvasSize {
                width: 1080,
                height: 1080,
            },
        );
        master_sizes.insert(
            "4:5".to_string(),
            CanvasSize {
                width: 1080,
                height: 1350,
            },
        );
        master_sizes.insert(
            "9:16".to_string(),
            CanvasSize {
                width: 1080,
                height: 1920,
            },
        );

        Self {
            master_sizes,
            font_dirs: vec![PathBuf::from(".")],
            scrim_max_alpha: 200,
            cta_fill: "#ED8924".to_string(),
            outpaint_noise: 24,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config; missing keys take their defaults.
    pub fn from_path(path: &Path) -> ComposeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::serde(format!("parse render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `KVCOMPOSE_FONT_DIR` and `KVCOMPOSE_THREADS` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(FONT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.font_dirs.insert(0, PathBuf::from(dir));
        }
        if let Some(n) = lookup(THREADS_ENV)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.threads = Some(n);
        }
        self
    }

    pub fn validate(&self) -> ComposeResult<()> {
        if self.master_sizes.is_empty() {
            return Err(ComposeError::validation(
                "render config must define at least one master size",
            ));
        }
        for (label, size) in &self.master_sizes {
            CanvasSize::new(size.width, size.height)
                .map_err(|e| ComposeError::validation(format!("master size '{label}': {e}")))?;
        }
        if self.threads == Some(0) {
            return Err(ComposeError::validation(
                "render config 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Master sizes in label order.
    pub fn sizes(&self) -> Vec<(String, CanvasSize)> {
        self.master_sizes
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
