//! Optional overrides for the pipeline's fixed paths.
//!
//! The working root, payload directory, loop-control marker, and compose
//! mirror are compiled-in defaults. An `iso-builder.toml` in the invocation
//! directory can override any of them, which is how the integration tests
//! point the pipeline at a private root.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config filename looked up in the invocation directory.
pub const CONFIG_FILE: &str = "iso-builder.toml";

/// Working directory the whole run operates from.
pub const DEFAULT_ROOT_DIR: &str = "/workdir";

/// OCI export target, also passed to `mkksiso -a`.
pub const DEFAULT_PAYLOAD_DIR: &str = "/tmp/container";

/// Marker node for kernel loop-device support.
pub const DEFAULT_LOOP_CONTROL: &str = "/dev/loop-control";

/// Compose mirror the nightly boot ISOs are listed on.
pub const DEFAULT_MIRROR_BASE: &str = "http://download.eng.bos.redhat.com";

/// Overrides parsed from [`CONFIG_FILE`]. Every field is optional; absent
/// fields fall back to the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderConfig {
    pub root_dir: Option<PathBuf>,
    pub payload_dir: Option<PathBuf>,
    pub loop_control: Option<PathBuf>,
    pub mirror_base: Option<String>,
}

/// Load overrides from `dir`, if a config file is present there.
pub fn load_overrides(dir: &Path) -> Result<BuilderConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(BuilderConfig::default());
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
}
