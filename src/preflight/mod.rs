//! Preflight checks for build validation.
//!
//! Validates the host before the pipeline touches the network or disk:
//! required tools, privileged loop-device support, host architecture, and
//! the output path. This prevents cryptic errors during the build process.
//!
//! # Example
//!
//! ```rust
//! use bootc_iso_builder::preflight::{command_exists, check_required_tools};
//!
//! // Check a single command
//! if !command_exists("mkksiso") {
//!     println!("lorax not installed");
//! }
//!
//! // Check multiple tools
//! let tools = &[("mkksiso", "lorax"), ("skopeo", "skopeo")];
//! if let Err(e) = check_required_tools(tools) {
//!     eprintln!("{}", e);
//! }
//! ```

use anyhow::{bail, Result};
use std::path::Path;

use crate::process::{self, Cmd};

/// The only host architecture the pipeline supports.
pub const TARGET_ARCH: &str = "aarch64";

/// Required host tools for building bootc installer ISOs.
///
/// Each tuple is (command_name, package_name).
pub const REQUIRED_TOOLS: &[(&str, &str)] = &[
    ("mkksiso", "lorax"),
    ("losetup", "util-linux"),
    ("skopeo", "skopeo"),
];

/// Check if a command exists on the host system.
pub fn command_exists(cmd: &str) -> bool {
    process::exists(cmd)
}

/// Check that specific tools are available.
///
/// # Arguments
///
/// * `tools` - Slice of (command, package) tuples
///
/// # Returns
///
/// * `Ok(())` if all tools are found
/// * `Err` with list of missing tools and their packages
pub fn check_required_tools(tools: &[(&str, &str)]) -> Result<()> {
    let mut missing = Vec::new();

    for (tool, package) in tools {
        if !command_exists(tool) {
            missing.push((*tool, *package));
        }
    }

    if !missing.is_empty() {
        let msg = missing
            .iter()
            .map(|(t, p)| format!("  {} (install: {})", t, p))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Missing required host tools:\n{}", msg);
    }

    Ok(())
}

/// Check that all tools the pipeline shells out to are available.
///
/// This checks all tools in [`REQUIRED_TOOLS`].
pub fn check_host_tools() -> Result<()> {
    check_required_tools(REQUIRED_TOOLS)
}

/// Check that the kernel exposes loop-device support.
///
/// `mkksiso` needs loop devices to rebuild the ISO; inside a container that
/// means the control node must be passed through.
pub fn ensure_loop_support(marker: &Path) -> Result<()> {
    if !marker.exists() {
        bail!(
            "{} missing. Are you in a privileged container?",
            marker.display()
        );
    }
    Ok(())
}

/// Host architecture string from `uname -m`, trimmed.
pub fn host_arch() -> Result<String> {
    let out = Cmd::new("uname").arg("-m").capture_stdout()?;
    Ok(out.trim().to_string())
}

/// Check that the host architecture matches `expected`.
pub fn check_host_arch(expected: &str) -> Result<()> {
    let arch = host_arch()?;
    if arch != expected {
        bail!("must run on {} (got {})", expected, arch);
    }
    Ok(())
}

/// Check that the output artifact does not already exist.
pub fn check_output_absent(output: &Path) -> Result<()> {
    if output.exists() {
        bail!("output ISO {} already exists", output.display());
    }
    Ok(())
}
