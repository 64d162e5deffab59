//! Final ISO mastering.
//!
//! Wraps `mkksiso`, which injects the kickstart and the payload directory
//! into the base installer ISO and writes the output artifact. Loop devices
//! are claimed and released inside the tool itself. A failed run may leave
//! a partial output file behind; only the staging workspace is cleaned up,
//! by its owner.

use anyhow::Result;
use std::path::Path;

use crate::process::Cmd;

/// Master the output ISO from the staged inputs.
///
/// # Arguments
///
/// * `kickstart` - staged kickstart path
/// * `payload_dir` - OCI layout added to the ISO (`-a`)
/// * `kernel_args` - appended to the boot command line (`-c`)
/// * `input_iso` - staged base installer ISO
/// * `output_iso` - final artifact path, must not pre-exist
pub fn run_mkksiso(
    kickstart: &Path,
    payload_dir: &Path,
    kernel_args: &str,
    input_iso: &Path,
    output_iso: &Path,
) -> Result<()> {
    Cmd::new("mkksiso")
        .arg("--ks")
        .arg_path(kickstart)
        .arg("-a")
        .arg_path(payload_dir)
        .args(["-c", kernel_args])
        .arg_path(input_iso)
        .arg_path(output_iso)
        .run()
}
