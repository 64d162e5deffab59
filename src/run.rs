//! Top-level pipeline.
//!
//! Order matters here: every preflight check runs before the first acquirer
//! thread is spawned, the acquisition join completes before anything is
//! staged, and the staging workspace outlives the mastering call.

use anyhow::{bail, Context, Result};
use std::env;

use crate::request::BuildRequest;
use crate::workspace::Workspace;
use crate::{acquire, assemble, kickstart, preflight};

/// Execute one full build.
pub fn run(request: &BuildRequest) -> Result<()> {
    preflight::check_host_tools()?;

    if request.bootc_image.is_empty() {
        bail!("--bootc_image is required");
    }

    env::set_current_dir(&request.root_dir)
        .with_context(|| format!("could not change to {}", request.root_dir.display()))?;

    preflight::ensure_loop_support(&request.loop_control).context("loop support failed")?;
    preflight::check_host_arch(preflight::TARGET_ARCH)?;

    let output_iso = request.root_dir.join(&request.output_iso);
    preflight::check_output_absent(&output_iso)?;

    let base_image = acquire::run(request)?;

    let ks = kickstart::provision(
        request.kickstart.as_deref(),
        &request.root_dir,
        &request.kernel_args,
    )?;

    let workspace = Workspace::stage(&base_image, &ks)?;

    println!("Generating ISO...");
    assemble::run_mkksiso(
        workspace.kickstart(),
        &request.payload_dir,
        &request.kernel_args,
        workspace.base_image(),
        &output_iso,
    )?;
    println!("Done.");
    Ok(())
}
