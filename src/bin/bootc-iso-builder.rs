use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use bootc_iso_builder::config;
use bootc_iso_builder::request::{BuildRequest, DEFAULT_KERNEL_ARGS, DEFAULT_RHEL_VERSION};
use bootc_iso_builder::run;

/// Build a customized RHEL bootc ISO.
#[derive(Parser, Debug)]
#[command(name = "bootc-iso-builder", about = "Build a customized RHEL Bootc ISO")]
struct Cli {
    /// Path to input ISO
    #[arg(short = 'i', long = "input_iso")]
    input_iso: Option<PathBuf>,

    /// Path to output ISO
    #[arg(short = 'o', long = "output_iso", default_value = "output.iso")]
    output_iso: PathBuf,

    /// Path to kickstart file
    #[arg(short = 'k', long = "kickstart")]
    kickstart: Option<PathBuf>,

    /// Bootc image reference
    #[arg(short = 'u', long = "bootc_image", default_value = "")]
    bootc_image: String,

    /// Kernel arguments
    #[arg(short = 'a', long = "kernel_args", default_value = DEFAULT_KERNEL_ARGS)]
    kernel_args: String,

    /// RHEL ISO version
    #[arg(short = 'v', long = "rhel_version", default_value = DEFAULT_RHEL_VERSION)]
    rhel_version: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match build(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn build(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let overrides = config::load_overrides(&cwd)?;

    let request = BuildRequest {
        input_iso: cli.input_iso,
        output_iso: cli.output_iso,
        kickstart: cli.kickstart,
        bootc_image: cli.bootc_image,
        kernel_args: cli.kernel_args,
        rhel_version: cli.rhel_version,
        root_dir: overrides
            .root_dir
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_ROOT_DIR)),
        payload_dir: overrides
            .payload_dir
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PAYLOAD_DIR)),
        loop_control: overrides
            .loop_control
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_LOOP_CONTROL)),
        mirror_base: overrides
            .mirror_base
            .unwrap_or_else(|| config::DEFAULT_MIRROR_BASE.to_string()),
    };

    run::run(&request)
}
