//! Parallel acquisition of the base ISO and the container payload.
//!
//! Both acquirers launch together on their own threads and each reports
//! exactly once. The join waits for both outcomes before the pipeline may
//! continue; a failure on one side never cancels the other. The first error
//! observed becomes the pipeline error, and a later sibling failure is
//! dropped after its task has run to completion.

pub mod base_image;
pub mod payload;

use anyhow::{bail, Context, Error, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::request::BuildRequest;
use crate::task::{self, Task};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run both acquirers concurrently and join on their completion.
///
/// Returns the resolved base image path once both sides have reported.
pub fn run(request: &BuildRequest) -> Result<PathBuf> {
    println!("Fetching ISO...");

    let payload_task = {
        let image = request.bootc_image.clone();
        let payload_dir = request.payload_dir.clone();
        task::spawn(move || payload::export(&image, &payload_dir))
    };

    let base_task = {
        let input_iso = request.input_iso.clone();
        let version = request.rhel_version.clone();
        let mirror = request.mirror_base.clone();
        task::spawn(move || base_image::acquire(input_iso, &version, &mirror))
    };

    join(base_task, payload_task)
}

/// Wait for both tasks, announcing completions as they arrive.
///
/// Neither handle is abandoned after a failure; the earliest observed error
/// is returned once both have reported.
fn join(base: Task<PathBuf>, payload: Task<()>) -> Result<PathBuf> {
    let mut base = Some(base);
    let mut payload = Some(payload);
    let mut base_image: Option<PathBuf> = None;
    let mut first_error: Option<Error> = None;

    while base.is_some() || payload.is_some() {
        if let Some(task) = &payload {
            if let Some(outcome) = task.poll(POLL_INTERVAL) {
                payload = None;
                match outcome.context("container image preparation failed") {
                    Ok(()) => println!("Done preparing container image!"),
                    Err(err) => {
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                }
            }
        }

        if let Some(task) = &base {
            if let Some(outcome) = task.poll(POLL_INTERVAL) {
                base = None;
                match outcome.context("ISO preparation failed") {
                    Ok(path) => {
                        println!("Done fetching ISO!");
                        base_image = Some(path);
                    }
                    Err(err) => {
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                }
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }
    match base_image {
        Some(path) => Ok(path),
        None => bail!("ISO preparation reported success without a resolved path"),
    }
}
