//! Base installer ISO acquisition.
//!
//! Resolves the nightly compose listing for the requested RHEL version and
//! downloads the boot ISO, unless a file of the same name is already present
//! in the working directory. A pre-supplied ISO path short-circuits the
//! whole step. The same-name check is a pure existence check; the content
//! of an already-present file is not verified.

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Filename pattern for aarch64 boot ISOs referenced by the listing.
const BOOT_ISO_HREF: &str = r#"href="([RHEL-]*[0-9.\-]+aarch64-boot\.iso)""#;

/// Resolve the base installer ISO, downloading it if necessary.
///
/// Returns the local path the assembler should read. The version string is
/// validated before any network access.
pub fn acquire(
    input_iso: Option<PathBuf>,
    rhel_version: &str,
    mirror_base: &str,
) -> Result<PathBuf> {
    if let Some(path) = input_iso {
        return Ok(path);
    }

    let (major, minor) = split_version(rhel_version)?;
    let listing_url = listing_url(mirror_base, &major, &minor);

    let listing = fetch_listing(&listing_url)?;
    let iso_name = extract_iso_name(&listing, &listing_url)?;
    println!("{iso_name}");

    let local = PathBuf::from(&iso_name);
    if !local.exists() {
        download(&format!("{listing_url}{iso_name}"), &local)?;
    }
    Ok(local)
}

/// Split a `MAJOR.MINOR` version string into its two components.
pub(crate) fn split_version(version: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = version.split('.').collect();
    match parts.as_slice() {
        [major, minor] if !major.is_empty() && !minor.is_empty() => {
            Ok((major.to_string(), minor.to_string()))
        }
        _ => bail!("invalid RHEL version format: expected MAJOR.MINOR"),
    }
}

/// Compose listing URL for the latest nightly of the given version.
pub(crate) fn listing_url(mirror_base: &str, major: &str, minor: &str) -> String {
    format!(
        "{mirror_base}/rhel-{major}/nightly/RHEL-{major}/latest-RHEL-{major}.{minor}/compose/BaseOS/aarch64/iso/"
    )
}

/// First boot-ISO filename referenced by the listing.
pub(crate) fn extract_iso_name(listing: &str, listing_url: &str) -> Result<String> {
    let pattern = Regex::new(BOOT_ISO_HREF).context("compiling boot ISO filename pattern")?;
    pattern
        .captures(listing)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| anyhow!("failed to extract ISO file name from {listing_url}"))
}

fn fetch_listing(url: &str) -> Result<String> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to fetch listing {url}"))?;
    std::io::read_to_string(response.into_body().into_reader())
        .with_context(|| format!("failed to read listing {url}"))
}

/// Download a URL to a local file, streaming to constant memory.
fn download(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {url}...");

    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to download {url}"))?;
    let mut reader = response.into_body().into_reader();
    let mut file =
        fs::File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;

    let mut buf = [0u8; 65536];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("failed to read from {url}"))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .with_context(|| format!("failed to write download to {}", dest.display()))?;
    }

    Ok(())
}
