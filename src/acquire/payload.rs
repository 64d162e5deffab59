//! Container payload export.
//!
//! Exports the bootc image into a local OCI-layout directory with `skopeo`,
//! forcing the arm64 architecture regardless of the registry default for
//! the host. The layout must end up holding exactly one manifest; anything
//! else means the reference did not resolve to a single payload.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::process::Cmd;

/// Architecture skopeo is forced to export.
const OVERRIDE_ARCH: &str = "arm64";

/// Tag the exported image is stored under inside the layout.
const EXPORT_TAG: &str = "latest";

/// Export `image` into an OCI layout at `payload_dir`.
///
/// Any pre-existing payload directory is removed first so stale layers from
/// a previous run cannot leak into the new export. The export itself is a
/// single attempt; failures propagate without retry.
pub fn export(image: &str, payload_dir: &Path) -> Result<()> {
    println!("Saving bootc image to {}", payload_dir.display());

    if payload_dir.exists() {
        fs::remove_dir_all(payload_dir).with_context(|| {
            format!(
                "removing stale payload directory '{}'",
                payload_dir.display()
            )
        })?;
    }

    Cmd::new("skopeo")
        .args(["copy", &format!("--override-arch={OVERRIDE_ARCH}")])
        .arg(format!("docker://{image}"))
        .arg(format!("oci:{}:{}", payload_dir.display(), EXPORT_TAG))
        .run()?;

    verify_layout(payload_dir)
}

#[derive(Debug, Deserialize)]
struct OciIndex {
    manifests: Vec<serde_json::Value>,
}

/// Require the exported layout to hold exactly one manifest.
pub(crate) fn verify_layout(payload_dir: &Path) -> Result<()> {
    let index_path = payload_dir.join("index.json");
    let text = fs::read_to_string(&index_path)
        .with_context(|| format!("reading OCI index '{}'", index_path.display()))?;
    let index: OciIndex = serde_json::from_str(&text)
        .with_context(|| format!("parsing OCI index '{}'", index_path.display()))?;

    match index.manifests.len() {
        1 => Ok(()),
        0 => bail!(
            "payload export produced no manifest in '{}'",
            payload_dir.display()
        ),
        n => bail!(
            "payload export produced {} manifests in '{}', expected exactly one",
            n,
            payload_dir.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_index(dir: &Path, manifests: &str) {
        fs::write(
            dir.join("index.json"),
            format!(r#"{{"schemaVersion":2,"manifests":{manifests}}}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_verify_layout_accepts_single_manifest() {
        let temp = TempDir::new().unwrap();
        write_index(
            temp.path(),
            r#"[{"mediaType":"application/vnd.oci.image.manifest.v1+json","digest":"sha256:abc","size":7143}]"#,
        );

        verify_layout(temp.path()).unwrap();
    }

    #[test]
    fn test_verify_layout_rejects_empty_index() {
        let temp = TempDir::new().unwrap();
        write_index(temp.path(), "[]");

        let err = verify_layout(temp.path()).unwrap_err();
        assert!(err.to_string().contains("no manifest"));
    }

    #[test]
    fn test_verify_layout_rejects_multiple_manifests() {
        let temp = TempDir::new().unwrap();
        write_index(
            temp.path(),
            r#"[{"digest":"sha256:abc"},{"digest":"sha256:def"}]"#,
        );

        let err = verify_layout(temp.path()).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn test_verify_layout_requires_index() {
        let temp = TempDir::new().unwrap();

        let err = verify_layout(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("reading OCI index"));
    }

    #[test]
    fn test_verify_layout_rejects_garbage_index() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.json"), "not json").unwrap();

        let err = verify_layout(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing OCI index"));
    }
}
