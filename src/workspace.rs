//! Staging workspace for assembly inputs.
//!
//! The mastering step only ever reads staged copies; the original input
//! files are untouched once staging has happened. The directory is removed
//! when the value drops, so every exit path of the pipeline (success,
//! error, unwinding) tears it down.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Private temporary directory holding staged copies of the assembly inputs.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    base_image: PathBuf,
    kickstart: PathBuf,
}

impl Workspace {
    /// Create the workspace and stage both inputs into it.
    ///
    /// A failed copy drops the half-built directory along with the error.
    pub fn stage(base_image: &Path, kickstart: &Path) -> Result<Self> {
        println!("Making tmp dir...");
        let dir = TempDir::new().context("creating staging directory")?;

        println!(
            "Copying input ISO {} and kickstart {} into {}...",
            base_image.display(),
            kickstart.display(),
            dir.path().display()
        );
        let base_image = stage_copy(base_image, dir.path())?;
        let kickstart = stage_copy(kickstart, dir.path())?;

        Ok(Self {
            dir,
            base_image,
            kickstart,
        })
    }

    /// Staged base image path inside the workspace.
    pub fn base_image(&self) -> &Path {
        &self.base_image
    }

    /// Staged kickstart path inside the workspace.
    pub fn kickstart(&self) -> &Path {
        &self.kickstart
    }

    /// The workspace directory itself.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn stage_copy(source: &Path, dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| anyhow!("input path '{}' has no file name", source.display()))?;
    let dest = dir.join(name);
    fs::copy(source, &dest)
        .with_context(|| format!("copying '{}' to '{}'", source.display(), dest.display()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stage_copies_both_inputs() {
        let temp = TempDir::new().unwrap();
        let iso = temp.path().join("input.iso");
        let ks = temp.path().join("install.ks");
        fs::write(&iso, "iso-bytes").unwrap();
        fs::write(&ks, "text\n").unwrap();

        let workspace = Workspace::stage(&iso, &ks).unwrap();

        assert_eq!(workspace.base_image(), workspace.path().join("input.iso"));
        assert_eq!(workspace.kickstart(), workspace.path().join("install.ks"));
        assert_eq!(
            fs::read_to_string(workspace.base_image()).unwrap(),
            "iso-bytes"
        );
        assert_eq!(fs::read_to_string(workspace.kickstart()).unwrap(), "text\n");
    }

    #[test]
    fn test_workspace_is_removed_on_drop() {
        let temp = TempDir::new().unwrap();
        let iso = temp.path().join("input.iso");
        let ks = temp.path().join("install.ks");
        fs::write(&iso, "iso").unwrap();
        fs::write(&ks, "ks").unwrap();

        let workspace = Workspace::stage(&iso, &ks).unwrap();
        let staged = workspace.path().to_path_buf();
        assert!(staged.exists());

        drop(workspace);
        assert!(!staged.exists());
    }

    #[test]
    fn test_stage_missing_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let iso = temp.path().join("missing.iso");
        let ks = temp.path().join("install.ks");
        fs::write(&ks, "ks").unwrap();

        let err = Workspace::stage(&iso, &ks).unwrap_err();
        assert!(format!("{err:#}").contains("copying"));
    }
}
