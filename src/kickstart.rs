//! Kickstart provisioning.
//!
//! Resolution order: an explicitly supplied file wins, then an existing
//! `kickstart.ks` in the working root is adopted as-is, and only then is a
//! default synthesized. The synthesized script installs the payload from
//! the embedded repository path and carries the configured kernel arguments
//! in its bootloader append line.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional kickstart filename in the working root.
pub const DEFAULT_KICKSTART: &str = "kickstart.ks";

/// Resolve the kickstart to use for this run.
pub fn provision(explicit: Option<&Path>, root_dir: &Path, kernel_args: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("kickstart file {} not found", path.display());
        }
        return Ok(path.to_path_buf());
    }

    let default_path = root_dir.join(DEFAULT_KICKSTART);
    if default_path.exists() {
        return Ok(default_path);
    }

    println!("Generating default {DEFAULT_KICKSTART}");
    fs::write(&default_path, render_default(kernel_args)).with_context(|| {
        format!("writing default kickstart '{}'", default_path.display())
    })?;
    Ok(default_path)
}

/// Default kickstart: automated LVM install of the embedded bootc payload
/// with root SSH access enabled for the first boot.
fn render_default(kernel_args: &str) -> String {
    format!(
        r#"# Root Password
rootpw redhat
lang en_US.UTF-8
timezone America/New_York --utc
text
eula --agreed
skipx
clearpart --all --initlabel
autopart --type=lvm --noswap
bootloader --location=mbr --driveorder=sda --append="{kernel_args}"
network --bootproto=dhcp --device=enp0s1f0d1
ostreecontainer --url=/run/install/repo/container --transport=oci --no-signature-verification
%post
echo 'PermitRootLogin yes' >> /etc/ssh/sshd_config
systemctl restart sshd.service
nmcli con modify enp0s1f0 ipv4.never-default yes
%end
reboot
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("mine.ks");
        fs::write(&explicit, "text\n").unwrap();
        fs::write(temp.path().join(DEFAULT_KICKSTART), "default\n").unwrap();

        let resolved = provision(Some(&explicit), temp.path(), "args").unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.ks");

        let err = provision(Some(&missing), temp.path(), "args").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_existing_default_is_adopted_unchanged() {
        let temp = TempDir::new().unwrap();
        let default_path = temp.path().join(DEFAULT_KICKSTART);
        fs::write(&default_path, "# hand-edited\n").unwrap();

        let resolved = provision(None, temp.path(), "args").unwrap();
        assert_eq!(resolved, default_path);
        assert_eq!(fs::read_to_string(&default_path).unwrap(), "# hand-edited\n");
    }

    #[test]
    fn test_synthesized_default_is_written() {
        let temp = TempDir::new().unwrap();

        let resolved = provision(None, temp.path(), "console=ttyS0 acpi=force").unwrap();
        assert_eq!(resolved, temp.path().join(DEFAULT_KICKSTART));

        let content = fs::read_to_string(&resolved).unwrap();
        assert!(content.contains(r#"--append="console=ttyS0 acpi=force""#));
        assert!(content.contains("ostreecontainer --url=/run/install/repo/container"));
        assert!(content.contains("%post"));
        assert!(content.contains("PermitRootLogin yes"));
        assert!(content.ends_with("reboot\n"));
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing_root = temp.path().join("does-not-exist");

        let err = provision(None, &missing_root, "args").unwrap_err();
        assert!(format!("{err:#}").contains("writing default kickstart"));
    }
}
