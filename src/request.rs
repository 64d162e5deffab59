//! Per-run build configuration.

use std::path::PathBuf;

/// Default kernel arguments, wired for the iSCSI netroot lab setup.
pub const DEFAULT_KERNEL_ARGS: &str = "ip=192.168.0.2:::255.255.255.0::enp0s1f0:off \
     netroot=iscsi:192.168.0.1::::iqn.e2000:acc acpi=force";

/// Default RHEL version used when no input ISO is supplied.
pub const DEFAULT_RHEL_VERSION: &str = "9.6";

/// Everything one ISO build needs, resolved from the CLI flags and the
/// optional config-file overrides before the pipeline starts.
///
/// The request itself is immutable once built; each pipeline stage consumes
/// it and produces its own resolved value (the acquired base ISO path, the
/// provisioned kickstart path, the staged [`crate::Workspace`]).
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Pre-supplied base installer ISO; `None` means acquire one.
    pub input_iso: Option<PathBuf>,
    /// Output artifact, resolved relative to `root_dir`. Must not pre-exist.
    pub output_iso: PathBuf,
    /// Pre-supplied kickstart; `None` means provision one.
    pub kickstart: Option<PathBuf>,
    /// Bootc container image reference, without a transport prefix.
    pub bootc_image: String,
    /// Opaque blob embedded in the kickstart and passed to `mkksiso -c`.
    pub kernel_args: String,
    /// `MAJOR.MINOR`, consulted only when `input_iso` is `None`.
    pub rhel_version: String,
    /// Working directory the whole run operates from.
    pub root_dir: PathBuf,
    /// OCI export target, also the `mkksiso -a` argument.
    pub payload_dir: PathBuf,
    /// Loop-device support marker checked during preflight.
    pub loop_control: PathBuf,
    /// Compose mirror base URL for base-ISO acquisition.
    pub mirror_base: String,
}
