//! Build a customized RHEL bootc installer ISO.
//!
//! Combines three inputs into one bootable output artifact:
//!
//! - **Base ISO** - the RHEL installer boot ISO, downloaded from the nightly
//!   compose mirror for the requested version, or supplied directly
//! - **Payload** - a bootc container image, exported with `skopeo` into a
//!   local OCI-layout directory (arm64, tagged `latest`)
//! - **Kickstart** - supplied, adopted from `kickstart.ks` in the working
//!   root, or synthesized with the configured kernel arguments
//!
//! Mastering is delegated to `mkksiso`, which injects the kickstart and the
//! payload directory into the base ISO.
//!
//! # Pipeline
//!
//! ```text
//! preflight -> acquire (base ISO || payload) -> kickstart -> stage -> mkksiso
//! ```
//!
//! The two acquisitions run on their own threads and are joined before
//! anything is staged; the join waits for both outcomes and surfaces the
//! first error observed. Staged inputs live in a temporary directory that is
//! removed on every exit path.
//!
//! # Host requirements
//!
//! An aarch64 host with loop-device support (`/dev/loop-control`) and
//! `mkksiso`, `losetup`, `skopeo` on PATH.

pub mod acquire;
pub mod assemble;
pub mod config;
pub mod kickstart;
pub mod preflight;
pub mod process;
pub mod request;
pub mod run;
pub mod task;
pub mod workspace;

pub use request::BuildRequest;
pub use workspace::Workspace;
