//! Error taxonomy for the fetch flow.
//!
//! Every variant is fatal and surfaced to the caller unchanged; nothing is
//! retried internally. The one swallowed failure in the system is
//! permission setting, which never reaches this type.

use std::path::PathBuf;

use crate::platform::{Arch, Os};

/// Which URL template a pattern error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Download,
    Checksum,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PatternKind::Download => "download",
            PatternKind::Checksum => "checksum",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No entry in `targets` matches the platform being fetched for.
    #[error("no target matches the current platform ({os}/{arch})")]
    NoTargetFound { os: Os, arch: Arch },

    /// `{target}` and a non-empty `targets` list must appear together.
    #[error("the {kind} pattern must use {{target}} together with a non-empty `targets` list, and neither without the other")]
    PatternTargetMismatch { kind: PatternKind },

    /// `{version}` and `version` must appear together.
    #[error("the {kind} pattern must use {{version}} together with `version`, and neither without the other")]
    PatternVersionMismatch { kind: PatternKind },

    #[error("substituted pattern `{url}` is not a valid URL")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("`add_name_os` requires a non-empty `targets` list")]
    NameOsMismatch,

    #[error("`add_name_vers` requires `version` to be set")]
    NameVersMismatch,

    #[error("destination {} already exists and `overwrite` is disabled", .path.display())]
    FileExists { path: PathBuf },

    /// Network, HTTP status, or filesystem failure while fetching.
    #[error("download from {url} failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// A decompression or unarchiving stage rejected the payload.
    #[error("failed to decode {name}")]
    DecodeFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The checksum file was fetched but carried no usable SHA-256 digest.
    #[error("no SHA-256 digest in checksum file {url}: {reason}")]
    InvalidChecksum { url: String, reason: String },

    /// The downloaded bytes hash differently than the published digest.
    #[error("checksum mismatch: expected {expected}, downloaded bytes hash to {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

impl FetchError {
    pub(crate) fn download(url: &url::Url, reason: impl std::fmt::Display) -> Self {
        FetchError::DownloadFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
