//! Fetch configuration supplied by the embedding caller.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::platform::{Arch, Os};

/// Mode applied to the saved file when [`Options::chmod`] is unset.
pub const DEFAULT_CHMOD: u32 = 0o764;

/// One release artifact variant, selected by platform and substituted for
/// `{target}` in URL patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Value substituted for `{target}`. Assumed unique within a list.
    pub name: String,
    pub os: Os,
    /// When unset the target matches any architecture of its OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,
}

/// Everything one fetch needs: where the artifact lives, which variant to
/// pick, and how to save it.
///
/// `pattern` must use `{target}` exactly when `targets` is non-empty, and
/// `{version}` exactly when `version` is set; the same pairing is checked
/// independently for `checksum_pattern`. Violations surface as
/// [`FetchError`](crate::FetchError) variants before any network I/O.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// URL template for the artifact, with optional `{target}` and
    /// `{version}` placeholders.
    pub pattern: String,
    /// URL template for a companion SHA-256 checksum file. When set, the
    /// downloaded bytes are verified against the published digest.
    pub checksum_pattern: Option<String>,
    pub version: Option<String>,
    pub targets: Vec<Target>,
    /// Directory the artifact is saved under (created if absent).
    pub dir: PathBuf,
    /// Base save file name; its extension segments select the
    /// decompression chain.
    pub name: String,
    /// Append the resolved target's OS to the save name.
    pub add_name_os: bool,
    /// Append `version` to the save name.
    pub add_name_vers: bool,
    /// Replace an existing destination file instead of failing.
    pub overwrite: bool,
    /// POSIX mode for the saved file, defaulting to [`DEFAULT_CHMOD`].
    pub chmod: Option<u32>,
    /// Override ambient OS detection.
    pub os: Option<Os>,
    /// Override ambient architecture detection.
    pub arch: Option<Arch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = Options::default();

        assert!(options.pattern.is_empty());
        assert!(options.checksum_pattern.is_none());
        assert!(options.targets.is_empty());
        assert!(!options.add_name_os);
        assert!(!options.add_name_vers);
        assert!(!options.overwrite);
        assert!(options.chmod.is_none());
        assert!(options.os.is_none());
    }

    #[test]
    fn test_options_from_json() {
        // The shape callers keep in fetch description files.
        let json = r#"{
            "pattern": "https://example.com/releases/v{version}/pagefind-{target}.tar.gz",
            "checksum_pattern": "https://example.com/releases/v{version}/pagefind-{target}.tar.gz.sha256",
            "version": "1.4.0",
            "targets": [
                { "name": "x86_64-unknown-linux-musl", "os": "linux", "arch": "x86_64" },
                { "name": "x86_64-apple-darwin", "os": "darwin" }
            ],
            "dir": "_bin",
            "name": "pagefind"
        }"#;

        let options: Options = serde_json::from_str(json).unwrap();

        assert_eq!(options.version.as_deref(), Some("1.4.0"));
        assert_eq!(options.targets.len(), 2);
        assert_eq!(options.targets[0].arch, Some(Arch::X86_64));
        assert_eq!(options.targets[1].arch, None);
        assert_eq!(options.targets[1].os, Os::Darwin);
        assert_eq!(options.dir, PathBuf::from("_bin"));
        // Unlisted knobs fall back to their defaults.
        assert!(!options.overwrite);
        assert!(options.chmod.is_none());
    }

    #[test]
    fn test_target_serialization_skips_unset_arch() {
        let target = Target {
            name: "lin64".to_string(),
            os: Os::Linux,
            arch: None,
        };

        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"name":"lin64","os":"linux"}"#);
    }
}
