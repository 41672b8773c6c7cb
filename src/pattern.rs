//! `{target}` / `{version}` placeholder expansion for URL templates.
//!
//! A placeholder and the option backing it must be provided together or not
//! at all; the pairing is checked for the download pattern and the checksum
//! pattern independently. All checks run before any network I/O.

use url::Url;

use crate::error::{FetchError, PatternKind};
use crate::target::ResolveContext;

const TARGET_TOKEN: &str = "{target}";
const VERSION_TOKEN: &str = "{version}";

/// Substitute placeholders into `pattern` and parse the result as a URL.
pub(crate) fn expand(
    pattern: &str,
    kind: PatternKind,
    context: &ResolveContext<'_>,
) -> Result<Url, FetchError> {
    let wants_target = pattern.contains(TARGET_TOKEN);
    if wants_target != context.have_targets {
        return Err(FetchError::PatternTargetMismatch { kind });
    }

    let wants_version = pattern.contains(VERSION_TOKEN);
    if wants_version != context.version.is_some() {
        return Err(FetchError::PatternVersionMismatch { kind });
    }

    let mut resolved = pattern.to_owned();
    if wants_target {
        let target = context.target.ok_or(FetchError::NoTargetFound {
            os: context.os,
            arch: context.arch,
        })?;
        resolved = resolved.replace(TARGET_TOKEN, &target.name);
    }
    if let Some(version) = context.version {
        resolved = resolved.replace(VERSION_TOKEN, version);
    }

    Url::parse(&resolved).map_err(|source| FetchError::InvalidUrl {
        url: resolved,
        source,
    })
}
