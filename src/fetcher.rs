//! Resolves options into a URL and a file name, then downloads.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::codec;
use crate::download;
use crate::error::{FetchError, PatternKind};
use crate::http::HttpClient;
use crate::name;
use crate::options::{DEFAULT_CHMOD, Options};
use crate::pattern;
use crate::platform::{Arch, Os};
use crate::runtime::{RealRuntime, Runtime};
use crate::target::{self, ResolveContext};

/// Downloads release binaries according to [`Options`].
///
/// Generic over [`Runtime`] so filesystem effects can be mocked; the
/// [`Fetcher::new`] constructor wires in the real one.
pub struct Fetcher<R: Runtime> {
    runtime: R,
    http: HttpClient,
}

impl Fetcher<RealRuntime> {
    pub fn new() -> Self {
        Self {
            runtime: RealRuntime,
            http: HttpClient::default(),
        }
    }
}

impl Default for Fetcher<RealRuntime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> Fetcher<R> {
    pub fn from_parts(runtime: R, http: HttpClient) -> Self {
        Self { runtime, http }
    }

    /// Resolve `options` against the running platform, download the matching
    /// release artifact, and return the path it was saved under.
    ///
    /// The file is written to a hidden temporary name in the destination
    /// directory and renamed into place once the body, decoding, and any
    /// checksum verification have all completed.
    #[tracing::instrument(skip(self, options), fields(name = %options.name))]
    pub async fn fetch(&self, options: &Options) -> Result<PathBuf, FetchError> {
        let os = options.os.unwrap_or_else(Os::current);
        let arch = options.arch.unwrap_or_else(Arch::current);
        let context = ResolveContext {
            os,
            arch,
            target: target::resolve(&options.targets, os, arch),
            have_targets: !options.targets.is_empty(),
            // An empty version string behaves as unset.
            version: options.version.as_deref().filter(|v| !v.is_empty()),
        };

        let url = pattern::expand(&options.pattern, PatternKind::Download, &context)?;
        let checksum_url = options
            .checksum_pattern
            .as_deref()
            .map(|p| pattern::expand(p, PatternKind::Checksum, &context))
            .transpose()?;

        let save_name = name::build(options, &context)?;
        let dest = options.dir.join(&save_name);
        if !options.overwrite && self.runtime.exists(&dest) {
            return Err(FetchError::FileExists { path: dest });
        }

        // Fetch the expected digest before the payload so a bad checksum URL
        // fails without a partial download.
        let expected = match &checksum_url {
            Some(url) => {
                let body = self.http.get_text(url).await?;
                Some(checksum::parse_expected(&body, url)?)
            }
            None => None,
        };

        info!("Downloading {url} to {}", dest.display());
        let response = self.http.get(&url).await?;

        // The server has answered; only now touch the filesystem.
        self.runtime
            .create_dir_all(&options.dir)
            .map_err(|e| FetchError::download(&url, format!("cannot create destination: {e}")))?;
        let temp = options.dir.join(format!(".{save_name}.part"));
        let writer = self
            .runtime
            .create_file(&temp)
            .map_err(|e| FetchError::download(&url, format!("cannot create temp file: {e}")))?;

        let chain = codec::chain_for(&save_name);
        let summary = match download::run(
            response,
            &url,
            &save_name,
            &chain,
            writer,
            expected.is_some(),
        )
        .await
        {
            Ok(summary) => summary,
            Err(e) => {
                self.discard_temp(&temp);
                return Err(e);
            }
        };

        if let (Some(expected), Some(actual)) = (expected, summary.digest) {
            if actual != expected {
                self.discard_temp(&temp);
                return Err(FetchError::ChecksumMismatch { expected, actual });
            }
        }

        if let Err(e) = self.runtime.rename(&temp, &dest) {
            self.discard_temp(&temp);
            return Err(FetchError::download(
                &url,
                format!("cannot move into place: {e}"),
            ));
        }

        let mode = options.chmod.unwrap_or(DEFAULT_CHMOD);
        if let Err(e) = self.runtime.set_permissions(&dest, mode) {
            warn!("Failed to set mode {:o} on {}: {}", mode, dest.display(), e);
        }

        info!(
            "Saved {} ({} bytes on the wire, {} written)",
            dest.display(),
            summary.raw_bytes,
            summary.written_bytes
        );
        Ok(dest)
    }

    fn discard_temp(&self, temp: &Path) {
        if let Err(e) = self.runtime.remove_file(temp) {
            log::debug!("Failed to remove temp file {}: {}", temp.display(), e);
        }
    }
}

/// Download with the real filesystem and a fresh HTTP client.
pub async fn fetch(options: &Options) -> Result<PathBuf, FetchError> {
    Fetcher::new().fetch(options).await
}
