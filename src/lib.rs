//! Download platform-specific release binaries.
//!
//! [`fetch`] resolves an [`Options`] value against the running platform,
//! expands its URL pattern, downloads the matching artifact, decodes it
//! according to the saved file's extensions, and writes it into place.

pub mod error;
pub mod fetcher;
pub mod http;
pub mod options;
pub mod platform;
pub mod runtime;

mod checksum;
mod codec;
mod download;
mod name;
mod pattern;
mod target;

pub use error::{FetchError, PatternKind};
pub use fetcher::{Fetcher, fetch};
pub use options::{DEFAULT_CHMOD, Options, Target};
pub use platform::{Arch, Os};
