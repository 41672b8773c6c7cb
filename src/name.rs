//! Save file name assembly: `name[-os][-version]`, `.exe` ensured on
//! Windows.

use crate::error::FetchError;
use crate::options::Options;
use crate::platform::Os;
use crate::target::ResolveContext;

const EXE_SUFFIX: &str = ".exe";

/// Build the file name the artifact is saved under, relative to
/// `Options::dir`.
///
/// The OS suffix is the resolved target's OS; the `.exe` rule follows the
/// effective platform the fetch runs for.
pub(crate) fn build(options: &Options, context: &ResolveContext<'_>) -> Result<String, FetchError> {
    let mut segments = vec![options.name.clone()];

    if options.add_name_os {
        if !context.have_targets {
            return Err(FetchError::NameOsMismatch);
        }
        let target = context.target.ok_or(FetchError::NoTargetFound {
            os: context.os,
            arch: context.arch,
        })?;
        segments.push(target.os.to_string());
    }

    if options.add_name_vers {
        match context.version {
            Some(version) => segments.push(version.to_string()),
            None => return Err(FetchError::NameVersMismatch),
        }
    }

    let mut name = segments.join("-");
    if context.os == Os::Windows && !name.ends_with(EXE_SUFFIX) {
        name.push_str(EXE_SUFFIX);
    }
    Ok(name)
}
