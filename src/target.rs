//! Target selection against the effective platform.

use crate::options::Target;
use crate::platform::{Arch, Os};

/// Outcome of platform and target resolution, threaded through pattern
/// expansion and name building.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveContext<'a> {
    pub os: Os,
    pub arch: Arch,
    pub target: Option<&'a Target>,
    pub have_targets: bool,
    pub version: Option<&'a str>,
}

/// First target whose OS matches and whose arch is unset or matches.
/// List order wins; there is no scoring beyond that.
pub(crate) fn resolve(targets: &[Target], os: Os, arch: Arch) -> Option<&Target> {
    targets
        .iter()
        .find(|target| target.os == os && target.arch.is_none_or(|a| a == arch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, os: Os, arch: Option<Arch>) -> Target {
        Target {
            name: name.to_string(),
            os,
            arch,
        }
    }

    #[test]
    fn test_resolve_matches_os_and_arch() {
        let targets = vec![
            target("win64", Os::Windows, Some(Arch::X86_64)),
            target("lin-arm", Os::Linux, Some(Arch::Aarch64)),
            target("lin64", Os::Linux, Some(Arch::X86_64)),
        ];

        let found = resolve(&targets, Os::Linux, Arch::X86_64).unwrap();
        assert_eq!(found.name, "lin64");
    }

    #[test]
    fn test_resolve_unset_arch_matches_any() {
        let targets = vec![target("mac", Os::Darwin, None)];

        assert!(resolve(&targets, Os::Darwin, Arch::X86_64).is_some());
        assert!(resolve(&targets, Os::Darwin, Arch::Aarch64).is_some());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let targets = vec![
            target("mac-any", Os::Darwin, None),
            target("mac-arm", Os::Darwin, Some(Arch::Aarch64)),
        ];

        let found = resolve(&targets, Os::Darwin, Arch::Aarch64).unwrap();
        assert_eq!(found.name, "mac-any");
    }

    #[test]
    fn test_resolve_set_arch_must_match() {
        let targets = vec![target("lin-arm", Os::Linux, Some(Arch::Aarch64))];

        assert!(resolve(&targets, Os::Linux, Arch::X86_64).is_none());
    }

    #[test]
    fn test_resolve_no_match() {
        let targets = vec![target("lin64", Os::Linux, Some(Arch::X86_64))];

        assert!(resolve(&targets, Os::Windows, Arch::X86_64).is_none());
        assert!(resolve(&[], Os::Linux, Arch::X86_64).is_none());
    }
}
