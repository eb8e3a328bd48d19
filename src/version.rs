//! Logical version of the Kui distribution this launcher is pinned to.
//!
//! The version string is substituted into the binary at release time; a
//! development build carries the literal `"dev"` tag and resolves to
//! [`Version::Unpinned`].

use crate::error::{KaskError, KaskResult};
use std::fmt;

// THE PLUGIN_VERSION CONSTANT SHOULD BE LEFT EXACTLY AS-IS SINCE IT CAN BE
// PROGRAMMATICALLY SUBSTITUTED
pub const PLUGIN_VERSION: &str = "dev";

/// The version the launcher was built against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Development build, not pinned to a released distribution
    Unpinned,
    /// A released `major.minor.patch` distribution
    Semantic { major: u64, minor: u64, patch: u64 },
}

impl Version {
    /// Resolve the build-injected version string.
    ///
    /// Anything other than the dev sentinel must be exactly three
    /// dot-separated non-negative integers. A malformed string is an
    /// error, never silently coerced to `0`.
    pub fn resolve(raw: &str) -> KaskResult<Self> {
        if raw == PLUGIN_VERSION {
            return Ok(Self::Unpinned);
        }

        let invalid = || KaskError::InvalidVersionFormat {
            raw: raw.to_string(),
        };

        let parts: Vec<&str> = raw.split('.').collect();
        let [major, minor, patch]: [&str; 3] = parts.try_into().map_err(|_| invalid())?;

        Ok(Self::Semantic {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
            patch: patch.parse().map_err(|_| invalid())?,
        })
    }

    /// Resolve the version this binary was built with
    pub fn current() -> KaskResult<Self> {
        Self::resolve(PLUGIN_VERSION)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpinned => f.write_str(PLUGIN_VERSION),
            Self::Semantic {
                major,
                minor,
                patch,
            } => write!(f, "{}.{}.{}", major, minor, patch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_sentinel_is_unpinned() {
        let v = Version::resolve("dev").unwrap();
        assert_eq!(v, Version::Unpinned);
        assert_eq!(v.to_string(), "dev");
    }

    #[test]
    fn semantic_round_trip() {
        let v = Version::resolve("1.2.3").unwrap();
        assert_eq!(
            v,
            Version::Semantic {
                major: 1,
                minor: 2,
                patch: 3
            }
        );
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn two_components_rejected() {
        // must NOT resolve to 1.2.0
        assert!(matches!(
            Version::resolve("1.2"),
            Err(KaskError::InvalidVersionFormat { raw }) if raw == "1.2"
        ));
    }

    #[test]
    fn four_components_rejected() {
        assert!(Version::resolve("1.2.3.4").is_err());
    }

    #[test]
    fn non_numeric_component_rejected() {
        assert!(Version::resolve("1.x.3").is_err());
        assert!(Version::resolve("1.2.3-rc1").is_err());
        assert!(Version::resolve("").is_err());
    }

    #[test]
    fn negative_component_rejected() {
        assert!(Version::resolve("1.-2.3").is_err());
    }
}
