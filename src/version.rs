use std::fmt;
use std::str::FromStr;

use portage_atom::Revision;
use winnow::ascii::digit1;
use winnow::combinator::{cut_err, preceded};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;

use crate::error::{Error, Result};
use crate::numeric_version::NumericVersion;

/// Ebuild version: a primary dotted version and an optional revision.
///
/// The textual form is `<primary>[-r<revision>]`, for example `9999`,
/// `1.2.3` or `4.9-r2`. A revision of `0` is omitted from display.
///
/// See [PMS 3.2](https://projects.gentoo.org/pms/9/pms.html#version-specifications).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    /// Upstream version.
    pub primary: NumericVersion,
    /// Packaging revision; `0` means no `-rN` suffix.
    pub revision: Revision,
}

impl Version {
    /// Create a version without a revision.
    pub fn new(primary: NumericVersion) -> Self {
        Version {
            primary,
            revision: Revision::default(),
        }
    }

    /// Create a version with an explicit revision.
    pub fn with_revision(primary: NumericVersion, revision: u64) -> Self {
        Version {
            primary,
            revision: Revision(revision),
        }
    }

    /// Parse a version string.
    ///
    /// The string is split at its last `-`. If the right-hand side looks
    /// like a revision (starts with `r`) it must be `r<digits>`, and the
    /// left-hand side is the primary version. Otherwise the whole string
    /// is the primary version.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebuild_util::{NumericVersion, Version};
    ///
    /// let v = Version::parse("4.9-r2").unwrap();
    /// assert_eq!(v, Version::with_revision(NumericVersion::new([4, 9]), 2));
    /// assert_eq!(v.to_string(), "4.9-r2");
    ///
    /// assert!(Version::parse("4.9-r1a").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        match input.rsplit_once('-') {
            Some((primary, revision)) if revision.starts_with('r') => {
                Self::parse_parts(&[primary, revision])
            }
            _ => Self::parse_parts(&[input]),
        }
    }

    /// Build a version from already split parts: `[primary]` or
    /// `[primary, revision]`.
    pub fn parse_parts(parts: &[&str]) -> Result<Self> {
        match parts {
            [primary] => Ok(Version::new(NumericVersion::parse(primary)?)),
            [primary, revision] => Ok(Version::with_revision(
                NumericVersion::parse(primary)?,
                Self::parse_revision(revision)?,
            )),
            _ => Err(Error::InvalidVersion(format!(
                "expected 1 or 2 parts, got {}: {}",
                parts.len(),
                parts.join("-")
            ))),
        }
    }

    /// Parse a revision segment such as `r300`.
    ///
    /// ```
    /// use ebuild_util::Version;
    ///
    /// assert_eq!(Version::parse_revision("r123").unwrap(), 123);
    /// assert!(Version::parse_revision("123").is_err());
    /// ```
    pub fn parse_revision(input: &str) -> Result<u64> {
        parse_revision()
            .parse(input)
            .map_err(|e| Error::InvalidRevision(format!("{}: {}", input, e)))
    }

    /// Convert to a full PMS version as used by `portage-atom`.
    pub fn to_atom_version(&self) -> Result<portage_atom::Version> {
        portage_atom::Version::parse(&self.to_string()).map_err(|e| Error::Atom(e.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.primary, self.revision)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

fn parse_revision<'s>() -> impl Parser<&'s str, u64, ErrMode<ContextError>> {
    preceded('r', cut_err(digit1.try_map(|s: &str| s.parse::<u64>())))
        .context(StrContext::Label("revision"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nv(components: &[u64]) -> NumericVersion {
        NumericVersion::new(components.to_vec())
    }

    #[test]
    fn display() {
        assert_eq!(Version::with_revision(nv(&[1, 2]), 3).to_string(), "1.2-r3");
        assert_eq!(Version::new(nv(&[1, 2])).to_string(), "1.2");
        assert_eq!(Version::with_revision(nv(&[1, 2]), 0).to_string(), "1.2");
    }

    #[test]
    fn parse_parts() {
        assert_eq!(
            Version::parse_parts(&["9999"]).unwrap(),
            Version::new(nv(&[9999]))
        );
        assert_eq!(
            Version::parse_parts(&["1.2.3"]).unwrap(),
            Version::new(nv(&[1, 2, 3]))
        );
        assert_eq!(
            Version::parse_parts(&["4.9", "r2"]).unwrap(),
            Version::with_revision(nv(&[4, 9]), 2)
        );
        assert!(Version::parse_parts(&["4.9-2"]).is_err());
        assert!(matches!(
            Version::parse_parts(&["4.9", "2"]),
            Err(Error::InvalidRevision(_))
        ));
        assert!(Version::parse_parts(&[]).is_err());
        assert!(Version::parse_parts(&["1", "r1", "r2"]).is_err());
    }

    #[test]
    fn parse_revision() {
        assert_eq!(Version::parse_revision("r123").unwrap(), 123);
        assert_eq!(Version::parse_revision("r0").unwrap(), 0);
        for s in ["123", "r1a", "r", "", "R1", "r-1"] {
            assert!(
                matches!(Version::parse_revision(s), Err(Error::InvalidRevision(_))),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn parse() {
        assert_eq!(
            Version::parse("4.9-r2").unwrap(),
            Version::with_revision(nv(&[4, 9]), 2)
        );
        assert_eq!(Version::parse("9999").unwrap(), Version::new(nv(&[9999])));
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            Version::parse("4.9-r1a"),
            Err(Error::InvalidRevision(_))
        ));
        assert!(matches!(
            Version::parse("4.9-2"),
            Err(Error::InvalidVersion(_))
        ));
        assert!(Version::parse("1.2-r3-r4").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("-r1").is_err());
        assert!(Version::parse("1.2-").is_err());
    }

    #[test]
    fn round_trip() {
        for (major, minor, patch) in [(0, 0, 1), (1, 2, 3), (10, 0, 7)] {
            for revision in [0, 1, 12] {
                let v = Version::with_revision(nv(&[major, minor, patch]), revision);
                let s = v.to_string();
                assert_eq!(s.contains("-r"), revision != 0);
                assert_eq!(Version::parse(&s).unwrap(), v);
            }
        }
    }

    #[test]
    fn atom_version() {
        let v = Version::with_revision(nv(&[1, 75, 0]), 1).to_atom_version().unwrap();
        assert_eq!(v.numbers, vec![1, 75, 0]);
        assert_eq!(v.revision.0, 1);
    }
}
