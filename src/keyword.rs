use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Stability level for an architecture keyword.
///
/// See [PMS 7.3.3](https://projects.gentoo.org/pms/9/pms.html#keywords).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    /// Stable on this architecture (e.g. `amd64`, or `*` for all).
    Stable,
    /// Testing/unstable on this architecture (e.g. `~amd64`, or `~*`).
    Testing,
    /// Disabled on this architecture (e.g. `-amd64`).
    Disabled,
    /// All architectures are disabled (`-*`).
    DisabledAll,
}

/// A single architecture keyword entry from the `KEYWORDS` variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword {
    /// Architecture name (e.g. `amd64`, `x86`, or `*`).
    pub arch: String,
    /// Stability classification.
    pub stability: Stability,
}

impl Keyword {
    /// Create a keyword entry.
    pub fn new(arch: impl Into<String>, stability: Stability) -> Self {
        Keyword {
            arch: arch.into(),
            stability,
        }
    }

    /// Parse a space-separated `KEYWORDS` value into a list of keywords.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebuild_util::{Keyword, Stability};
    ///
    /// let kws = Keyword::parse_line("amd64 ~arm64 -x86 -*").unwrap();
    /// assert_eq!(kws.len(), 4);
    /// assert_eq!(kws[1].stability, Stability::Testing);
    /// ```
    pub fn parse_line(input: &str) -> Result<Vec<Keyword>> {
        input
            .split_whitespace()
            .map(|token| token.parse())
            .collect()
    }

    /// Render a quoted `KEYWORDS="..."` assignment as it appears in an
    /// ebuild file.
    ///
    /// ```
    /// use ebuild_util::{Keyword, Stability};
    ///
    /// let line = Keyword::assignment(&[Keyword::new("*", Stability::Testing)]);
    /// assert_eq!(line, r#"KEYWORDS="~*""#);
    /// ```
    pub fn assignment(keywords: &[Keyword]) -> String {
        let values: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        format!("KEYWORDS=\"{}\"", values.join(" "))
    }

    /// Find the value of the first `KEYWORDS="..."` assignment in ebuild
    /// content.
    pub(crate) fn find_assignment(content: &str) -> Option<&str> {
        content.lines().find_map(|line| {
            line.trim()
                .strip_prefix("KEYWORDS=\"")
                .and_then(|rest| rest.split_once('"'))
                .map(|(value, _)| value)
        })
    }
}

impl FromStr for Keyword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidKeyword("empty keyword".to_string()));
        }

        if s == "-*" {
            return Ok(Keyword::new("*", Stability::DisabledAll));
        }

        if let Some(arch) = s.strip_prefix('~') {
            if arch.is_empty() {
                return Err(Error::InvalidKeyword(s.to_string()));
            }
            Ok(Keyword::new(arch, Stability::Testing))
        } else if let Some(arch) = s.strip_prefix('-') {
            if arch.is_empty() {
                return Err(Error::InvalidKeyword(s.to_string()));
            }
            Ok(Keyword::new(arch, Stability::Disabled))
        } else {
            Ok(Keyword::new(s, Stability::Stable))
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.stability {
            Stability::Stable => write!(f, "{}", self.arch),
            Stability::Testing => write!(f, "~{}", self.arch),
            Stability::Disabled => write!(f, "-{}", self.arch),
            Stability::DisabledAll => write!(f, "-*"),
        }
    }
}
