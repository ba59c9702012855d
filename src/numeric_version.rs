use std::fmt;
use std::str::FromStr;

use winnow::ascii::digit1;
use winnow::combinator::separated;
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;

use crate::error::{Error, Result};

/// Dotted sequence of non-negative integers, such as `1.2.3` or `9999`.
///
/// Comparison is component-wise from the left, so `1.2 < 1.10` and a
/// shorter version sorts before any longer version it is a prefix of.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericVersion(Vec<u64>);

impl NumericVersion {
    /// Create a version from its components.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebuild_util::NumericVersion;
    ///
    /// let v = NumericVersion::new([1, 2, 3]);
    /// assert_eq!(v.to_string(), "1.2.3");
    /// ```
    pub fn new(components: impl Into<Vec<u64>>) -> Self {
        NumericVersion(components.into())
    }

    /// Parse a dotted version string.
    pub fn parse(input: &str) -> Result<Self> {
        parse_numeric_version()
            .parse(input)
            .map_err(|e| Error::InvalidVersion(format!("{}: {}", input, e)))
    }

    /// The integer components, most significant first.
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for NumericVersion {
    fn from(components: Vec<u64>) -> Self {
        NumericVersion(components)
    }
}

impl fmt::Display for NumericVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, num) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", num)?;
        }
        Ok(())
    }
}

impl FromStr for NumericVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

fn parse_number<'s>() -> impl Parser<&'s str, u64, ErrMode<ContextError>> {
    digit1.try_map(|s: &str| s.parse::<u64>())
}

pub(crate) fn parse_numeric_version<'s>(
) -> impl Parser<&'s str, NumericVersion, ErrMode<ContextError>> {
    separated(1.., parse_number(), '.')
        .map(|components: Vec<u64>| NumericVersion(components))
        .context(StrContext::Label("numeric version"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single() {
        let v = NumericVersion::parse("9999").unwrap();
        assert_eq!(v, NumericVersion::new([9999]));
    }

    #[test]
    fn parse_dotted() {
        let v = NumericVersion::parse("1.2.3").unwrap();
        assert_eq!(v.components(), &[1, 2, 3]);
    }

    #[test]
    fn display_round_trip() {
        for s in ["0", "1.2", "4.9", "10.0.1", "2024.10.16"] {
            assert_eq!(NumericVersion::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn invalid() {
        for s in ["", ".", "1.", ".1", "1..2", "1.2a", "4.9-2", "-1", "r1"] {
            assert!(
                matches!(NumericVersion::parse(s), Err(Error::InvalidVersion(_))),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn ordering() {
        let parse = |s| NumericVersion::parse(s).unwrap();
        assert!(parse("1.2") < parse("1.10"));
        assert!(parse("1.2") < parse("1.2.0"));
        assert!(parse("2") > parse("1.99.99"));
        assert_eq!(parse("1.2"), NumericVersion::from(vec![1, 2]));
    }
}
