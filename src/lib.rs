//! Utilities for Gentoo ebuild filenames, versions and keywords.
//!
//! This crate parses ebuild paths of the form
//! `[parent/]category/package/package-version[-rN].ebuild`, rebuilds them
//! from their parts, and performs the small edits needed when maintaining
//! an overlay: bumping revisions and stabilizing live (`9999`) ebuilds.
//!
//! # Examples
//!
//! Parse an ebuild path:
//!
//! ```
//! use ebuild_util::{Ebuild, NumericVersion, Version};
//!
//! let mut ebuild = Ebuild::from_path("overlay/dev-util/my-tool/my-tool-1.2.ebuild").unwrap();
//! assert_eq!(ebuild.package, "my-tool");
//! assert_eq!(ebuild.category.as_deref(), Some("dev-util"));
//! assert_eq!(ebuild.version, Version::new(NumericVersion::new([1, 2])));
//!
//! ebuild.uprev();
//! assert_eq!(ebuild.filename(), "my-tool-1.2-r1.ebuild");
//! ```
//!
//! List the ebuilds of a package directory:
//!
//! ```no_run
//! use ebuild_util::find_in_directory;
//!
//! for ebuild in find_in_directory("overlay/dev-util/my-tool", true) {
//!     println!("{}", ebuild?);
//! }
//! # Ok::<(), ebuild_util::Error>(())
//! ```

mod ebuild;
mod error;
mod keyword;
mod numeric_version;
mod version;

// Re-export public types
pub use ebuild::{find_in_directory, remove_suffix, Ebuild, EXTENSION};
pub use error::{Error, Result};
pub use keyword::{Keyword, Stability};
pub use numeric_version::NumericVersion;
pub use version::Version;
