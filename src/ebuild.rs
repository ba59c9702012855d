use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use portage_atom::{Cpn, Cpv};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::keyword::{Keyword, Stability};
use crate::numeric_version::NumericVersion;
use crate::version::Version;

/// File extension of ebuild files, without the leading dot.
pub const EXTENSION: &str = "ebuild";

/// Strip `suffix` from the end of `string`, once.
///
/// Unlike [`str::trim_end_matches`] only a single exact match is removed.
///
/// # Examples
///
/// ```
/// use ebuild_util::remove_suffix;
///
/// assert_eq!(remove_suffix("azaz", "az"), "az");
/// assert_eq!(remove_suffix("az", "za"), "az");
/// ```
pub fn remove_suffix<'a>(string: &'a str, suffix: &str) -> &'a str {
    string.strip_suffix(suffix).unwrap_or(string)
}

/// An ebuild file in a `[parent_path/]category/package/` tree.
///
/// The file name is derived from the package name and version:
/// `<package>-<version>.ebuild`. File content is never cached, every
/// [`read`](Ebuild::read) and [`write`](Ebuild::write) goes to disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ebuild {
    /// Package name; may contain dashes.
    pub package: String,
    /// Package version.
    pub version: Version,
    /// Category directory name.
    pub category: Option<String>,
    /// Directory containing the category directory.
    pub parent_path: Option<PathBuf>,
}

impl Ebuild {
    /// Create an ebuild with no category or parent path.
    pub fn new(package: impl Into<String>, version: Version) -> Self {
        Ebuild {
            package: package.into(),
            version,
            category: None,
            parent_path: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the directory that holds the category directory.
    pub fn with_parent_path(mut self, parent_path: impl Into<PathBuf>) -> Self {
        self.parent_path = Some(parent_path.into());
        self
    }

    /// Parse a full or partial ebuild path.
    ///
    /// The canonical layout is
    /// `[parent_path/]category/package/package-version[-rN].ebuild`.
    /// Leading components may be missing. When the package directory is
    /// present, the filename must start with `<package>-`. For a bare
    /// filename the package name is the longest prefix followed by a
    /// valid version.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebuild_util::{Ebuild, NumericVersion, Version};
    ///
    /// let ebuild = Ebuild::from_path("/foo/bar/mycat/mypkg/mypkg-1.2-r3.ebuild").unwrap();
    /// assert_eq!(ebuild.package, "mypkg");
    /// assert_eq!(ebuild.category.as_deref(), Some("mycat"));
    /// assert_eq!(ebuild.version, Version::with_revision(NumericVersion::new([1, 2]), 3));
    ///
    /// let ebuild = Ebuild::from_path("my-very-own-pkg-1.2-r3.ebuild").unwrap();
    /// assert_eq!(ebuild.package, "my-very-own-pkg");
    /// assert_eq!(ebuild.category, None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let invalid = || Error::InvalidPath(path.display().to_string());

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(invalid)?;
        let stem = filename
            .strip_suffix(EXTENSION)
            .and_then(|rest| rest.strip_suffix('.'))
            .ok_or_else(invalid)?;

        let mut dir = non_empty(path.parent());
        let package_dir = take_dir_name(&mut dir, path)?;
        let category = match package_dir {
            Some(_) => take_dir_name(&mut dir, path)?,
            None => None,
        };

        let (package, version) = split_package_version(stem, package_dir).map_err(|e| match e {
            Error::InvalidPath(reason) => {
                Error::InvalidPath(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;

        Ok(Ebuild {
            package: package.to_string(),
            version,
            category: category.map(str::to_string),
            parent_path: dir.map(Path::to_path_buf),
        })
    }

    /// Full path of the ebuild file. Absent components are skipped.
    pub fn path(&self) -> PathBuf {
        let mut path = self.parent_path.clone().unwrap_or_default();
        if let Some(category) = &self.category {
            path.push(category);
        }
        path.push(&self.package);
        path.push(self.filename());
        path
    }

    /// File name of the ebuild, `<package>-<version>.ebuild`.
    pub fn filename(&self) -> String {
        format!("{}-{}.{}", self.package, self.version, EXTENSION)
    }

    /// Read the whole file.
    pub fn read(&self) -> Result<String> {
        Ok(fs::read_to_string(self.path())?)
    }

    /// Replace the whole file with `content`.
    pub fn write(&self, content: &str) -> Result<()> {
        let path = self.path();
        debug!("writing {} bytes to {}", content.len(), path.display());
        fs::write(path, content)?;
        Ok(())
    }

    /// File content with the unstable `KEYWORDS="~*"` marker replaced by
    /// `KEYWORDS="*"`.
    ///
    /// Only 9999 ebuilds can be stabilized and the marker must occur
    /// exactly once. The file itself is left untouched.
    pub fn stabilized_content(&self) -> Result<String> {
        if !self.is_9999() {
            return Err(Error::NotUnstable(self.to_string()));
        }
        let unstable = Keyword::assignment(&[Keyword::new("*", Stability::Testing)]);
        let stable = Keyword::assignment(&[Keyword::new("*", Stability::Stable)]);

        let content = self.read()?;
        let count = content.matches(unstable.as_str()).count();
        if count != 1 {
            return Err(Error::KeywordCount {
                marker: unstable,
                count,
            });
        }
        debug!("stabilizing keywords of {}", self);
        Ok(content.replacen(unstable.as_str(), &stable, 1))
    }

    /// Keywords from the first `KEYWORDS="..."` line of the file.
    pub fn keywords(&self) -> Result<Vec<Keyword>> {
        let content = self.read()?;
        match Keyword::find_assignment(&content) {
            Some(value) => Keyword::parse_line(value),
            None => Ok(Vec::new()),
        }
    }

    /// Whether this is the live `9999` ebuild (without a revision).
    pub fn is_9999(&self) -> bool {
        self.version == Version::new(NumericVersion::new([9999]))
    }

    /// Whether the ebuild file is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        fs::symlink_metadata(self.path())
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Bump the revision by one.
    pub fn uprev(&mut self) {
        self.version.revision.0 += 1;
    }

    /// The `category/package-version` atom of this ebuild.
    pub fn cpv(&self) -> Result<Cpv> {
        let category = self
            .category
            .as_deref()
            .ok_or_else(|| Error::MissingCategory(self.filename()))?;
        let cpn = Cpn::parse(&format!("{}/{}", category, self.package))
            .map_err(|e| Error::Atom(e.to_string()))?;
        Ok(Cpv::new(cpn, self.version.to_atom_version()?))
    }
}

impl fmt::Display for Ebuild {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// List the ebuilds directly inside `root`.
///
/// Subdirectories are not searched. With `exclude_9999` set, live ebuilds
/// are skipped. Entries come back in directory order and each call scans
/// the directory again. Directory and parse errors are yielded in place.
pub fn find_in_directory(
    root: impl AsRef<Path>,
    exclude_9999: bool,
) -> impl Iterator<Item = Result<Ebuild>> {
    let paths = WalkDir::new(root.as_ref())
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) if has_ebuild_extension(entry.path()) => Some(Ok(entry.into_path())),
            Ok(entry) => {
                trace!("ignoring {}", entry.path().display());
                None
            }
            Err(err) => Some(Err(Error::from(err))),
        });
    parse_paths(paths, exclude_9999)
}

fn parse_paths<I>(paths: I, exclude_9999: bool) -> impl Iterator<Item = Result<Ebuild>>
where
    I: IntoIterator<Item = Result<PathBuf>>,
{
    paths.into_iter().filter_map(move |path| {
        let ebuild = match path.and_then(|path| Ebuild::from_path(&path)) {
            Ok(ebuild) => ebuild,
            Err(err) => return Some(Err(err)),
        };
        if exclude_9999 && ebuild.is_9999() {
            debug!("skipping live ebuild {}", ebuild);
            return None;
        }
        Some(Ok(ebuild))
    })
}

fn has_ebuild_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == EXTENSION)
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Pop the last component name off `dir`. Leaves `dir` unchanged when it
/// has no name (`/`, `..`).
fn take_dir_name<'a>(dir: &mut Option<&'a Path>, path: &Path) -> Result<Option<&'a str>> {
    let Some(current) = *dir else {
        return Ok(None);
    };
    let Some(name) = current.file_name() else {
        return Ok(None);
    };
    let name = name
        .to_str()
        .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;
    *dir = non_empty(current.parent());
    Ok(Some(name))
}

/// Split `<package>-<version>` using the package directory name when known.
fn split_package_version<'a>(
    stem: &'a str,
    package_dir: Option<&'a str>,
) -> Result<(&'a str, Version)> {
    if let Some(package) = package_dir {
        let version = stem
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(|| {
                Error::InvalidPath(format!("filename does not start with {}-", package))
            })?;
        return Ok((package, Version::parse(version)?));
    }

    stem.rmatch_indices('-')
        .filter(|&(i, _)| i > 0)
        .find_map(|(i, _)| {
            Version::parse(&stem[i + 1..])
                .ok()
                .map(|version| (&stem[..i], version))
        })
        .ok_or_else(|| Error::InvalidPath("no package-version split found".to_string()))
}
