//! A validated file system path packed into one string.
//!
//! [`PathValue`] splits a raw Windows-style or POSIX-style path into six
//! contiguous parts, `[machine][share][drive][directory][file][extension]`,
//! and offers a small algebra over them: appending fragments, swapping the
//! file name or extension, resolving against a base directory, relativizing
//! and walking up parents. Nothing here touches the file system.
//!
//! ```
//! use parsed_path::{platform::WINDOWS, PathTypeHint, PathValue};
//!
//! let path = PathValue::parse_with(r"C:\whatever\test.txt", PathTypeHint::File, &WINDOWS).unwrap();
//! assert_eq!(path.drive(), "C:");
//! assert_eq!(path.directory(), r"\whatever\");
//! assert_eq!(path.file(), "test");
//! assert_eq!(path.extension(), ".txt");
//! ```

mod algebra;
mod error;
mod grammar;
mod list;
mod parser;
pub mod platform;
#[cfg(test)]
mod proptests;
#[cfg(feature = "serde")]
mod serde_impls;
mod typed;
#[cfg(feature = "url")]
mod url;

use std::{
    cmp, fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    ops::Range,
    str::FromStr,
};

#[cfg(feature = "url")]
use ::url::Url;

pub use error::{PathError, Result};
pub use list::PathList;
pub use platform::{default_platform, select_platform, Platform};
pub use typed::{DirectoryPath, FilePath};
#[cfg(feature = "url")]
pub use crate::url::PathToUrlError;

use grammar::{directory_levels, Levels, WILDCARD_CHARS};

/// Tells the parser how to read input whose shape is ambiguous, typically a
/// path without a trailing separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathTypeHint {
    File,
    /// Everything after the volume is directory, whether or not it ends with a
    /// separator.
    Directory,
    /// Only a drive or a UNC machine and share.
    Volume,
    /// A file name that may contain `*` or `?`.
    Wildcard,
    /// Directory if the input ends with a separator, otherwise file. A bare
    /// drive or UNC name becomes a volume.
    Unknown,
}

const PART_COUNT: usize = 6;

/// One of the six ranges of a [`PathValue`], in text order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    Machine = 0,
    Share = 1,
    Drive = 2,
    Directory = 3,
    File = 4,
    Extension = 5,
}

impl Part {
    pub const ALL: [Part; PART_COUNT] = [
        Part::Machine,
        Part::Share,
        Part::Drive,
        Part::Directory,
        Part::File,
        Part::Extension,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Names a contiguous run of [`Part`]s to extract from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSelector {
    Machine,
    Share,
    Drive,
    Directory,
    File,
    Extension,
    Volume,
    Unc,
    VolumeAndDirectory,
    VolumeDirectoryAndFile,
    DirectoryAndFile,
    DirectoryFileAndExtension,
    FileAndExtension,
    All,
}

impl RangeSelector {
    /// First and last part covered, inclusive.
    pub fn bounds(self) -> (Part, Part) {
        use RangeSelector::*;

        match self {
            Machine => (Part::Machine, Part::Machine),
            Share => (Part::Share, Part::Share),
            Drive => (Part::Drive, Part::Drive),
            Directory => (Part::Directory, Part::Directory),
            File => (Part::File, Part::File),
            Extension => (Part::Extension, Part::Extension),
            // A path carries either a drive or a machine and share, never both.
            Volume => (Part::Machine, Part::Drive),
            Unc => (Part::Machine, Part::Share),
            VolumeAndDirectory => (Part::Machine, Part::Directory),
            VolumeDirectoryAndFile => (Part::Machine, Part::File),
            DirectoryAndFile => (Part::Directory, Part::File),
            DirectoryFileAndExtension => (Part::Directory, Part::Extension),
            FileAndExtension => (Part::File, Part::Extension),
            All => (Part::Machine, Part::Extension),
        }
    }

    pub fn includes(self, part: Part) -> bool {
        let (first, last) = self.bounds();
        first <= part && part <= last
    }
}

/// An immutable, validated path.
///
/// The canonical text is stored once; the six parts are recorded as
/// cumulative offsets into it, so `bounds[i]..bounds[i + 1]` is part `i` and
/// the parts always tile the text without gaps or overlap.
///
/// Equality, ordering and hashing ignore case.
#[derive(Clone)]
pub struct PathValue {
    text: String,
    bounds: [usize; PART_COUNT + 1],
    platform: &'static Platform,
}

impl PathValue {
    /// Parses `raw` against the process-wide [`default_platform`].
    pub fn parse(raw: &str, hint: PathTypeHint) -> Result<PathValue> {
        parser::parse(raw, hint, default_platform())
    }

    pub fn parse_with(
        raw: &str,
        hint: PathTypeHint,
        platform: &'static Platform,
    ) -> Result<PathValue> {
        parser::parse(raw, hint, platform)
    }

    /// A path with every part empty.
    pub fn empty() -> PathValue {
        PathValue::empty_with(default_platform())
    }

    pub fn empty_with(platform: &'static Platform) -> PathValue {
        PathValue {
            text: String::new(),
            bounds: [0; PART_COUNT + 1],
            platform,
        }
    }

    /// Builds a path from already validated parts. Callers are responsible
    /// for the part invariants; nothing is re-checked.
    pub(crate) fn from_parts(platform: &'static Platform, parts: [&str; PART_COUNT]) -> PathValue {
        let mut text = String::with_capacity(parts.iter().map(|p| p.len()).sum());
        let mut bounds = [0; PART_COUNT + 1];
        for (i, part) in parts.iter().enumerate() {
            text.push_str(part);
            bounds[i + 1] = text.len();
        }
        PathValue {
            text,
            bounds,
            platform,
        }
    }

    #[inline]
    pub fn platform(&self) -> &'static Platform {
        self.platform
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    fn range(&self, first: Part, last: Part) -> Range<usize> {
        self.bounds[first.index()]..self.bounds[last.index() + 1]
    }

    #[inline]
    pub fn part(&self, part: Part) -> &str {
        &self.text[self.range(part, part)]
    }

    /// The text covered by `selector`.
    pub fn slice(&self, selector: RangeSelector) -> &str {
        let (first, last) = selector.bounds();
        &self.text[self.range(first, last)]
    }

    /// A new path holding only the parts covered by `selector`; the other
    /// parts are empty. Nothing is reparsed.
    pub fn project(&self, selector: RangeSelector) -> PathValue {
        let (first, last) = selector.bounds();
        let Range { start, end } = self.range(first, last);
        let mut bounds = [0; PART_COUNT + 1];
        for (bound, source) in bounds.iter_mut().zip(self.bounds) {
            *bound = source.clamp(start, end) - start;
        }
        PathValue {
            text: self.text[start..end].to_owned(),
            bounds,
            platform: self.platform,
        }
    }

    #[inline]
    pub fn machine(&self) -> &str {
        self.part(Part::Machine)
    }

    #[inline]
    pub fn share(&self) -> &str {
        self.part(Part::Share)
    }

    #[inline]
    pub fn drive(&self) -> &str {
        self.part(Part::Drive)
    }

    #[inline]
    pub fn directory(&self) -> &str {
        self.part(Part::Directory)
    }

    #[inline]
    pub fn file(&self) -> &str {
        self.part(Part::File)
    }

    #[inline]
    pub fn extension(&self) -> &str {
        self.part(Part::Extension)
    }

    pub fn volume(&self) -> &str {
        self.slice(RangeSelector::Volume)
    }

    pub fn unc(&self) -> &str {
        self.slice(RangeSelector::Unc)
    }

    pub fn volume_and_directory(&self) -> &str {
        self.slice(RangeSelector::VolumeAndDirectory)
    }

    pub fn volume_directory_and_file(&self) -> &str {
        self.slice(RangeSelector::VolumeDirectoryAndFile)
    }

    pub fn directory_and_file(&self) -> &str {
        self.slice(RangeSelector::DirectoryAndFile)
    }

    pub fn directory_file_and_extension(&self) -> &str {
        self.slice(RangeSelector::DirectoryFileAndExtension)
    }

    pub fn file_and_extension(&self) -> &str {
        self.slice(RangeSelector::FileAndExtension)
    }

    pub fn directory_no_separator(&self) -> &str {
        let directory = self.directory();
        directory
            .strip_suffix(self.platform.separator)
            .unwrap_or(directory)
    }

    pub fn volume_and_directory_no_separator(&self) -> &str {
        let text = self.volume_and_directory();
        if self.has_directory() {
            text.strip_suffix(self.platform.separator).unwrap_or(text)
        } else {
            text
        }
    }

    pub fn has_unc(&self) -> bool {
        !self.machine().is_empty()
    }

    pub fn has_drive(&self) -> bool {
        !self.drive().is_empty()
    }

    pub fn has_volume(&self) -> bool {
        self.has_unc() || self.has_drive()
    }

    pub fn has_directory(&self) -> bool {
        !self.directory().is_empty()
    }

    pub fn has_filename(&self) -> bool {
        !self.file().is_empty()
    }

    pub fn has_extension(&self) -> bool {
        !self.extension().is_empty()
    }

    /// Whether the file name or extension contains `*` or `?`.
    pub fn has_wildcards(&self) -> bool {
        self.file_and_extension().contains(WILDCARD_CHARS)
    }

    pub fn has_root_directory(&self) -> bool {
        self.directory().starts_with(self.platform.separator)
    }

    /// `false` when there is no directory at all.
    pub fn is_root_directory(&self) -> bool {
        let directory = self.directory();
        directory.len() == self.platform.separator.len_utf8() && self.has_root_directory()
    }

    pub fn is_volume(&self) -> bool {
        self.has_volume() && !self.has_directory() && !self.has_filename() && !self.has_extension()
    }

    pub fn is_directory(&self) -> bool {
        !self.has_filename() && !self.has_extension()
    }

    pub fn is_directory_only(&self) -> bool {
        !self.has_volume() && self.is_directory()
    }

    pub fn is_filename(&self) -> bool {
        self.has_filename() || self.has_extension()
    }

    pub fn is_filename_only(&self) -> bool {
        !self.has_volume() && !self.has_directory()
    }

    pub(crate) fn has_relative_marker(&self) -> bool {
        let separator = self.platform.separator;
        directory_levels(separator, self.directory())
            .any(|level| grammar::relative_marker_len(separator, level).is_some())
    }

    /// True when the directory is missing, unrooted, or contains a relative
    /// marker such as `..`.
    pub fn is_relative_path(&self) -> bool {
        !self.has_directory() || !self.has_root_directory() || self.has_relative_marker()
    }

    /// Rooted, free of relative markers, and carrying a volume on platforms
    /// that have volumes.
    pub fn is_full_path(&self) -> bool {
        (self.has_volume() || !self.platform.has_volumes()) && !self.is_relative_path()
    }

    /// Each separator-terminated level of the directory, root first.
    pub fn sub_directories(&self) -> SubDirectories<'_> {
        SubDirectories {
            platform: self.platform,
            levels: directory_levels(self.platform.separator, self.directory()),
        }
    }

    pub fn sub_directory_count(&self) -> usize {
        self.directory().matches(self.platform.separator).count()
    }

    /// The deepest directory level, still separator-terminated. The root
    /// directory is its own last level.
    pub fn last_directory(&self) -> PathValue {
        match directory_levels(self.platform.separator, self.directory()).last() {
            Some(level) => PathValue::from_parts(self.platform, ["", "", "", level, "", ""]),
            None => PathValue::empty_with(self.platform),
        }
    }

    /// Like [`last_directory`](Self::last_directory) without the trailing
    /// separator, except for the root directory.
    pub fn last_directory_no_separator(&self) -> &str {
        let separator = self.platform.separator;
        match directory_levels(separator, self.directory()).last() {
            Some(level) if !self.is_root_directory() => {
                level.strip_suffix(separator).unwrap_or(level)
            }
            Some(level) => level,
            None => "",
        }
    }

    #[cfg(feature = "url")]
    pub fn to_file_url(&self) -> std::result::Result<Url, PathToUrlError> {
        let mut serialization = "file://".to_owned();
        crate::url::path_to_file_url_segments(self, &mut serialization)?;
        let u = Url::parse(&serialization)?;
        Ok(u)
    }
}

fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

impl Default for PathValue {
    fn default() -> Self {
        PathValue::empty()
    }
}

impl AsRef<str> for PathValue {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for PathValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, formatter)
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text, formatter)
    }
}

impl FromStr for PathValue {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        PathValue::parse(s, PathTypeHint::Unknown)
    }
}

impl From<PathValue> for String {
    fn from(path: PathValue) -> String {
        path.text
    }
}

impl PartialEq for PathValue {
    #[inline]
    fn eq(&self, other: &PathValue) -> bool {
        fold_case(&self.text).eq(fold_case(&other.text))
    }
}

impl Eq for PathValue {}

impl PartialEq<str> for PathValue {
    fn eq(&self, other: &str) -> bool {
        fold_case(&self.text).eq(fold_case(other))
    }
}

impl PartialEq<&str> for PathValue {
    fn eq(&self, other: &&str) -> bool {
        <PathValue as PartialEq<str>>::eq(self, other)
    }
}

impl PartialOrd for PathValue {
    #[inline]
    fn partial_cmp(&self, other: &PathValue) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathValue {
    fn cmp(&self, other: &PathValue) -> cmp::Ordering {
        fold_case(&self.text).cmp(fold_case(&other.text))
    }
}

impl Hash for PathValue {
    fn hash<H: Hasher>(&self, h: &mut H) {
        for c in fold_case(&self.text) {
            c.hash(h);
        }
        h.write_u8(0xff);
    }
}

/// Iterator returned by [`PathValue::sub_directories`]. Clone it to walk the
/// levels again.
#[derive(Clone, Debug)]
pub struct SubDirectories<'a> {
    platform: &'static Platform,
    levels: Levels<'a>,
}

impl Iterator for SubDirectories<'_> {
    type Item = PathValue;

    fn next(&mut self) -> Option<PathValue> {
        self.levels
            .next()
            .map(|level| PathValue::from_parts(self.platform, ["", "", "", level, "", ""]))
    }
}

impl FusedIterator for SubDirectories<'_> {}
