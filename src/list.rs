use std::{fmt, ops::Deref, str::FromStr, vec};

use crate::{
    error::{PathError, Result},
    platform::default_platform,
    PathTypeHint, PathValue, Platform,
};

/// An ordered list of distinct paths, such as the entries of a `PATH`
/// variable.
///
/// Pushing a path already in the list does nothing; inserting or assigning
/// one fails with [`PathError::DuplicatePath`]. Duplicates are detected with
/// the case-insensitive equality of [`PathValue`].
#[derive(Clone, Debug)]
pub struct PathList {
    paths: Vec<PathValue>,
    platform: &'static Platform,
}

impl PathList {
    pub fn new() -> PathList {
        PathList::with_platform(default_platform())
    }

    pub fn with_platform(platform: &'static Platform) -> PathList {
        PathList {
            paths: Vec::new(),
            platform,
        }
    }

    /// Splits `list` on the platform's list separator and parses every
    /// non-empty entry with `hint`.
    pub fn parse(list: &str, hint: PathTypeHint, platform: &'static Platform) -> Result<PathList> {
        PathList::from_strs(
            list.split(platform.list_separator)
                .filter(|entry| !entry.trim().is_empty()),
            hint,
            platform,
        )
    }

    pub fn from_strs<I, S>(entries: I, hint: PathTypeHint, platform: &'static Platform) -> Result<PathList>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = PathList::with_platform(platform);
        for entry in entries {
            list.push(PathValue::parse_with(entry.as_ref(), hint, platform)?);
        }
        Ok(list)
    }

    #[inline]
    pub fn platform(&self) -> &'static Platform {
        self.platform
    }

    /// Appends `path` unless it is already present. Returns whether it was
    /// added.
    pub fn push(&mut self, path: PathValue) -> bool {
        if self.contains(&path) {
            log::trace!("skipping duplicate list entry {path:?}");
            return false;
        }
        self.paths.push(path);
        true
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, path: PathValue) -> Result<()> {
        if self.contains(&path) {
            return Err(PathError::duplicate(path.as_str()));
        }
        self.paths.insert(index, path);
        Ok(())
    }

    /// Replaces the entry at `index`, returning the old one. Fails if `path`
    /// is already present at another index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, path: PathValue) -> Result<PathValue> {
        if self.index_of(&path).is_some_and(|i| i != index) {
            return Err(PathError::duplicate(path.as_str()));
        }
        Ok(std::mem::replace(&mut self.paths[index], path))
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> PathValue {
        self.paths.remove(index)
    }

    pub fn remove(&mut self, path: &PathValue) -> bool {
        match self.index_of(path) {
            Some(i) => {
                self.paths.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, path: &PathValue) -> Option<usize> {
        self.paths.iter().position(|p| p == path)
    }

    pub fn contains(&self, path: &PathValue) -> bool {
        self.index_of(path).is_some()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

impl Default for PathList {
    fn default() -> Self {
        PathList::new()
    }
}

impl PartialEq for PathList {
    fn eq(&self, other: &PathList) -> bool {
        self.paths == other.paths
    }
}

impl Eq for PathList {}

impl Deref for PathList {
    type Target = [PathValue];

    fn deref(&self) -> &[PathValue] {
        &self.paths
    }
}

impl Extend<PathValue> for PathList {
    fn extend<I: IntoIterator<Item = PathValue>>(&mut self, iter: I) {
        for path in iter {
            self.push(path);
        }
    }
}

/// The list takes the platform of its first path, or the default platform
/// when empty.
impl FromIterator<PathValue> for PathList {
    fn from_iter<I: IntoIterator<Item = PathValue>>(iter: I) -> Self {
        let mut iter = iter.into_iter().peekable();
        let platform = iter.peek().map_or_else(default_platform, PathValue::platform);
        let mut list = PathList::with_platform(platform);
        list.extend(iter);
        list
    }
}

impl IntoIterator for PathList {
    type Item = PathValue;
    type IntoIter = vec::IntoIter<PathValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathList {
    type Item = &'a PathValue;
    type IntoIter = std::slice::Iter<'a, PathValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl fmt::Display for PathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.platform.list_separator)?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

impl FromStr for PathList {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        PathList::parse(s, PathTypeHint::Unknown, default_platform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{POSIX, WINDOWS};

    fn windows(path: &str) -> PathValue {
        PathValue::parse_with(path, PathTypeHint::Unknown, &WINDOWS).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let list = PathList::parse(r"c:\a\;;c:\b\ ; C:\A\", PathTypeHint::Directory, &WINDOWS).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].as_str(), r"c:\a\");
        assert_eq!(list[1].as_str(), r"c:\b\");
        assert_eq!(list.to_string(), r"c:\a\;c:\b\");

        let list = PathList::parse("/usr/bin:/bin", PathTypeHint::Directory, &POSIX).unwrap();
        assert_eq!(list.to_string(), "/usr/bin/:/bin/");

        assert!(matches!(
            PathList::parse(r"c:\a\;c:\|\", PathTypeHint::Directory, &WINDOWS),
            Err(PathError::MalformedPath { .. })
        ));
    }

    #[test]
    fn test_from_strs() {
        let list = PathList::from_strs(
            [r"c:\a\b.txt", "  c:/A/B.TXT ", r"\\m\s\c.txt"],
            PathTypeHint::File,
            &WINDOWS,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].file(), "b");
        assert_eq!(list[1].machine(), r"\\m");
        assert_eq!(list.platform(), &WINDOWS);

        let entries = vec![String::from("/usr/bin"), String::from("/bin")];
        let list = PathList::from_strs(&entries, PathTypeHint::Directory, &POSIX).unwrap();
        assert_eq!(list.to_string(), "/usr/bin/:/bin/");

        assert!(matches!(
            PathList::from_strs(["a.txt", "b|c.txt"], PathTypeHint::File, &WINDOWS),
            Err(PathError::MalformedPath { .. })
        ));
        assert!(matches!(
            PathList::from_strs(["a.txt", r"dir\"], PathTypeHint::File, &WINDOWS),
            Err(PathError::PathTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicates() {
        let mut list = PathList::with_platform(&WINDOWS);
        assert!(list.push(windows(r"c:\a\")));
        assert!(list.push(windows(r"c:\b\")));
        assert!(!list.push(windows(r"C:\A\")));
        assert_eq!(list.len(), 2);

        assert!(matches!(
            list.insert(0, windows(r"c:\b\")),
            Err(PathError::DuplicatePath { .. })
        ));
        list.insert(0, windows(r"c:\c\")).unwrap();
        assert_eq!(list.index_of(&windows(r"c:\a\")), Some(1));

        assert!(matches!(
            list.set(0, windows(r"c:\a\")),
            Err(PathError::DuplicatePath { .. })
        ));
        let old = list.set(1, windows(r"C:\A\")).unwrap();
        assert_eq!(old.as_str(), r"c:\a\");
        assert_eq!(list[1].as_str(), r"C:\A\");
    }

    #[test]
    fn test_remove_and_collect() {
        let mut list: PathList = [windows("a.txt"), windows("b.txt"), windows("A.TXT")]
            .into_iter()
            .collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.platform(), &WINDOWS);

        assert!(list.remove(&windows("a.txt")));
        assert!(!list.remove(&windows("a.txt")));
        assert_eq!(list.remove_at(0).as_str(), "b.txt");
        assert!(list.is_empty());

        list.extend([windows("x"), windows("y"), windows("x")]);
        let names: Vec<_> = list.iter().map(|p| p.file()).collect();
        assert_eq!(names, vec!["x", "y"]);
        list.clear();
        assert!(list.is_empty());
    }
}
