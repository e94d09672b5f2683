//! Path values whose shape is known from their type.

use std::{fmt, ops::Deref, str::FromStr};

use crate::{
    error::{PathError, Result},
    platform::default_platform,
    PathTypeHint, PathValue, Platform,
};

/// A path that carries a file name or an extension.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath(PathValue);

/// A path with a directory and no file name or extension.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirectoryPath(PathValue);

impl FilePath {
    pub fn parse(raw: &str) -> Result<FilePath> {
        FilePath::parse_with(raw, default_platform())
    }

    pub fn parse_with(raw: &str, platform: &'static Platform) -> Result<FilePath> {
        PathValue::parse_with(raw, PathTypeHint::File, platform).and_then(FilePath::try_from)
    }

    #[inline]
    pub fn as_path(&self) -> &PathValue {
        &self.0
    }

    pub fn into_inner(self) -> PathValue {
        self.0
    }
}

impl DirectoryPath {
    pub fn parse(raw: &str) -> Result<DirectoryPath> {
        DirectoryPath::parse_with(raw, default_platform())
    }

    pub fn parse_with(raw: &str, platform: &'static Platform) -> Result<DirectoryPath> {
        PathValue::parse_with(raw, PathTypeHint::Directory, platform).and_then(DirectoryPath::try_from)
    }

    #[inline]
    pub fn as_path(&self) -> &PathValue {
        &self.0
    }

    pub fn into_inner(self) -> PathValue {
        self.0
    }
}

impl TryFrom<PathValue> for FilePath {
    type Error = PathError;

    fn try_from(path: PathValue) -> Result<FilePath> {
        if !path.is_filename() {
            return Err(PathError::type_mismatch(
                path.as_str(),
                "path must have a file name",
            ));
        }
        Ok(FilePath(path))
    }
}

impl TryFrom<PathValue> for DirectoryPath {
    type Error = PathError;

    fn try_from(path: PathValue) -> Result<DirectoryPath> {
        if !path.has_directory() || !path.is_directory() {
            return Err(PathError::type_mismatch(
                path.as_str(),
                "path must be a directory",
            ));
        }
        Ok(DirectoryPath(path))
    }
}

macro_rules! impl_path_newtype {
    ($name:ident) => {
        impl Deref for $name {
            type Target = PathValue;

            #[inline]
            fn deref(&self) -> &PathValue {
                &self.0
            }
        }

        impl AsRef<PathValue> for $name {
            fn as_ref(&self) -> &PathValue {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for PathValue {
            fn from(path: $name) -> PathValue {
                path.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = PathError;

            fn from_str(s: &str) -> Result<Self> {
                $name::parse(s)
            }
        }
    };
}

impl_path_newtype!(FilePath);
impl_path_newtype!(DirectoryPath);
