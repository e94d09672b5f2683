use std::borrow::Cow;

pub type Result<T> = std::result::Result<T, PathError>;

/// Every way a path can fail to parse or an operation on it can be refused.
///
/// Each variant carries the text of the path that was being worked on and a
/// short description of the problem.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("MalformedPath {{ path = {path}, reason = {reason} }}")]
    MalformedPath {
        path: Cow<'static, str>,
        reason: &'static str,
    },
    /// The input is well formed but does not have the shape the type hint
    /// asks for: a Directory hint with no directory, a Volume hint with more
    /// than a volume, or a File hint with no file name.
    #[error("PathTypeMismatch {{ path = {path}, reason = {reason} }}")]
    PathTypeMismatch {
        path: Cow<'static, str>,
        reason: &'static str,
    },
    #[error("RelativeResolutionError {{ path = {path}, reason = {reason} }}")]
    RelativeResolution {
        path: Cow<'static, str>,
        reason: &'static str,
    },
    #[error("IncompatiblePaths {{ path = {path}, base = {base}, reason = {reason} }}")]
    IncompatiblePaths {
        path: Cow<'static, str>,
        base: Cow<'static, str>,
        reason: &'static str,
    },
    #[error("StructuralPrecondition {{ path = {path}, reason = {reason} }}")]
    StructuralPrecondition {
        path: Cow<'static, str>,
        reason: &'static str,
    },
    #[error("DuplicatePath {{ path = {path} }}")]
    DuplicatePath { path: Cow<'static, str> },
}

fn owned(path: &str) -> Cow<'static, str> {
    Cow::Owned(path.to_owned())
}

impl PathError {
    pub(crate) fn malformed(path: &str, reason: &'static str) -> Self {
        PathError::MalformedPath {
            path: owned(path),
            reason,
        }
    }

    pub(crate) fn type_mismatch(path: &str, reason: &'static str) -> Self {
        PathError::PathTypeMismatch {
            path: owned(path),
            reason,
        }
    }

    pub(crate) fn relative_resolution(path: &str, reason: &'static str) -> Self {
        PathError::RelativeResolution {
            path: owned(path),
            reason,
        }
    }

    pub(crate) fn incompatible(path: &str, base: &str, reason: &'static str) -> Self {
        PathError::IncompatiblePaths {
            path: owned(path),
            base: owned(base),
            reason,
        }
    }

    pub(crate) fn precondition(path: &str, reason: &'static str) -> Self {
        PathError::StructuralPrecondition {
            path: owned(path),
            reason,
        }
    }

    pub(crate) fn duplicate(path: &str) -> Self {
        PathError::DuplicatePath { path: owned(path) }
    }

    /// The text of the path the error was raised for.
    pub fn path(&self) -> &str {
        match self {
            PathError::MalformedPath { path, .. }
            | PathError::PathTypeMismatch { path, .. }
            | PathError::RelativeResolution { path, .. }
            | PathError::IncompatiblePaths { path, .. }
            | PathError::StructuralPrecondition { path, .. }
            | PathError::DuplicatePath { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PathError;

    #[test]
    fn test_error_display() {
        let err = PathError::malformed(r"c:\a|b", "path contains invalid characters");
        assert_eq!(
            err.to_string(),
            r"MalformedPath { path = c:\a|b, reason = path contains invalid characters }"
        );
        assert_eq!(err.path(), r"c:\a|b");

        let err = PathError::incompatible(r"c:\a\", r"d:\b\", "volumes differ");
        assert_eq!(
            err.to_string(),
            r"IncompatiblePaths { path = c:\a\, base = d:\b\, reason = volumes differ }"
        );
    }
}
