use crate::{
    error::{PathError, Result},
    grammar::{self, BAD_TRAIL_CHARS, EXTENSION_SEPARATOR},
    PathTypeHint, PathValue, Platform,
};

const QUOTE: char = '"';

/// Trims whitespace, removes one layer of surrounding quotes, rejects empty
/// input and invalid characters, and rewrites the alternate separator.
pub(crate) fn normalize(raw: &str, platform: &Platform) -> Result<String> {
    let mut path = raw.trim();

    if path.starts_with(QUOTE) {
        let inner = path
            .strip_prefix(QUOTE)
            .and_then(|p| p.strip_suffix(QUOTE))
            .filter(|inner| !inner.contains(QUOTE))
            .ok_or_else(|| PathError::malformed(raw, "path has mismatched quotes"))?;
        path = inner.trim();
    } else if path.ends_with(QUOTE) {
        return Err(PathError::malformed(raw, "path has mismatched quotes"));
    }

    if path.is_empty() {
        return Err(PathError::malformed(raw, "path is zero length"));
    }

    if path.chars().any(|c| platform.is_invalid(c)) {
        return Err(PathError::malformed(raw, "path contains invalid characters"));
    }

    Ok(match platform.alt_separator {
        Some(alt) => path.replace(alt, &platform.separator.to_string()),
        None => path.to_owned(),
    })
}

/// Splits a file name on its last extension separator. The extension is only
/// split off when at least one character follows the separator.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind(EXTENSION_SEPARATOR) {
        Some(i) if i + 1 < name.len() => name.split_at(i),
        _ => (name, ""),
    }
}

/// Drops trailing spaces and dots from each directory level, keeping levels
/// that are pure relative markers, and collapses repeated separators.
fn normalize_directory(raw: &str, directory: &str, platform: &Platform) -> Result<String> {
    let separator = platform.separator;
    let mut normalized = String::with_capacity(directory.len());

    if directory.starts_with(separator) {
        normalized.push(separator);
    }

    for level in directory.split(separator).filter(|level| !level.is_empty()) {
        let mut level = level.trim_end_matches(' ');
        if level.is_empty() {
            return Err(PathError::malformed(raw, "empty directory name"));
        }
        if !level.chars().all(|c| c == EXTENSION_SEPARATOR) {
            level = level.trim_end_matches(BAD_TRAIL_CHARS);
            if level.is_empty() {
                return Err(PathError::malformed(raw, "empty directory name"));
            }
        }
        normalized.push_str(level);
        normalized.push(separator);
    }

    Ok(normalized)
}

/// Walks a rooted directory and fails if its relative markers climb above the
/// root.
pub(crate) fn check_rooted_depth(raw: &str, directory: &str, separator: char) -> Result<()> {
    if !directory.starts_with(separator) {
        return Ok(());
    }
    let mut depth = 0usize;
    for level in grammar::directory_levels(separator, directory).skip(1) {
        match grammar::relative_marker_len(separator, level) {
            Some(dots) => {
                depth = depth.checked_sub(dots - 1).ok_or_else(|| {
                    PathError::relative_resolution(raw, "too many parent directories")
                })?;
            }
            None => depth += 1,
        }
    }
    Ok(())
}

pub(crate) fn parse(raw: &str, hint: PathTypeHint, platform: &'static Platform) -> Result<PathValue> {
    let path = normalize(raw, platform)?;
    let separator = platform.separator;
    let mut hint = hint;

    let (mut machine, mut share, mut drive) = ("", "", "");

    if platform
        .unc_prefix
        .is_some_and(|prefix| path.starts_with(prefix))
    {
        let (_, (m, s)) = grammar::parse_unc(platform, &path)
            .map_err(|_| PathError::malformed(raw, "badly formed UNC name"))?;
        machine = m;
        share = s;
        if hint == PathTypeHint::Unknown && path.len() == machine.len() + share.len() {
            log::trace!("{path:?} is a bare UNC name, treating it as a volume");
            hint = PathTypeHint::Volume;
        }
    } else if let Ok((_, d)) = grammar::parse_drive(platform, &path) {
        drive = d;
        if hint == PathTypeHint::Unknown && path.len() == drive.len() {
            log::trace!("{path:?} is a bare drive, treating it as a volume");
            hint = PathTypeHint::Volume;
        }
    }

    let body = &path[machine.len() + share.len() + drive.len()..];

    if let Some(volume_separator) = platform.volume_separator {
        if body.contains(volume_separator) {
            return Err(PathError::malformed(
                raw,
                "volume separator outside of a drive",
            ));
        }
    }

    let hint = match hint {
        PathTypeHint::Unknown if path.ends_with(separator) => PathTypeHint::Directory,
        PathTypeHint::Unknown | PathTypeHint::Wildcard => PathTypeHint::File,
        hint => hint,
    };

    let (directory, file, extension) = if hint == PathTypeHint::File {
        let name_start = body.rfind(separator).map_or(0, |i| i + separator.len_utf8());
        if name_start == body.len() {
            return Err(PathError::type_mismatch(
                raw,
                "path does not contain a file name",
            ));
        }
        let body = body.trim_end_matches(BAD_TRAIL_CHARS);
        let name_start = name_start.min(body.len());
        let (file, extension) = split_extension(&body[name_start..]);
        (&body[..name_start], file, extension)
    } else {
        (body, "", "")
    };

    if hint == PathTypeHint::Directory && directory.is_empty() {
        return Err(PathError::type_mismatch(raw, "missing directory"));
    }

    if directory.contains(grammar::WILDCARD_CHARS) {
        return Err(PathError::malformed(
            raw,
            "directory cannot contain wildcards",
        ));
    }

    if hint == PathTypeHint::Volume
        && !(directory.is_empty() && file.is_empty() && extension.is_empty())
    {
        return Err(PathError::type_mismatch(
            raw,
            "path contains more than just a volume",
        ));
    }

    let directory = normalize_directory(raw, directory, platform)?;
    check_rooted_depth(raw, &directory, separator)?;

    let parsed = PathValue::from_parts(
        platform,
        [machine, share, drive, &directory, file, extension],
    );
    log::trace!("parsed {raw:?} as {hint:?} into {parsed:?}");
    Ok(parsed)
}
