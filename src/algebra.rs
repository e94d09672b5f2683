use std::env;

use crate::{
    error::{PathError, Result},
    grammar::{self, BAD_TRAIL_CHARS, EXTENSION_SEPARATOR},
    parser, PathTypeHint, PathValue, Platform, RangeSelector,
};

/// Drops the deepest level of a separator-terminated, rooted directory buffer.
fn pop_level(buffer: &mut String, separator: char) -> bool {
    let without_trailing = &buffer[..buffer.len() - separator.len_utf8()];
    match without_trailing.rfind(separator) {
        Some(i) => {
            buffer.truncate(i + separator.len_utf8());
            true
        }
        None => false,
    }
}

fn current_directory(platform: &'static Platform) -> Result<PathValue> {
    let cwd = env::current_dir().map_err(|_| {
        PathError::relative_resolution("", "current directory is unavailable")
    })?;
    let cwd = cwd.to_str().ok_or_else(|| {
        PathError::relative_resolution("", "current directory is not valid UTF-8")
    })?;
    PathValue::parse_with(cwd, PathTypeHint::Directory, platform)
}

impl PathValue {
    fn check_volume_separator(&self, name: &str) -> Result<()> {
        match self.platform.volume_separator {
            Some(volume_separator) if name.contains(volume_separator) => Err(
                PathError::malformed(name, "volume separator outside of a drive"),
            ),
            _ => Ok(()),
        }
    }

    /// Appends a directory fragment and/or file name to this directory path.
    ///
    /// Fails if this path already has a file name or extension, or if the
    /// fragment has a volume or a root directory of its own.
    pub fn append(&self, fragment: &PathValue) -> Result<PathValue> {
        if self.is_filename() {
            return Err(PathError::precondition(
                self.as_str(),
                "target path already has a file name and/or extension",
            ));
        }
        if fragment.has_volume() {
            return Err(PathError::precondition(
                fragment.as_str(),
                "path fragment must not contain a volume",
            ));
        }
        if fragment.has_root_directory() {
            return Err(PathError::precondition(
                fragment.as_str(),
                "path fragment must not have a root directory",
            ));
        }

        let directory = [self.directory(), fragment.directory()].concat();
        parser::check_rooted_depth(fragment.as_str(), &directory, self.platform.separator)?;
        Ok(PathValue::from_parts(
            self.platform,
            [
                self.machine(),
                self.share(),
                self.drive(),
                &directory,
                fragment.file(),
                fragment.extension(),
            ],
        ))
    }

    /// Parses `fragment` with `hint` on this path's platform, then appends it.
    pub fn append_str(&self, fragment: &str, hint: PathTypeHint) -> Result<PathValue> {
        self.append(&PathValue::parse_with(fragment, hint, self.platform)?)
    }

    pub fn with_extension(&self, extension: &str) -> Result<PathValue> {
        let extension = parser::normalize(extension, self.platform)?;
        if !extension.starts_with(EXTENSION_SEPARATOR)
            || extension.len() == EXTENSION_SEPARATOR.len_utf8()
        {
            return Err(PathError::precondition(
                &extension,
                "extensions must start with a '.'",
            ));
        }
        if extension.contains(self.platform.separator) {
            return Err(PathError::malformed(
                &extension,
                "extension contains a directory separator",
            ));
        }
        self.check_volume_separator(&extension)?;
        if extension.matches(EXTENSION_SEPARATOR).count() > 1 {
            return Err(PathError::precondition(
                &extension,
                "extensions must contain a single '.'",
            ));
        }

        Ok(PathValue::from_parts(
            self.platform,
            [
                self.machine(),
                self.share(),
                self.drive(),
                self.directory(),
                self.file(),
                &extension,
            ],
        ))
    }

    /// Replaces the file name and extension. The argument is split on its
    /// last `.` the same way the parser splits file names.
    pub fn with_file_and_extension(&self, file_and_extension: &str) -> Result<PathValue> {
        let normalized = parser::normalize(file_and_extension, self.platform)?;
        if normalized.contains(self.platform.separator) {
            return Err(PathError::malformed(
                &normalized,
                "file name contains a directory separator",
            ));
        }
        self.check_volume_separator(&normalized)?;
        let name = normalized.trim_end_matches(BAD_TRAIL_CHARS);
        if name.is_empty() {
            return Err(PathError::malformed(&normalized, "file name is empty"));
        }
        let (file, extension) = parser::split_extension(name);
        if file.is_empty() {
            return Err(PathError::precondition(
                &normalized,
                "only an extension was given",
            ));
        }

        Ok(PathValue::from_parts(
            self.platform,
            [
                self.machine(),
                self.share(),
                self.drive(),
                self.directory(),
                file,
                extension,
            ],
        ))
    }

    /// Replaces the directory with the concatenated directories of `parts`,
    /// keeping this path's volume, file name and extension. Only the first
    /// part may be rooted.
    pub fn with_directory<'p, I>(&self, parts: I) -> Result<PathValue>
    where
        I: IntoIterator<Item = &'p PathValue>,
    {
        let mut directory = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 && part.has_root_directory() {
                return Err(PathError::precondition(
                    part.as_str(),
                    "only the first directory part may be rooted",
                ));
            }
            directory.push_str(part.directory());
        }
        parser::check_rooted_depth(&directory, &directory, self.platform.separator)?;

        Ok(PathValue::from_parts(
            self.platform,
            [
                self.machine(),
                self.share(),
                self.drive(),
                &directory,
                self.file(),
                self.extension(),
            ],
        ))
    }

    /// Replaces the directory with the directory of `directory`.
    pub fn with_directory_path(&self, directory: &PathValue) -> Result<PathValue> {
        self.with_directory(std::iter::once(directory))
    }

    /// Replaces the volume with the volume of `volume`. A `volume` without a
    /// drive or UNC name removes this path's volume.
    pub fn with_volume(&self, volume: &PathValue) -> PathValue {
        PathValue::from_parts(
            self.platform,
            [
                volume.machine(),
                volume.share(),
                volume.drive(),
                self.directory(),
                self.file(),
                self.extension(),
            ],
        )
    }

    /// Resolves this path against `base`, or against the current directory
    /// when `base` is `None`, producing a rooted path with a volume (where the
    /// platform has volumes) and no relative markers.
    ///
    /// Besides `.` and `..`, a run of N dots climbs N - 1 levels, so `...`
    /// is the grandparent.
    pub fn make_full_path(&self, base: Option<&PathValue>) -> Result<PathValue> {
        let current;
        let base = match base {
            Some(base) => base,
            None => {
                current = current_directory(self.platform)?;
                &current
            }
        };

        if self.platform.has_volumes() && !base.has_volume() {
            return Err(PathError::relative_resolution(
                base.as_str(),
                "base directory has no volume",
            ));
        }
        if !base.has_directory() {
            return Err(PathError::relative_resolution(
                base.as_str(),
                "base directory has no directory",
            ));
        }
        if !base.has_root_directory() {
            return Err(PathError::relative_resolution(
                base.as_str(),
                "base directory has no root",
            ));
        }
        if base.has_relative_marker() {
            return Err(PathError::relative_resolution(
                base.as_str(),
                "base directory contains relative directories",
            ));
        }

        let volume = if self.has_volume() { self } else { base };
        let separator = self.platform.separator;

        let mut resolved = String::with_capacity(base.directory().len() + self.directory().len());
        let mut levels = grammar::directory_levels(separator, self.directory());
        if self.has_root_directory() {
            resolved.push(separator);
            levels.next();
        } else {
            resolved.push_str(base.directory());
        }

        for level in levels {
            match grammar::relative_marker_len(separator, level) {
                Some(dots) => {
                    if dots > 2 {
                        log::trace!("{level:?} climbs {} levels in {self:?}", dots - 1);
                    }
                    for _ in 1..dots {
                        if !pop_level(&mut resolved, separator) {
                            return Err(PathError::relative_resolution(
                                self.as_str(),
                                "too many parent directories",
                            ));
                        }
                    }
                }
                None => resolved.push_str(level),
            }
        }

        Ok(PathValue::from_parts(
            self.platform,
            [
                volume.machine(),
                volume.share(),
                volume.drive(),
                &resolved,
                self.file(),
                self.extension(),
            ],
        ))
    }

    /// Expresses this path relative to the directory of `base`. Both paths
    /// must be full paths on the same volume; the result has no volume and
    /// keeps this path's file name and extension.
    pub fn make_relative_path(&self, base: &PathValue) -> Result<PathValue> {
        if !self.is_full_path() || !base.is_full_path() {
            return Err(PathError::incompatible(
                self.as_str(),
                base.as_str(),
                "both paths must be fully qualified",
            ));
        }
        if self.project(RangeSelector::Volume) != base.project(RangeSelector::Volume) {
            return Err(PathError::incompatible(
                self.as_str(),
                base.as_str(),
                "both paths must have the same volume",
            ));
        }

        let separator = self.platform.separator;
        let levels: Vec<_> = self.sub_directories().collect();
        let base_levels: Vec<_> = base.sub_directories().collect();
        let common = levels
            .iter()
            .zip(&base_levels)
            .take_while(|(level, base_level)| level == base_level)
            .count();

        let mut directory = String::with_capacity(self.directory().len());
        if base_levels.len() == common {
            directory.push(EXTENSION_SEPARATOR);
            directory.push(separator);
        } else {
            for _ in common..base_levels.len() {
                directory.push(EXTENSION_SEPARATOR);
                directory.push(EXTENSION_SEPARATOR);
                directory.push(separator);
            }
        }
        for level in &levels[common..] {
            directory.push_str(level.directory());
        }

        Ok(PathValue::from_parts(
            self.platform,
            ["", "", "", &directory, self.file(), self.extension()],
        ))
    }

    /// Walks `level` directories up, where `level` is zero or negative and
    /// zero means one level. Volume, file name and extension are kept.
    pub fn make_parent_path(&self, level: i32) -> Result<PathValue> {
        if level > 0 {
            return Err(PathError::precondition(
                self.as_str(),
                "parent level must be zero or negative",
            ));
        }
        let level = if level == 0 { -1 } else { level };

        if self.has_relative_marker() {
            return Err(PathError::precondition(
                self.as_str(),
                "cannot make the parent of a path with relative directories",
            ));
        }

        let count = self.sub_directory_count() as i64 + i64::from(level);
        if count <= 0 {
            return Err(PathError::precondition(
                self.as_str(),
                "insufficient directories to make parent path",
            ));
        }

        let levels: Vec<_> = self.sub_directories().take(count as usize).collect();
        self.with_directory(&levels)
    }

    pub fn make_parent(&self) -> Result<PathValue> {
        self.make_parent_path(-1)
    }
}
