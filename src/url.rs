use std::borrow::Cow;

use percent_encoding::{percent_encode, AsciiSet, CONTROLS};

use crate::PathValue;

const URL_FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');
const URL_PATH: &AsciiSet = &URL_FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');
const URL_PATH_SEGMENT: &AsciiSet = &URL_PATH.add(b'/').add(b'%');

#[derive(thiserror::Error, Debug)]
pub enum PathToUrlError {
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
    #[error("PathNotAbsoluteError {{ path = {path} }}")]
    PathNotAbsoluteError { path: Cow<'static, str> },
}

fn push_segment(serialization: &mut String, segment: &str) {
    serialization.push('/');
    serialization.extend(percent_encode(segment.as_bytes(), URL_PATH_SEGMENT));
}

/// Appends host and path of a `file:` URL for `path` to `serialization`,
/// which should already hold `file://`.
pub(crate) fn path_to_file_url_segments(
    path: &PathValue,
    serialization: &mut String,
) -> Result<(), PathToUrlError> {
    if !path.is_full_path() {
        return Err(PathToUrlError::PathNotAbsoluteError {
            path: Cow::Owned(path.as_str().to_owned()),
        });
    }
    let platform = path.platform();
    let separator = platform.separator;

    if path.has_unc() {
        let machine = path.machine();
        let server = platform
            .unc_prefix
            .and_then(|prefix| machine.strip_prefix(prefix))
            .unwrap_or(machine);
        let host = url::Host::parse(server)?;
        serialization.push_str(&host.to_string());
        push_segment(serialization, path.share().trim_start_matches(separator));
    } else if path.has_drive() {
        serialization.push('/');
        serialization.push_str(&path.drive().to_ascii_uppercase());
    }

    for level in path.directory().split(separator).filter(|l| !l.is_empty()) {
        push_segment(serialization, level);
    }

    if path.is_filename() {
        push_segment(serialization, path.file_and_extension());
    } else {
        serialization.push('/');
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::PathToUrlError;
    use crate::{
        platform::{POSIX, WINDOWS},
        PathTypeHint, PathValue,
    };

    #[test]
    fn test_to_file_url() {
        let url = |path: &str| {
            PathValue::parse_with(path, PathTypeHint::Unknown, &WINDOWS)
                .unwrap()
                .to_file_url()
        };

        assert_eq!(
            url(r"c:\a b\c.txt").unwrap().as_str(),
            "file:///C:/a%20b/c.txt"
        );
        assert_eq!(url(r"C:\").unwrap().as_str(), "file:///C:/");
        assert_eq!(
            url(r"\\server\share\dir\f.txt").unwrap().as_str(),
            "file://server/share/dir/f.txt"
        );
        assert!(matches!(
            url(r"dir\f.txt"),
            Err(PathToUrlError::PathNotAbsoluteError { .. })
        ));
        assert!(matches!(
            url(r"c:\a\..\f.txt"),
            Err(PathToUrlError::PathNotAbsoluteError { .. })
        ));

        let posix = PathValue::parse_with("/tmp/x/", PathTypeHint::Unknown, &POSIX).unwrap();
        assert_eq!(posix.to_file_url().unwrap().as_str(), "file:///tmp/x/");
    }
}
