use nom::{
    bytes::complete::{tag, take_till1, take_while1},
    character::complete::{char, satisfy},
    combinator::recognize,
    error::{context, ContextError, Error, ErrorKind, ParseError},
    sequence::{pair, terminated},
    IResult, Parser,
};

use crate::Platform;

pub(crate) const EXTENSION_SEPARATOR: char = '.';

pub(crate) const WILDCARD_CHARS: &[char] = &['*', '?'];

/// Trailing junk trimmed from file and directory names.
pub(crate) const BAD_TRAIL_CHARS: &[char] = &['.', ' '];

fn context_verify_error<'a>(input: &'a str, context: &'static str) -> nom::Err<Error<&'a str>> {
    nom::Err::Error(Error::add_context(
        input,
        context,
        Error::from_error_kind(input, ErrorKind::Verify),
    ))
}

/// `<letter><volume separator>`, e.g. `C:`.
pub(crate) fn parse_drive<'a>(platform: &Platform, path: &'a str) -> IResult<&'a str, &'a str> {
    let Some(volume_separator) = platform.volume_separator else {
        return Err(context_verify_error(path, "drive"));
    };
    context(
        "drive",
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic()),
            char(volume_separator),
        )),
    )
    .parse(path)
}

/// Splits `\\machine\share` off the front of `path`. The machine keeps the UNC
/// prefix and the share keeps its leading separator, so the two concatenate
/// back to the input text.
pub(crate) fn parse_unc<'a>(
    platform: &Platform,
    path: &'a str,
) -> IResult<&'a str, (&'a str, &'a str)> {
    let Some(prefix) = platform.unc_prefix else {
        return Err(context_verify_error(path, "unc prefix"));
    };
    let separator = platform.separator;
    let (rest, machine) = context(
        "unc machine",
        recognize(pair(tag(prefix), take_till1(move |c: char| c == separator))),
    )
    .parse(path)?;
    let (rest, share) = context(
        "unc share",
        recognize(pair(
            char(separator),
            take_till1(move |c: char| c == separator),
        )),
    )
    .parse(rest)?;
    Ok((rest, (machine, share)))
}

/// A run of extension separators closed by a directory separator, e.g. `...\`.
/// Yields the number of dots.
pub(crate) fn parse_relative_marker(separator: char, segment: &str) -> IResult<&str, usize> {
    terminated(
        take_while1(|c: char| c == EXTENSION_SEPARATOR),
        char(separator),
    )
    .map(|dots: &str| dots.len())
    .parse(segment)
}

/// The dot count of a separator-terminated directory level that is nothing but
/// a relative marker; `None` for any other level.
pub(crate) fn relative_marker_len(separator: char, segment: &str) -> Option<usize> {
    match parse_relative_marker(separator, segment) {
        Ok(("", dots)) => Some(dots),
        _ => None,
    }
}

/// Returns each separator-terminated level of a directory, root first.
pub(crate) fn directory_levels(separator: char, directory: &str) -> Levels<'_> {
    Levels {
        separator,
        rest: directory,
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Levels<'a> {
    separator: char,
    rest: &'a str,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .find(self.separator)
            .map_or(self.rest.len(), |i| i + self.separator.len_utf8());
        let (level, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(level)
    }
}

impl std::iter::FusedIterator for Levels<'_> {}
