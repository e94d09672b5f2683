//! The grammar constants that differ between Windows-style and POSIX-style
//! paths, bundled into a value so one parser serves both.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Canonical directory separator.
    pub separator: char,
    /// Separator accepted on input and rewritten to `separator`.
    pub alt_separator: Option<char>,
    /// Character following a drive letter, if drives exist at all.
    pub volume_separator: Option<char>,
    /// Prefix introducing a `machine` + `share` volume, if UNC names exist.
    pub unc_prefix: Option<&'static str>,
    pub invalid_chars: &'static [char],
    /// Separates entries of a joined path list, e.g. `PATH`.
    pub list_separator: char,
}

const WINDOWS_INVALID_CHARS: &[char] = &[
    '"', '<', '>', '|', '\0', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
    '\u{8}', '\t', '\n', '\u{b}', '\u{c}', '\r', '\u{e}', '\u{f}', '\u{10}', '\u{11}', '\u{12}',
    '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1a}', '\u{1b}',
    '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
];

const POSIX_INVALID_CHARS: &[char] = &['\0'];

pub static WINDOWS: Platform = Platform {
    separator: '\\',
    alt_separator: Some('/'),
    volume_separator: Some(':'),
    unc_prefix: Some(r"\\"),
    invalid_chars: WINDOWS_INVALID_CHARS,
    list_separator: ';',
};

pub static POSIX: Platform = Platform {
    separator: '/',
    alt_separator: Some('\\'),
    volume_separator: None,
    unc_prefix: None,
    invalid_chars: POSIX_INVALID_CHARS,
    list_separator: ':',
};

static SELECTED: OnceLock<&'static Platform> = OnceLock::new();

impl Platform {
    /// The preset matching the host the crate was compiled for.
    pub fn native() -> &'static Platform {
        if cfg!(windows) {
            &WINDOWS
        } else {
            &POSIX
        }
    }

    #[inline]
    pub fn has_volumes(&self) -> bool {
        self.volume_separator.is_some() || self.unc_prefix.is_some()
    }

    #[inline]
    pub fn is_separator(&self, c: char) -> bool {
        c == self.separator || Some(c) == self.alt_separator
    }

    #[inline]
    pub fn is_invalid(&self, c: char) -> bool {
        self.invalid_chars.contains(&c)
    }
}

/// Chooses the platform used by [`default_platform`] for the rest of the
/// process. Returns `false` if a platform was already chosen (explicitly or by
/// an earlier call to [`default_platform`]).
pub fn select_platform(platform: &'static Platform) -> bool {
    let selected = SELECTED.set(platform).is_ok();
    if selected {
        log::debug!("selected path platform {:?}", platform.separator);
    }
    selected
}

pub fn default_platform() -> &'static Platform {
    SELECTED.get_or_init(Platform::native)
}
