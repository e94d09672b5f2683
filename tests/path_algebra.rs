use parsed_path::{
    platform::{POSIX, WINDOWS},
    PathError, PathList, PathTypeHint, PathValue, RangeSelector,
};

fn windows(path: &str, hint: PathTypeHint) -> PathValue {
    PathValue::parse_with(path, hint, &WINDOWS).unwrap()
}

#[test]
fn test_parse_file_path() {
    let path = windows(r"C:\whatever\test.txt", PathTypeHint::File);
    assert_eq!(path.drive(), "C:");
    assert_eq!(path.directory(), r"\whatever\");
    assert_eq!(path.file(), "test");
    assert_eq!(path.extension(), ".txt");
    assert!(path.is_full_path());
}

#[test]
fn test_unc_without_share_is_malformed() {
    let err = PathValue::parse_with(r"\\computer", PathTypeHint::Volume, &WINDOWS).unwrap_err();
    assert!(matches!(err, PathError::MalformedPath { .. }));
    assert_eq!(err.path(), r"\\computer");
}

#[test]
fn test_three_dots_climb_two_levels() {
    let base = windows(r"c:\a\b\c\", PathTypeHint::Directory);
    let full = windows(r"...\test\abc.txt", PathTypeHint::File)
        .make_full_path(Some(&base))
        .unwrap();
    assert_eq!(full.directory(), r"\a\test\");
    assert_eq!(full.as_str(), r"c:\a\test\abc.txt");
}

#[test]
fn test_parent_keeps_file() {
    let parent = windows(r"c:\a\b\c\p.q", PathTypeHint::File)
        .make_parent_path(-1)
        .unwrap();
    assert_eq!(parent.directory(), r"\a\b\");
    assert_eq!(parent.file(), "p");
    assert_eq!(parent.extension(), ".q");
}

#[test]
fn test_rooted_fragment_cannot_be_appended() {
    let fragment = windows(r"\blah\file.txt", PathTypeHint::File);
    for base in [r"c:\", r"c:\x\y\", r"\\m\s\", r"rel\"] {
        assert!(matches!(
            windows(base, PathTypeHint::Directory).append(&fragment),
            Err(PathError::StructuralPrecondition { .. })
        ));
    }
}

#[test]
fn test_build_and_relativize() {
    let root = windows(r"\\build\drops\", PathTypeHint::Directory);
    let output = root
        .append_str(r"nightly\bin\", PathTypeHint::Directory)
        .unwrap()
        .append_str("tool.exe", PathTypeHint::File)
        .unwrap();
    assert_eq!(output.as_str(), r"\\build\drops\nightly\bin\tool.exe");
    assert_eq!(output.slice(RangeSelector::Unc), r"\\build\drops");

    let config = output.with_extension(".config").unwrap();
    assert_eq!(config.file_and_extension(), "tool.config");

    let logs = windows(r"\\build\drops\nightly\logs\", PathTypeHint::Directory);
    let relative = config.make_relative_path(&logs).unwrap();
    assert_eq!(relative.as_str(), r"..\bin\tool.config");

    let other_share = windows(r"\\build\other\", PathTypeHint::Directory);
    assert!(matches!(
        config.make_relative_path(&other_share),
        Err(PathError::IncompatiblePaths { .. })
    ));
}

#[test]
fn test_posix_search_path() {
    let list = PathList::parse("/usr/local/bin:/usr/bin::/USR/BIN", PathTypeHint::Directory, &POSIX)
        .unwrap();
    assert_eq!(list.len(), 2);
    let tools: Vec<_> = list
        .iter()
        .map(|dir| dir.append_str("ls", PathTypeHint::File).unwrap().to_string())
        .collect();
    assert_eq!(tools, vec!["/usr/local/bin/ls", "/usr/bin/ls"]);
    assert_eq!(list.to_string(), "/usr/local/bin/:/usr/bin/");
}
