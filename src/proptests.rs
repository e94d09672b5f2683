//! Property-based tests for parsing and the path algebra.

use proptest::prelude::*;

use crate::{platform::WINDOWS, Part, PathTypeHint, PathValue};

// A directory or file name that survives normalization unchanged
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]([a-zA-Z0-9_ .-]{0,6}[a-zA-Z0-9_])?"
}

fn file_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z0-9_]{1,8}", prop::option::of("\\.[a-z]{1,3}"))
        .prop_map(|(name, extension)| name + extension.as_deref().unwrap_or(""))
}

// `X:\seg\...\seg\` with the given number of levels below the root
fn directory_strategy(levels: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), levels).prop_map(|segments| {
        let mut directory = String::from(r"\");
        for segment in segments {
            directory.push_str(&segment);
            directory.push('\\');
        }
        directory
    })
}

fn full_file_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z]", directory_strategy(0..6), file_strategy())
        .prop_map(|(drive, directory, file)| format!("{drive}:{directory}{file}"))
}

// A relative directory mixing names with `.`, `..` and `...` markers
fn relative_directory_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => segment_strategy(),
            1 => Just(".".to_owned()),
            1 => Just("..".to_owned()),
            1 => Just("...".to_owned()),
        ],
        0..6,
    )
    .prop_map(|levels| {
        levels
            .into_iter()
            .map(|level| level + "\\")
            .collect::<String>()
    })
}

fn parse_windows(path: &str, hint: PathTypeHint) -> PathValue {
    PathValue::parse_with(path, hint, &WINDOWS).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Parsing the canonical text again gives back the same parts
    #[test]
    fn parse_round_trips(path in full_file_strategy()) {
        let parsed = parse_windows(&path, PathTypeHint::File);
        let reparsed = parse_windows(parsed.as_str(), PathTypeHint::File);

        prop_assert_eq!(parsed.as_str(), reparsed.as_str());
        for part in Part::ALL {
            prop_assert_eq!(parsed.part(part), reparsed.part(part));
        }
    }

    // The six parts tile the canonical text
    #[test]
    fn parts_concatenate_to_text(
        directory in relative_directory_strategy(),
        file in file_strategy(),
    ) {
        let parsed = parse_windows(&format!("{directory}{file}"), PathTypeHint::File);
        let joined: String = Part::ALL.iter().map(|&part| parsed.part(part)).collect();
        prop_assert_eq!(joined, parsed.as_str());
    }

    // Resolving an already resolved path changes nothing
    #[test]
    fn make_full_path_is_idempotent(
        base in directory_strategy(0..6),
        directory in relative_directory_strategy(),
        file in file_strategy(),
    ) {
        let base = parse_windows(&format!("c:{base}"), PathTypeHint::Directory);
        let path = parse_windows(&format!("{directory}{file}"), PathTypeHint::File);

        if let Ok(once) = path.make_full_path(Some(&base)) {
            prop_assert!(once.is_full_path());
            prop_assert_eq!(once.make_full_path(Some(&base)).unwrap(), once);
        }
    }

    // Each parent step removes exactly one directory level
    #[test]
    fn parent_removes_one_level(path in full_file_strategy()) {
        let mut path = parse_windows(&path, PathTypeHint::File);
        while path.sub_directory_count() > 1 {
            let parent = path.make_parent().unwrap();
            prop_assert_eq!(parent.sub_directory_count(), path.sub_directory_count() - 1);
            prop_assert_eq!(parent.file_and_extension(), path.file_and_extension());
            path = parent;
        }
        prop_assert!(path.make_parent().is_err());
    }

    // Appending the relative form to its base and resolving restores the path
    #[test]
    fn relative_path_resolves_back(
        base in directory_strategy(0..5),
        shared in directory_strategy(0..3),
        path in directory_strategy(0..4),
        file in file_strategy(),
    ) {
        let base = parse_windows(&format!("c:{shared}{}", &base[1..]), PathTypeHint::Directory);
        let path = parse_windows(&format!("C:{shared}{}{file}", &path[1..]), PathTypeHint::File);

        let relative = path.make_relative_path(&base).unwrap();
        prop_assert!(!relative.has_volume());

        let resolved = base
            .append(&relative)
            .unwrap()
            .make_full_path(Some(&base))
            .unwrap();
        prop_assert_eq!(resolved, path);
    }
}
