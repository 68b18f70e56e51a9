// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for bazel-junit5
//!
//! These cover the option filter's ordering guarantees and the filter
//! parser's class / package / method decisions.

use std::collections::HashSet;

use bazel_junit5::{SelectionFlag, filter_options, parse_filter, transform_args};
use bazel_junit5_reflect::testing::ClassFileBuilder;
use bazel_junit5_reflect::{ClassInfo, ClassTable};
use proptest::prelude::*;

const KNOWN_CLASS: &str = "com.example.KnownTest";

fn known_classes() -> ClassTable {
    let bytes = ClassFileBuilder::new(KNOWN_CLASS)
        .method("single", "()V")
        .method("overloaded", "()V")
        .method("overloaded", "(I)V")
        .method("overloaded", "(Ljava/lang/String;)V")
        .method("overloaded", "(JJ)V")
        .build();
    ClassTable::new().with_class(ClassInfo::parse(&bytes).expect("Should parse"))
}

// ============================================================================
// Strategies
// ============================================================================

/// Generate a launcher argument token
fn arg_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("--select-package".to_string()),
        Just("--select-package=com.example".to_string()),
        Just("--select-class".to_string()),
        Just("--select-class=a.B".to_string()),
        "--[a-z]{1,10}",
        "--[a-z]{1,10}=[a-z]{0,5}",
        "[a-zA-Z.]{1,12}",
    ]
}

/// Generate a launcher argument list
fn arg_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arg_token(), 0..16)
}

/// Generate a dotted name that is not `KNOWN_CLASS`
fn unknown_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}(\\.[A-Z][a-zA-Z]{0,8})?"
        .prop_filter("must not be the known class", |name| name != KNOWN_CLASS)
}

/// Generate a filter string of any shape
fn any_filter() -> impl Strategy<Value = String> {
    prop_oneof![
        unknown_name(),
        Just(KNOWN_CLASS.to_string()),
        "[a-zA-Z0-9.$#()_, ]{0,30}",
    ]
}

proptest! {
    // ========================================================================
    // Option filter
    // ========================================================================

    #[test]
    fn filter_options_is_idempotent(args in arg_list()) {
        let once = filter_options(&args, &["select-package"]);
        let twice = filter_options(&once, &["select-package"]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_options_preserves_order(args in arg_list()) {
        let filtered = filter_options(&args, &["select-package"]);
        // The survivors are a subsequence of the input
        let mut remaining = args.iter();
        for token in &filtered {
            prop_assert!(remaining.any(|t| t == token), "{} out of order", token);
        }
    }

    #[test]
    fn filter_options_drops_every_match(args in arg_list()) {
        let filtered = filter_options(&args, &["--select-package"]);
        let scrubbed = filtered
            .iter()
            .all(|t| t != "--select-package" && !t.starts_with("--select-package="));
        prop_assert!(scrubbed, "matching option survived: {:?}", filtered);
    }

    #[test]
    fn filter_options_without_matches_is_identity(
        args in proptest::collection::vec("--opt[a-z]{0,4}(=[a-z]{0,4})?|[a-z]{1,6}", 0..16)
    ) {
        prop_assert_eq!(filter_options(&args, &["select-package"]), args);
    }

    // ========================================================================
    // Filter parser
    // ========================================================================

    #[test]
    fn unknown_name_selects_package(name in unknown_name()) {
        let flags = parse_filter(&name, &known_classes()).expect("never fails without #");
        prop_assert_eq!(flags, vec![SelectionFlag::Package(name)]);
    }

    #[test]
    fn trailing_separator_is_ignored(filter in any_filter()) {
        prop_assume!(!filter.contains('#'));
        let classes = known_classes();
        let with_separator = parse_filter(&format!("{filter}#"), &classes).expect("parse");
        let without = parse_filter(&filter, &classes).expect("parse");
        prop_assert_eq!(with_separator, without);
    }

    #[test]
    fn explicit_signature_is_verbatim(signature in "[a-z][a-zA-Z0-9]{0,10}\\([a-zA-Z., ]{0,20}\\)") {
        let filter = format!("{KNOWN_CLASS}#{signature}");
        let flags = parse_filter(&filter, &known_classes()).expect("parse");
        prop_assert_eq!(flags, vec![SelectionFlag::Method {
            class_name: KNOWN_CLASS.to_string(),
            signature,
        }]);
    }

    #[test]
    fn method_part_on_unknown_class_fails(name in unknown_name(), method in "[a-z]{1,8}\\$?") {
        let filter = format!("{name}#{method}");
        prop_assert!(parse_filter(&filter, &known_classes()).is_err());
    }

    #[test]
    fn anchor_marker_is_inert(method in prop_oneof![Just("single"), Just("overloaded"), Just("absent")]) {
        let classes = known_classes();
        let plain = parse_filter(&format!("{KNOWN_CLASS}#{method}"), &classes).expect("parse");
        let anchored = parse_filter(&format!("{KNOWN_CLASS}#{method}$"), &classes).expect("parse");
        prop_assert_eq!(plain, anchored);
    }

    #[test]
    fn overload_expansion_has_no_duplicates(method in prop_oneof![Just("single"), Just("overloaded")]) {
        let flags = parse_filter(&format!("{KNOWN_CLASS}#{method}"), &known_classes()).expect("parse");
        let unique: HashSet<_> = flags.iter().collect();
        prop_assert_eq!(unique.len(), flags.len());
        prop_assert_eq!(flags.len(), if method == "single" { 1 } else { 4 });
    }

    #[test]
    fn parse_filter_never_panics(filter in any_filter()) {
        let _ = parse_filter(&filter, &known_classes());
    }

    // ========================================================================
    // Argument transformer
    // ========================================================================

    #[test]
    fn no_filter_keeps_raw_args(args in arg_list()) {
        let result = transform_args(&args, None, None, &known_classes()).expect("transform");
        prop_assert_eq!(result, args);
    }

    #[test]
    fn report_dir_is_last(args in arg_list(), dir in "[a-z]{1,8}(/[a-z]{1,8}){0,2}") {
        let report = std::path::PathBuf::from(&dir).join("test.xml");
        let result = transform_args(&args, Some("com.example"), Some(report.as_path()), &known_classes())
            .expect("transform");
        prop_assert_eq!(result.last().cloned(), Some(format!("--reports-dir={dir}")));
        prop_assert!(!result.contains(&"--select-package".to_string()));
    }
}
