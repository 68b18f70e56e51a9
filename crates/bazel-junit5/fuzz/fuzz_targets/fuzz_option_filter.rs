#![no_main]

//! Fuzz target for launcher option filtering

use bazel_junit5::filter_options;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|args: Vec<String>| {
    let once = filter_options(&args, &["select-package"]);
    let twice = filter_options(&once, &["select-package"]);
    assert_eq!(once, twice);
    assert!(once.len() <= args.len());
});
