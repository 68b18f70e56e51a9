#![no_main]

//! Fuzz target for class file parsing
//!
//! Class files come from arbitrary jars on the classpath and must never
//! cause a panic.

use bazel_junit5_reflect::ClassInfo;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(class) = ClassInfo::parse(data) {
        for method in &class.methods {
            let _ = method.signature();
        }
    }
});
