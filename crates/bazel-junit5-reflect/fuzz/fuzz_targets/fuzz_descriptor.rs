#![no_main]

//! Fuzz target for method descriptor parsing

use bazel_junit5_reflect::MethodDescriptor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(descriptor) = data.parse::<MethodDescriptor>() {
        let _ = descriptor.parameter_list();
    }
});
