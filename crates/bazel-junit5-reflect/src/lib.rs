// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! bazel-junit5-reflect: JVM class introspection for bazel-junit5
//!
//! This library crate reads compiled class files from a test classpath and
//! renders the declared overloads of a method as JUnit Platform method
//! signatures, without starting a JVM.
//!
//! # Example
//!
//! ```no_run
//! use bazel_junit5_reflect::{ClassPath, resolve_overloads};
//!
//! let classpath = ClassPath::parse("bazel-bin/tests/classes:lib/junit.jar");
//! let overloads = resolve_overloads(&classpath, "com.example.FooTest", "testFoo")
//!     .expect("resolve overloads");
//!
//! for signature in overloads {
//!     println!("--select-method=com.example.FooTest#{signature}");
//! }
//! ```

#![warn(missing_docs)]

pub mod classfile;
pub mod classpath;
pub mod descriptor;
pub mod error;
pub mod resolver;
#[doc(hidden)]
pub mod testing;

pub use classfile::{ClassInfo, MethodInfo};
pub use classpath::{ClassPath, ClassPathEntry, ClassResolver, ClassTable};
pub use descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use error::{ClassFormatError, ReflectError};
pub use resolver::resolve_overloads;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::classfile::ClassInfo;
    pub use crate::classpath::{ClassPath, ClassResolver, ClassTable};
    pub use crate::error::ReflectError;
    pub use crate::resolver::resolve_overloads;
}
