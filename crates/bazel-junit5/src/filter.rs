// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test filter parsing
//!
//! Bazel hands the runner a single `--test_filter` string. This module turns
//! it into JUnit Platform selection flags:
//!
//! | Filter                     | Flags                                           |
//! |----------------------------|-------------------------------------------------|
//! | `com.example`              | `--select-package=com.example`                  |
//! | `com.example.FooTest`      | `--select-class=com.example.FooTest`            |
//! | `com.example.FooTest#bar`  | one `--select-method=...#bar(...)` per overload |
//! | `com.example.FooTest#bar$` | same as above                                   |
//! | `com.example.FooTest#bar()`| `--select-method=com.example.FooTest#bar()`     |

use std::fmt;

use bazel_junit5_reflect::{ClassResolver, resolve_overloads};
use tracing::{debug, warn};

use crate::error::BridgeError;

/// Separates the class part of a filter from its method part
pub const METHOD_SEPARATOR: char = '#';

/// Trailing marker Bazel IDE integrations append to exact method names
pub const ANCHOR_MARKER: char = '$';

/// A launcher-native selection flag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionFlag {
    /// `--select-package=<name>`
    Package(String),
    /// `--select-class=<name>`
    Class(String),
    /// `--select-method=<class>#<signature>`
    Method {
        /// Fully qualified class name
        class_name: String,
        /// `name(params)` signature
        signature: String,
    },
}

impl fmt::Display for SelectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionFlag::Package(name) => write!(f, "--select-package={name}"),
            SelectionFlag::Class(name) => write!(f, "--select-class={name}"),
            SelectionFlag::Method {
                class_name,
                signature,
            } => write!(f, "--select-method={class_name}{METHOD_SEPARATOR}{signature}"),
        }
    }
}

impl From<SelectionFlag> for String {
    fn from(flag: SelectionFlag) -> Self {
        flag.to_string()
    }
}

/// Parse a Bazel test filter into selection flags
///
/// Class lookups go through `resolver`. A filter without `#` that does not
/// name a loadable class is assumed to be a package; this is never checked.
///
/// # Errors
///
/// Returns `BridgeError::ClassResolution` if the filter has a non-empty
/// method part and its class part cannot be loaded.
pub fn parse_filter<R: ClassResolver + ?Sized>(
    filter: &str,
    resolver: &R,
) -> Result<Vec<SelectionFlag>, BridgeError> {
    let Some((class_name, method_part)) = filter.split_once(METHOD_SEPARATOR) else {
        return Ok(vec![select_class_or_package(filter, resolver)]);
    };

    if method_part.is_empty() {
        return Ok(vec![select_class_or_package(class_name, resolver)]);
    }

    let resolution_error = |source| BridgeError::ClassResolution {
        class_name: class_name.to_string(),
        source,
    };

    if method_part.contains('(') {
        resolver.load_class(class_name).map_err(resolution_error)?;
        debug!("Using explicit method signature {}", method_part);
        return Ok(vec![SelectionFlag::Method {
            class_name: class_name.to_string(),
            signature: method_part.to_string(),
        }]);
    }

    let method_name = method_part
        .strip_suffix(ANCHOR_MARKER)
        .unwrap_or(method_part);
    let overloads =
        resolve_overloads(resolver, class_name, method_name).map_err(resolution_error)?;
    if overloads.is_empty() {
        warn!(
            "{} declares no method named {}; no tests will be selected",
            class_name, method_name
        );
    }

    Ok(overloads
        .into_iter()
        .map(|signature| SelectionFlag::Method {
            class_name: class_name.to_string(),
            signature,
        })
        .collect())
}

fn select_class_or_package<R: ClassResolver + ?Sized>(name: &str, resolver: &R) -> SelectionFlag {
    match resolver.load_class(name) {
        Ok(_) => SelectionFlag::Class(name.to_string()),
        Err(e) => {
            debug!("{} is not a loadable class ({}); selecting it as a package", name, e);
            SelectionFlag::Package(name.to_string())
        }
    }
}
