// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Method overload resolution

use tracing::debug;

use crate::classpath::ClassResolver;
use crate::error::ReflectError;

/// Render every declared overload of `method_name` on `class_name`
///
/// Each overload becomes `name(type, type, ...)`, in class file order.
/// Only methods declared directly on the class are considered. A class with
/// no such method yields an empty list.
///
/// # Errors
///
/// Returns the resolver's `ReflectError` if the class cannot be loaded.
pub fn resolve_overloads<R: ClassResolver + ?Sized>(
    resolver: &R,
    class_name: &str,
    method_name: &str,
) -> Result<Vec<String>, ReflectError> {
    let class = resolver.load_class(class_name)?;
    let signatures: Vec<String> = class
        .declared_methods(method_name)
        .map(|method| method.signature())
        .collect();
    debug!(
        "Resolved {} overload(s) of {}#{}",
        signatures.len(),
        class_name,
        method_name
    );
    Ok(signatures)
}
