// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for bazel-junit5-reflect

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating or loading a class
#[derive(Debug, Error)]
pub enum ReflectError {
    /// No classpath entry contains the class
    #[error("Class not found: {class_name}")]
    ClassNotFound {
        /// The binary class name that was looked up
        class_name: String,
    },

    /// A class file exists but could not be read
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path of the class file or archive
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An entry of a jar archive could not be read
    #[error("Archive error in {}: {source}", .path.display())]
    Archive {
        /// Path of the jar archive
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// The class file was found but is not a valid class file
    #[error("Invalid class file for {class_name}: {source}")]
    ClassFormat {
        /// The binary class name that was loaded
        class_name: String,
        /// What was wrong with the class file
        #[source]
        source: ClassFormatError,
    },
}

impl ReflectError {
    /// Whether this error means the class simply does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReflectError::ClassNotFound { .. })
    }
}

/// Errors produced while parsing class file bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFormatError {
    /// Input ended before a structure was complete
    #[error("Unexpected end of class file at offset {offset}")]
    UnexpectedEof {
        /// Byte offset of the read that failed
        offset: usize,
    },

    /// The file does not start with `0xCAFEBABE`
    #[error("Bad magic number: {0:#010x}")]
    BadMagic(u32),

    /// A constant pool entry has a tag this parser does not know
    #[error("Unknown constant pool tag {tag} at index {index}")]
    UnknownConstantTag {
        /// Constant pool index
        index: u16,
        /// The offending tag byte
        tag: u8,
    },

    /// A constant pool reference is out of range or points at the wrong kind of entry
    #[error("Bad constant pool index {index}: expected {expected}")]
    BadConstantIndex {
        /// Constant pool index
        index: u16,
        /// Kind of entry that was expected
        expected: &'static str,
    },

    /// A Utf8 constant is not valid modified UTF-8
    #[error("Invalid modified UTF-8 in constant {index}")]
    InvalidUtf8 {
        /// Constant pool index
        index: u16,
    },

    /// A field or method descriptor could not be parsed
    #[error("Invalid descriptor: {descriptor}")]
    InvalidDescriptor {
        /// The descriptor text
        descriptor: String,
    },
}
