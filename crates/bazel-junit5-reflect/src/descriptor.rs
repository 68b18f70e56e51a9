// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Field and method descriptors
//!
//! Descriptors are the compact type strings stored in class files, e.g.
//! `(ILjava/lang/Integer;)V`. This module parses them and renders parameter
//! types the way the JUnit Platform expects them in `--select-method`:
//! primitive names unqualified, reference types as dotted binary names and
//! arrays as `component[]`.

use std::fmt;
use std::str::FromStr;

use crate::error::ClassFormatError;

/// A primitive JVM type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `D`
    Double,
    /// `F`
    Float,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `S`
    Short,
    /// `Z`
    Boolean,
}

impl BaseType {
    fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'B' => BaseType::Byte,
            b'C' => BaseType::Char,
            b'D' => BaseType::Double,
            b'F' => BaseType::Float,
            b'I' => BaseType::Int,
            b'J' => BaseType::Long,
            b'S' => BaseType::Short,
            b'Z' => BaseType::Boolean,
            _ => return None,
        })
    }

    /// The Java source name of the type
    #[must_use]
    pub fn java_name(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }
}

/// The type of a field, parameter or array component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A primitive type
    Base(BaseType),
    /// A class or interface, stored as a dotted binary name (`java.lang.String`)
    Object(String),
    /// An array of the inner type
    Array(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(base) => f.write_str(base.java_name()),
            FieldType::Object(name) => f.write_str(name),
            FieldType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

/// Return type of a method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// `V`
    Void,
    /// Any non-void type
    Value(FieldType),
}

/// A parsed method descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Parameter types in declaration order
    pub parameters: Vec<FieldType>,
    /// Return type
    pub return_type: ReturnType,
}

impl MethodDescriptor {
    /// Render the parameter list as JUnit expects it, e.g. `int, java.lang.Integer`
    #[must_use]
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for MethodDescriptor {
    type Err = ClassFormatError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let invalid = || ClassFormatError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
        };

        let bytes = descriptor.as_bytes();
        if bytes.first() != Some(&b'(') {
            return Err(invalid());
        }

        let mut pos = 1;
        let mut parameters = Vec::new();
        loop {
            match bytes.get(pos) {
                Some(b')') => {
                    pos += 1;
                    break;
                }
                Some(_) => {
                    let (ty, next) = parse_field_type(bytes, pos).ok_or_else(invalid)?;
                    parameters.push(ty);
                    pos = next;
                }
                None => return Err(invalid()),
            }
        }

        let return_type = if bytes.get(pos) == Some(&b'V') {
            pos += 1;
            ReturnType::Void
        } else {
            let (ty, next) = parse_field_type(bytes, pos).ok_or_else(invalid)?;
            pos = next;
            ReturnType::Value(ty)
        };

        if pos != bytes.len() {
            return Err(invalid());
        }

        Ok(Self {
            parameters,
            return_type,
        })
    }
}

impl FromStr for FieldType {
    type Err = ClassFormatError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        match parse_field_type(descriptor.as_bytes(), 0) {
            Some((ty, end)) if end == descriptor.len() => Ok(ty),
            _ => Err(ClassFormatError::InvalidDescriptor {
                descriptor: descriptor.to_string(),
            }),
        }
    }
}

/// Parse one field type starting at `pos`, returning it and the next position
fn parse_field_type(bytes: &[u8], pos: usize) -> Option<(FieldType, usize)> {
    let tag = *bytes.get(pos)?;
    match tag {
        b'L' => {
            let rest = &bytes[pos + 1..];
            let len = rest.iter().position(|&b| b == b';')?;
            if len == 0 {
                return None;
            }
            let internal = std::str::from_utf8(&rest[..len]).ok()?;
            Some((
                FieldType::Object(internal.replace('/', ".")),
                pos + 1 + len + 1,
            ))
        }
        b'[' => {
            let (component, next) = parse_field_type(bytes, pos + 1)?;
            Some((FieldType::Array(Box::new(component)), next))
        }
        _ => BaseType::from_tag(tag).map(|base| (FieldType::Base(base), pos + 1)),
    }
}
