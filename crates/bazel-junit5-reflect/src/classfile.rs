// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JVM class file parsing
//!
//! Only the parts of the class file needed for method introspection are
//! retained: the constant pool strings, the class names, and the method table.
//! Everything else (fields, attributes, bytecode) is skipped by length.
//!
//! # Example
//!
//! ```no_run
//! use bazel_junit5_reflect::ClassInfo;
//!
//! let bytes = std::fs::read("com/example/FooTest.class").unwrap();
//! let class = ClassInfo::parse(&bytes).unwrap();
//! for method in class.declared_methods("testSomething") {
//!     println!("{}", method.signature());
//! }
//! ```

use crate::descriptor::MethodDescriptor;
use crate::error::ClassFormatError;

/// Magic number at the start of every class file
pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// `ACC_BRIDGE` method flag
pub const ACC_BRIDGE: u16 = 0x0040;
/// `ACC_SYNTHETIC` method flag
pub const ACC_SYNTHETIC: u16 = 0x1000;

// ============================================================================
// Constant pool tags (JVMS §4.4)
// ============================================================================

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

// ============================================================================
// Public types
// ============================================================================

/// A method declared directly on a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Method name (`<init>` for constructors)
    pub name: String,
    /// Raw access flags
    pub access_flags: u16,
    /// Parsed descriptor
    pub descriptor: MethodDescriptor,
}

impl MethodInfo {
    /// Whether the compiler generated this method (bridge or synthetic)
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.access_flags & (ACC_BRIDGE | ACC_SYNTHETIC) != 0
    }

    /// Whether this is `<init>` or `<clinit>`
    #[must_use]
    pub fn is_initializer(&self) -> bool {
        self.name == "<init>" || self.name == "<clinit>"
    }

    /// Render as `name(type, type, ...)`
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.descriptor.parameter_list())
    }
}

/// The introspectable parts of a class file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Dotted binary name, e.g. `com.example.Outer$Inner`
    pub name: String,
    /// Dotted binary name of the superclass (`None` only for `java.lang.Object`)
    pub super_name: Option<String>,
    /// Raw class access flags
    pub access_flags: u16,
    /// Class file major version
    pub major_version: u16,
    /// Declared methods in class file order
    pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
    /// Parse a class file
    ///
    /// # Errors
    ///
    /// Returns `ClassFormatError` if the bytes are not a well-formed class file.
    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFormatError> {
        let mut reader = Reader::new(bytes);

        let magic = reader.u32()?;
        if magic != CLASS_MAGIC {
            return Err(ClassFormatError::BadMagic(magic));
        }
        let _minor_version = reader.u16()?;
        let major_version = reader.u16()?;

        let pool = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.u16()?;
        let this_class = reader.u16()?;
        let super_class = reader.u16()?;

        let name = pool.class_name(this_class)?;
        let super_name = if super_class == 0 {
            None
        } else {
            Some(pool.class_name(super_class)?)
        };

        let interfaces_count = reader.u16()?;
        reader.skip(usize::from(interfaces_count) * 2)?;

        let fields_count = reader.u16()?;
        for _ in 0..fields_count {
            // access_flags, name_index, descriptor_index
            reader.skip(6)?;
            skip_attributes(&mut reader)?;
        }

        let methods_count = reader.u16()?;
        let mut methods = Vec::with_capacity(usize::from(methods_count));
        for _ in 0..methods_count {
            let access_flags = reader.u16()?;
            let name = pool.utf8(reader.u16()?)?.to_string();
            let descriptor = pool.utf8(reader.u16()?)?.parse::<MethodDescriptor>()?;
            skip_attributes(&mut reader)?;
            methods.push(MethodInfo {
                name,
                access_flags,
                descriptor,
            });
        }

        Ok(Self {
            name,
            super_name,
            access_flags,
            major_version,
            methods,
        })
    }

    /// Methods declared on this class with exactly the given name
    ///
    /// Constructors and static initializers are never returned;
    /// compiler-generated bridge and synthetic methods are left out.
    pub fn declared_methods<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> {
        self.methods
            .iter()
            .filter(move |m| m.name == name && !m.is_initializer() && !m.is_generated())
    }
}

fn skip_attributes(reader: &mut Reader<'_>) -> Result<(), ClassFormatError> {
    let count = reader.u16()?;
    for _ in 0..count {
        let _name_index = reader.u16()?;
        let length = reader.u32()?;
        reader.skip(length as usize)?;
    }
    Ok(())
}

// ============================================================================
// Constant pool
// ============================================================================

#[derive(Debug, Clone)]
enum Constant {
    /// Slot 0, and the slot after a Long or Double
    Unusable,
    Utf8(String),
    Class { name_index: u16 },
    Other,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(reader: &mut Reader<'_>) -> Result<Self, ClassFormatError> {
        let count = reader.u16()?;
        let mut entries = Vec::with_capacity(usize::from(count));
        entries.push(Constant::Unusable);

        let mut index: u16 = 1;
        while index < count {
            let tag = reader.u8()?;
            let entry = match tag {
                TAG_UTF8 => {
                    let len = reader.u16()?;
                    let raw = reader.bytes(usize::from(len))?;
                    let text = decode_modified_utf8(raw)
                        .ok_or(ClassFormatError::InvalidUtf8 { index })?;
                    Constant::Utf8(text)
                }
                TAG_CLASS => Constant::Class {
                    name_index: reader.u16()?,
                },
                TAG_STRING | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                    reader.skip(2)?;
                    Constant::Other
                }
                TAG_METHOD_HANDLE => {
                    reader.skip(3)?;
                    Constant::Other
                }
                TAG_INTEGER
                | TAG_FLOAT
                | TAG_FIELDREF
                | TAG_METHODREF
                | TAG_INTERFACE_METHODREF
                | TAG_NAME_AND_TYPE
                | TAG_DYNAMIC
                | TAG_INVOKE_DYNAMIC => {
                    reader.skip(4)?;
                    Constant::Other
                }
                TAG_LONG | TAG_DOUBLE => {
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    index = index.saturating_add(1);
                    Constant::Unusable
                }
                _ => return Err(ClassFormatError::UnknownConstantTag { index, tag }),
            };
            entries.push(entry);
            index = index.saturating_add(1);
        }

        Ok(Self { entries })
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassFormatError> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Utf8(text)) => Ok(text),
            _ => Err(ClassFormatError::BadConstantIndex {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Resolve a `CONSTANT_Class` entry to a dotted binary name
    fn class_name(&self, index: u16) -> Result<String, ClassFormatError> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Class { name_index }) => Ok(self.utf8(*name_index)?.replace('/', ".")),
            _ => Err(ClassFormatError::BadConstantIndex {
                index,
                expected: "Class",
            }),
        }
    }
}

/// Decode the "modified UTF-8" used by class files
///
/// Differs from standard UTF-8 in that NUL is encoded as `C0 80` and
/// supplementary characters are stored as two three-byte surrogates.
fn decode_modified_utf8(bytes: &[u8]) -> Option<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = u16::from(bytes[i]);
        if b0 & 0x80 == 0 {
            if b0 == 0 {
                return None;
            }
            units.push(b0);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = u16::from(*bytes.get(i + 1)?);
            if b1 & 0xC0 != 0x80 {
                return None;
            }
            units.push(((b0 & 0x1F) << 6) | (b1 & 0x3F));
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = u16::from(*bytes.get(i + 1)?);
            let b2 = u16::from(*bytes.get(i + 2)?);
            if b1 & 0xC0 != 0x80 || b2 & 0xC0 != 0x80 {
                return None;
            }
            units.push(((b0 & 0x0F) << 12) | ((b1 & 0x3F) << 6) | (b2 & 0x3F));
            i += 3;
        } else {
            return None;
        }
    }

    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

// ============================================================================
// Byte reader
// ============================================================================

/// Big-endian cursor over class file bytes
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], ClassFormatError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(ClassFormatError::UnexpectedEof {
                offset: self.offset,
            })?;
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassFormatError> {
        self.bytes(len).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, ClassFormatError> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFormatError> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFormatError> {
        let b = self.bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ClassFileBuilder;
    use similar_asserts::assert_eq;

    fn overloaded_class() -> Vec<u8> {
        ClassFileBuilder::new("com.example.Outer$TestClass")
            .method("<init>", "()V")
            .method("testMethod", "()V")
            .method("testMethod", "(I)V")
            .method("testMethod", "(ILjava/lang/Integer;)V")
            .method("testMethod1", "()V")
            .build()
    }

    #[test]
    fn test_parse_class_names() {
        let class = ClassInfo::parse(&overloaded_class()).expect("Should parse");
        assert_eq!(class.name, "com.example.Outer$TestClass");
        assert_eq!(class.super_name.as_deref(), Some("java.lang.Object"));
        assert_eq!(class.major_version, 52);
    }

    #[test]
    fn test_methods_in_declaration_order() {
        let class = ClassInfo::parse(&overloaded_class()).expect("Should parse");
        let signatures: Vec<String> = class.methods.iter().map(MethodInfo::signature).collect();
        assert_eq!(
            signatures,
            vec![
                "<init>()",
                "testMethod()",
                "testMethod(int)",
                "testMethod(int, java.lang.Integer)",
                "testMethod1()",
            ]
        );
    }

    #[test]
    fn test_declared_methods_exact_name() {
        let class = ClassInfo::parse(&overloaded_class()).expect("Should parse");
        assert_eq!(class.declared_methods("testMethod").count(), 3);
        assert_eq!(class.declared_methods("testMethod1").count(), 1);
        assert_eq!(class.declared_methods("test").count(), 0);
        assert_eq!(class.declared_methods("<init>").count(), 0);
    }

    #[test]
    fn test_declared_methods_skips_bridges() {
        let bytes = ClassFileBuilder::new("com.example.Impl")
            .method("call", "()Ljava/lang/String;")
            .method_with_flags("call", "()Ljava/lang/Object;", ACC_BRIDGE | ACC_SYNTHETIC)
            .build();
        let class = ClassInfo::parse(&bytes).expect("Should parse");
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.declared_methods("call").count(), 1);
    }

    #[test]
    fn test_declared_methods_skips_erasure_bridge() {
        // Comparable<Version> compiles to compareTo(Version) plus an erased
        // compareTo(Object) bridge with a different parameter list
        let bytes = ClassFileBuilder::new("com.example.Version")
            .method("compareTo", "(Lcom/example/Version;)I")
            .method_with_flags(
                "compareTo",
                "(Ljava/lang/Object;)I",
                0x0001 | ACC_BRIDGE | ACC_SYNTHETIC,
            )
            .build();
        let class = ClassInfo::parse(&bytes).expect("Should parse");

        let all: Vec<String> = class.methods.iter().map(MethodInfo::signature).collect();
        assert_eq!(
            all,
            vec!["compareTo(com.example.Version)", "compareTo(java.lang.Object)"]
        );

        let declared: Vec<String> = class
            .declared_methods("compareTo")
            .map(MethodInfo::signature)
            .collect();
        assert_eq!(declared, vec!["compareTo(com.example.Version)"]);
    }

    #[test]
    fn test_skips_fields_attributes_and_wide_constants() {
        let bytes = ClassFileBuilder::new("com.example.Wide")
            .long_constant(42)
            .double_constant(1.5)
            .field("count", "J")
            .method_with_code("run", "([Ljava/lang/String;)V", &[0xB1])
            .build();
        let class = ClassInfo::parse(&bytes).expect("Should parse");
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].signature(), "run(java.lang.String[])");
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = overloaded_class();
        bytes[0] = 0xCB;
        assert!(matches!(
            ClassInfo::parse(&bytes),
            Err(ClassFormatError::BadMagic(0xCBFE_BABE))
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = overloaded_class();
        for len in [0, 3, 9, bytes.len() - 3] {
            assert!(
                matches!(
                    ClassInfo::parse(&bytes[..len]),
                    Err(ClassFormatError::UnexpectedEof { .. })
                ),
                "length {len} should be truncated"
            );
        }
    }

    #[test]
    fn test_unknown_constant_tag() {
        // magic, version, pool count 2, tag 99
        let bytes = [0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52, 0, 2, 99];
        assert_eq!(
            ClassInfo::parse(&bytes),
            Err(ClassFormatError::UnknownConstantTag { index: 1, tag: 99 })
        );
    }

    #[test]
    fn test_modified_utf8() {
        assert_eq!(decode_modified_utf8(b"plain").as_deref(), Some("plain"));
        assert_eq!(decode_modified_utf8(&[0x61, 0xC0, 0x80]).as_deref(), Some("a\0"));
        // U+1F600 as a surrogate pair
        assert_eq!(
            decode_modified_utf8(&[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]).as_deref(),
            Some("\u{1F600}")
        );
        assert_eq!(decode_modified_utf8(&[0xC0]), None);
        assert_eq!(decode_modified_utf8(&[0xFF]), None);
    }
}
