// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Class file fixtures
//!
//! `ClassFileBuilder` writes small but well-formed class files so that tests
//! and benchmarks can exercise the parser and the classpath without a JDK.
//!
//! ```
//! use bazel_junit5_reflect::testing::ClassFileBuilder;
//! use bazel_junit5_reflect::ClassInfo;
//!
//! let bytes = ClassFileBuilder::new("com.example.FooTest")
//!     .method("testFoo", "()V")
//!     .build();
//! let class = ClassInfo::parse(&bytes).unwrap();
//! assert_eq!(class.name, "com.example.FooTest");
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;

struct MethodEntry {
    access_flags: u16,
    name_index: u16,
    descriptor_index: u16,
    code: Option<Vec<u8>>,
}

/// Builder for minimal class files (major version 52)
pub struct ClassFileBuilder {
    binary_name: String,
    pool: Vec<u8>,
    pool_count: u16,
    utf8_indices: HashMap<String, u16>,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<(u16, u16)>,
    methods: Vec<MethodEntry>,
}

impl ClassFileBuilder {
    /// Start a class with the given dotted binary name, extending `java.lang.Object`
    #[must_use]
    pub fn new(binary_name: &str) -> Self {
        let mut builder = Self {
            binary_name: binary_name.to_string(),
            pool: Vec::new(),
            pool_count: 1,
            utf8_indices: HashMap::new(),
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        };
        builder.this_class = builder.class_constant(binary_name);
        builder.super_class = builder.class_constant("java.lang.Object");
        builder
    }

    /// Add a public method with a descriptor such as `(I)V`
    #[must_use]
    pub fn method(self, name: &str, descriptor: &str) -> Self {
        self.method_with_flags(name, descriptor, ACC_PUBLIC)
    }

    /// Add a method with explicit access flags
    #[must_use]
    pub fn method_with_flags(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        self.methods.push(MethodEntry {
            access_flags,
            name_index,
            descriptor_index,
            code: None,
        });
        self
    }

    /// Add a public method carrying a `Code` attribute with the given bytecode
    #[must_use]
    pub fn method_with_code(mut self, name: &str, descriptor: &str, code: &[u8]) -> Self {
        self = self.method(name, descriptor);
        self.utf8("Code");
        if let Some(last) = self.methods.last_mut() {
            last.code = Some(code.to_vec());
        }
        self
    }

    /// Add a field with a `Deprecated` attribute
    #[must_use]
    pub fn field(mut self, name: &str, descriptor: &str) -> Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        self.utf8("Deprecated");
        self.fields.push((name_index, descriptor_index));
        self
    }

    /// Declare an implemented interface
    #[must_use]
    pub fn interface(mut self, binary_name: &str) -> Self {
        let index = self.class_constant(binary_name);
        self.interfaces.push(index);
        self
    }

    /// Add a `CONSTANT_Long` (two pool slots)
    #[must_use]
    pub fn long_constant(mut self, value: i64) -> Self {
        self.pool.push(5);
        self.pool.extend_from_slice(&value.to_be_bytes());
        self.pool_count += 2;
        self
    }

    /// Add a `CONSTANT_Double` (two pool slots)
    #[must_use]
    pub fn double_constant(mut self, value: f64) -> Self {
        self.pool.push(6);
        self.pool.extend_from_slice(&value.to_bits().to_be_bytes());
        self.pool_count += 2;
        self
    }

    /// The path of this class relative to a classpath root, e.g. `com/example/Foo.class`
    #[must_use]
    pub fn entry_name(&self) -> String {
        format!("{}.class", self.binary_name.replace('.', "/"))
    }

    /// Serialize the class file
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABE_u32.to_be_bytes());
        put_u16(&mut out, 0);
        put_u16(&mut out, 52);

        put_u16(&mut out, self.pool_count);
        out.extend_from_slice(&self.pool);

        put_u16(&mut out, ACC_PUBLIC | ACC_SUPER);
        put_u16(&mut out, self.this_class);
        put_u16(&mut out, self.super_class);

        put_u16(&mut out, self.interfaces.len() as u16);
        for index in &self.interfaces {
            put_u16(&mut out, *index);
        }

        put_u16(&mut out, self.fields.len() as u16);
        for (name_index, descriptor_index) in &self.fields {
            put_u16(&mut out, ACC_PUBLIC);
            put_u16(&mut out, *name_index);
            put_u16(&mut out, *descriptor_index);
            put_u16(&mut out, 1);
            put_u16(&mut out, self.utf8_indices["Deprecated"]);
            out.extend_from_slice(&0u32.to_be_bytes());
        }

        put_u16(&mut out, self.methods.len() as u16);
        for method in &self.methods {
            put_u16(&mut out, method.access_flags);
            put_u16(&mut out, method.name_index);
            put_u16(&mut out, method.descriptor_index);
            match &method.code {
                Some(code) => {
                    let mut body = Vec::new();
                    put_u16(&mut body, 1); // max_stack
                    put_u16(&mut body, 1); // max_locals
                    body.extend_from_slice(&(code.len() as u32).to_be_bytes());
                    body.extend_from_slice(code);
                    put_u16(&mut body, 0); // exception table
                    put_u16(&mut body, 0); // attributes

                    put_u16(&mut out, 1);
                    put_u16(&mut out, self.utf8_indices["Code"]);
                    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
                    out.extend_from_slice(&body);
                }
                None => put_u16(&mut out, 0),
            }
        }

        // class attributes
        put_u16(&mut out, 0);
        out
    }

    /// Write the class file under a classpath directory, creating package directories
    ///
    /// # Errors
    ///
    /// Returns any IO error from creating directories or writing the file.
    pub fn write_to(&self, root: &Path) -> std::io::Result<PathBuf> {
        let path = root.join(self.entry_name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.build())?;
        Ok(path)
    }

    fn utf8(&mut self, text: &str) -> u16 {
        if let Some(&index) = self.utf8_indices.get(text) {
            return index;
        }
        let index = self.pool_count;
        self.pool.push(1);
        put_u16(&mut self.pool, text.len() as u16);
        self.pool.extend_from_slice(text.as_bytes());
        self.pool_count += 1;
        self.utf8_indices.insert(text.to_string(), index);
        index
    }

    fn class_constant(&mut self, binary_name: &str) -> u16 {
        let name_index = self.utf8(&binary_name.replace('.', "/"));
        let index = self.pool_count;
        self.pool.push(7);
        put_u16(&mut self.pool, name_index);
        self.pool_count += 1;
        index
    }
}

/// Write a jar archive containing the given classes
///
/// # Errors
///
/// Returns any IO or zip error from writing the archive.
pub fn write_jar(path: &Path, classes: &[ClassFileBuilder]) -> zip::result::ZipResult<()> {
    let file = fs::File::create(path)?;
    let mut jar = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    jar.start_file("META-INF/MANIFEST.MF", options)?;
    jar.write_all(b"Manifest-Version: 1.0\r\n\r\n")?;

    for class in classes {
        jar.start_file(class.entry_name(), options)?;
        jar.write_all(&class.build())?;
    }

    jar.finish()?;
    Ok(())
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}
