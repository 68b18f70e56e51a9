// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Classpath lookup
//!
//! A `ClassPath` is the ordered list of directories and jar archives a JVM
//! would search. Looking up `com.example.Outer$Inner` probes each entry for
//! `com/example/Outer$Inner.class`; the first hit wins.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::classfile::ClassInfo;
use crate::error::ReflectError;

/// Something that can load class metadata by binary name
pub trait ClassResolver {
    /// Load the class with the given dotted binary name
    ///
    /// # Errors
    ///
    /// Returns `ReflectError::ClassNotFound` if the class does not exist, or
    /// another `ReflectError` if it exists but cannot be read.
    fn load_class(&self, class_name: &str) -> Result<ClassInfo, ReflectError>;
}

impl<R: ClassResolver + ?Sized> ClassResolver for &R {
    fn load_class(&self, class_name: &str) -> Result<ClassInfo, ReflectError> {
        (**self).load_class(class_name)
    }
}

/// A single classpath entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    /// A directory of `.class` files laid out by package
    Directory(PathBuf),
    /// A jar (zip) archive
    Jar(PathBuf),
}

impl ClassPathEntry {
    fn from_path(path: PathBuf) -> Self {
        if path.is_dir() {
            ClassPathEntry::Directory(path)
        } else {
            ClassPathEntry::Jar(path)
        }
    }

    /// Path of the entry on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ClassPathEntry::Directory(path) | ClassPathEntry::Jar(path) => path,
        }
    }

    /// Read the raw class file for `entry_name`, if this entry contains it
    fn read(&self, entry_name: &str) -> Result<Option<Vec<u8>>, ReflectError> {
        match self {
            ClassPathEntry::Directory(dir) => {
                let path = dir.join(entry_name);
                if !path.is_file() {
                    return Ok(None);
                }
                fs::read(&path)
                    .map(Some)
                    .map_err(|source| ReflectError::Io { path, source })
            }
            ClassPathEntry::Jar(jar) => {
                let file = match fs::File::open(jar) {
                    Ok(file) => file,
                    Err(e) => {
                        debug!("Skipping unreadable classpath entry {}: {}", jar.display(), e);
                        return Ok(None);
                    }
                };
                let mut archive = match ZipArchive::new(file) {
                    Ok(archive) => archive,
                    Err(e) => {
                        warn!("Skipping invalid jar {}: {}", jar.display(), e);
                        return Ok(None);
                    }
                };
                let mut zipped = match archive.by_name(entry_name) {
                    Ok(zipped) => zipped,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(source) => {
                        return Err(ReflectError::Archive {
                            path: jar.clone(),
                            source,
                        });
                    }
                };
                let mut bytes = Vec::new();
                zipped
                    .read_to_end(&mut bytes)
                    .map_err(|source| ReflectError::Io {
                        path: jar.clone(),
                        source,
                    })?;
                Ok(Some(bytes))
            }
        }
    }
}

/// An ordered list of classpath entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPath {
    entries: Vec<ClassPathEntry>,
}

impl ClassPath {
    /// Build a classpath from explicit paths
    ///
    /// Directories become directory entries; everything else is treated as a
    /// jar. A path whose last component is `*` expands to the jars in its
    /// parent directory, sorted by name.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut entries = Vec::new();
        for path in paths {
            let path = path.into();
            if path.as_os_str().is_empty() {
                continue;
            }
            if path.file_name() == Some(OsStr::new("*")) {
                let dir = path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                entries.extend(expand_wildcard(dir).into_iter().map(ClassPathEntry::Jar));
            } else {
                entries.push(ClassPathEntry::from_path(path));
            }
        }
        Self { entries }
    }

    /// Parse a platform classpath string (`a:b:c` on Unix, `a;b;c` on Windows)
    pub fn parse(classpath: impl AsRef<OsStr>) -> Self {
        Self::new(std::env::split_paths(classpath.as_ref()))
    }

    /// The entries in search order
    #[must_use]
    pub fn entries(&self) -> &[ClassPathEntry] {
        &self.entries
    }

    /// Whether the classpath has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find and parse a class by dotted binary name
    ///
    /// # Errors
    ///
    /// Returns `ReflectError::ClassNotFound` if no entry holds the class, or
    /// an IO / archive / format error if the class is found but unreadable.
    pub fn find_class(&self, class_name: &str) -> Result<ClassInfo, ReflectError> {
        let not_found = || ReflectError::ClassNotFound {
            class_name: class_name.to_string(),
        };
        let entry_name = class_entry_name(class_name).ok_or_else(not_found)?;

        for entry in &self.entries {
            if let Some(bytes) = entry.read(&entry_name)? {
                debug!("Found {} in {}", entry_name, entry.path().display());
                return ClassInfo::parse(&bytes).map_err(|source| ReflectError::ClassFormat {
                    class_name: class_name.to_string(),
                    source,
                });
            }
        }

        Err(not_found())
    }
}

impl ClassResolver for ClassPath {
    fn load_class(&self, class_name: &str) -> Result<ClassInfo, ReflectError> {
        self.find_class(class_name)
    }
}

/// An in-memory symbol table of already-parsed classes
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassInfo>,
}

impl ClassTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, keyed by its binary name
    pub fn insert(&mut self, class: ClassInfo) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Builder-style `insert`
    #[must_use]
    pub fn with_class(mut self, class: ClassInfo) -> Self {
        self.insert(class);
        self
    }

    /// Number of classes in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassResolver for ClassTable {
    fn load_class(&self, class_name: &str) -> Result<ClassInfo, ReflectError> {
        self.classes
            .get(class_name)
            .cloned()
            .ok_or_else(|| ReflectError::ClassNotFound {
                class_name: class_name.to_string(),
            })
    }
}

/// Map a binary class name to its entry path, e.g. `a.b.C$D` → `a/b/C$D.class`
///
/// Returns `None` for names no JVM would accept as a binary class name.
#[must_use]
pub fn class_entry_name(class_name: &str) -> Option<String> {
    let invalid = class_name.is_empty()
        || class_name.starts_with('.')
        || class_name.ends_with('.')
        || class_name.contains("..")
        || class_name.contains(['/', '\\']);
    if invalid {
        return None;
    }
    Some(format!("{}.class", class_name.replace('.', "/")))
}

fn expand_wildcard(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Cannot expand classpath wildcard in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut jars: Vec<PathBuf> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
        })
        .collect();
    jars.sort();
    jars
}
