//! Provides mechanisms to parse and then inspect java class files. Java classes have very specific
//! formats that can be parsed. However, because the format relies on constantly referring back to
//! a constant pool, information can be hard to actually parse. This library provides easier mechanisms
//! for digesting this info.
//!
//! There are three main entrance points to the api: [`parse_file`][0], [`parse_bytes`][1], and
//! [`ClassIndex`][2]
//!
//! [0]: parse_file
//! [1]: parse_bytes
//! [2]: ClassIndex
//!
//! # Example
//! If you want to inspect many classes, it may be better to collect them into an index, then
//! look classes up by their binary name.
//! ```no_run
//! # use java_class_parser::{parse_file, ClassIndex};
//! let mut index = ClassIndex::new();
//! index.insert(parse_file("Square.class").expect("couldn't parse class"));
//! index.insert(parse_file("Rectangle.class").expect("couldn't parse class"));
//! let square = index.find("com/example/Square").expect("couldn't find class");
//! let rectangle = index.find_super(square).expect("couldn't find super class");
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

mod constant_pool;
pub mod error;
pub mod inheritance;
pub(crate) mod raw_java_class;
mod structures;

use crate::error::Error;
pub use structures::*;

/// A set of parsed classes that can be looked up by their binary name.
///
/// Classes are kept in the order they were inserted. Inserting a class whose name is already
/// present keeps both, but lookups by name always find the first one.
#[derive(Debug, Default, Clone)]
pub struct ClassIndex {
    classes: Vec<JavaClass>,
    by_name: HashMap<FQNameBuf, usize>,
}

impl ClassIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class to the index. Returns false if a class with the same name was already
    /// present, lookups keep finding that one.
    pub fn insert(&mut self, class: JavaClass) -> bool {
        let position = self.classes.len();
        let name = class.this().to_fqname_buf();
        self.classes.push(class);
        match self.by_name.entry(name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(position);
                true
            }
        }
    }

    /// Finds a class based on its binary name, such as `com/example/Square`.
    pub fn find<P: AsFullyQualifiedName + ?Sized>(&self, path: &P) -> Option<&JavaClass> {
        self.by_name
            .get(path.as_fcq())
            .map(|&position| &self.classes[position])
    }

    /// Tries to find the super class of a java class in this index
    pub fn find_super(&self, class: &JavaClass) -> Option<&JavaClass> {
        class.super_name().and_then(|name| self.find(name))
    }

    /// Finds the interfaces of a class that are present in this index, in declaration order
    pub fn find_interfaces<'a>(&'a self, class: &'a JavaClass) -> impl Iterator<Item = &'a JavaClass> {
        class.interfaces().filter_map(|name| self.find(name))
    }

    /// Iterates over every class in insertion order, duplicates included
    pub fn iter(&self) -> std::slice::Iter<'_, JavaClass> {
        self.classes.iter()
    }

    /// The number of classes inserted, duplicates included
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes have been inserted
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<JavaClass> for ClassIndex {
    fn from_iter<T: IntoIterator<Item = JavaClass>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl Extend<JavaClass> for ClassIndex {
    fn extend<T: IntoIterator<Item = JavaClass>>(&mut self, iter: T) {
        for class in iter {
            self.insert(class);
        }
    }
}

impl<'a> IntoIterator for &'a ClassIndex {
    type Item = &'a JavaClass;
    type IntoIter = std::slice::Iter<'a, JavaClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse bytes into a java class.
///
/// # Error
/// Will return an error if the byte stream does not resolve to a valid java class
pub fn parse_bytes<R: Read>(mut read: R) -> Result<JavaClass, Error> {
    let mut buffer = vec![];
    read.read_to_end(&mut buffer)?;

    let raw = raw_java_class::parse_class_file_bytes(&buffer[..])?;
    JavaClass::new(raw)
}

/// Parses the contents of a file into a java class
///
/// # Error
/// Will return an error if the file does not exist, or the contents of the file doesn't resolve
/// to a valid java class.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<JavaClass, Error> {
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use itest_common::{access, ClassFileBuilder};

    fn class(name: &str, super_name: &str, interfaces: &[&str]) -> JavaClass {
        let mut builder = ClassFileBuilder::new(name).extends(super_name);
        for interface in interfaces {
            builder = builder.implements(interface);
        }
        parse_bytes(&builder.build()[..]).unwrap_or_else(|e| panic!("{e:#}"))
    }

    #[test]
    fn find_classes_by_name() {
        let index = ClassIndex::from_iter([
            class("com/example/Square", "com/example/Rectangle", &["java/io/Serializable"]),
            class("com/example/Rectangle", "java/lang/Object", &[]),
        ]);
        assert_eq!(index.len(), 2);
        let square = index.find("com/example/Square").expect("square is indexed");
        let rectangle = index.find_super(square).expect("rectangle is indexed");
        assert_eq!(rectangle.this(), "com/example/Rectangle");
        assert!(index.find_super(rectangle).is_none());
        assert_eq!(index.find_interfaces(square).count(), 0);
    }

    #[test]
    fn first_inserted_class_wins() {
        let first = ClassFileBuilder::new("A")
            .method(access::PUBLIC, "first", "()V")
            .build();
        let second = ClassFileBuilder::new("A")
            .method(access::PUBLIC, "second", "()V")
            .build();
        let mut index = ClassIndex::new();
        assert!(index.insert(parse_bytes(&first[..]).unwrap()));
        assert!(!index.insert(parse_bytes(&second[..]).unwrap()));
        assert_eq!(index.len(), 2);
        assert_eq!(index.find("A").unwrap().methods()[0].name(), "first");
        assert_eq!(
            index
                .iter()
                .map(|class| class.methods()[0].name())
                .collect::<Vec<_>>(),
            ["first", "second"]
        );
    }

    #[test]
    fn parse_file_reports_missing_files() {
        let error = parse_file("does/not/exist.class").expect_err("file doesn't exist");
        assert!(matches!(error.kind(), error::ErrorKind::IoError(_)));
    }
}
