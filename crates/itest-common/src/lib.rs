//! Builds class files and jars in memory, so tests don't need a java toolchain.

use byteorder::{BigEndian, WriteBytesExt};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Access flag values, shared between classes and methods where the bits overlap
pub mod access {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const SUPER: u16 = 0x0020;
    pub const SYNCHRONIZED: u16 = 0x0020;
    pub const BRIDGE: u16 = 0x0040;
    pub const VARARGS: u16 = 0x0080;
    pub const NATIVE: u16 = 0x0100;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const STRICT: u16 = 0x0800;
    pub const SYNTHETIC: u16 = 0x1000;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Constant {
    Utf8(String),
    Class(u16),
    Long(i64),
}

#[derive(Debug, Default)]
struct PoolBuilder {
    entries: Vec<Constant>,
    indices: HashMap<Constant, u16>,
    next: u16,
}

impl PoolBuilder {
    fn new() -> Self {
        Self {
            next: 1,
            ..Default::default()
        }
    }

    fn add(&mut self, constant: Constant) -> u16 {
        if let Some(&index) = self.indices.get(&constant) {
            return index;
        }
        let index = self.next;
        self.next += match constant {
            Constant::Long(_) => 2,
            _ => 1,
        };
        self.indices.insert(constant.clone(), index);
        self.entries.push(constant);
        index
    }

    fn utf8(&mut self, value: &str) -> u16 {
        self.add(Constant::Utf8(value.to_string()))
    }

    fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        self.add(Constant::Class(name))
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.write_u16::<BigEndian>(self.next).unwrap();
        for entry in &self.entries {
            match entry {
                Constant::Utf8(value) => {
                    out.push(1);
                    out.write_u16::<BigEndian>(value.len() as u16).unwrap();
                    out.extend_from_slice(value.as_bytes());
                }
                Constant::Class(name) => {
                    out.push(7);
                    out.write_u16::<BigEndian>(*name).unwrap();
                }
                Constant::Long(value) => {
                    out.push(5);
                    out.write_i64::<BigEndian>(*value).unwrap();
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct MethodEntry {
    access: u16,
    name: String,
    descriptor: String,
}

#[derive(Debug, Clone)]
struct InnerClassEntry {
    inner: String,
    outer: Option<String>,
    simple_name: Option<String>,
    access: u16,
}

/// Writes a class file with a method table and no code, which is all the parser cares about.
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    name: String,
    access: u16,
    major: u16,
    super_name: Option<String>,
    interfaces: Vec<String>,
    methods: Vec<MethodEntry>,
    inner_classes: Vec<InnerClassEntry>,
    longs: Vec<i64>,
}

impl ClassFileBuilder {
    /// A public class, compiled for java 8, that extends `java/lang/Object`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            access: access::PUBLIC | access::SUPER,
            major: 52,
            super_name: Some("java/lang/Object".to_string()),
            interfaces: vec![],
            methods: vec![],
            inner_classes: vec![],
            longs: vec![],
        }
    }

    /// The binary name of the class being built
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    /// Makes the class a public interface
    pub fn interface(self) -> Self {
        self.access(access::PUBLIC | access::INTERFACE | access::ABSTRACT)
    }

    pub fn extends(mut self, super_name: &str) -> Self {
        self.super_name = Some(super_name.to_string());
        self
    }

    /// Leaves the super class out, like `java/lang/Object` does
    pub fn without_super(mut self) -> Self {
        self.super_name = None;
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn method(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        self.methods.push(MethodEntry {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
        self
    }

    /// Adds an `InnerClasses` entry. Leave `outer` and `simple_name` out for anonymous classes.
    pub fn inner_class(
        mut self,
        inner: &str,
        outer: Option<&str>,
        simple_name: Option<&str>,
        access: u16,
    ) -> Self {
        self.inner_classes.push(InnerClassEntry {
            inner: inner.to_string(),
            outer: outer.map(str::to_string),
            simple_name: simple_name.map(str::to_string),
            access,
        });
        self
    }

    /// Sets the major version
    pub fn version(mut self, major: u16) -> Self {
        self.major = major;
        self
    }

    /// Adds an unused `long` to the constant pool, which takes up two slots
    pub fn long_constant(mut self, value: i64) -> Self {
        self.longs.push(value);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.write(false)
    }

    /// Builds the class, then cuts it off partway through the last method
    pub fn build_with_truncated_method_table(&self) -> Vec<u8> {
        self.write(true)
    }

    fn write(&self, truncate: bool) -> Vec<u8> {
        let mut pool = PoolBuilder::new();
        for &value in &self.longs {
            pool.add(Constant::Long(value));
        }
        let this = pool.class(&self.name);
        let super_class = self
            .super_name
            .as_deref()
            .map_or(0, |name| pool.class(name));
        let interfaces = self
            .interfaces
            .iter()
            .map(|name| pool.class(name))
            .collect::<Vec<_>>();
        let methods = self
            .methods
            .iter()
            .map(|method| {
                (
                    method.access,
                    pool.utf8(&method.name),
                    pool.utf8(&method.descriptor),
                )
            })
            .collect::<Vec<_>>();
        let inner_classes = self
            .inner_classes
            .iter()
            .map(|entry| {
                (
                    pool.class(&entry.inner),
                    entry.outer.as_deref().map_or(0, |outer| pool.class(outer)),
                    entry
                        .simple_name
                        .as_deref()
                        .map_or(0, |simple| pool.utf8(simple)),
                    entry.access,
                )
            })
            .collect::<Vec<_>>();
        let inner_classes_name = (!inner_classes.is_empty()).then(|| pool.utf8("InnerClasses"));

        let mut out = vec![];
        out.write_u32::<BigEndian>(0xCAFE_BABE).unwrap();
        out.write_u16::<BigEndian>(0).unwrap();
        out.write_u16::<BigEndian>(self.major).unwrap();
        pool.write(&mut out);
        out.write_u16::<BigEndian>(self.access).unwrap();
        out.write_u16::<BigEndian>(this).unwrap();
        out.write_u16::<BigEndian>(super_class).unwrap();
        out.write_u16::<BigEndian>(interfaces.len() as u16).unwrap();
        for interface in interfaces {
            out.write_u16::<BigEndian>(interface).unwrap();
        }
        // fields
        out.write_u16::<BigEndian>(0).unwrap();

        out.write_u16::<BigEndian>(methods.len() as u16).unwrap();
        let last = methods.len().saturating_sub(1);
        for (position, (access, name, descriptor)) in methods.into_iter().enumerate() {
            out.write_u16::<BigEndian>(access).unwrap();
            out.write_u16::<BigEndian>(name).unwrap();
            if truncate && position == last {
                return out;
            }
            out.write_u16::<BigEndian>(descriptor).unwrap();
            // no attributes, not even Code
            out.write_u16::<BigEndian>(0).unwrap();
        }

        match inner_classes_name {
            None => out.write_u16::<BigEndian>(0).unwrap(),
            Some(attribute_name) => {
                out.write_u16::<BigEndian>(1).unwrap();
                out.write_u16::<BigEndian>(attribute_name).unwrap();
                out.write_u32::<BigEndian>(2 + 8 * inner_classes.len() as u32)
                    .unwrap();
                out.write_u16::<BigEndian>(inner_classes.len() as u16)
                    .unwrap();
                for (inner, outer, simple_name, access) in inner_classes {
                    out.write_u16::<BigEndian>(inner).unwrap();
                    out.write_u16::<BigEndian>(outer).unwrap();
                    out.write_u16::<BigEndian>(simple_name).unwrap();
                    out.write_u16::<BigEndian>(access).unwrap();
                }
            }
        }
        out
    }
}

/// A jar written to a temporary directory, deleted when dropped
#[derive(Debug)]
pub struct TempJar {
    _dir: TempDir,
    path: PathBuf,
}

impl TempJar {
    /// Gets the path to the jar file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone)]
enum JarEntry {
    File(String, Vec<u8>),
    Directory(String),
}

/// Collects entries, then zips them up in the order they were added
#[derive(Debug, Clone, Default)]
pub struct JarBuilder {
    entries: Vec<JarEntry>,
}

impl JarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class at the path its binary name implies
    pub fn class(self, class: ClassFileBuilder) -> Self {
        let path = format!("{}.class", class.name());
        self.entry(&path, class.build())
    }

    /// Adds an arbitrary file
    pub fn entry(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries
            .push(JarEntry::File(path.to_string(), bytes.into()));
        self
    }

    pub fn directory(mut self, path: &str) -> Self {
        self.entries.push(JarEntry::Directory(path.to_string()));
        self
    }

    /// Writes the jar to some path
    pub fn write_to(&self, path: &Path) -> zip::result::ZipResult<()> {
        let file = File::create(path)?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default();
        for entry in &self.entries {
            match entry {
                JarEntry::File(name, bytes) => {
                    writer.start_file(name.as_str(), options)?;
                    writer.write_all(bytes)?;
                }
                JarEntry::Directory(name) => {
                    writer.add_directory(name.as_str(), options)?;
                }
            }
        }
        writer.finish()?;
        Ok(())
    }

    /// Writes the jar as `test.jar` in a new temporary directory
    pub fn build(&self) -> TempJar {
        let dir = tempfile::tempdir().expect("couldn't create temp dir");
        let path = dir.path().join("test.jar");
        self.write_to(&path).expect("couldn't write jar");
        TempJar { _dir: dir, path }
    }

    /// Writes every file entry under a new temporary directory instead of zipping them
    pub fn build_directory(&self) -> TempDir {
        let dir = tempfile::tempdir().expect("couldn't create temp dir");
        for entry in &self.entries {
            let (name, bytes) = match entry {
                JarEntry::File(name, bytes) => (name, Some(bytes)),
                JarEntry::Directory(name) => (name, None),
            };
            let path = dir.path().join(name);
            match bytes {
                Some(bytes) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).expect("couldn't create directory");
                    }
                    std::fs::write(&path, bytes).expect("couldn't write file");
                }
                None => std::fs::create_dir_all(&path).expect("couldn't create directory"),
            }
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn class_files_start_with_magic() {
        let bytes = ClassFileBuilder::new("A").build();
        assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(&bytes[6..8], &[0, 52]);
    }

    #[test]
    fn constants_are_shared() {
        let once = ClassFileBuilder::new("A")
            .method(access::PUBLIC, "run", "()V")
            .build();
        let twice = ClassFileBuilder::new("A")
            .method(access::PUBLIC, "run", "()V")
            .method(access::PUBLIC | access::STATIC, "run", "()V")
            .build();
        assert_eq!(&once[8..10], &twice[8..10], "constant pool count changed");
        assert_eq!(twice.len(), once.len() + 8);
    }

    #[test]
    fn jar_file_exists() {
        let jar = JarBuilder::new()
            .directory("com/")
            .class(ClassFileBuilder::new("com/Main"))
            .entry("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n")
            .build();
        assert!(jar.path().exists(), "jar file at path {:?} doesn't exist", jar.path());

        let mut archive = ZipArchive::new(File::open(jar.path()).unwrap()).unwrap();
        assert_eq!(archive.len(), 3);
        let mut class = vec![];
        archive
            .by_name("com/Main.class")
            .unwrap()
            .read_to_end(&mut class)
            .unwrap();
        assert_eq!(class, ClassFileBuilder::new("com/Main").build());
    }
}
