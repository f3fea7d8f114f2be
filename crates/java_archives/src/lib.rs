//! Walks the class files stored in a jar archive, or in a directory laid out like one.
//!
//! ```no_run
//! # use java_archives::Archive;
//! let mut archive = Archive::open("classes.jar").expect("couldn't open archive");
//! for entry in archive.class_entries() {
//!     let entry = entry.expect("couldn't read entry");
//!     println!("{} ({} bytes)", entry.url(), entry.bytes().len());
//! }
//! ```

#![deny(missing_docs)]

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use static_assertions::assert_impl_all;
use tracing::{debug, trace};
use url::Url;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::ZipArchive;

/// The extension of every entry the walker hands out
pub const CLASS_FILE_EXTENSION: &str = "class";

/// Errors raised while opening or walking an archive
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file couldn't be opened or read
    #[error("couldn't read {}: {source}", .path.display())]
    Io {
        /// The archive, or the file inside a directory archive
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// The file isn't a zip archive, or its contents are corrupt
    #[error("{} is not a readable archive: {source}", .path.display())]
    Zip {
        /// The archive
        path: PathBuf,
        /// The underlying error
        source: ZipError,
    },
    /// A directory archive couldn't be walked
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    /// A location couldn't be expressed as a url
    #[error("{0:?} can't be expressed as a url")]
    Url(String),
}

/// A jar or zip archive, or a directory holding class files at the paths their binary names imply.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    kind: ArchiveKind,
}

#[derive(Debug)]
enum ArchiveKind {
    Zip(ZipArchive<File>),
    Directory,
}

assert_impl_all!(Archive: Send);

impl Archive {
    /// Opens an archive. Directories are walked, everything else is read as a zip file.
    ///
    /// # Error
    /// Fails if the path doesn't exist, can't be read, or isn't a zip archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let path = path.canonicalize().map_err(io_error)?;
        let kind = if path.is_dir() {
            ArchiveKind::Directory
        } else {
            let file = File::open(&path).map_err(io_error)?;
            let zip = ZipArchive::new(file).map_err(|source| Error::Zip {
                path: path.clone(),
                source,
            })?;
            ArchiveKind::Zip(zip)
        };
        debug!("opened archive {}", path.display());
        Ok(Self { path, kind })
    }

    /// The canonical path of the archive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this archive is a directory instead of a zip file
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, ArchiveKind::Directory)
    }

    /// Iterates over every `.class` entry. Zip entries come in central directory order,
    /// directory entries in file name order. Directories and other resources are skipped.
    pub fn class_entries(&mut self) -> ClassEntries<'_> {
        let state = match &mut self.kind {
            ArchiveKind::Zip(zip) => EntriesState::Zip { zip, next: 0 },
            ArchiveKind::Directory => EntriesState::Directory {
                walk: WalkDir::new(&self.path).sort_by_file_name().into_iter(),
            },
        };
        ClassEntries {
            path: &self.path,
            state,
        }
    }
}

/// A class file read out of an archive
#[derive(Debug, Clone)]
pub struct ClassEntry {
    name: String,
    bytes: Vec<u8>,
    url: Url,
}

assert_impl_all!(ClassEntry: Send, Sync);

impl ClassEntry {
    /// The path of the entry within the archive, always `/` separated
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The contents of the entry
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Where the entry lives, as java would write it. Entries of zip archives get a
    /// `jar:file:...!/entry` url.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Display for ClassEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// The iterator returned by [`Archive::class_entries`]
#[derive(Debug)]
pub struct ClassEntries<'a> {
    path: &'a Path,
    state: EntriesState<'a>,
}

#[derive(Debug)]
enum EntriesState<'a> {
    Zip {
        zip: &'a mut ZipArchive<File>,
        next: usize,
    },
    Directory {
        walk: walkdir::IntoIter,
    },
}

impl ClassEntries<'_> {
    fn next_zip_entry(
        path: &Path,
        zip: &mut ZipArchive<File>,
        next: &mut usize,
    ) -> Option<Result<ClassEntry, Error>> {
        while *next < zip.len() {
            let index = *next;
            *next += 1;
            let mut file = match zip.by_index(index) {
                Ok(file) => file,
                Err(source) => {
                    return Some(Err(Error::Zip {
                        path: path.to_path_buf(),
                        source,
                    }))
                }
            };
            if file.is_dir() || !is_class_file(file.name()) {
                trace!("skipping {}", file.name());
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::with_capacity(file.size() as usize);
            if let Err(source) = file.read_to_end(&mut bytes) {
                return Some(Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                }));
            }
            return Some(jar_url(path, &name).map(|url| ClassEntry { name, bytes, url }));
        }
        None
    }

    fn next_directory_entry(
        path: &Path,
        walk: &mut walkdir::IntoIter,
    ) -> Option<Result<ClassEntry, Error>> {
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(path) else {
                continue;
            };
            let name = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !is_class_file(&name) {
                trace!("skipping {}", name);
                continue;
            }
            let bytes = match std::fs::read(entry.path()) {
                Ok(bytes) => bytes,
                Err(source) => {
                    return Some(Err(Error::Io {
                        path: entry.path().to_path_buf(),
                        source,
                    }))
                }
            };
            let url = Url::from_file_path(entry.path())
                .map_err(|()| Error::Url(entry.path().display().to_string()));
            return Some(url.map(|url| ClassEntry { name, bytes, url }));
        }
        None
    }
}

impl Iterator for ClassEntries<'_> {
    type Item = Result<ClassEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match &mut self.state {
            EntriesState::Zip { zip, next } => Self::next_zip_entry(self.path, zip, next),
            EntriesState::Directory { walk } => Self::next_directory_entry(self.path, walk),
        };
        if let Some(Ok(entry)) = &entry {
            trace!("found class entry {}", entry.name());
        }
        entry
    }
}

fn is_class_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |extension| extension == CLASS_FILE_EXTENSION)
}

/// Creates the url java uses for an entry of a jar, `jar:file:/path/to.jar!/entry`
fn jar_url(archive: &Path, entry: &str) -> Result<Url, Error> {
    let file = Url::from_file_path(archive)
        .map_err(|()| Error::Url(archive.display().to_string()))?;
    let url = format!("jar:{file}!/{entry}");
    Url::parse(&url).map_err(|_| Error::Url(url))
}
