//! Walks an archive, describes its classes and writes out the methods that survive filtering

use std::io::Write;
use std::path::Path;

use java_archives::Archive;
use java_class_parser::{parse_bytes, ClassIndex};
use tracing::{debug, info, trace};

use crate::descriptor::ClassDescriptor;
use crate::error::Error;
use crate::filter::FilterConfiguration;
use crate::format::DescriptorLine;
use crate::reader::DescriptorReader;

/// Everything that controls a run besides the archive itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Which methods to write, and how
    pub filters: FilterConfiguration,
    /// Only list the methods a class declares itself, not the ones it inherits from the archive
    pub declared_only: bool,
}

/// Parses every class in an archive. Stops at the first entry that can't be read or parsed.
pub fn load_classes(archive: &mut Archive) -> Result<ClassIndex, Error> {
    let path = archive.path().to_path_buf();
    let mut index = ClassIndex::new();
    for entry in archive.class_entries() {
        let entry = entry.map_err(|source| Error::ArchiveUnreadable {
            path: path.clone(),
            source,
        })?;
        trace!("parsing {}", entry.name());
        let class = parse_bytes(entry.bytes()).map_err(|source| {
            if let Some(offset) = source.offset() {
                debug!("{} stops parsing at byte {}", entry.name(), offset);
            }
            Error::MalformedClass {
                entry: entry.url().to_string(),
                source,
            }
        })?;
        if !index.insert(class) {
            debug!("{} is in the archive more than once", entry.name());
        }
    }
    info!("loaded {} classes from {}", index.len(), path.display());
    Ok(index)
}

/// Describes every class in the index, ordered by name. Classes with the same name keep the
/// order they were found in.
pub fn describe_classes(index: &ClassIndex, declared_only: bool) -> Vec<ClassDescriptor> {
    let reader = if declared_only {
        DescriptorReader::declared_only(index)
    } else {
        DescriptorReader::new(index)
    };
    let mut classes = reader.read_all();
    classes.sort_by(|left, right| left.name().cmp(right.name()));
    classes
}

/// Writes a line for every method that survives the filters, class by class. Returns the number
/// of lines written.
pub fn write_descriptors<W: Write>(
    classes: &[ClassDescriptor],
    filters: &FilterConfiguration,
    mut out: W,
) -> std::io::Result<usize> {
    let mut written = 0;
    for class in classes {
        for method in class.methods() {
            if let Some(reason) = filters.skip_reason(class, method) {
                trace!("skipping {}.{}: {}", class.name(), method.name(), reason);
                continue;
            }
            let line = DescriptorLine::new(class.name(), method, filters.show_modifiers);
            writeln!(out, "{line}")?;
            written += 1;
        }
    }
    out.flush()?;
    Ok(written)
}

/// Runs the whole pipeline over one archive. Every class is parsed before anything is written,
/// so a failure leaves the output empty.
pub fn run<P: AsRef<Path>, W: Write>(
    archive: P,
    options: &PipelineOptions,
    out: W,
) -> Result<usize, Error> {
    let archive = archive.as_ref();
    let mut opened = Archive::open(archive).map_err(|source| Error::ArchiveUnreadable {
        path: archive.to_path_buf(),
        source,
    })?;
    let index = load_classes(&mut opened)?;
    drop(opened);

    let classes = describe_classes(&index, options.declared_only);
    let written = write_descriptors(&classes, &options.filters, out)?;
    debug!("wrote {} descriptors", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MethodDescriptor;
    use java_class_parser::MethodAccessFlags;

    fn class(name: &str, methods: &[&str]) -> ClassDescriptor {
        ClassDescriptor::new(
            name,
            false,
            methods
                .iter()
                .map(|method| MethodDescriptor::new(*method, "void", vec![], MethodAccessFlags::PUBLIC))
                .collect(),
        )
    }

    #[test]
    fn lines_are_class_major() {
        let classes = [class("a.A", &["z", "y"]), class("a.B", &["x"])];
        let mut out = vec![];
        let written =
            write_descriptors(&classes, &FilterConfiguration::default(), &mut out).unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<a.A: void z()>\n<a.A: void y()>\n<a.B: void x()>\n"
        );
    }
}
