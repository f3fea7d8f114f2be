//! Dumps the public methods of every class in a jar as one line each, in the notation
//! `<com.example.Foo: int bar(java.lang.String,java.util.List)>`.
//!
//! Class files are read straight out of the archive with [`java_class_parser`], nothing is
//! loaded or run. The stages are split up so they can be used on their own:
//!
//! 1. [`pipeline::load_classes`] parses every class in an [`Archive`](java_archives::Archive)
//! 2. [`reader::DescriptorReader`] turns the parsed classes into [`descriptor::ClassDescriptor`]s
//! 3. [`filter::FilterConfiguration`] decides which methods to keep
//! 4. [`format::DescriptorLine`] renders what's left
//!
//! [`pipeline::run`] does all of it.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod reader;

pub use error::Error;
