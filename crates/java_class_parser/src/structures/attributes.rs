//! Parsed attributes

use crate::constant_pool::ConstantPool;
use crate::error::ErrorKind;
use crate::{ClassAccessFlags, FQName, FQNameBuf};
use nom::multi::length_count;
use nom::number::complete::be_u16;
use nom::sequence::tuple;
use nom::Finish;

/// An attribute info piece, resolved against the constant pool of its class
#[derive(Debug, Clone)]
pub struct Attribute {
    attribute_name: String,
    kind: AttributeKind,
}

/// The kind of attribute
#[derive(Debug, Clone)]
pub enum AttributeKind {
    /// The classes nested in, or referenced by, a class that aren't top level classes
    InnerClasses(Box<[InnerClass]>),
    /// Deprecated
    Deprecated,
    /// An attribute this crate doesn't interpret
    Unknown(Box<[u8]>),
}

impl Attribute {
    pub(crate) fn new(
        pool: &ConstantPool,
        attribute_name: &str,
        bytes: &[u8],
    ) -> Result<Self, ErrorKind> {
        let kind = match attribute_name {
            "InnerClasses" => AttributeKind::InnerClasses(parse_inner_classes(pool, bytes)?),
            "Deprecated" => AttributeKind::Deprecated,
            _ => AttributeKind::Unknown(bytes.into()),
        };
        Ok(Self {
            attribute_name: attribute_name.to_string(),
            kind,
        })
    }

    /// Gets the name of the attribute
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Gets the attribute kind.
    ///
    /// Known attributes are defined in section [§4.7](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.7)
    /// of the JVM specification.
    ///
    /// If the attribute kind is not known (based on the attribute name), the
    /// [unknown](AttributeKind::Unknown) member is returned).
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }
}

/// One entry of an `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClass {
    inner_class: FQNameBuf,
    outer_class: Option<FQNameBuf>,
    inner_name: Option<String>,
    access_flags: ClassAccessFlags,
}

impl InnerClass {
    /// The binary name of the nested class
    pub fn inner_class(&self) -> &FQName {
        &self.inner_class
    }

    /// The class this one is a member of. Local and anonymous classes have none.
    pub fn outer_class(&self) -> Option<&FQName> {
        self.outer_class.as_deref()
    }

    /// The simple name from source. Anonymous classes have none.
    pub fn inner_name(&self) -> Option<&str> {
        self.inner_name.as_deref()
    }

    /// The flags the class was declared with in source
    pub fn access_flags(&self) -> ClassAccessFlags {
        self.access_flags
    }

    /// Member classes are the only nested classes that have a canonical name.
    pub fn is_member(&self) -> bool {
        self.outer_class.is_some() && self.inner_name.is_some()
    }
}

fn parse_inner_classes(pool: &ConstantPool, bytes: &[u8]) -> Result<Box<[InnerClass]>, ErrorKind> {
    let invalid = || ErrorKind::InvalidAttribute("InnerClasses".to_string());
    let (_, entries) = length_count(be_u16, tuple((be_u16, be_u16, be_u16, be_u16)))(bytes)
        .finish()
        .map_err(|_: nom::error::Error<&[u8]>| invalid())?;

    entries
        .into_iter()
        .map(|(inner, outer, name, flags)| {
            let optional_class = |index: u16| -> Result<Option<FQNameBuf>, ErrorKind> {
                match index {
                    0 => Ok(None),
                    index => Ok(Some(FQNameBuf::from(pool.class_name(index)?.into_owned()))),
                }
            };
            Ok(InnerClass {
                inner_class: FQNameBuf::from(pool.class_name(inner)?.into_owned()),
                outer_class: optional_class(outer)?,
                inner_name: match name {
                    0 => None,
                    index => Some(pool.utf8(index)?.into_owned()),
                },
                access_flags: ClassAccessFlags::from_raw(flags),
            })
        })
        .collect()
}
