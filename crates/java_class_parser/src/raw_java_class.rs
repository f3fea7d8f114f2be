//! The raw java class, a direct translation of the java [ClassFile structure][class_file]
//!
//! Fields are skipped over rather than kept, nothing in this crate looks at them.
//!
//! [class_file]: https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.1

use crate::constant_pool::{parser, ConstantPool};
use crate::error::{Error, ErrorKind};
use nom::error::ErrorKind as NomErrorKind;
use nom::multi::length_count;
use nom::number::complete::{be_u16, be_u32};
use nom::sequence::tuple;
use nom::IResult;

/// The magic number every class file starts with
pub const MAGIC: u32 = 0xCAFE_BABE;
/// The oldest class file version this parser accepts (java 1.0.2)
pub const MIN_MAJOR_VERSION: u16 = 45;
/// The newest class file version this parser accepts (java 27)
pub const MAX_MAJOR_VERSION: u16 = 71;

/// A raw java class file structure. All members have public access.
///
/// Defined by the [jvm spec](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.1).
#[derive(Debug, Clone)]
pub struct RawJavaClass {
    pub minor: u16,
    pub major: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Box<[u16]>,
    pub methods: Box<[RawMethodInfo]>,
    pub attributes: Box<[RawAttributeInfo]>,
}

/// The raw method info structure
#[derive(Debug, Default, Clone)]
pub struct RawMethodInfo {
    pub access_flags: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Box<[RawAttributeInfo]>,
}

/// The raw attribute info struct
#[derive(Debug, Default, Clone)]
pub struct RawAttributeInfo {
    pub attribute_name_index: u16,
    pub info: Box<[u8]>,
}

/// Should parse the entire byte array to create a raw java class
pub fn parse_class_file_bytes(bytes: &[u8]) -> Result<RawJavaClass, Error> {
    let (rest, (magic, minor, major)) =
        tuple((be_u32, be_u16, be_u16))(bytes).map_err(|e| convert_nom_error(bytes, e))?;
    if magic != MAGIC {
        return Err(ErrorKind::BadMagic(magic).into());
    }
    if !(MIN_MAJOR_VERSION..=MAX_MAJOR_VERSION).contains(&major) {
        return Err(ErrorKind::UnsupportedVersion { major, minor }.into());
    }

    fn inner<'a>(
        bytes: &'a [u8],
        minor: u16,
        major: u16,
    ) -> IResult<&'a [u8], RawJavaClass> {
        let (bytes, constant_pool_count) = be_u16(bytes)?;
        let (bytes, constant_pool) = parser::parse_constant_pool(constant_pool_count)(bytes)?;

        let mut tuple_parser = tuple((be_u16, be_u16, be_u16));
        let (bytes, (access_flags, this_class, super_class)) = tuple_parser(bytes)?;
        let (bytes, interfaces) = parser::parse_interfaces(bytes)?;

        let (bytes, _) = length_count(be_u16, parser::skip_field_info)(bytes)?;
        let (bytes, methods) = length_count(be_u16, parser::parse_method_info)(bytes)?;
        let (bytes, attributes) = length_count(be_u16, parser::parse_attribute_info)(bytes)?;

        Ok((
            bytes,
            RawJavaClass {
                minor,
                major,
                constant_pool,
                access_flags,
                this_class,
                super_class,
                interfaces: interfaces.into_boxed_slice(),
                methods: methods.into_boxed_slice(),
                attributes: attributes.into_boxed_slice(),
            },
        ))
    }

    let (rest, java) = inner(rest, minor, major).map_err(|e| convert_nom_error(bytes, e))?;
    if !rest.is_empty() {
        return Err(ErrorKind::TrailingBytes(rest.len()).into());
    }
    Ok(java)
}

/// Turns a nom failure into an error that says where in the class file things went wrong.
/// Nom errors keep the unparsed remainder of the input, so the offset falls out of the lengths.
fn convert_nom_error(input: &[u8], error: nom::Err<nom::error::Error<&[u8]>>) -> Error {
    let kind = match error {
        nom::Err::Incomplete(needed) => ErrorKind::MissingBytes(needed),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = input.len() - e.input.len();
            match e.code {
                NomErrorKind::Tag => ErrorKind::UnknownConstantPoolInfoTag {
                    tag: e.input.first().copied().unwrap_or_default(),
                    offset,
                },
                NomErrorKind::Eof => ErrorKind::Truncated { offset },
                code => ErrorKind::Malformed { code, offset },
            }
        }
    };
    Error::new(kind)
}
