use crate::constant_pool::cfg::*;
use crate::constant_pool::values::{
    Class, Double, Dynamic, FieldRef, Float, Integer, InterfaceMethodRef, InvokeDynamic, Long,
    MethodHandle, MethodRef, MethodType, Module, NameAndType, Package, StringValue, Utf8,
};
use crate::constant_pool::{ConstantPool, ConstantPoolInfo};

pub use crate::raw_java_class::{RawAttributeInfo, RawMethodInfo};

use nom::bytes::complete::take;
use nom::combinator::map;
use nom::error::{ErrorKind, ParseError};
use nom::multi::length_count;
use nom::number::complete::{be_f32, be_f64, be_i32, be_i64, be_u16, be_u32, be_u8};
use nom::sequence::tuple;
use nom::IResult;

fn parse_data_info<'a, E: ParseError<&'a [u8]>>(
    bytes: &'a [u8],
) -> IResult<&'a [u8], (u16, u16, u16, Box<[RawAttributeInfo]>), E> {
    tuple((be_u16, be_u16, be_u16))(bytes).and_then(
        |(bytes, (access_flags, name, descriptor))| {
            map(length_count(be_u16, parse_attribute_info), |vector| {
                (access_flags, name, descriptor, vector.into_boxed_slice())
            })(bytes)
        },
    )
}

/// Fields have the same layout as methods, so they are skipped over with the same parser.
pub(crate) fn skip_field_info<'a, E: ParseError<&'a [u8]>>(
    bytes: &'a [u8],
) -> IResult<&'a [u8], (), E> {
    map(parse_data_info, |_| ())(bytes)
}

pub(crate) fn parse_method_info<'a, E: ParseError<&'a [u8]>>(
    bytes: &'a [u8],
) -> IResult<&'a [u8], RawMethodInfo, E> {
    let (rest, inner) = parse_data_info(bytes)?;
    let (access_flags, name_index, descriptor_index, attributes) = inner;
    Ok((
        rest,
        RawMethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        },
    ))
}

pub(crate) fn parse_attribute_info<'a, E: ParseError<&'a [u8]>>(
    bytes: &'a [u8],
) -> IResult<&'a [u8], RawAttributeInfo, E> {
    tuple((be_u16, be_u32))(bytes).and_then(|(bytes, (name_index, length))| {
        map(take(length), |info: &[u8]| RawAttributeInfo {
            attribute_name_index: name_index,
            info: info.into(),
        })(bytes)
    })
}

fn parse_constant_pool_info<'a, E: ParseError<&'a [u8]>>(
    input: &'a [u8],
) -> IResult<&'a [u8], ConstantPoolInfo, E> {
    let (bytes, tag) = be_u8(input)?;
    let parsed_ref_info = tuple((be_u16, be_u16));

    match tag {
        CLASS_TAG => map(be_u16, |name_index| {
            ConstantPoolInfo::Class(Class { name_index })
        })(bytes),
        FIELD_REF_TAG => map(parsed_ref_info, |(class_index, name_and_type_index)| {
            ConstantPoolInfo::FieldRef(FieldRef {
                class_index,
                name_and_type_index,
            })
        })(bytes),
        METHOD_REF_TAG => map(parsed_ref_info, |(class_index, name_and_type_index)| {
            ConstantPoolInfo::MethodRef(MethodRef {
                class_index,
                name_and_type_index,
            })
        })(bytes),
        INTERFACE_METHOD_REF_TAG => map(parsed_ref_info, |(class_index, name_and_type_index)| {
            ConstantPoolInfo::InterfaceMethodRef(InterfaceMethodRef {
                class_index,
                name_and_type_index,
            })
        })(bytes),
        STRING_TAG => map(be_u16, |string_index| {
            ConstantPoolInfo::String(StringValue { string_index })
        })(bytes),
        INTEGER_TAG => map(be_i32, |int| ConstantPoolInfo::Integer(Integer { int }))(bytes),
        FLOAT_TAG => map(be_f32, |float| ConstantPoolInfo::Float(Float { float }))(bytes),
        LONG_TAG => map(be_i64, |long| ConstantPoolInfo::Long(Long { long }))(bytes),
        DOUBLE_TAG => map(be_f64, |double| ConstantPoolInfo::Double(Double { double }))(bytes),
        NAME_AND_TYPE_TAG => map(parsed_ref_info, |(name_index, descriptor_index)| {
            ConstantPoolInfo::NameAndType(NameAndType {
                name_index,
                descriptor_index,
            })
        })(bytes),
        UTF8_TAG => {
            let (bytes, length) = be_u16(bytes)?;
            let (bytes, char_bytes) = take(length)(bytes)?;
            Ok((
                bytes,
                ConstantPoolInfo::Utf8(Utf8 {
                    bytes: char_bytes.into(),
                }),
            ))
        }
        METHOD_HANDLE_TAG => map(
            tuple((be_u8, be_u16)),
            |(reference_kind, reference_index)| {
                ConstantPoolInfo::MethodHandle(MethodHandle {
                    reference_kind,
                    reference_index,
                })
            },
        )(bytes),
        METHOD_TYPE_TAG => map(be_u16, |descriptor_index| {
            ConstantPoolInfo::MethodType(MethodType { descriptor_index })
        })(bytes),
        DYNAMIC_TAG => map(
            parsed_ref_info,
            |(bootstrap_method_attr_index, name_and_type_index)| {
                ConstantPoolInfo::Dynamic(Dynamic {
                    bootstrap_method_attr_index,
                    name_and_type_index,
                })
            },
        )(bytes),
        INVOKE_DYNAMIC_TAG => map(
            parsed_ref_info,
            |(bootstrap_method_attr_index, name_and_type_index)| {
                ConstantPoolInfo::InvokeDynamic(InvokeDynamic {
                    bootstrap_method_attr_index,
                    name_and_type_index,
                })
            },
        )(bytes),
        MODULE_TAG => map(be_u16, |name_index| {
            ConstantPoolInfo::Module(Module { name_index })
        })(bytes),
        PACKAGE_TAG => map(be_u16, |name_index| {
            ConstantPoolInfo::Package(Package { name_index })
        })(bytes),
        // points at the tag itself, so the caller can report which byte was wrong
        _ => Err(nom::Err::Failure(E::from_error_kind(input, ErrorKind::Tag))),
    }
}

/// parses an entire constant pool, given the `constant_pool_count` from the class file.
///
/// The count is one more than the number of slots, and longs and doubles fill two slots each.
pub fn parse_constant_pool<'a, E: ParseError<&'a [u8]>>(
    constant_pool_count: u16,
) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], ConstantPool, E> {
    let slots = constant_pool_count.saturating_sub(1) as usize;
    move |mut bytes: &'a [u8]| {
        let mut pool = Vec::with_capacity(slots);
        while pool.len() < slots {
            let (rest, info) = parse_constant_pool_info(bytes)?;
            bytes = rest;
            let wide = info.is_wide();
            pool.push(info);
            if wide {
                pool.push(ConstantPoolInfo::Unusable);
            }
        }
        Ok((bytes, ConstantPool::new(pool)))
    }
}

/// parses the interface table: a count followed by that many class indexes
pub(crate) fn parse_interfaces<'a, E: ParseError<&'a [u8]>>(
    bytes: &'a [u8],
) -> IResult<&'a [u8], Vec<u16>, E> {
    length_count(be_u16, be_u16)(bytes)
}
