//! contains the raw definitions for the constant pool

use crate::error::ErrorKind;
use std::borrow::Cow;
use values::{
    Class, Double, Dynamic, FieldRef, Float, Integer, InterfaceMethodRef, InvokeDynamic, Long,
    MethodHandle, MethodRef, MethodType, Module, NameAndType, Package, Utf8,
};

pub mod parser;
pub mod values;

/// Config values
pub mod cfg {
    pub const UTF8_TAG: u8 = 1;
    pub const INTEGER_TAG: u8 = 3;
    pub const FLOAT_TAG: u8 = 4;
    pub const LONG_TAG: u8 = 5;
    pub const DOUBLE_TAG: u8 = 6;
    pub const CLASS_TAG: u8 = 7;
    pub const STRING_TAG: u8 = 8;
    pub const FIELD_REF_TAG: u8 = 9;
    pub const METHOD_REF_TAG: u8 = 10;
    pub const INTERFACE_METHOD_REF_TAG: u8 = 11;
    pub const NAME_AND_TYPE_TAG: u8 = 12;
    pub const METHOD_HANDLE_TAG: u8 = 15;
    pub const METHOD_TYPE_TAG: u8 = 16;
    pub const DYNAMIC_TAG: u8 = 17;
    pub const INVOKE_DYNAMIC_TAG: u8 = 18;
    pub const MODULE_TAG: u8 = 19;
    pub const PACKAGE_TAG: u8 = 20;
}

/// The `cp_info` structure, represents in a constant
#[derive(Debug, Clone)]
pub enum ConstantPoolInfo {
    Class(Class),
    FieldRef(FieldRef),
    MethodRef(MethodRef),
    InterfaceMethodRef(InterfaceMethodRef),
    String(values::StringValue),
    Integer(Integer),
    Float(Float),
    Long(Long),
    Double(Double),
    NameAndType(NameAndType),
    Utf8(Utf8),
    MethodHandle(MethodHandle),
    MethodType(MethodType),
    Dynamic(Dynamic),
    InvokeDynamic(InvokeDynamic),
    Module(Module),
    Package(Package),
    /// The slot following a long or double constant. It can never be referenced.
    Unusable,
}

impl ConstantPoolInfo {
    /// Longs and doubles take up two slots in the pool
    pub fn is_wide(&self) -> bool {
        matches!(self, ConstantPoolInfo::Long(_) | ConstantPoolInfo::Double(_))
    }
}

/// The constant pool contains an array of constants
#[derive(Debug, Clone)]
pub struct ConstantPool {
    pool: Vec<ConstantPoolInfo>,
}

impl ConstantPool {
    /// Creates a new constant pool from an iterator
    pub(crate) fn new<I: IntoIterator<Item = ConstantPoolInfo>>(pool: I) -> Self {
        Self {
            pool: pool.into_iter().collect(),
        }
    }

    /// The number of slots in the pool, counting the unusable halves of wide constants.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Checks if the pool has no entries
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Constant pools are accessed using u16 values, starting at 1.
    pub fn get(&self, index: u16) -> Option<&ConstantPoolInfo> {
        let index = (index as usize).checked_sub(1)?;
        self.pool.get(index)
    }

    /// Gets the string stored in a `CONSTANT_Utf8_info` entry.
    pub fn utf8(&self, index: u16) -> Result<Cow<'_, str>, ErrorKind> {
        match self.get(index) {
            Some(ConstantPoolInfo::Utf8(utf8)) => utf8
                .to_str()
                .ok_or(ErrorKind::InvalidUtf8 { index }),
            _ => Err(ErrorKind::BadConstantPoolReference {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Gets the binary name referred to by a `CONSTANT_Class_info` entry.
    pub fn class_name(&self, index: u16) -> Result<Cow<'_, str>, ErrorKind> {
        match self.get(index) {
            Some(ConstantPoolInfo::Class(Class { name_index })) => self.utf8(*name_index),
            _ => Err(ErrorKind::BadConstantPoolReference {
                index,
                expected: "Class",
            }),
        }
    }
}
