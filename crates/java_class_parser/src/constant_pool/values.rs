use std::borrow::Cow;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone)]
pub struct Class {
    pub name_index: u16,
}
#[derive(Debug, Clone)]
pub struct FieldRef {
    pub class_index: u16,
    pub name_and_type_index: u16,
}
#[derive(Debug, Clone)]
pub struct MethodRef {
    pub class_index: u16,
    pub name_and_type_index: u16,
}
#[derive(Debug, Clone)]
pub struct InterfaceMethodRef {
    pub class_index: u16,
    pub name_and_type_index: u16,
}
#[derive(Debug, Clone)]
pub struct StringValue {
    pub string_index: u16,
}
#[derive(Debug, Clone)]
pub struct Integer {
    pub int: i32,
}
#[derive(Debug, Clone)]
pub struct Float {
    pub float: f32,
}
#[derive(Debug, Clone)]
pub struct Long {
    pub long: i64,
}
#[derive(Debug, Clone)]
pub struct Double {
    pub double: f64,
}
#[derive(Debug, Clone)]
pub struct NameAndType {
    pub name_index: u16,
    pub descriptor_index: u16,
}

/// Strings in the constant pool are stored in java's *modified* utf-8. For almost every
/// class file this is plain utf-8, so decoding only falls back to the slow path when needed.
#[derive(Debug, Clone)]
pub struct Utf8 {
    pub bytes: Box<[u8]>,
}

impl Utf8 {
    /// Decodes the string. Returns `None` if the bytes aren't valid modified utf-8.
    pub fn to_str(&self) -> Option<Cow<'_, str>> {
        match std::str::from_utf8(&self.bytes) {
            Ok(s) => Some(Cow::Borrowed(s)),
            Err(_) => decode_modified_utf8(&self.bytes).map(Cow::Owned),
        }
    }
}

/// Decodes modified utf-8, where nulls are two bytes long and supplementary characters are
/// written as a pair of encoded surrogates.
fn decode_modified_utf8(bytes: &[u8]) -> Option<String> {
    fn continuation(byte: Option<&u8>) -> Option<u16> {
        match byte {
            Some(&b) if b & 0xC0 == 0x80 => Some((b & 0x3F) as u16),
            _ => None,
        }
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter();
    while let Some(&byte) = iter.next() {
        let unit = match byte {
            0x01..=0x7F => byte as u16,
            _ if byte & 0xE0 == 0xC0 => {
                ((byte & 0x1F) as u16) << 6 | continuation(iter.next())?
            }
            _ if byte & 0xF0 == 0xE0 => {
                let second = continuation(iter.next())?;
                let third = continuation(iter.next())?;
                ((byte & 0x0F) as u16) << 12 | second << 6 | third
            }
            _ => return None,
        };
        units.push(unit);
    }
    String::from_utf16(&units).ok()
}

impl Display for Utf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{}", String::from_utf8_lossy(&self.bytes)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodHandle {
    pub reference_kind: u8,
    pub reference_index: u16,
}
#[derive(Debug, Clone)]
pub struct MethodType {
    pub descriptor_index: u16,
}
#[derive(Debug, Clone)]
pub struct Dynamic {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}
#[derive(Debug, Clone)]
pub struct InvokeDynamic {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}
#[derive(Debug, Clone)]
pub struct Module {
    pub name_index: u16,
}
#[derive(Debug, Clone)]
pub struct Package {
    pub name_index: u16,
}
