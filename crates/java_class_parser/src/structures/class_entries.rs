use crate::constant_pool::ConstantPool;
use crate::error::ErrorKind;
use crate::raw_java_class::RawMethodInfo;
use crate::{MethodAccessFlags, MethodSignature};

/// The name shared by every constructor
pub const CONSTRUCTOR_NAME: &str = "<init>";
/// The name of a class's static initializer
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// A method in a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    access_flags: MethodAccessFlags,
    name: String,
    signature: MethodSignature,
}

impl Method {
    pub(crate) fn new(method_info: &RawMethodInfo, pool: &ConstantPool) -> Result<Self, ErrorKind> {
        let name = pool.utf8(method_info.name_index)?.into_owned();
        let signature = pool.utf8(method_info.descriptor_index)?.parse()?;
        Ok(Self {
            access_flags: MethodAccessFlags::from_raw(method_info.access_flags),
            name,
            signature,
        })
    }

    /// The name of the method
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signature of the method
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// The access flags of the method
    pub fn access_flags(&self) -> MethodAccessFlags {
        self.access_flags
    }

    /// Checks whether the method is declared `public`
    pub fn is_public(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::PUBLIC)
    }

    /// Checks whether the method is declared `static`
    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }

    /// Constructors and static initializers are stored in the method table, but aren't methods
    /// as far as java is concerned.
    pub fn is_initializer(&self) -> bool {
        self.name == CONSTRUCTOR_NAME || self.name == STATIC_INITIALIZER_NAME
    }
}
