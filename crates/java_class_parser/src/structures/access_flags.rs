use bitflags::bitflags;

bitflags! {
    /// The `access_flags` of a class, or the `inner_class_access_flags` of an `InnerClasses` entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassAccessFlags: u16 {
        /// Declared `public`
        const PUBLIC = 0x0001;
        /// Declared `private` (inner classes only)
        const PRIVATE = 0x0002;
        /// Declared `protected` (inner classes only)
        const PROTECTED = 0x0004;
        /// Declared `static` (inner classes only)
        const STATIC = 0x0008;
        /// Declared `final`
        const FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by `invokespecial`
        const SUPER = 0x0020;
        /// Is an interface, not a class
        const INTERFACE = 0x0200;
        /// Declared `abstract`
        const ABSTRACT = 0x0400;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface
        const ANNOTATION = 0x2000;
        /// Declared as an enum class
        const ENUM = 0x4000;
        /// Is a module, not a class or interface
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// The `access_flags` of a method.
    ///
    /// The bridge and varargs bits share their values with the `volatile` and `transient` field
    /// modifiers, which is why reflection reports bridge methods as `volatile` and varargs methods
    /// as `transient`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodAccessFlags: u16 {
        /// Declared `public`
        const PUBLIC = 0x0001;
        /// Declared `private`
        const PRIVATE = 0x0002;
        /// Declared `protected`
        const PROTECTED = 0x0004;
        /// Declared `static`
        const STATIC = 0x0008;
        /// Declared `final`
        const FINAL = 0x0010;
        /// Declared `synchronized`
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler
        const BRIDGE = 0x0040;
        /// Declared with a variable number of arguments
        const VARARGS = 0x0080;
        /// Declared `native`
        const NATIVE = 0x0100;
        /// Declared `abstract`
        const ABSTRACT = 0x0400;
        /// Declared `strictfp`
        const STRICT = 0x0800;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
    }
}

impl ClassAccessFlags {
    /// Reads flags as they appear in a class file, keeping bits without a name.
    pub fn from_raw(raw: u16) -> Self {
        Self::from_bits_retain(raw)
    }
}

impl MethodAccessFlags {
    /// Reads flags as they appear in a class file, keeping bits without a name.
    pub fn from_raw(raw: u16) -> Self {
        Self::from_bits_retain(raw)
    }
}
