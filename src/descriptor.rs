//! What the dumper knows about a class and its methods

use java_class_parser::MethodAccessFlags;

/// A class, named the way java source would name it, and the public methods it exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    name: String,
    is_interface: bool,
    methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Creates a descriptor. Methods stay in the order they're given.
    pub fn new(name: impl Into<String>, is_interface: bool, methods: Vec<MethodDescriptor>) -> Self {
        Self {
            name: name.into(),
            is_interface,
            methods,
        }
    }

    /// The canonical name, such as `java.util.Map.Entry`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the class is an interface
    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// The methods in the order they were found
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }
}

/// The type of a parameter, along with whether it could be instantiated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterType {
    name: String,
    concrete: bool,
}

impl ParameterType {
    /// Creates a parameter type from its canonical name
    pub fn new(name: impl Into<String>, concrete: bool) -> Self {
        Self {
            name: name.into(),
            concrete,
        }
    }

    /// The canonical type name, such as `int[]` or `java.lang.String`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// False for interfaces and abstract classes
    pub fn is_concrete(&self) -> bool {
        self.concrete
    }
}

/// A single method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    return_type: String,
    parameters: Vec<ParameterType>,
    access_flags: MethodAccessFlags,
}

impl MethodDescriptor {
    /// Creates a method descriptor
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<ParameterType>,
        access_flags: MethodAccessFlags,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters,
            access_flags,
        }
    }

    /// The method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical name of the return type
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// The parameter types in declaration order
    pub fn parameters(&self) -> &[ParameterType] {
        &self.parameters
    }

    /// The raw access flags of the method
    pub fn access_flags(&self) -> MethodAccessFlags {
        self.access_flags
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::FINAL)
    }

    pub fn is_native(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::NATIVE)
    }

    pub fn is_synthetic(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::SYNTHETIC)
    }

    pub fn is_varargs(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::VARARGS)
    }

    pub fn is_bridge(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::BRIDGE)
    }

    /// Methods share the volatile bit with bridge methods
    pub fn is_volatile(&self) -> bool {
        self.is_bridge()
    }

    /// Methods share the transient bit with varargs methods
    pub fn is_transient(&self) -> bool {
        self.is_varargs()
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::ABSTRACT)
    }

    /// Whether any parameter is an interface or an abstract class
    pub fn has_non_concrete_parameter(&self) -> bool {
        self.parameters.iter().any(|parameter| !parameter.is_concrete())
    }
}
