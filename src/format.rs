//! Renders methods as `<class: return name(parameters)>` lines

use std::fmt::{Display, Formatter};

use java_class_parser::MethodAccessFlags;

use crate::descriptor::MethodDescriptor;

/// Method modifiers in the order java writes them. Bridge and varargs methods come out as
/// `volatile` and `transient`, since they share those bits.
const MODIFIER_KEYWORDS: [(MethodAccessFlags, &str); 11] = [
    (MethodAccessFlags::PUBLIC, "public"),
    (MethodAccessFlags::PROTECTED, "protected"),
    (MethodAccessFlags::PRIVATE, "private"),
    (MethodAccessFlags::ABSTRACT, "abstract"),
    (MethodAccessFlags::STATIC, "static"),
    (MethodAccessFlags::FINAL, "final"),
    (MethodAccessFlags::VARARGS, "transient"),
    (MethodAccessFlags::BRIDGE, "volatile"),
    (MethodAccessFlags::SYNCHRONIZED, "synchronized"),
    (MethodAccessFlags::NATIVE, "native"),
    (MethodAccessFlags::STRICT, "strictfp"),
];

/// The space separated modifier keywords for a set of method flags
pub fn modifier_string(flags: MethodAccessFlags) -> String {
    MODIFIER_KEYWORDS
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, keyword)| *keyword)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single output line. Formatting never fails.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorLine<'a> {
    class_name: &'a str,
    method: &'a MethodDescriptor,
    show_modifiers: bool,
}

impl<'a> DescriptorLine<'a> {
    pub fn new(class_name: &'a str, method: &'a MethodDescriptor, show_modifiers: bool) -> Self {
        Self {
            class_name,
            method,
            show_modifiers,
        }
    }
}

impl Display for DescriptorLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}: ", self.class_name)?;
        if self.show_modifiers {
            write!(f, "{} ", modifier_string(self.method.access_flags()))?;
        }
        write!(f, "{} {}(", self.method.return_type(), self.method.name())?;
        for (position, parameter) in self.method.parameters().iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            f.write_str(parameter.name())?;
        }
        f.write_str(")>")
    }
}
