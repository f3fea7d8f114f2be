//! Decides which methods make it into the output

use std::fmt::{Display, Formatter};

use crate::descriptor::{ClassDescriptor, MethodDescriptor};

/// Which kinds of methods to leave out, plus how to render the ones that stay.
///
/// Every option is off by default, which keeps every method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfiguration {
    pub skip_static: bool,
    pub skip_non_static: bool,
    pub skip_final: bool,
    pub skip_native: bool,
    pub skip_synthetic: bool,
    pub skip_varargs: bool,
    pub skip_bridge: bool,
    pub skip_volatile: bool,
    pub skip_transient: bool,
    /// Skips every method of an interface
    pub skip_interface: bool,
    /// Skips methods declared abstract
    pub skip_abstract: bool,
    /// Skips methods that take an interface or an abstract class
    pub skip_methods_with_non_concrete_params: bool,
    /// Prefixes each line's return type with the method's modifiers
    pub show_modifiers: bool,
}

/// Why a method was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Static,
    NonStatic,
    Final,
    Native,
    Synthetic,
    Varargs,
    Bridge,
    Volatile,
    Transient,
    Interface,
    Abstract,
    NonConcreteParameter,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::Static => "static",
            SkipReason::NonStatic => "not static",
            SkipReason::Final => "final",
            SkipReason::Native => "native",
            SkipReason::Synthetic => "synthetic",
            SkipReason::Varargs => "varargs",
            SkipReason::Bridge => "bridge",
            SkipReason::Volatile => "volatile",
            SkipReason::Transient => "transient",
            SkipReason::Interface => "declared by an interface",
            SkipReason::Abstract => "abstract",
            SkipReason::NonConcreteParameter => "has a non-concrete parameter",
        };
        f.write_str(reason)
    }
}

impl SkipReason {
    /// Whether the rule matches a method of a class
    pub fn applies(self, class: &ClassDescriptor, method: &MethodDescriptor) -> bool {
        match self {
            SkipReason::Static => method.is_static(),
            SkipReason::NonStatic => !method.is_static(),
            SkipReason::Final => method.is_final(),
            SkipReason::Native => method.is_native(),
            SkipReason::Synthetic => method.is_synthetic(),
            SkipReason::Varargs => method.is_varargs(),
            SkipReason::Bridge => method.is_bridge(),
            SkipReason::Volatile => method.is_volatile(),
            SkipReason::Transient => method.is_transient(),
            SkipReason::Interface => class.is_interface(),
            SkipReason::Abstract => method.is_abstract(),
            SkipReason::NonConcreteParameter => method.has_non_concrete_parameter(),
        }
    }
}

impl FilterConfiguration {
    /// The first rule that leaves the method out, if any
    pub fn skip_reason(
        &self,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
    ) -> Option<SkipReason> {
        let rules = [
            (self.skip_static, SkipReason::Static),
            (self.skip_non_static, SkipReason::NonStatic),
            (self.skip_final, SkipReason::Final),
            (self.skip_native, SkipReason::Native),
            (self.skip_synthetic, SkipReason::Synthetic),
            (self.skip_varargs, SkipReason::Varargs),
            (self.skip_bridge, SkipReason::Bridge),
            (self.skip_volatile, SkipReason::Volatile),
            (self.skip_transient, SkipReason::Transient),
            (self.skip_interface, SkipReason::Interface),
            (self.skip_abstract, SkipReason::Abstract),
            (
                self.skip_methods_with_non_concrete_params,
                SkipReason::NonConcreteParameter,
            ),
        ];
        rules
            .into_iter()
            .find(|&(enabled, reason)| enabled && reason.applies(class, method))
            .map(|(_, reason)| reason)
    }

    /// Whether the method survives every rule
    pub fn keeps(&self, class: &ClassDescriptor, method: &MethodDescriptor) -> bool {
        self.skip_reason(class, method).is_none()
    }
}
