use crate::attributes::{Attribute, AttributeKind, InnerClass};
use crate::error::Error;
use crate::raw_java_class::RawJavaClass;
use crate::{ClassAccessFlags, FQName, FQNameBuf, HasAttributes, Method};
use std::fmt::{Display, Formatter};

/// A java class, with every constant pool reference it makes resolved.
///
/// Resolution happens once, when the class is parsed, so a class file with dangling references
/// fails to parse instead of failing later on when it's inspected.
#[derive(Debug, Clone)]
pub struct JavaClass {
    major: u16,
    minor: u16,
    access_flags: ClassAccessFlags,
    this: FQNameBuf,
    super_name: Option<FQNameBuf>,
    interfaces: Vec<FQNameBuf>,
    methods: Vec<Method>,
    attributes: Vec<Attribute>,
}

impl JavaClass {
    pub(crate) fn new(class: RawJavaClass) -> Result<Self, Error> {
        let pool = &class.constant_pool;
        let this = FQNameBuf::from(pool.class_name(class.this_class)?.into_owned());
        // only java/lang/Object and module-info have no super class
        let super_name = match class.super_class {
            0 => None,
            index => Some(FQNameBuf::from(pool.class_name(index)?.into_owned())),
        };
        let interfaces = class
            .interfaces
            .iter()
            .map(|&index| Ok(FQNameBuf::from(pool.class_name(index)?.into_owned())))
            .collect::<Result<Vec<_>, Error>>()?;
        let methods = class
            .methods
            .iter()
            .map(|method| Method::new(method, pool).map_err(Error::from))
            .collect::<Result<Vec<_>, Error>>()?;
        let attributes = class
            .attributes
            .iter()
            .map(|raw| {
                let name = pool.utf8(raw.attribute_name_index)?;
                Attribute::new(pool, &name, &raw.info).map_err(Error::from)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            major: class.major,
            minor: class.minor,
            access_flags: ClassAccessFlags::from_raw(class.access_flags),
            this,
            super_name,
            interfaces,
            methods,
            attributes,
        })
    }

    /// Gets this class's name
    pub fn this(&self) -> &FQName {
        &self.this
    }

    /// Gets the super class's name of this class. Only `java/lang/Object` has none.
    pub fn super_name(&self) -> Option<&FQName> {
        self.super_name.as_deref()
    }

    /// Gets the names of this interfaces that this class implements, in declaration order
    pub fn interfaces(&self) -> impl Iterator<Item = &FQName> {
        self.interfaces.iter().map(|name| &**name)
    }

    /// Gets the methods declared in this class, in the order of the method table.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The class file version, as `(major, minor)`
    pub fn version(&self) -> (u16, u16) {
        (self.major, self.minor)
    }

    /// The access flags of the class
    pub fn access_flags(&self) -> ClassAccessFlags {
        self.access_flags
    }

    /// Whether this is an interface (annotation interfaces included)
    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlags::INTERFACE)
    }

    /// Whether this is declared abstract. Interfaces always are.
    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(ClassAccessFlags::ABSTRACT)
    }

    /// The entries of the `InnerClasses` attribute, if the class has one.
    pub fn inner_classes(&self) -> &[InnerClass] {
        match self.get_attribute("InnerClasses").map(|att| att.kind()) {
            Some(AttributeKind::InnerClasses(inner)) => inner,
            _ => &[],
        }
    }

    /// The canonical name of this class, as java reflection would report it.
    ///
    /// Returns `None` for local and anonymous classes, which don't have one.
    pub fn canonical_name(&self) -> Option<String> {
        self.canonical_name_of(self.this())
    }

    /// Works out the canonical name of some class using this class's `InnerClasses` attribute,
    /// which lists every nested class a class file refers to. `a/b/Outer$Inner` becomes
    /// `a.b.Outer.Inner` if it's listed as a member of `a/b/Outer`. Names that aren't listed
    /// are treated as top level classes.
    ///
    /// Returns `None` if the class is listed as a local or anonymous class.
    pub fn canonical_name_of(&self, name: &FQName) -> Option<String> {
        let inner_classes = self.inner_classes();
        let mut segments = vec![];
        let mut current = name;
        loop {
            // a malformed table could send us in a circle
            if segments.len() > inner_classes.len() {
                return None;
            }
            match inner_classes.iter().find(|ic| ic.inner_class() == current) {
                None => {
                    segments.push(current.to_dotted());
                    break;
                }
                Some(ic) => match (ic.outer_class(), ic.inner_name()) {
                    (Some(outer), Some(simple)) => {
                        segments.push(simple.to_string());
                        current = outer;
                    }
                    _ => return None,
                },
            }
        }
        segments.reverse();
        Some(segments.join("."))
    }
}

impl Display for JavaClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaClass")
            .field("this", &self.this())
            .field("super", &self.super_name())
            .field("interfaces", &self.interfaces().collect::<Vec<_>>())
            .field("access_flags", &self.access_flags)
            .field(
                "methods",
                &self
                    .methods
                    .iter()
                    .map(|m| format!("{}: {}", m.name(), m.signature()))
                    .collect::<Vec<_>>(),
            )
            .field(
                "attributes",
                &self
                    .attributes()
                    .map(|att| att.attribute_name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl HasAttributes for JavaClass {
    type Iter<'a> = std::slice::Iter<'a, Attribute> where Self: 'a;

    fn attributes<'a>(&'a self) -> Self::Iter<'a> {
        self.attributes.iter()
    }
}
