//! Turns parsed classes into [`ClassDescriptor`]s

use std::collections::HashSet;

use java_class_parser::inheritance::{InheritKind, InheritanceGraph};
use java_class_parser::{ClassIndex, FQName, JavaClass, Method, MethodSignature, Signature};
use tracing::{debug, trace};

use crate::descriptor::{ClassDescriptor, MethodDescriptor, ParameterType};

/// Describes the classes of one archive. Type names and concreteness are resolved against the
/// other classes in the same archive.
#[derive(Debug)]
pub struct DescriptorReader<'a> {
    index: &'a ClassIndex,
    inheritance: Option<InheritanceGraph<'a>>,
}

impl<'a> DescriptorReader<'a> {
    /// A reader that adds the public methods each class inherits from the rest of the archive
    pub fn new(index: &'a ClassIndex) -> Self {
        Self {
            index,
            inheritance: Some(InheritanceGraph::new(index)),
        }
    }

    /// A reader that only lists the methods each class declares itself
    pub fn declared_only(index: &'a ClassIndex) -> Self {
        Self {
            index,
            inheritance: None,
        }
    }

    /// Describes every class of the index, in the order they were found
    pub fn read_all(&self) -> Vec<ClassDescriptor> {
        self.index.iter().map(|class| self.read(class)).collect()
    }

    /// Describes a single class
    pub fn read(&self, class: &JavaClass) -> ClassDescriptor {
        let name = class
            .canonical_name()
            .unwrap_or_else(|| class.this().to_dotted());
        trace!("describing {}", name);

        let mut seen = HashSet::new();
        let mut methods = vec![];
        let mut collect = |owner: &JavaClass, include_static: bool| {
            for method in owner.methods() {
                if !method.is_public() || method.is_initializer() {
                    continue;
                }
                if !include_static && method.is_static() {
                    continue;
                }
                if seen.insert((method.name().to_string(), method.signature().clone())) {
                    methods.push(self.describe_method(owner, method));
                }
            }
        };

        collect(class, true);
        if let Some(parents) = self
            .inheritance
            .as_ref()
            .and_then(|graph| graph.inherits(class.this()))
        {
            for (parent, kind) in parents {
                collect(parent, kind == InheritKind::Extends);
            }
        }

        ClassDescriptor::new(name, class.is_interface(), methods)
    }

    fn describe_method(&self, owner: &JavaClass, method: &Method) -> MethodDescriptor {
        let signature: &MethodSignature = method.signature();
        let parameters = signature
            .args()
            .iter()
            .map(|arg| ParameterType::new(self.type_name(owner, arg), self.is_concrete(arg)))
            .collect();
        MethodDescriptor::new(
            method.name(),
            self.type_name(owner, signature.ret_type()),
            parameters,
            method.access_flags(),
        )
    }

    /// The canonical name of a type, as used in a class
    fn type_name(&self, owner: &JavaClass, signature: &Signature) -> String {
        let element = signature.element_type();
        let mut name = match element.class_name() {
            Some(class_name) => self.canonical_name(owner, class_name),
            None => element.to_string(),
        };
        for _ in 0..signature.dimensions() {
            name.push_str("[]");
        }
        name
    }

    /// Classes in the archive know their own name. Otherwise the referencing class's
    /// `InnerClasses` attribute describes any nesting.
    fn canonical_name(&self, owner: &JavaClass, name: &FQName) -> String {
        self.index
            .find(name)
            .and_then(|class| class.canonical_name())
            .or_else(|| owner.canonical_name_of(name))
            .unwrap_or_else(|| name.to_dotted())
    }

    /// Primitives and arrays are always concrete. Classes that aren't in the archive are
    /// assumed to be.
    fn is_concrete(&self, signature: &Signature) -> bool {
        let Some(class_name) = signature.class_name() else {
            return true;
        };
        match self.index.find(class_name) {
            Some(class) => !class.is_interface() && !class.is_abstract(),
            None => {
                debug!("{} is not in the archive, assuming it is concrete", class_name);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itest_common::{access, ClassFileBuilder};
    use java_class_parser::parse_bytes;

    fn index(classes: impl IntoIterator<Item = ClassFileBuilder>) -> ClassIndex {
        classes
            .into_iter()
            .map(|builder| parse_bytes(&builder.build()[..]).unwrap_or_else(|e| panic!("{e:#}")))
            .collect()
    }

    fn method_names(class: &ClassDescriptor) -> Vec<&str> {
        class.methods().iter().map(|method| method.name()).collect()
    }

    #[test]
    fn public_methods_only() {
        let index = index([ClassFileBuilder::new("com/ex/Foo")
            .method(access::PUBLIC, "<init>", "()V")
            .method(access::STATIC, "<clinit>", "()V")
            .method(access::PUBLIC | access::STATIC, "bar", "(Ljava/lang/String;Ljava/util/List;)I")
            .method(access::PRIVATE, "hidden", "()V")
            .method(access::PROTECTED, "guarded", "()V")
            .method(0, "packaged", "()V")
            .method(access::PUBLIC, "baz", "([[J)[Ljava/lang/Object;")]);
        let classes = DescriptorReader::new(&index).read_all();
        assert_eq!(classes.len(), 1);
        let foo = &classes[0];
        assert_eq!(foo.name(), "com.ex.Foo");
        assert_eq!(method_names(foo), ["bar", "baz"]);

        let bar = &foo.methods()[0];
        assert_eq!(bar.return_type(), "int");
        assert_eq!(
            bar.parameters()
                .iter()
                .map(|parameter| parameter.name())
                .collect::<Vec<_>>(),
            ["java.lang.String", "java.util.List"]
        );
        assert!(bar.is_static());

        let baz = &foo.methods()[1];
        assert_eq!(baz.return_type(), "java.lang.Object[]");
        assert_eq!(baz.parameters()[0].name(), "long[][]");
    }

    #[test]
    fn concreteness_comes_from_the_archive() {
        let index = index([
            ClassFileBuilder::new("Service").method(
                access::PUBLIC,
                "accept",
                "(LShape;LSquare;LBase;[LShape;ILjava/util/List;)V",
            ),
            ClassFileBuilder::new("Shape").interface(),
            ClassFileBuilder::new("Square"),
            ClassFileBuilder::new("Base").access(access::PUBLIC | access::ABSTRACT),
        ]);
        let service = DescriptorReader::new(&index).read(index.find("Service").unwrap());
        let concrete = service.methods()[0]
            .parameters()
            .iter()
            .map(|parameter| parameter.is_concrete())
            .collect::<Vec<_>>();
        assert_eq!(concrete, [false, true, false, true, true, true]);
        assert!(service.methods()[0].has_non_concrete_parameter());
    }

    #[test]
    fn inherited_methods_follow_declared_ones() {
        let index = index([
            ClassFileBuilder::new("Square")
                .extends("Rectangle")
                .implements("Shape")
                .method(access::PUBLIC, "area", "()D"),
            ClassFileBuilder::new("Rectangle")
                .method(access::PUBLIC, "area", "()D")
                .method(access::PUBLIC, "width", "()D")
                .method(access::PUBLIC | access::STATIC, "unit", "()LRectangle;")
                .method(access::PRIVATE, "secret", "()V"),
            ClassFileBuilder::new("Shape")
                .interface()
                .method(access::PUBLIC | access::ABSTRACT, "area", "()D")
                .method(access::PUBLIC | access::ABSTRACT, "name", "()Ljava/lang/String;")
                .method(access::PUBLIC | access::STATIC, "origin", "()LShape;"),
        ]);
        let square = index.find("Square").unwrap();

        let inherited = DescriptorReader::new(&index).read(square);
        assert_eq!(method_names(&inherited), ["area", "width", "unit", "name"]);
        assert!(!inherited.methods()[0].is_abstract());

        let declared = DescriptorReader::declared_only(&index).read(square);
        assert_eq!(method_names(&declared), ["area"]);
    }

    #[test]
    fn overloads_are_kept() {
        let index = index([
            ClassFileBuilder::new("Child")
                .extends("Parent")
                .method(access::PUBLIC, "put", "(I)V"),
            ClassFileBuilder::new("Parent")
                .method(access::PUBLIC, "put", "(J)V")
                .method(access::PUBLIC, "put", "(I)V"),
        ]);
        let child = DescriptorReader::new(&index).read(index.find("Child").unwrap());
        assert_eq!(
            child
                .methods()
                .iter()
                .map(|method| method.parameters()[0].name())
                .collect::<Vec<_>>(),
            ["int", "long"]
        );
    }

    #[test]
    fn member_classes_use_canonical_names() {
        let index = index([
            ClassFileBuilder::new("a/b/Outer$Inner")
                .inner_class("a/b/Outer$Inner", Some("a/b/Outer"), Some("Inner"), access::PUBLIC)
                .inner_class("java/util/Map$Entry", Some("java/util/Map"), Some("Entry"), access::PUBLIC)
                .inner_class("a/b/Outer$1", None, None, 0)
                .method(access::PUBLIC, "entry", "(La/b/Outer$1;)Ljava/util/Map$Entry;"),
            ClassFileBuilder::new("a/b/Outer$1")
                .inner_class("a/b/Outer$1", None, None, 0),
        ]);
        let classes = DescriptorReader::new(&index).read_all();
        assert_eq!(classes[0].name(), "a.b.Outer.Inner");
        assert_eq!(classes[1].name(), "a.b.Outer$1");
        let entry = &classes[0].methods()[0];
        assert_eq!(entry.return_type(), "java.util.Map.Entry");
        assert_eq!(entry.parameters()[0].name(), "a.b.Outer$1");
    }
}
