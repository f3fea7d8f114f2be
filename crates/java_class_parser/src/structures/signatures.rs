use crate::error::ErrorKind;
use crate::{FQName, FQNameBuf};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_while};
use nom::combinator::{all_consuming, map, value, verify};
use nom::multi::many0;
use nom::sequence::{delimited, tuple};
use nom::{Finish, IResult};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The most dimensions an array type can have
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// The type of a field, parameter or return value, as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signature {
    /// `Z`
    Boolean,
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `S`
    Short,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `F`
    Float,
    /// `D`
    Double,
    /// `V`, only valid as a return type
    Void,
    /// `L<binary name>;`
    FullyQualifiedClass(FQNameBuf),
    /// `[<component>`
    Array(Box<Signature>),
}

impl Signature {
    /// emits this signature as it would appear in a descriptor
    pub fn descriptor(&self) -> String {
        match self {
            Signature::Boolean => "Z".to_string(),
            Signature::Byte => "B".to_string(),
            Signature::Char => "C".to_string(),
            Signature::Short => "S".to_string(),
            Signature::Int => "I".to_string(),
            Signature::Long => "J".to_string(),
            Signature::Float => "F".to_string(),
            Signature::Double => "D".to_string(),
            Signature::Void => "V".to_string(),
            Signature::FullyQualifiedClass(f) => {
                format!("L{f};")
            }
            Signature::Array(array) => {
                format!("[{}", array.descriptor())
            }
        }
    }

    /// The number of array dimensions. Zero for anything that isn't an array.
    pub fn dimensions(&self) -> usize {
        let mut dimensions = 0;
        let mut current = self;
        while let Signature::Array(component) = current {
            dimensions += 1;
            current = component;
        }
        dimensions
    }

    /// The innermost component of an array type, or the type itself for non-arrays.
    pub fn element_type(&self) -> &Signature {
        let mut current = self;
        while let Signature::Array(component) = current {
            current = component;
        }
        current
    }

    /// The class this type names, if it's a class or interface type. Arrays don't name a class.
    pub fn class_name(&self) -> Option<&FQName> {
        match self {
            Signature::FullyQualifiedClass(name) => Some(&**name),
            _ => None,
        }
    }

    /// Checks whether this is one of the primitive types, `void` included.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Signature::FullyQualifiedClass(_) | Signature::Array(_)
        )
    }
}

impl FromStr for Signature {
    type Err = ErrorKind;

    /// Parses a field descriptor, such as `[Ljava/lang/String;`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_field_type)(s)
            .finish()
            .map(|(_, parsed)| parsed)
            .map_err(|_| ErrorKind::InvalidDescriptor(s.to_string()))
    }
}

impl Display for Signature {
    /// Writes the type the way it's written in java source, with binary names.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Signature::Boolean => write!(f, "boolean"),
            Signature::Byte => write!(f, "byte"),
            Signature::Char => write!(f, "char"),
            Signature::Short => write!(f, "short"),
            Signature::Int => write!(f, "int"),
            Signature::Long => write!(f, "long"),
            Signature::Float => write!(f, "float"),
            Signature::Double => write!(f, "double"),
            Signature::Void => write!(f, "void"),
            Signature::FullyQualifiedClass(fqc) => write!(f, "{}", fqc.to_dotted()),
            Signature::Array(array) => write!(f, "{}[]", array),
        }
    }
}

/// The parameter and return types of a method, parsed from a descriptor like `(ZI)Ljava/lang/Object;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    args: Box<[Signature]>,
    ret_type: Signature,
}

impl MethodSignature {
    /// Creates a method signature from its parts
    pub fn new<I: IntoIterator<Item = Signature>>(args: I, ret_type: Signature) -> Self {
        Self {
            args: args.into_iter().collect(),
            ret_type,
        }
    }

    /// The parameter types, in declaration order
    pub fn args(&self) -> &[Signature] {
        &self.args
    }

    /// The return type
    pub fn ret_type(&self) -> &Signature {
        &self.ret_type
    }

    /// emits this signature as a method descriptor
    pub fn descriptor(&self) -> String {
        format!(
            "({}){}",
            self.args.iter().map(|s| s.descriptor()).collect::<String>(),
            self.ret_type.descriptor()
        )
    }
}

impl FromStr for MethodSignature {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_method_descriptor)(s)
            .finish()
            .map(|(_, parsed)| parsed)
            .map_err(|_| ErrorKind::InvalidDescriptor(s.to_string()))
    }
}

impl Display for MethodSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.ret_type,
            self.args
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Array dimensions are counted up front rather than parsed recursively
fn parse_field_type(string: &str) -> IResult<&str, Signature> {
    map(
        tuple((
            verify(take_while(|c: char| c == '['), |dimensions: &str| {
                dimensions.len() <= MAX_ARRAY_DIMENSIONS
            }),
            parse_element_type,
        )),
        |(dimensions, element)| {
            (0..dimensions.len()).fold(element, |component, _| {
                Signature::Array(Box::new(component))
            })
        },
    )(string)
}

fn parse_element_type(string: &str) -> IResult<&str, Signature> {
    alt((
        value(Signature::Boolean, tag("Z")),
        value(Signature::Byte, tag("B")),
        value(Signature::Char, tag("C")),
        value(Signature::Short, tag("S")),
        value(Signature::Int, tag("I")),
        value(Signature::Long, tag("J")),
        value(Signature::Float, tag("F")),
        value(Signature::Double, tag("D")),
        map(
            delimited(tag("L"), take_till1(|c| c == ';'), tag(";")),
            |chars: &str| Signature::FullyQualifiedClass(FQNameBuf::from(chars)),
        ),
    ))(string)
}

fn parse_return_type(string: &str) -> IResult<&str, Signature> {
    alt((value(Signature::Void, tag("V")), parse_field_type))(string)
}

fn parse_method_descriptor(string: &str) -> IResult<&str, MethodSignature> {
    map(
        tuple((
            delimited(tag("("), many0(parse_field_type), tag(")")),
            parse_return_type,
        )),
        |(args, ret_type)| MethodSignature::new(args, ret_type),
    )(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_jni_signature() {
        let jni = "(ZI)Ljava/lang/Object;";
        let parsed: MethodSignature = jni.parse().expect("couldn't parse");
        assert_eq!(
            parsed,
            MethodSignature::new(
                [Signature::Boolean, Signature::Int],
                Signature::FullyQualifiedClass(FQNameBuf::from("java/lang/Object"))
            )
        );
        assert_eq!(parsed.descriptor(), jni);
        assert_eq!(parsed.to_string(), "java.lang.Object (boolean, int)")
    }

    #[test]
    fn arrays_count_dimensions() {
        let parsed: Signature = "[[Ljava/util/List;".parse().expect("couldn't parse");
        assert_eq!(parsed.dimensions(), 2);
        assert_eq!(
            parsed.element_type().class_name().map(|name| name.to_string()),
            Some("java/util/List".to_string())
        );
        assert_eq!(parsed.to_string(), "java.util.List[][]");
        assert!(!parsed.is_primitive());
    }

    #[test]
    fn void_is_only_a_return_type() {
        assert!("(V)V".parse::<MethodSignature>().is_err());
        assert!("V".parse::<Signature>().is_err());
        let parsed: MethodSignature = "()V".parse().expect("couldn't parse");
        assert!(parsed.args().is_empty());
        assert_eq!(parsed.ret_type(), &Signature::Void);
    }

    #[test]
    fn rejects_malformed_descriptors() {
        for bad in ["", "(", "(I", "()", "(L;)V", "(Ljava/lang/String)V", "()VV", "(Q)V"] {
            assert!(
                matches!(bad.parse::<MethodSignature>(), Err(ErrorKind::InvalidDescriptor(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn array_dimensions_are_limited() {
        let widest = format!("({}I)V", "[".repeat(MAX_ARRAY_DIMENSIONS));
        let parsed: MethodSignature = widest.parse().expect("255 dimensions are allowed");
        assert_eq!(parsed.args()[0].dimensions(), MAX_ARRAY_DIMENSIONS);
        assert_eq!(parsed.args()[0].element_type(), &Signature::Int);
        assert_eq!(parsed.descriptor(), widest);

        for dimensions in [MAX_ARRAY_DIMENSIONS + 1, 60_000] {
            let too_wide = format!("({}I)V", "[".repeat(dimensions));
            assert!(
                matches!(too_wide.parse::<MethodSignature>(), Err(ErrorKind::InvalidDescriptor(_))),
                "{dimensions} dimensions should not parse"
            );
        }
        assert!("[".repeat(60_000).parse::<Signature>().is_err());
    }
}
