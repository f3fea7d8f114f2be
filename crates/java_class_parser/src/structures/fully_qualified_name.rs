//! Binary class names, borrowed and owned, in the manner of `Path` and `PathBuf`

use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

/// Gets an object as a fully qualified name
pub trait AsFullyQualifiedName {
    /// Views this value as a fully qualified name
    fn as_fcq(&self) -> &FQName;
}

impl AsFullyQualifiedName for str {
    fn as_fcq(&self) -> &FQName {
        FQName::new(self)
    }
}

/// A fully qualified name in its binary form, with identifiers separated by `/`,
/// such as `java/util/Map$Entry`.
#[derive(Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct FQName {
    binary: str,
}

impl FQName {
    /// Create a new fully qualified name from a string
    pub fn new<S: AsRef<str> + ?Sized>(binary: &S) -> &Self {
        // SAFETY: FQName is a transparent wrapper around str
        unsafe { &*(binary.as_ref() as *const str as *const FQName) }
    }

    /// The binary name as a string
    pub fn as_str(&self) -> &str {
        &self.binary
    }

    /// Converts the binary name into the dotted form used in java source, keeping any `$`.
    /// `java/util/Map$Entry` becomes `java.util.Map$Entry`.
    pub fn to_dotted(&self) -> String {
        self.binary.replace('/', ".")
    }

    /// The package the name is in, in binary form. Classes in the default package have none.
    pub fn package(&self) -> Option<&str> {
        self.binary.rsplit_once('/').map(|(package, _)| package)
    }

    /// The last segment of the name, without the package
    pub fn simple_binary_name(&self) -> &str {
        self.binary
            .rsplit_once('/')
            .map_or(&self.binary, |(_, simple)| simple)
    }

    /// Creates an owned copy of this name
    pub fn to_fqname_buf(&self) -> FQNameBuf {
        FQNameBuf::from(&self.binary)
    }
}

impl PartialEq<str> for FQName {
    fn eq(&self, other: &str) -> bool {
        &self.binary == other
    }
}

impl PartialEq<&str> for FQName {
    fn eq(&self, other: &&str) -> bool {
        &self.binary == *other
    }
}

impl PartialEq<String> for FQName {
    fn eq(&self, other: &String) -> bool {
        &self.binary == other
    }
}

impl AsRef<FQName> for FQName {
    fn as_ref(&self) -> &FQName {
        self
    }
}

impl Debug for FQName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.binary, f)
    }
}

impl Display for FQName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.binary, f)
    }
}

impl ToOwned for FQName {
    type Owned = FQNameBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_fqname_buf()
    }
}
impl AsFullyQualifiedName for FQName {
    fn as_fcq(&self) -> &FQName {
        self
    }
}

/// An owned version of a fully qualified name
#[derive(Eq, PartialEq, Hash, Clone)]
pub struct FQNameBuf {
    binary: String,
}
impl Debug for FQNameBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.binary, f)
    }
}

impl Display for FQNameBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.binary, f)
    }
}
impl Deref for FQNameBuf {
    type Target = FQName;

    fn deref(&self) -> &Self::Target {
        FQName::new(&self.binary)
    }
}

impl AsRef<FQName> for FQNameBuf {
    fn as_ref(&self) -> &FQName {
        self.borrow()
    }
}

impl Borrow<FQName> for FQNameBuf {
    fn borrow(&self) -> &FQName {
        FQName::new(&self.binary)
    }
}

impl From<&str> for FQNameBuf {
    fn from(name: &str) -> Self {
        Self {
            binary: name.to_string(),
        }
    }
}

impl From<String> for FQNameBuf {
    fn from(binary: String) -> Self {
        Self { binary }
    }
}

impl PartialEq<str> for FQNameBuf {
    fn eq(&self, other: &str) -> bool {
        self.binary == other
    }
}

impl PartialEq<&str> for FQNameBuf {
    fn eq(&self, other: &&str) -> bool {
        self.binary == *other
    }
}

impl AsFullyQualifiedName for FQNameBuf {
    fn as_fcq(&self) -> &FQName {
        self.as_ref()
    }
}
