//! Byte strings as the VM stores them.

use std::fmt;
use std::rc::Rc;

/// Immutable, length-counted byte string. VM strings are raw byte
/// sequences and are not guaranteed to be valid UTF-8.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VmStr(Rc<[u8]>);

impl VmStr {
    pub fn new(bytes: &[u8]) -> Self {
        Self(Rc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for VmStr {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for VmStr {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<String> for VmStr {
    fn from(s: String) -> Self {
        Self::new(s.as_bytes())
    }
}

impl fmt::Display for VmStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for VmStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}
