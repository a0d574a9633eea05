//! Function prototypes and closures.

use std::rc::{Rc, Weak};

use crate::class::Class;
use crate::string::VmStr;
use crate::value::Value;

/// Vararg flag bits of [`Prototype::varg`].
pub const VA_VARARG: u8 = 1 << 0;
pub const VA_METHOD: u8 = 1 << 1;
pub const VA_STATICMETHOD: u8 = 1 << 2;

/// Descriptor for one upvalue of a prototype: captured from the enclosing
/// function's stack (`instack`) or from its upvalues, at slot `idx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpvalDesc {
    pub instack: bool,
    pub idx: u8,
}

/// Immutable code-plus-metadata part of a function, shared by all closures
/// over it.
#[derive(Clone, Debug)]
pub struct Prototype {
    pub name: VmStr,
    pub nstack: u8,
    pub argc: u8,
    pub varg: u8,
    pub upvals: Vec<UpvalDesc>,
    pub protos: Vec<Rc<Prototype>>,
    /// Class this prototype was compiled under. A back-reference only, the
    /// class owns the prototype through its member map, never the reverse.
    pub parent_class: Option<Weak<Class>>,
    pub constants: Vec<Value>,
    pub code: Vec<u32>,
}

impl Prototype {
    /// Empty prototype with the given name; callers fill in the rest.
    pub fn named(name: &str) -> Self {
        Prototype {
            name: VmStr::from(name),
            nstack: 0,
            argc: 0,
            varg: 0,
            upvals: Vec::new(),
            protos: Vec::new(),
            parent_class: None,
            constants: Vec::new(),
            code: Vec::new(),
        }
    }

    /// The class this prototype belongs to, if any.
    pub fn parent(&self) -> Option<Rc<Class>> {
        self.parent_class.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_static_method(&self) -> bool {
        self.varg & VA_STATICMETHOD != 0
    }
}

/// A prototype plus its captured environment.
#[derive(Clone, Debug)]
pub struct Closure {
    pub proto: Rc<Prototype>,
    /// Count of live captured upvalues. Anything above zero has no
    /// constant representation.
    pub nupvals: u8,
}

impl Closure {
    pub fn new(proto: Rc<Prototype>) -> Self {
        Closure { proto, nupvals: 0 }
    }
}
