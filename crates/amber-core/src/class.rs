//! Classes and instances.

use std::rc::{Rc, Weak};

use crate::map::Map;
use crate::string::VmStr;
use crate::value::Value;

/// Distinguishes the built-in data classes from user classes. The data
/// classes are the only ones whose instances have a constant form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    User,
    Map,
    List,
    Bytes,
}

#[derive(Clone, Debug)]
pub struct Class {
    pub name: VmStr,
    /// Instance variable count.
    pub nvar: u16,
    pub super_: Option<Rc<Class>>,
    /// Member map, string name to value.
    pub members: Option<Map>,
    pub kind: ClassKind,
}

impl Class {
    /// Built-in data class (`map`, `list`, `bytes`): no members, no state.
    pub fn simple(name: &str, kind: ClassKind) -> Rc<Self> {
        Rc::new(Class {
            name: VmStr::from(name),
            nvar: 0,
            super_: None,
            members: None,
            kind,
        })
    }

    /// Name-only user class, for references that never need the body.
    pub fn named(name: &str) -> Rc<Self> {
        Rc::new(Class {
            name: VmStr::from(name),
            nvar: 0,
            super_: None,
            members: None,
            kind: ClassKind::User,
        })
    }

    /// User class whose member closures may point back at the class under
    /// construction; `members` receives the weak self-reference.
    pub fn build(
        name: &str,
        nvar: u16,
        super_: Option<Rc<Class>>,
        members: impl FnOnce(&Weak<Class>) -> Option<Map>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak| Class {
            name: VmStr::from(name),
            nvar,
            super_,
            members: members(weak),
            kind: ClassKind::User,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    pub members: Vec<Value>,
    pub super_: Option<Rc<Instance>>,
    pub sub: Option<Rc<Instance>>,
}

impl Instance {
    pub fn of(class: Rc<Class>, members: Vec<Value>) -> Self {
        Instance {
            class,
            members,
            super_: None,
            sub: None,
        }
    }

    /// Buffer held by a `bytes` instance: pointer at member 0, length at
    /// member 1.
    pub fn bytes_payload(&self) -> Option<&[u8]> {
        let buf = match self.members.first()? {
            Value::NativePtr(Some(buf)) => buf,
            _ => return None,
        };
        let len = match self.members.get(1)? {
            Value::Int(len) if *len >= 0 => *len as usize,
            _ => return None,
        };
        (len <= buf.len()).then(|| &buf[..len])
    }
}
