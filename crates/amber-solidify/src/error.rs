//! Error type for solidification.

use std::fmt;
use std::io;

/// Error raised while solidifying a value graph. Output already written to
/// the sink when the error surfaces stays there; there is no rollback.
#[derive(Debug)]
pub enum SolidifyError {
    /// Top-level value is not a closure, class, or module.
    UnsupportedValue(&'static str),
    /// Instance of a class with no constant representation.
    UnsupportedClass(String),
    /// Instance participates in an inheritance chain.
    InstanceLinkage,
    /// Data-class instance whose members are not the expected shape.
    MalformedInstance(&'static str),
    /// Map key is neither a string nor an integer.
    UnsupportedKeyType(&'static str),
    /// Value kind that cannot appear in a constant table.
    UnsupportedConstant(&'static str),
    /// GETGBL/SETGBL referencing a global outside the builtin table; the
    /// emitted constant would dangle.
    NonBuiltinGlobal(u32),
    /// The underlying writer failed.
    Io(io::Error),
}

impl fmt::Display for SolidifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedValue(t) => write!(f, "unsupported type: {t}"),
            Self::UnsupportedClass(name) => write!(f, "unsupported class: {name}"),
            Self::InstanceLinkage => write!(f, "instance must not have a super/sub class"),
            Self::MalformedInstance(what) => write!(f, "malformed {what} instance"),
            Self::UnsupportedKeyType(t) => write!(f, "unsupported type in key: {t}"),
            Self::UnsupportedConstant(t) => {
                write!(f, "unsupported type in function constants: {t}")
            }
            Self::NonBuiltinGlobal(g) => {
                write!(f, "unsupported access to non-builtin global G{g}")
            }
            Self::Io(e) => write!(f, "write failed: {e}"),
        }
    }
}

impl std::error::Error for SolidifyError {}

impl From<io::Error> for SolidifyError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
