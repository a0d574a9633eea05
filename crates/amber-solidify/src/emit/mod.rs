//! The recursive emitters, one per value shape.
//!
//! Cycles in the graph (class ↔ method, module ↔ member) are broken
//! structurally: classes are forward-declared with `extern` before any
//! member that could refer back to them, and the parent-class slot of a
//! prototype is emitted as a pointer, never by value.

mod class;
mod closure;
mod map;
mod module;
mod proto;
mod value;

use amber_core::{Builtins, Value};

use crate::error::SolidifyError;
use crate::sink::Sink;

pub(crate) const BANNER_OPEN: &str =
    "/********************************************************************\n";
pub(crate) const BANNER_RULE: &str =
    "********************************************************************/\n";
pub(crate) const BANNER_CLOSE: &str =
    "/*******************************************************************/\n\n";
pub(crate) const MODULE_END: &str =
    "/********************************************************************/\n";

/// Walks a value graph and emits C constructor source for it.
///
/// The graph is read-only to the solidifier; the caller must not mutate it
/// while a dump is in progress.
pub struct Solidifier<'b, 'w> {
    builtins: &'b Builtins,
    weak_strings: bool,
    sink: Sink<'w>,
}

impl<'b, 'w> Solidifier<'b, 'w> {
    pub fn new(builtins: &'b Builtins, sink: Sink<'w>) -> Self {
        Solidifier {
            builtins,
            weak_strings: false,
            sink,
        }
    }

    /// Select the weak constructor family for strings and names, for
    /// string literals not known to the target's intern table at link
    /// time.
    pub fn weak_strings(mut self, on: bool) -> Self {
        self.weak_strings = on;
        self
    }

    /// Emit the top-level value. Only closures, classes, and modules stand
    /// alone; `prefix` names the outermost symbol context for closures.
    pub fn dump(&mut self, value: &Value, prefix: Option<&str>) -> Result<(), SolidifyError> {
        match value {
            Value::Closure { clo, .. } => self.solidify_closure(clo, prefix),
            Value::Class(cl) => self.solidify_class(cl),
            Value::Module(ml) => self.solidify_module(ml),
            other => Err(SolidifyError::UnsupportedValue(other.type_name())),
        }
    }
}


#[cfg(test)]
mod closure_tests;
#[cfg(test)]
mod map_tests;
