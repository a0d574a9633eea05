//! Solidifier: serializes VM object graphs into C constant constructors.
//!
//! Walks a closure, class, or module and emits the constructor source text
//! that rebuilds it as read-only constants once compiled against the VM
//! runtime. Parsing, compiling, allocating, and interning all happen at
//! build time of the emitted text; nothing is allocated when it loads.
//!
//! # Example
//!
//! ```
//! use amber_core::{Builtins, Closure, Prototype, Value};
//! use amber_solidify::{Sink, Solidifier};
//! use std::rc::Rc;
//!
//! let clo = Rc::new(Closure::new(Rc::new(Prototype::named("f"))));
//! let builtins = Builtins::core();
//! let mut out = Vec::new();
//! Solidifier::new(&builtins, Sink::writer(&mut out))
//!     .dump(&Value::closure(clo), None)
//!     .unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("be_local_closure(f,"));
//! ```

mod emit;
mod error;
pub mod ident;
mod sink;

pub use emit::Solidifier;
pub use error::SolidifyError;
pub use sink::{LINE_BUF, Sink};

#[cfg(test)]
mod ident_tests;
#[cfg(test)]
mod sink_tests;
