//! Object-graph data model for the Amber VM.
//!
//! Two layers:
//! - **Graph layer**: the tagged [`Value`] sum and the object shapes it
//!   points at ([`Map`], [`List`], [`Prototype`], [`Class`], [`Module`]),
//!   read-only from the serializer's point of view.
//! - **Raw layer** ([`json`]): a 1:1 serde mapping for graph documents,
//!   built into the graph layer on load.

pub mod code;
pub mod json;

mod builtins;
mod class;
mod list;
mod map;
mod module;
mod proto;
mod string;
mod value;

pub use builtins::Builtins;
pub use class::{Class, ClassKind, Instance};
pub use list::List;
pub use map::{Map, MapSlot};
pub use module::Module;
pub use proto::{Closure, Prototype, UpvalDesc, VA_METHOD, VA_STATICMETHOD, VA_VARARG};
pub use string::VmStr;
pub use value::{Real, Value};

#[cfg(test)]
mod code_tests;
