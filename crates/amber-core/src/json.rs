//! JSON graph documents.
//!
//! A document names the builtin table, an optional set of referenced
//! classes, and the value to solidify:
//!
//! ```json
//! {
//!   "dump": {
//!     "class": {
//!       "name": "Point",
//!       "nvar": 2,
//!       "members": [
//!         ["move", { "closure": { "proto": { "name": "move", "nstack": 3,
//!           "argc": 3, "code": ["0x80040000"] } } }]
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! The raw layer below maps 1:1 onto the document; [`load`] builds it into
//! the object graph. Member closures of a class are compiled under that
//! class unless they name another `parent` explicitly, which must then be
//! listed in the top-level `classes` registry.

use std::rc::Rc;
use std::rc::Weak;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::builtins::Builtins;
use crate::class::{Class, ClassKind, Instance};
use crate::list::List;
use crate::map::Map;
use crate::module::Module;
use crate::proto::{Closure, Prototype, UpvalDesc};
use crate::value::{Real, Value};

// ----------------------------------------------------------------------
// Raw layer
// ----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDocument {
    /// Overrides the stock builtin table when present.
    #[serde(default)]
    pub builtins: Option<Vec<String>>,
    /// Classes referenced by name from `parent` fields or class values.
    /// Each entry may refer to earlier entries or to itself.
    #[serde(default)]
    pub classes: Vec<RawClass>,
    pub dump: RawRoot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawRoot {
    Closure(RawClosure),
    Class(RawClass),
    Module(RawModule),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClass {
    pub name: String,
    #[serde(default)]
    pub nvar: u16,
    #[serde(default, rename = "super")]
    pub super_: Option<String>,
    #[serde(default)]
    pub members: Vec<(String, RawValue)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawModule {
    pub name: String,
    #[serde(default)]
    pub members: Vec<(String, RawValue)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClosure {
    #[serde(default)]
    pub nupvals: u8,
    #[serde(default, rename = "static")]
    pub static_: bool,
    pub proto: RawProto,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProto {
    pub name: String,
    #[serde(default)]
    pub nstack: u8,
    #[serde(default)]
    pub argc: u8,
    #[serde(default)]
    pub varg: u8,
    #[serde(default)]
    pub upvals: Vec<RawUpval>,
    #[serde(default)]
    pub protos: Vec<RawProto>,
    #[serde(default)]
    pub consts: Vec<RawValue>,
    #[serde(default)]
    pub code: Vec<RawWord>,
    /// Class this prototype was compiled under, by name.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawUpval {
    pub instack: bool,
    pub idx: u8,
}

/// Instruction word, as a number or a `"0x…"` string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawWord {
    Num(u32),
    Hex(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawValue {
    Nil,
    Bool(bool),
    Int(i64),
    Var(i64),
    Real(f64),
    Real32(f32),
    Str(String),
    /// `bytes` instance, contents hex-encoded.
    Bytes(String),
    Closure(Box<RawClosure>),
    /// Class reference by name.
    Class(String),
    Func {
        #[serde(default, rename = "static")]
        static_: bool,
    },
    Comptr,
    /// Simple `map`/`list` instance wrapping one value.
    Instance(Box<RawInstance>),
    Map(Vec<(RawKey, RawValue)>),
    List(Vec<RawValue>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawKey {
    Str(String),
    Int(i64),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInstance {
    pub class: String,
    pub value: RawValue,
}

// ----------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------

#[derive(Debug)]
pub enum LoadError {
    Json(serde_json::Error),
    UnknownClass(String),
    BadWord(String),
    BadHex(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid graph document: {e}"),
            Self::UnknownClass(name) => write!(f, "unknown class: {name}"),
            Self::BadWord(word) => write!(f, "invalid instruction word: {word}"),
            Self::BadHex(text) => write!(f, "invalid hex string: {text}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ----------------------------------------------------------------------
// Graph construction
// ----------------------------------------------------------------------

/// A built graph. `classes` owns the registry entries that prototypes
/// refer back to weakly; drop it and those back-references go dead.
#[derive(Debug)]
pub struct LoadedGraph {
    pub builtins: Builtins,
    pub classes: IndexMap<String, Rc<Class>>,
    pub root: Value,
}

pub fn load(text: &str) -> Result<LoadedGraph, LoadError> {
    build(serde_json::from_str(text)?)
}

pub fn build(doc: RawDocument) -> Result<LoadedGraph, LoadError> {
    let builtins = match doc.builtins {
        Some(names) => Builtins::from_names(names),
        None => Builtins::core(),
    };

    let mut classes: IndexMap<String, Rc<Class>> = IndexMap::new();
    for raw in &doc.classes {
        let built = build_class(raw, &classes)?;
        classes.insert(raw.name.clone(), built);
    }

    let root = match &doc.dump {
        RawRoot::Closure(c) => Value::closure(Rc::new(build_closure(c, None, &classes, false)?)),
        RawRoot::Class(c) => Value::Class(build_class(c, &classes)?),
        RawRoot::Module(m) => Value::Module(Rc::new(build_module(m, &classes)?)),
    };

    Ok(LoadedGraph {
        builtins,
        classes,
        root,
    })
}

struct Ctx<'a> {
    self_name: &'a str,
    self_class: &'a Weak<Class>,
}

fn build_class(
    raw: &RawClass,
    registry: &IndexMap<String, Rc<Class>>,
) -> Result<Rc<Class>, LoadError> {
    let super_ = raw
        .super_
        .as_ref()
        .map(|name| {
            registry
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::UnknownClass(name.clone()))
        })
        .transpose()?;

    // Rc::new_cyclic cannot return early, so member errors are parked and
    // surfaced after construction.
    let mut err = None;
    let class = Class::build(&raw.name, raw.nvar, super_, |weak| {
        if raw.members.is_empty() {
            return None;
        }
        let ctx = Ctx {
            self_name: &raw.name,
            self_class: weak,
        };
        let mut map = Map::new();
        for (key, value) in &raw.members {
            let built = match value {
                RawValue::Closure(c) => {
                    build_closure(c, Some(&ctx), registry, true).map(|clo| Value::Closure {
                        clo: Rc::new(clo),
                        is_static: c.static_,
                    })
                }
                other => build_value(other, Some(&ctx), registry),
            };
            match built {
                Ok(v) => map.insert(Value::str(key), v),
                Err(e) => {
                    err = Some(e);
                    return None;
                }
            }
        }
        Some(map)
    });
    match err {
        Some(e) => Err(e),
        None => Ok(class),
    }
}

fn build_module(
    raw: &RawModule,
    registry: &IndexMap<String, Rc<Class>>,
) -> Result<Module, LoadError> {
    let table = if raw.members.is_empty() {
        None
    } else {
        let mut map = Map::new();
        for (key, value) in &raw.members {
            map.insert(Value::str(key), build_value(value, None, registry)?);
        }
        Some(map)
    };
    Ok(Module {
        name: raw.name.as_str().into(),
        table,
    })
}

fn build_closure(
    raw: &RawClosure,
    ctx: Option<&Ctx<'_>>,
    registry: &IndexMap<String, Rc<Class>>,
    auto_parent: bool,
) -> Result<Closure, LoadError> {
    let proto = build_proto(&raw.proto, ctx, registry, auto_parent)?;
    Ok(Closure {
        proto: Rc::new(proto),
        nupvals: raw.nupvals,
    })
}

fn build_proto(
    raw: &RawProto,
    ctx: Option<&Ctx<'_>>,
    registry: &IndexMap<String, Rc<Class>>,
    auto_parent: bool,
) -> Result<Prototype, LoadError> {
    let parent_class = match &raw.parent {
        Some(name) => Some(resolve_parent(name, ctx, registry)?),
        None if auto_parent => ctx.map(|c| c.self_class.clone()),
        None => None,
    };

    let mut protos = Vec::with_capacity(raw.protos.len());
    for sub in &raw.protos {
        protos.push(Rc::new(build_proto(sub, ctx, registry, false)?));
    }

    let mut constants = Vec::with_capacity(raw.consts.len());
    for value in &raw.consts {
        constants.push(build_value(value, ctx, registry)?);
    }

    let mut code = Vec::with_capacity(raw.code.len());
    for word in &raw.code {
        code.push(parse_word(word)?);
    }

    Ok(Prototype {
        name: raw.name.as_str().into(),
        nstack: raw.nstack,
        argc: raw.argc,
        varg: raw.varg,
        upvals: raw
            .upvals
            .iter()
            .map(|uv| UpvalDesc {
                instack: uv.instack,
                idx: uv.idx,
            })
            .collect(),
        protos,
        parent_class,
        constants,
        code,
    })
}

fn build_value(
    raw: &RawValue,
    ctx: Option<&Ctx<'_>>,
    registry: &IndexMap<String, Rc<Class>>,
) -> Result<Value, LoadError> {
    Ok(match raw {
        RawValue::Nil => Value::Nil,
        RawValue::Bool(b) => Value::Bool(*b),
        RawValue::Int(i) => Value::Int(*i),
        RawValue::Var(i) => Value::Index(*i),
        RawValue::Real(r) => Value::Real(Real::Double(*r)),
        RawValue::Real32(r) => Value::Real(Real::Single(*r)),
        RawValue::Str(s) => Value::str(s),
        RawValue::Bytes(hex) => {
            let buf = parse_hex(hex)?;
            let len = buf.len() as i64;
            Value::Instance(Rc::new(Instance::of(
                Class::simple("bytes", ClassKind::Bytes),
                vec![Value::NativePtr(Some(Rc::from(buf))), Value::Int(len)],
            )))
        }
        RawValue::Closure(c) => Value::Closure {
            clo: Rc::new(build_closure(c, ctx, registry, false)?),
            is_static: c.static_,
        },
        RawValue::Class(name) => resolve_class_value(name, ctx, registry)?,
        RawValue::Func { static_ } => Value::NativeFunc {
            is_static: *static_,
        },
        RawValue::Comptr => Value::NativePtr(None),
        RawValue::Instance(ins) => {
            let kind = match ins.class.as_str() {
                "map" => ClassKind::Map,
                "list" => ClassKind::List,
                other => return Err(LoadError::UnknownClass(other.to_string())),
            };
            let inner = build_value(&ins.value, ctx, registry)?;
            Value::Instance(Rc::new(Instance::of(
                Class::simple(&ins.class, kind),
                vec![inner],
            )))
        }
        RawValue::Map(pairs) => {
            let mut map = Map::new();
            for (key, value) in pairs {
                let key = match key {
                    RawKey::Str(s) => Value::str(s),
                    RawKey::Int(i) => Value::Int(*i),
                };
                map.insert(key, build_value(value, ctx, registry)?);
            }
            Value::Map(Rc::new(map))
        }
        RawValue::List(items) => {
            let mut list = List::new();
            for item in items {
                list.push(build_value(item, ctx, registry)?);
            }
            Value::List(Rc::new(list))
        }
    })
}

fn resolve_parent(
    name: &str,
    ctx: Option<&Ctx<'_>>,
    registry: &IndexMap<String, Rc<Class>>,
) -> Result<Weak<Class>, LoadError> {
    if let Some(ctx) = ctx
        && ctx.self_name == name
    {
        return Ok(ctx.self_class.clone());
    }
    registry
        .get(name)
        .map(Rc::downgrade)
        .ok_or_else(|| LoadError::UnknownClass(name.to_string()))
}

fn resolve_class_value(
    name: &str,
    ctx: Option<&Ctx<'_>>,
    registry: &IndexMap<String, Rc<Class>>,
) -> Result<Value, LoadError> {
    if let Some(class) = registry.get(name) {
        return Ok(Value::Class(class.clone()));
    }
    // a class constant naming the class under construction only ever needs
    // the name; a detached reference stands in for it
    if ctx.is_some_and(|c| c.self_name == name) {
        return Ok(Value::Class(Class::named(name)));
    }
    Err(LoadError::UnknownClass(name.to_string()))
}

fn parse_word(word: &RawWord) -> Result<u32, LoadError> {
    match word {
        RawWord::Num(n) => Ok(*n),
        RawWord::Hex(text) => text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .and_then(|digits| u32::from_str_radix(digits, 16).ok())
            .ok_or_else(|| LoadError::BadWord(text.clone())),
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, LoadError> {
    let bytes = text.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(LoadError::BadHex(text.to_string()));
    }
    bytes
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16);
            let lo = (pair[1] as char).to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi * 16 + lo) as u8),
                _ => Err(LoadError::BadHex(text.to_string())),
            }
        })
        .collect()
}
