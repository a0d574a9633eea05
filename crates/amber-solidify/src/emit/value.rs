//! Per-tag constant constructors.

use amber_core::{ClassKind, Instance, Real, Value};

use super::Solidifier;
use crate::error::SolidifyError;
use crate::ident::to_identifier;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    /// Emit one complete constructor form: no leading indentation, no
    /// trailing comma, no trailing newline. `prefix` is the enclosing
    /// symbol context; `key` is the member name when emitting out of a
    /// map.
    pub(crate) fn solidify_value(
        &mut self,
        value: &Value,
        prefix: Option<&str>,
        key: Option<&str>,
    ) -> Result<(), SolidifyError> {
        match value {
            Value::Nil => outf!(self.sink, "be_const_nil()"),
            Value::Bool(b) => outf!(self.sink, "be_const_bool({})", i32::from(*b)),
            Value::Int(i) => outf!(self.sink, "be_const_int({i})"),
            Value::Index(i) => outf!(self.sink, "be_const_var({i})"),
            Value::Real(Real::Single(r)) => {
                outf!(self.sink, "be_const_real_hex(0x{:08X})", r.to_bits())
            }
            Value::Real(Real::Double(r)) => {
                outf!(self.sink, "be_const_real_hex(0x{:016x})", r.to_bits())
            }
            Value::Str(s) => {
                let id = to_identifier(s.as_bytes());
                if s.len() >= 255 {
                    // decomposed writes sidestep the line-buffer limit
                    self.sink.raw("be_nested_str_long(")?;
                    self.sink.raw(&id)?;
                    self.sink.raw(")")
                } else if !self.weak_strings {
                    outf!(self.sink, "be_nested_str({id})")
                } else {
                    outf!(self.sink, "be_nested_str_weak({id})")
                }
            }
            Value::Closure { clo, is_static } => {
                let id = to_identifier(clo.proto.name.as_bytes());
                let parent = clo.proto.parent();
                let parent_name = parent.as_ref().map(|c| c.name.to_string());
                let actual_prefix = parent_name.as_deref().or(prefix);
                outf!(
                    self.sink,
                    "be_const_{}closure({}{}{}{}_closure)",
                    if *is_static { "static_" } else { "" },
                    if parent_name.is_some() { "class_" } else { "" },
                    actual_prefix.unwrap_or(""),
                    if actual_prefix.is_some() { "_" } else { "" },
                    id
                )
            }
            Value::Class(cl) => outf!(self.sink, "be_const_class(be_class_{})", cl.name),
            Value::NativePtr(_) => outf!(
                self.sink,
                "be_const_comptr(&be_ntv_{}_{})",
                prefix.unwrap_or("unknown"),
                key.unwrap_or("unknown")
            ),
            Value::NativeFunc { is_static } => outf!(
                self.sink,
                "be_const_{}func(be_ntv_{}_{})",
                if *is_static { "static_" } else { "" },
                prefix.unwrap_or("unknown"),
                key.unwrap_or("unknown")
            ),
            Value::Instance(ins) => self.solidify_instance(ins, prefix, key),
            Value::Map(m) => self.solidify_map(m, prefix),
            Value::List(l) => self.solidify_list(l, prefix),
            Value::Module(_) => Err(SolidifyError::UnsupportedConstant(value.type_name())),
        }
    }

    fn solidify_instance(
        &mut self,
        ins: &Instance,
        prefix: Option<&str>,
        key: Option<&str>,
    ) -> Result<(), SolidifyError> {
        if ins.class.kind == ClassKind::Bytes {
            let buf = ins
                .bytes_payload()
                .ok_or(SolidifyError::MalformedInstance("bytes"))?;
            return outf!(self.sink, "be_const_bytes_instance({})", hex_dump(buf));
        }
        if ins.super_.is_some() || ins.sub.is_some() {
            return Err(SolidifyError::InstanceLinkage);
        }
        let cl_name = match ins.class.kind {
            ClassKind::Map => "map",
            ClassKind::List => "list",
            _ => return Err(SolidifyError::UnsupportedClass(ins.class.name.to_string())),
        };
        outf!(
            self.sink,
            "be_const_simple_instance(be_nested_simple_instance(&be_class_{cl_name}, {{\n"
        )?;
        outf!(self.sink, "        be_const_{cl_name}( * ")?;
        let member = ins
            .members
            .first()
            .ok_or(SolidifyError::MalformedInstance(cl_name))?;
        self.solidify_value(member, prefix, key)?;
        outf!(self.sink, "    ) }} ))")
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0F) as usize] as char);
    }
    out
}
