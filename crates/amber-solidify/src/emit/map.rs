//! Map and list emission.

use amber_core::{List, Map, Value};

use super::Solidifier;
use crate::error::SolidifyError;
use crate::ident::to_identifier;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    /// Emit a map as its raw slot array. Indices are load-bearing: chain
    /// links refer to slot positions, so holes are skipped but never
    /// shifted, and only trailing holes are dropped. The closing `))`
    /// carries no comma; call sites supply their own.
    pub(crate) fn solidify_map(
        &mut self,
        map: &Map,
        prefix: Option<&str>,
    ) -> Result<(), SolidifyError> {
        outf!(self.sink, "    be_nested_map({},\n", map.count())?;
        outf!(self.sink, "    ( (struct bmapnode*) &(const bmapnode[]) {{\n")?;
        for i in 0..map.compacted_size() {
            let Some(slot) = &map.slots()[i] else { continue };
            let next = slot.next.map_or(-1, |n| n as i64);
            match &slot.key {
                Value::Str(s) => {
                    let id = to_identifier(s.as_bytes());
                    if !self.weak_strings {
                        outf!(self.sink, "        {{ be_const_key({id}, {next}), ")?;
                    } else {
                        outf!(self.sink, "        {{ be_const_key_weak({id}, {next}), ")?;
                    }
                    let key = s.to_string();
                    self.solidify_value(&slot.value, prefix, Some(&key))?;
                }
                Value::Int(n) => {
                    outf!(self.sink, "        {{ be_const_key_int({n}, {next}), ")?;
                    self.solidify_value(&slot.value, prefix, None)?;
                }
                other => return Err(SolidifyError::UnsupportedKeyType(other.type_name())),
            }
            outf!(self.sink, " }},\n")?;
        }
        outf!(self.sink, "    }}))")
    }

    /// Emit a list in source order. Same trailing-comma convention as
    /// [`Self::solidify_map`].
    pub(crate) fn solidify_list(
        &mut self,
        list: &List,
        prefix: Option<&str>,
    ) -> Result<(), SolidifyError> {
        outf!(self.sink, "    be_nested_list({},\n", list.len())?;
        outf!(self.sink, "    ( (struct bvalue*) &(const bvalue[]) {{\n")?;
        for item in list.iter() {
            outf!(self.sink, "        ")?;
            self.solidify_value(item, prefix, Some(""))?;
            outf!(self.sink, ",\n")?;
        }
        outf!(self.sink, "    }}))")
    }
}
