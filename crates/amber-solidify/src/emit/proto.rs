//! Prototype emission: stack shape, upvalue descriptors, sub-prototypes,
//! constants, and bytecode.

use amber_core::code::{self, Opcode};
use amber_core::{Prototype, Value};

use super::Solidifier;
use crate::error::SolidifyError;
use crate::ident::to_identifier;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    pub(crate) fn solidify_proto(
        &mut self,
        pr: &Prototype,
        func_name: &str,
        indent: usize,
    ) -> Result<(), SolidifyError> {
        let parent_name = pr.parent().map(|c| c.name.to_string());

        outf!(self.sink, "{:indent$}be_nested_proto(\n", "")?;
        let indent = indent + 2;

        outf!(
            self.sink,
            "{:indent$}{},                          /* nstack */\n",
            "",
            pr.nstack
        )?;
        outf!(
            self.sink,
            "{:indent$}{},                          /* argc */\n",
            "",
            pr.argc
        )?;
        outf!(
            self.sink,
            "{:indent$}{},                          /* varg */\n",
            "",
            pr.varg
        )?;

        outf!(
            self.sink,
            "{:indent$}{},                          /* has upvals */\n",
            "",
            i32::from(!pr.upvals.is_empty())
        )?;
        if !pr.upvals.is_empty() {
            outf!(
                self.sink,
                "{:indent$}( &(const bupvaldesc[{:2}]) {{  /* upvals */\n",
                "",
                pr.upvals.len()
            )?;
            for uv in &pr.upvals {
                outf!(
                    self.sink,
                    "{:indent$}  be_local_const_upval({}, {}),\n",
                    "",
                    i32::from(uv.instack),
                    uv.idx
                )?;
            }
            outf!(self.sink, "{:indent$}}}),\n", "")?;
        } else {
            outf!(
                self.sink,
                "{:indent$}NULL,                       /* no upvals */\n",
                ""
            )?;
        }

        outf!(
            self.sink,
            "{:indent$}{},                          /* has sup protos */\n",
            "",
            i32::from(!pr.protos.is_empty())
        )?;
        if !pr.protos.is_empty() {
            // one extra slot: the parent-class reference rides last
            outf!(
                self.sink,
                "{:indent$}( &(const struct bproto*[{:2}]) {{\n",
                "",
                pr.protos.len() + 1
            )?;
            for (i, sub) in pr.protos.iter().enumerate() {
                let sub_name = format!("{func_name}_{i}");
                self.solidify_proto(sub, &sub_name, indent + 2)?;
                outf!(self.sink, ",\n")?;
            }
            self.parent_class_slot(parent_name.as_deref(), indent)?;
            outf!(self.sink, "{:indent$}}}),\n", "")?;
        } else {
            self.parent_class_slot(parent_name.as_deref(), indent)?;
        }

        outf!(
            self.sink,
            "{:indent$}{},                          /* has constants */\n",
            "",
            i32::from(!pr.constants.is_empty())
        )?;
        if !pr.constants.is_empty() {
            outf!(
                self.sink,
                "{:indent$}( &(const bvalue[{:2}]) {{     /* constants */\n",
                "",
                pr.constants.len()
            )?;
            for (k, val) in pr.constants.iter().enumerate() {
                outf!(self.sink, "{:indent$}/* K{:<3} */  ", "", k)?;
                self.solidify_value(val, None, None)?;
                outf!(self.sink, ",\n")?;
            }
            outf!(self.sink, "{:indent$}}}),\n", "")?;
        } else {
            outf!(
                self.sink,
                "{:indent$}NULL,                       /* no const */\n",
                ""
            )?;
        }

        let id = to_identifier(pr.name.as_bytes());
        if !self.weak_strings {
            outf!(self.sink, "{:indent$}&be_const_str_{},\n", "", id)?;
        } else {
            outf!(self.sink, "{:indent$}be_str_weak({}),\n", "", id)?;
        }
        outf!(self.sink, "{:indent$}&be_const_str_solidified,\n", "")?;

        outf!(
            self.sink,
            "{:indent$}( &(const binstruction[{:2}]) {{  /* code */\n",
            "",
            pr.code.len()
        )?;
        for (pc, &ins) in pr.code.iter().enumerate() {
            outf!(
                self.sink,
                "{:indent$}  0x{:08X},  //{}\n",
                "",
                ins,
                code::disasm(ins, pc)
            )?;
            if let Some(op) = code::iget_op(ins)
                && matches!(op, Opcode::GetGbl | Opcode::SetGbl)
            {
                let glb = code::iget_bx(ins);
                if glb as usize > self.builtins.count() {
                    outf!(self.sink, "\n===== unsupported global G{glb}\n")?;
                    return Err(SolidifyError::NonBuiltinGlobal(glb));
                }
            }
        }
        outf!(self.sink, "{:indent$}}})\n", "")?;

        let indent = indent - 2;
        outf!(self.sink, "{:indent$})", "")
    }

    fn parent_class_slot(
        &mut self,
        parent_name: Option<&str>,
        indent: usize,
    ) -> Result<(), SolidifyError> {
        if let Some(name) = parent_name {
            outf!(self.sink, "{:indent$}&be_class_{}, \n", "", name)
        } else {
            outf!(self.sink, "{:indent$}NULL, \n", "")
        }
    }

    /// Classes found in the constant table are emitted ahead of the
    /// prototype body. Constant 0 of a static method is the implicit
    /// `_class` self-reference and must not be re-emitted here.
    pub(crate) fn solidify_inner_classes(&mut self, pr: &Prototype) -> Result<(), SolidifyError> {
        for (k, val) in pr.constants.iter().enumerate() {
            if let Value::Class(cl) = val
                && !(k == 0 && pr.is_static_method())
            {
                self.solidify_class(cl)?;
            }
        }
        Ok(())
    }
}
