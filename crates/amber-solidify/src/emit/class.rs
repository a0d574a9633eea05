//! Class emission.

use amber_core::{Class, Value};

use super::{BANNER_OPEN, BANNER_RULE, Solidifier};
use crate::error::SolidifyError;
use crate::ident::to_identifier;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    /// Forward-declare the class so its methods can reference it, emit
    /// the member closures under the `class_<name>` prefix, then the
    /// class body.
    pub(crate) fn solidify_class(&mut self, cl: &Class) -> Result<(), SolidifyError> {
        let classname = cl.name.to_string();
        let prefix = format!("class_{classname}");

        outf!(self.sink, "\nextern const bclass be_class_{};\n", classname)?;

        if let Some(members) = &cl.members {
            for (_, slot) in members.iter() {
                if let (Value::Str(_), Value::Closure { clo, .. }) = (&slot.key, &slot.value) {
                    self.solidify_closure(clo, Some(&prefix))?;
                }
            }
        }

        outf!(self.sink, "\n")?;
        self.sink.raw(BANNER_OPEN)?;
        outf!(self.sink, "** Solidified class: {}\n", classname)?;
        self.sink.raw(BANNER_RULE)?;

        if let Some(superclass) = &cl.super_ {
            outf!(self.sink, "extern const bclass be_class_{};\n", superclass.name)?;
        }

        outf!(self.sink, "be_local_class({},\n", classname)?;
        outf!(self.sink, "    {},\n", cl.nvar)?;
        if let Some(superclass) = &cl.super_ {
            outf!(self.sink, "    &be_class_{},\n", superclass.name)?;
        } else {
            outf!(self.sink, "    NULL,\n")?;
        }

        if let Some(members) = &cl.members {
            self.solidify_map(members, Some(&prefix))?;
            outf!(self.sink, ",\n")?;
        } else {
            outf!(self.sink, "    NULL,\n")?;
        }

        let id = to_identifier(cl.name.as_bytes());
        if !self.weak_strings {
            outf!(self.sink, "    (bstring*) &be_const_str_{}\n", id)?;
        } else {
            outf!(self.sink, "    be_str_weak({})\n", id)?;
        }
        outf!(self.sink, ");\n")
    }
}
