//! Module emission.

use amber_core::{Module, Value};

use super::{BANNER_OPEN, BANNER_RULE, MODULE_END, Solidifier};
use crate::error::SolidifyError;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    /// Emit every closure and class of the module table first, then the
    /// module itself.
    pub(crate) fn solidify_module(&mut self, ml: &Module) -> Result<(), SolidifyError> {
        let name = ml.name.to_string();

        if let Some(table) = &ml.table {
            for (_, slot) in table.iter() {
                if let Value::Str(_) = &slot.key {
                    match &slot.value {
                        Value::Closure { clo, .. } => self.solidify_closure(clo, None)?,
                        Value::Class(cl) => self.solidify_class(cl)?,
                        _ => {}
                    }
                }
            }
        }

        outf!(self.sink, "\n")?;
        self.sink.raw(BANNER_OPEN)?;
        outf!(self.sink, "** Solidified module: {}\n", name)?;
        self.sink.raw(BANNER_RULE)?;

        outf!(self.sink, "be_local_module({},\n", name)?;
        outf!(self.sink, "    \"{}\",\n", name)?;

        if let Some(table) = &ml.table {
            self.solidify_map(table, None)?;
            outf!(self.sink, "\n")?;
        } else {
            outf!(self.sink, "    NULL,\n")?;
        }
        outf!(self.sink, ");\n")?;
        outf!(
            self.sink,
            "BE_EXPORT_VARIABLE be_define_const_native_module({});\n",
            name
        )?;
        self.sink.raw(MODULE_END)
    }
}
