//! Closure emission and borrowed-method detection.

use amber_core::Closure;

use super::{BANNER_CLOSE, BANNER_OPEN, BANNER_RULE, Solidifier};
use crate::error::SolidifyError;
use crate::ident::to_identifier;
use crate::sink::outf;

impl Solidifier<'_, '_> {
    /// Emit a closure under `prefix` (typically `class_<Name>`, a module
    /// context, or nothing). A closure whose prototype was compiled under
    /// a different class than `prefix` names is borrowed: only an extern
    /// stub is emitted, the owning class emits the body.
    pub(crate) fn solidify_closure(
        &mut self,
        clo: &Closure,
        prefix: Option<&str>,
    ) -> Result<(), SolidifyError> {
        let pr = &clo.proto;
        let func_name = pr.name.to_string();

        if let Some(parent) = pr.parent() {
            let parent_prefix = format!("class_{}", parent.name);
            if prefix != Some(parent_prefix.as_str()) {
                outf!(
                    self.sink,
                    "// Borrowed method '{}' from class '{}'\n",
                    func_name,
                    parent.name
                )?;
                outf!(self.sink, "extern bclosure *{}_{};\n", parent_prefix, func_name)?;
                return Ok(());
            }
        }

        if clo.nupvals > 0 {
            outf!(self.sink, "--> Unsupported upvals in closure <---")?;
        }

        self.solidify_inner_classes(pr)?;

        outf!(self.sink, "\n")?;
        self.sink.raw(BANNER_OPEN)?;
        outf!(self.sink, "** Solidified function: {}\n", func_name)?;
        self.sink.raw(BANNER_RULE)?;

        if let Some(parent) = pr.parent() {
            outf!(self.sink, "extern const bclass be_class_{};\n", parent.name)?;
        }

        let id = to_identifier(pr.name.as_bytes());
        outf!(
            self.sink,
            "be_local_closure({}{}{},   /* name */\n",
            prefix.unwrap_or(""),
            if prefix.is_some() { "_" } else { "" },
            id
        )?;

        self.solidify_proto(pr, &func_name, 2)?;
        outf!(self.sink, "\n")?;
        outf!(self.sink, ");\n")?;
        self.sink.raw(BANNER_CLOSE)
    }
}
