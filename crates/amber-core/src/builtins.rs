//! The VM's builtin-name table.
//!
//! Globals referenced from solidified bytecode must resolve inside this
//! table; its indices are the only global indices that survive into the
//! emitted text.

use indexmap::IndexSet;

#[derive(Clone, Debug)]
pub struct Builtins {
    names: IndexSet<String>,
}

impl Builtins {
    /// The stock builtin set of the VM.
    pub fn core() -> Self {
        Self::from_names([
            "assert",
            "bool",
            "bytes",
            "call",
            "classname",
            "classof",
            "compile",
            "format",
            "input",
            "int",
            "isinstance",
            "issubclass",
            "list",
            "map",
            "module",
            "number",
            "open",
            "print",
            "range",
            "real",
            "size",
            "str",
            "super",
            "type",
        ])
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Builtins {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::core()
    }
}
