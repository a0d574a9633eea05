//! Native-module shape: a name and a member table.

use crate::map::Map;
use crate::string::VmStr;

#[derive(Clone, Debug)]
pub struct Module {
    pub name: VmStr,
    /// Member table, string name to value.
    pub table: Option<Map>,
}

impl Module {
    pub fn new(name: &str, table: Option<Map>) -> Self {
        Module {
            name: VmStr::from(name),
            table,
        }
    }
}
