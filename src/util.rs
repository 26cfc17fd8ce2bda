//! Custom util registry: caller-registered composite declaration
//! producers, expanded through the normal normalization pipeline.

use indexmap::IndexMap;

use crate::style::{Style, Value};

/// A util maps the authored value to a style fragment, which is then
/// re-normalized in the scope the util key appeared in.
pub type UtilFn = Box<dyn Fn(&Value) -> Style>;

pub(crate) struct UtilRegistry {
    utils: IndexMap<String, UtilFn>,
}

impl UtilRegistry {
    pub fn new(utils: IndexMap<String, UtilFn>) -> Self {
        Self { utils }
    }

    pub fn get(&self, name: &str) -> Option<&UtilFn> {
        self.utils.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.utils.contains_key(name)
    }
}

impl std::fmt::Debug for UtilRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtilRegistry")
            .field("names", &self.utils.keys().collect::<Vec<_>>())
            .finish()
    }
}
