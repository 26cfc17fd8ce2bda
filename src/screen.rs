//! Named responsive screens: ordered media-query wrappers.
//!
//! Emission order in the final stylesheet follows registration order,
//! not call order, because media-query precedence among equally-specific
//! rules is decided by source order.

use indexmap::IndexMap;

/// A screen wraps a rule body in its media query.
pub type ScreenFn = Box<dyn Fn(&str) -> String>;

/// Convenience constructor for the common `min-width` screen shape.
///
/// ```
/// let tablet = atomik::min_width(768);
/// assert_eq!(tablet(".x{color:red;}"), "@media (min-width: 768px) { .x{color:red;} }");
/// ```
pub fn min_width(px: u32) -> ScreenFn {
    Box::new(move |body| format!("@media (min-width: {px}px) {{ {body} }}"))
}

/// Ordered registry of named screens, fixed at engine construction.
pub(crate) struct ScreenRegistry {
    screens: IndexMap<String, ScreenFn>,
}

impl ScreenRegistry {
    pub fn new(screens: IndexMap<String, ScreenFn>) -> Self {
        Self { screens }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    /// Wrap a rule body in the named screen's media query.
    ///
    /// Unregistered names leave the body unwrapped; normalization only
    /// produces screen scopes for registered names, so this is a
    /// defensive identity.
    pub fn wrap(&self, name: &str, body: &str) -> String {
        match self.screens.get(name) {
            Some(wrap) => wrap(body),
            None => body.to_string(),
        }
    }

    /// Screen names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("names", &self.screens.keys().collect::<Vec<_>>())
            .finish()
    }
}
