//! Engine configuration.

use crate::inject::Mode;
use crate::screen::ScreenFn;
use crate::style::{Style, Value};
use crate::token::Tokens;
use crate::util::UtilFn;

/// Configuration for [`Css::new`](crate::Css::new).
///
/// Screens and utils keep the order they were added in; screen order is
/// load-bearing (it fixes media-query emission order). All definitions
/// are validated eagerly at engine construction, never deferred to
/// first use.
#[derive(Default)]
pub struct CssConfig {
    pub(crate) prefix: String,
    pub(crate) tokens: Tokens,
    pub(crate) screens: Vec<(String, ScreenFn)>,
    pub(crate) utils: Vec<(String, UtilFn)>,
    pub(crate) mode: Mode,
}

impl CssConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to every generated class name and variable.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn tokens(mut self, tokens: Tokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Register a named screen. Registration order is emission order.
    pub fn screen(
        mut self,
        name: impl Into<String>,
        wrap: impl Fn(&str) -> String + 'static,
    ) -> Self {
        self.screens.push((name.into(), Box::new(wrap)));
        self
    }

    /// Register a custom util key.
    pub fn util(
        mut self,
        name: impl Into<String>,
        expand: impl Fn(&Value) -> Style + 'static,
    ) -> Self {
        self.utils.push((name.into(), Box::new(expand)));
        self
    }

    /// Select the output mode; [`Mode::Direct`] unless overridden.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

impl std::fmt::Debug for CssConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CssConfig")
            .field("prefix", &self.prefix)
            .field("screens", &self.screens.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("utils", &self.utils.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("mode", &self.mode)
            .finish()
    }
}
