//! Composition: flattening style arguments and resolving overrides.
//!
//! Composition order decides which declaration wins, deterministically
//! and before any rule is emitted, instead of leaning on CSS
//! specificity.
//! The override key is the declaration's [`Slot`](crate::Slot)
//! (property + scopes), so a base declaration never competes with a
//! pseudo or screen declaration for the same property.

use std::fmt;

use indexmap::IndexMap;

use crate::style::{Declaration, Slot, Style};

/// One argument to [`Css::compose`](crate::Css::compose).
///
/// `Option`s convert too, with `None` discarded entirely. This is the
/// conditional-style idiom:
///
/// ```
/// use atomik::{Css, CssConfig, StyleArg, style};
///
/// let css = Css::new(CssConfig::new()).unwrap();
/// let base = style! { "color" => "gray" };
/// let danger = style! { "color" => "crimson" };
/// let is_danger = false;
///
/// let composed = css.compose([
///     StyleArg::from(&base),
///     StyleArg::from(is_danger.then_some(&danger)),
/// ]);
/// assert!(!composed.class_name().is_empty());
/// ```
#[derive(Debug, Clone)]
pub enum StyleArg {
    Style(Style),
    Composed(Composed),
    /// A discarded conditional entry; contributes no declarations.
    Skip,
}

impl From<Style> for StyleArg {
    fn from(style: Style) -> Self {
        StyleArg::Style(style)
    }
}

impl From<&Style> for StyleArg {
    fn from(style: &Style) -> Self {
        StyleArg::Style(style.clone())
    }
}

impl From<Composed> for StyleArg {
    fn from(composed: Composed) -> Self {
        StyleArg::Composed(composed)
    }
}

impl From<&Composed> for StyleArg {
    fn from(composed: &Composed) -> Self {
        StyleArg::Composed(composed.clone())
    }
}

impl<T: Into<StyleArg>> From<Option<T>> for StyleArg {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => value.into(),
            None => StyleArg::Skip,
        }
    }
}

/// The result of a composition: a space-joined class-name string plus
/// the surviving declarations, so the value can feed a later
/// composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composed {
    class_names: String,
    declarations: Vec<Declaration>,
}

impl Composed {
    pub(crate) fn new(class_names: String, declarations: Vec<Declaration>) -> Self {
        Self {
            class_names,
            declarations,
        }
    }

    /// The space-joined class names, ready for a `class` attribute.
    pub fn class_name(&self) -> &str {
        &self.class_names
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub(crate) fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }
}

impl fmt::Display for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_names)
    }
}

/// Last write wins per slot; surviving declarations keep the order the
/// slot was first seen in, for stable output.
pub(crate) fn resolve_overrides(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut winners: IndexMap<Slot, Declaration> = IndexMap::with_capacity(declarations.len());
    for declaration in declarations {
        // IndexMap keeps the original position on replace
        winners.insert(declaration.slot(), declaration);
    }
    winners.into_values().collect()
}
