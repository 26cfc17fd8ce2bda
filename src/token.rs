//! Design tokens: recognized categories, configured scales, and the
//! value resolver that substitutes token names with CSS variables.

use indexmap::IndexMap;
use log::warn;

/// The fixed set of recognized token categories.
///
/// A CSS property is associated with at most one category; only values
/// of such properties are candidates for token substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Colors,
    Space,
    FontSizes,
    Fonts,
    FontWeights,
    LineHeights,
    LetterSpacings,
    Sizes,
    BorderWidths,
    BorderStyles,
    Radii,
    Shadows,
    ZIndices,
    Transitions,
}

impl TokenCategory {
    /// Parse a configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "colors" => Some(Self::Colors),
            "space" => Some(Self::Space),
            "fontSizes" => Some(Self::FontSizes),
            "fonts" => Some(Self::Fonts),
            "fontWeights" => Some(Self::FontWeights),
            "lineHeights" => Some(Self::LineHeights),
            "letterSpacings" => Some(Self::LetterSpacings),
            "sizes" => Some(Self::Sizes),
            "borderWidths" => Some(Self::BorderWidths),
            "borderStyles" => Some(Self::BorderStyles),
            "radii" => Some(Self::Radii),
            "shadows" => Some(Self::Shadows),
            "zIndices" => Some(Self::ZIndices),
            "transitions" => Some(Self::Transitions),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Space => "space",
            Self::FontSizes => "fontSizes",
            Self::Fonts => "fonts",
            Self::FontWeights => "fontWeights",
            Self::LineHeights => "lineHeights",
            Self::LetterSpacings => "letterSpacings",
            Self::Sizes => "sizes",
            Self::BorderWidths => "borderWidths",
            Self::BorderStyles => "borderStyles",
            Self::Radii => "radii",
            Self::Shadows => "shadows",
            Self::ZIndices => "zIndices",
            Self::Transitions => "transitions",
        }
    }
}

/// Map a canonical (kebab-case) property to its token category.
pub(crate) fn token_category(property: &str) -> Option<TokenCategory> {
    use TokenCategory::*;
    match property {
        "color" | "background-color" | "border-color" | "border-top-color"
        | "border-right-color" | "border-bottom-color" | "border-left-color"
        | "caret-color" | "column-rule-color" | "outline-color" | "fill" | "stroke"
        | "text-decoration-color" => Some(Colors),
        "margin" | "margin-top" | "margin-right" | "margin-bottom" | "margin-left"
        | "padding" | "padding-top" | "padding-right" | "padding-bottom" | "padding-left"
        | "gap" | "row-gap" | "column-gap" | "grid-gap" | "top" | "right" | "bottom"
        | "left" | "inset" => Some(Space),
        "font-size" => Some(FontSizes),
        "font-family" => Some(Fonts),
        "font-weight" => Some(FontWeights),
        "line-height" => Some(LineHeights),
        "letter-spacing" => Some(LetterSpacings),
        "width" | "height" | "min-width" | "max-width" | "min-height" | "max-height"
        | "flex-basis" | "block-size" | "inline-size" => Some(Sizes),
        "border-width" | "border-top-width" | "border-right-width" | "border-bottom-width"
        | "border-left-width" | "outline-width" | "column-rule-width" => Some(BorderWidths),
        "border-style" | "border-top-style" | "border-right-style" | "border-bottom-style"
        | "border-left-style" | "outline-style" => Some(BorderStyles),
        "border-radius" | "border-top-left-radius" | "border-top-right-radius"
        | "border-bottom-left-radius" | "border-bottom-right-radius" => Some(Radii),
        "box-shadow" | "text-shadow" => Some(Shadows),
        "z-index" => Some(ZIndices),
        "transition" => Some(Transitions),
        _ => None,
    }
}

/// Configured token scales, grouped by category.
///
/// Scales keep insertion order so theme and root variable emission is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    scales: IndexMap<TokenCategory, IndexMap<String, String>>,
}

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one token. Unknown categories are ignored (token usage is
    /// opt-in, never enforced).
    pub fn set(
        mut self,
        category: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        match TokenCategory::from_key(category) {
            Some(cat) => {
                self.scales
                    .entry(cat)
                    .or_default()
                    .insert(name.into(), value.into());
            }
            None => warn!("ignoring token in unknown category `{category}`"),
        }
        self
    }

    pub fn lookup(&self, category: TokenCategory, name: &str) -> Option<&str> {
        self.scales.get(&category)?.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.scales.values().all(IndexMap::is_empty)
    }

    /// Iterate all tokens in (category, name) insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenCategory, &str, &str)> {
        self.scales.iter().flat_map(|(cat, scale)| {
            scale.iter().map(move |(name, value)| (*cat, name.as_str(), value.as_str()))
        })
    }
}

/// Outcome of resolving one authored value.
pub(crate) struct Resolved {
    /// The literal CSS value to emit (a `var(--…)` reference on a hit).
    pub value: String,
    /// The variable definition the value depends on, on a hit.
    pub var_use: Option<(String, String)>,
}

/// Immutable token lookup bound to an engine instance.
#[derive(Debug, Clone)]
pub(crate) struct TokenStore {
    prefix: String,
    tokens: Tokens,
}

impl TokenStore {
    pub fn new(prefix: impl Into<String>, tokens: Tokens) -> Self {
        Self {
            prefix: prefix.into(),
            tokens,
        }
    }

    /// The CSS variable name bound to a token.
    pub fn var_name(&self, category: TokenCategory, name: &str) -> String {
        if self.prefix.is_empty() {
            format!("--{}-{}", category.as_key(), name)
        } else {
            format!("--{}-{}-{}", self.prefix, category.as_key(), name)
        }
    }

    /// Resolve an authored value against the property's token scale.
    ///
    /// Resolution never fails: values that match no token pass through
    /// unchanged.
    pub fn resolve(&self, property: &str, value: &str) -> Resolved {
        if let Some(category) = token_category(property) {
            if let Some(literal) = self.tokens.lookup(category, value) {
                let var = self.var_name(category, value);
                return Resolved {
                    value: format!("var({var})"),
                    var_use: Some((var, literal.to_string())),
                };
            }
        }
        Resolved {
            value: value.to_string(),
            var_use: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TokenStore {
        let tokens = Tokens::new()
            .set("colors", "primary", "tomato")
            .set("space", "sm", "8px");
        TokenStore::new("", tokens)
    }

    #[test]
    fn test_category_keys_round_trip() {
        for key in [
            "colors", "space", "fontSizes", "fonts", "fontWeights", "lineHeights",
            "letterSpacings", "sizes", "borderWidths", "borderStyles", "radii",
            "shadows", "zIndices", "transitions",
        ] {
            let cat = TokenCategory::from_key(key).expect(key);
            assert_eq!(cat.as_key(), key);
        }
        assert_eq!(TokenCategory::from_key("spacing"), None);
    }

    #[test]
    fn test_property_category_mapping() {
        assert_eq!(token_category("color"), Some(TokenCategory::Colors));
        assert_eq!(token_category("margin-top"), Some(TokenCategory::Space));
        assert_eq!(token_category("font-size"), Some(TokenCategory::FontSizes));
        assert_eq!(token_category("display"), None);
    }

    #[test]
    fn test_resolution_hit() {
        let resolved = store().resolve("color", "primary");
        assert_eq!(resolved.value, "var(--colors-primary)");
        assert_eq!(
            resolved.var_use,
            Some(("--colors-primary".to_string(), "tomato".to_string()))
        );
    }

    #[test]
    fn test_resolution_passes_through_unknown_values() {
        let resolved = store().resolve("color", "rebeccapurple");
        assert_eq!(resolved.value, "rebeccapurple");
        assert!(resolved.var_use.is_none());
    }

    #[test]
    fn test_resolution_respects_property_category() {
        // `primary` only exists in the colors scale
        let resolved = store().resolve("margin", "primary");
        assert_eq!(resolved.value, "primary");
        assert!(resolved.var_use.is_none());
    }

    #[test]
    fn test_prefixed_var_name() {
        let store = TokenStore::new("app", Tokens::new().set("colors", "primary", "tomato"));
        let resolved = store.resolve("color", "primary");
        assert_eq!(resolved.value, "var(--app-colors-primary)");
    }

    #[test]
    fn test_unknown_category_ignored() {
        let tokens = Tokens::new().set("nonsense", "a", "b");
        assert!(tokens.is_empty());
    }
}
