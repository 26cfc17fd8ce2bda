//! Normalization: authored style trees to flat canonical declarations.
//!
//! One pass resolves every recognized entry kind (plain declaration,
//! pseudo scope, screen scope, util invocation, nested style) into an
//! ordered declaration list. Output order equals authoring order, which
//! is what the composition engine's override resolution runs on.

use log::warn;

use crate::screen::ScreenRegistry;
use crate::style::declaration::Declaration;
use crate::style::value::{Style, Value};
use crate::token::TokenStore;
use crate::util::UtilRegistry;

/// Utils may expand to styles that invoke other utils; past this depth
/// the entry is dropped (a cycle in user-registered utils).
const MAX_UTIL_DEPTH: usize = 16;

/// Pseudo/screen context of the entry being normalized.
#[derive(Debug, Clone, Default)]
struct Scope {
    pseudo: Option<String>,
    screen: Option<String>,
}

pub(crate) struct Normalizer<'a> {
    pub tokens: &'a TokenStore,
    pub screens: &'a ScreenRegistry,
    pub utils: &'a UtilRegistry,
}

impl Normalizer<'_> {
    pub fn normalize(&self, style: &Style, out: &mut Vec<Declaration>) {
        self.walk(style, &Scope::default(), 0, out);
    }

    fn walk(&self, style: &Style, scope: &Scope, depth: usize, out: &mut Vec<Declaration>) {
        for (key, value) in style.entries() {
            if key.starts_with(':') {
                match value {
                    Value::Nested(inner) => {
                        // nested pseudo scopes chain: :focus > :hover => :focus:hover
                        let pseudo = match &scope.pseudo {
                            Some(outer) => format!("{outer}{key}"),
                            None => key.to_string(),
                        };
                        let scope = Scope {
                            pseudo: Some(pseudo),
                            screen: scope.screen.clone(),
                        };
                        self.walk(inner, &scope, depth, out);
                    }
                    _ => warn!("dropping pseudo scope `{key}` with non-nested value"),
                }
            } else if self.screens.contains(key) {
                match value {
                    Value::Nested(inner) => {
                        let scope = Scope {
                            pseudo: scope.pseudo.clone(),
                            screen: Some(key.to_string()),
                        };
                        self.walk(inner, &scope, depth, out);
                    }
                    _ => warn!("dropping screen scope `{key}` with non-nested value"),
                }
            } else if let Some(util) = self.utils.get(key) {
                if depth >= MAX_UTIL_DEPTH {
                    warn!("dropping util `{key}`: expansion depth limit reached");
                    continue;
                }
                let expanded = util(value);
                self.walk(&expanded, scope, depth + 1, out);
            } else {
                match value {
                    Value::Nested(_) => {
                        warn!("dropping property `{key}` with nested value");
                    }
                    Value::Str(s) => out.push(self.declaration(key, s, scope)),
                    Value::Num(n) => {
                        let property = hyphenate(key);
                        let value = coerce_number(&property, *n);
                        out.push(Declaration::new(
                            property,
                            value,
                            scope.pseudo.clone(),
                            scope.screen.clone(),
                        ));
                    }
                }
            }
        }
    }

    fn declaration(&self, key: &str, raw: &str, scope: &Scope) -> Declaration {
        let property = hyphenate(key);
        let resolved = self.tokens.resolve(&property, raw);
        Declaration::new(
            property,
            resolved.value,
            scope.pseudo.clone(),
            scope.screen.clone(),
        )
        .with_var_use(resolved.var_use)
    }
}

/// Canonicalize a property name: camelCase becomes kebab-case, custom
/// properties (`--x`) pass through untouched.
pub(crate) fn hyphenate(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Properties whose numeric values are emitted without a unit.
fn is_unitless(property: &str) -> bool {
    matches!(
        property,
        "animation-iteration-count"
            | "aspect-ratio"
            | "column-count"
            | "columns"
            | "flex"
            | "flex-grow"
            | "flex-shrink"
            | "font-weight"
            | "grid-column"
            | "grid-row"
            | "line-height"
            | "opacity"
            | "order"
            | "orphans"
            | "scale"
            | "tab-size"
            | "widows"
            | "z-index"
            | "zoom"
    )
}

/// Numbers become unitless text or pixel lengths, per property.
fn coerce_number(property: &str, n: f64) -> String {
    let text = if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    };
    if is_unitless(property) {
        text
    } else {
        format!("{text}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use crate::token::Tokens;
    use crate::util::UtilFn;
    use indexmap::IndexMap;

    fn fixtures() -> (TokenStore, ScreenRegistry, UtilRegistry) {
        let tokens = TokenStore::new("", Tokens::new().set("colors", "primary", "tomato"));
        let mut screens: IndexMap<String, crate::screen::ScreenFn> = IndexMap::new();
        screens.insert("tablet".to_string(), crate::screen::min_width(768));
        let mut utils: IndexMap<String, UtilFn> = IndexMap::new();
        utils.insert(
            "marginX".to_string(),
            Box::new(|v| style! { "marginLeft" => v.clone(), "marginRight" => v.clone() }),
        );
        (tokens, ScreenRegistry::new(screens), UtilRegistry::new(utils))
    }

    fn normalize(style: &Style) -> Vec<Declaration> {
        let (tokens, screens, utils) = fixtures();
        let normalizer = Normalizer {
            tokens: &tokens,
            screens: &screens,
            utils: &utils,
        };
        let mut out = Vec::new();
        normalizer.normalize(style, &mut out);
        out
    }

    #[test]
    fn test_plain_property() {
        let decls = normalize(&style! { "backgroundColor" => "primary" });
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property(), "background-color");
        assert_eq!(decls[0].value(), "var(--colors-primary)");
        assert_eq!(decls[0].pseudo(), None);
        assert_eq!(decls[0].screen(), None);
    }

    #[test]
    fn test_numeric_px_coercion() {
        let decls = normalize(&style! { "margin" => 8, "lineHeight" => 1.5, "zIndex" => 10 });
        assert_eq!(decls[0].value(), "8px");
        assert_eq!(decls[1].value(), "1.5");
        assert_eq!(decls[2].value(), "10");
    }

    #[test]
    fn test_pseudo_scope() {
        let decls = normalize(&style! { ":hover" => style! { "color" => "black" } });
        assert_eq!(decls[0].pseudo(), Some(":hover"));
    }

    #[test]
    fn test_nested_pseudo_scopes_chain() {
        let decls = normalize(&style! {
            ":focus" => style! { ":hover" => style! { "color" => "black" } },
        });
        assert_eq!(decls[0].pseudo(), Some(":focus:hover"));
    }

    #[test]
    fn test_screen_scope() {
        let decls = normalize(&style! {
            "tablet" => style! { "color" => "black", ":hover" => style! { "color" => "gray" } },
        });
        assert_eq!(decls[0].screen(), Some("tablet"));
        assert_eq!(decls[1].screen(), Some("tablet"));
        assert_eq!(decls[1].pseudo(), Some(":hover"));
    }

    #[test]
    fn test_util_expansion_in_scope() {
        let decls = normalize(&style! {
            ":hover" => style! { "marginX" => 4 },
        });
        let props: Vec<&str> = decls.iter().map(|d| d.property()).collect();
        assert_eq!(props, vec!["margin-left", "margin-right"]);
        assert!(decls.iter().all(|d| d.pseudo() == Some(":hover")));
        assert!(decls.iter().all(|d| d.value() == "4px"));
    }

    #[test]
    fn test_unknown_property_passes_through() {
        let decls = normalize(&style! { "definitely-not-css" => "whatever" });
        assert_eq!(decls[0].property(), "definitely-not-css");
        assert_eq!(decls[0].value(), "whatever");
    }

    #[test]
    fn test_custom_property_untouched() {
        let decls = normalize(&style! { "--myVar" => "10px" });
        assert_eq!(decls[0].property(), "--myVar");
    }

    #[test]
    fn test_nested_value_under_property_dropped() {
        let decls = normalize(&style! { "color" => style! { "color" => "red" } });
        assert!(decls.is_empty());
    }

    #[test]
    fn test_hyphenate() {
        assert_eq!(hyphenate("backgroundColor"), "background-color");
        assert_eq!(hyphenate("color"), "color");
        assert_eq!(hyphenate("WebkitTransform"), "-webkit-transform");
    }
}
