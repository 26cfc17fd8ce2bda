//! The engine instance: configuration-scoped styling state and the
//! public composition operations.
//!
//! Everything mutable (the rule cache and the injector) lives behind
//! a `RefCell`, so the engine is shared by reference at call sites
//! while staying single-threaded (`!Sync` by construction). No borrow
//! is held across the `collect_styles` callback, which itself composes
//! through the same engine.

use std::cell::RefCell;

use indexmap::IndexMap;

use crate::cache::RuleCache;
use crate::compose::{resolve_overrides, Composed, StyleArg};
use crate::config::CssConfig;
use crate::error::{Error, Result};
use crate::inject::{Collected, Injector, Mode};
use crate::screen::{ScreenFn, ScreenRegistry};
use crate::style::{Normalizer, Style};
use crate::theme::{theme_entries, theme_fingerprint};
use crate::token::{TokenStore, Tokens};
use crate::util::{UtilFn, UtilRegistry};

/// Probe body used to check that a screen wrapper embeds the rules it
/// is given.
const SCREEN_PROBE: &str = ".__probe__{all:unset;}";

struct Inner {
    cache: RuleCache,
    injector: Injector,
}

/// An atomic-CSS engine instance.
///
/// Owns the token store, screen and util registries, the atomic rule
/// cache, and the injection strategy: the process-wide (or, in collect
/// mode, request-scoped) styling state. Independent instances never
/// share rules or class names.
pub struct Css {
    tokens: TokenStore,
    screens: ScreenRegistry,
    utils: UtilRegistry,
    mode: Mode,
    inner: RefCell<Inner>,
}

impl Css {
    /// Create an engine from a validated configuration.
    ///
    /// Malformed screen and util definitions are rejected here rather
    /// than at first use.
    pub fn new(config: CssConfig) -> Result<Self> {
        let CssConfig {
            prefix,
            tokens,
            screens,
            utils,
            mode,
        } = config;

        validate_prefix(&prefix)?;

        let mut screen_map: IndexMap<String, ScreenFn> = IndexMap::new();
        for (name, wrap) in screens {
            if !is_ident(&name) {
                return Err(Error::InvalidScreen {
                    name,
                    reason: "name is not a valid identifier".to_string(),
                });
            }
            if screen_map.contains_key(&name) {
                return Err(Error::InvalidScreen {
                    name,
                    reason: "registered twice".to_string(),
                });
            }
            if !wrap(SCREEN_PROBE).contains(SCREEN_PROBE) {
                return Err(Error::InvalidScreen {
                    name,
                    reason: "wrapper does not embed the rule body".to_string(),
                });
            }
            screen_map.insert(name, wrap);
        }

        let mut util_map: IndexMap<String, UtilFn> = IndexMap::new();
        for (name, expand) in utils {
            if !is_ident(&name) {
                return Err(Error::InvalidUtil {
                    name,
                    reason: "name is not a valid identifier".to_string(),
                });
            }
            if util_map.contains_key(&name) {
                return Err(Error::InvalidUtil {
                    name,
                    reason: "registered twice".to_string(),
                });
            }
            if screen_map.contains_key(&name) {
                return Err(Error::InvalidUtil {
                    name,
                    reason: "collides with a screen of the same name".to_string(),
                });
            }
            util_map.insert(name, expand);
        }

        let screen_names: Vec<String> = screen_map.keys().cloned().collect();
        Ok(Self {
            tokens: TokenStore::new(prefix.clone(), tokens),
            screens: ScreenRegistry::new(screen_map),
            utils: UtilRegistry::new(util_map),
            mode,
            inner: RefCell::new(Inner {
                cache: RuleCache::new(prefix, screen_names),
                injector: Injector::new(mode),
            }),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Object-syntax entry point: one style description to a class list.
    pub fn style(&self, style: &Style) -> Composed {
        self.compose([StyleArg::from(style)])
    }

    /// Compose any number of partial styles into one class-name string.
    ///
    /// Arguments flatten in order; for declarations competing in the
    /// same slot the last occurrence wins. Composing zero contributing
    /// entries yields an empty class list, not an error, and composing
    /// the same arguments again yields the same string.
    pub fn compose<I>(&self, entries: I) -> Composed
    where
        I: IntoIterator,
        I::Item: Into<StyleArg>,
    {
        let normalizer = Normalizer {
            tokens: &self.tokens,
            screens: &self.screens,
            utils: &self.utils,
        };

        let mut declarations = Vec::new();
        for entry in entries {
            match entry.into() {
                StyleArg::Style(style) => normalizer.normalize(&style, &mut declarations),
                StyleArg::Composed(composed) => declarations.extend(composed.into_declarations()),
                StyleArg::Skip => {}
            }
        }
        let winners = resolve_overrides(declarations);

        let inner = &mut *self.inner.borrow_mut();
        let mut classes: Vec<String> = Vec::with_capacity(winners.len());
        for declaration in &winners {
            if let Some((name, value)) = declaration.var_use() {
                let newly = inner.cache.register_var(name, value);
                inner.injector.record_var(name, value, newly);
            }
            let (rule, newly) = inner.cache.get_or_create(declaration, &self.screens);
            inner
                .injector
                .record_rule(declaration.fingerprint(), rule, newly);
            classes.push(rule.class_name.clone());
        }
        let class_names = classes.join(" ");
        Composed::new(class_names, winners)
    }

    /// Build (or reuse) a theme class redefining the overridden token
    /// variables. Unknown categories were dropped when the override set
    /// was built; an empty override set yields an empty class name.
    pub fn theme(&self, overrides: &Tokens) -> String {
        let entries = theme_entries(&self.tokens, overrides);
        if entries.is_empty() {
            return String::new();
        }
        let fingerprint = theme_fingerprint(&entries);

        let inner = &mut *self.inner.borrow_mut();
        let (rule, newly) = inner.cache.get_or_create_theme(fingerprint, &entries);
        inner.injector.record_rule(fingerprint, rule, newly);
        rule.class_name.clone()
    }

    /// Run `f` and capture every rule it references (collect mode only).
    ///
    /// The returned styles are ordered blocks, each directly embeddable
    /// as a style-tag body: unscreened rules first (root variables,
    /// themes, base rules), then one block per screen in registration
    /// order. The collection buffer exists only for the duration of
    /// this call and is never shared between invocations.
    pub fn collect_styles<R>(&self, f: impl FnOnce() -> R) -> Result<Collected<R>> {
        {
            let mut inner = self.inner.borrow_mut();
            let names: Vec<String> = self.screens.names().map(String::from).collect();
            if !inner.injector.push_buffer(names) {
                return Err(Error::CollectUnavailable);
            }
        }
        let result = f();
        let buffer = self
            .inner
            .borrow_mut()
            .injector
            .pop_buffer()
            .expect("collection buffer missing after callback");
        Ok(Collected {
            result,
            styles: buffer.render(),
        })
    }

    /// Render the full sheet as ordered blocks (same grouping contract
    /// as [`collect_styles`](Self::collect_styles)).
    pub fn styles(&self) -> Vec<String> {
        self.inner.borrow().cache.render_blocks()
    }

    /// The full sheet as one CSS string, empty blocks skipped.
    pub fn css_text(&self) -> String {
        self.styles()
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Drain the rule texts appended since the last flush (direct
    /// mode; always empty in collect mode). A rule appears at most once
    /// across all flushes.
    pub fn flush_pending(&self) -> Vec<String> {
        self.inner.borrow_mut().injector.take_pending()
    }
}

impl std::fmt::Debug for Css {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Css")
            .field("mode", &self.mode)
            .field("screens", &self.screens)
            .field("utils", &self.utils)
            .finish()
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    if !is_ident(prefix) {
        return Err(Error::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "must start with a letter or underscore and contain only \
                     letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::min_width;
    use crate::style;

    #[test]
    fn test_invalid_prefix_rejected() {
        let err = Css::new(CssConfig::new().prefix("9lives")).unwrap_err();
        assert!(matches!(err, Error::InvalidPrefix { .. }));
    }

    #[test]
    fn test_invalid_screen_name_rejected() {
        let err = Css::new(CssConfig::new().screen("not a name", min_width(768))).unwrap_err();
        assert!(matches!(err, Error::InvalidScreen { .. }));
    }

    #[test]
    fn test_screen_wrapper_must_embed_body() {
        let err = Css::new(CssConfig::new().screen("tablet", |_| String::new())).unwrap_err();
        match err {
            Error::InvalidScreen { name, reason } => {
                assert_eq!(name, "tablet");
                assert!(reason.contains("embed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_screen_rejected() {
        let err = Css::new(
            CssConfig::new()
                .screen("tablet", min_width(768))
                .screen("tablet", min_width(800)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidScreen { .. }));
    }

    #[test]
    fn test_util_screen_collision_rejected() {
        let err = Css::new(
            CssConfig::new()
                .screen("tablet", min_width(768))
                .util("tablet", |_| Style::new()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUtil { .. }));
    }

    #[test]
    fn test_compose_empty_yields_empty_class_list() {
        let css = Css::new(CssConfig::new()).unwrap();
        let composed = css.compose(Vec::<StyleArg>::new());
        assert_eq!(composed.class_name(), "");
        assert!(composed.is_empty());
    }

    #[test]
    fn test_style_reuses_classes_across_calls() {
        let css = Css::new(CssConfig::new()).unwrap();
        let a = css.style(&style! { "color" => "tomato" });
        let b = css.style(&style! { "color" => "tomato" });
        assert_eq!(a.class_name(), b.class_name());
    }

    #[test]
    fn test_prefix_shows_up_in_class_names() {
        let css = Css::new(CssConfig::new().prefix("app")).unwrap();
        let composed = css.style(&style! { "color" => "tomato" });
        assert!(composed.class_name().starts_with("app-"));
    }

    #[test]
    fn test_flush_pending_emits_each_rule_once() {
        let css = Css::new(CssConfig::new()).unwrap();
        css.style(&style! { "color" => "tomato" });
        let first = css.flush_pending();
        assert_eq!(first.len(), 1);
        css.style(&style! { "color" => "tomato" });
        assert!(css.flush_pending().is_empty());
    }

    #[test]
    fn test_collect_unavailable_in_direct_mode() {
        let css = Css::new(CssConfig::new()).unwrap();
        let err = css.collect_styles(|| ()).unwrap_err();
        assert!(matches!(err, Error::CollectUnavailable));
    }

    #[test]
    fn test_theme_empty_overrides() {
        let css = Css::new(CssConfig::new()).unwrap();
        assert_eq!(css.theme(&Tokens::new()), "");
    }
}
