//! Atomic rule cache: one rule per unique declaration fingerprint.
//!
//! Rules are interned: a declaration seen twice returns the existing
//! rule unchanged, which is what makes class names reusable across
//! independent composition calls. Rules are stored in screen buckets
//! (the unscreened bucket first, then one bucket per registered screen
//! in registration order), so emitted source order tracks screen
//! priority regardless of which declarations were composed first.

use indexmap::IndexMap;
use log::debug;

use crate::screen::ScreenRegistry;
use crate::style::declaration::{class_name, Fingerprint};
use crate::style::Declaration;

/// A generated single-declaration rule, immutable once created.
#[derive(Debug, Clone)]
pub(crate) struct AtomicRule {
    pub class_name: String,
    pub css_text: String,
    pub screen: Option<String>,
    pub var_use: Option<(String, String)>,
}

/// Fingerprint-keyed rule store with screen buckets.
#[derive(Debug)]
pub(crate) struct RuleCache {
    prefix: String,
    rules: IndexMap<Fingerprint, AtomicRule>,
    /// `--name` -> literal, in first-registration order.
    root_vars: IndexMap<String, String>,
    /// Unscreened rules (atomic and theme), insertion order.
    base: Vec<Fingerprint>,
    /// Screen buckets, pre-created in registration order.
    screens: IndexMap<String, Vec<Fingerprint>>,
}

impl RuleCache {
    pub fn new(prefix: impl Into<String>, screen_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            prefix: prefix.into(),
            rules: IndexMap::new(),
            root_vars: IndexMap::new(),
            base: Vec::new(),
            screens: screen_names.into_iter().map(|name| (name, Vec::new())).collect(),
        }
    }

    /// Return the rule for a declaration, creating it on first sight.
    ///
    /// The bool is true when the rule was newly created.
    pub fn get_or_create(
        &mut self,
        decl: &Declaration,
        screens: &ScreenRegistry,
    ) -> (&AtomicRule, bool) {
        let fingerprint = decl.fingerprint();
        // entry() is avoided: synthesizing css text needs &self borrows
        if self.rules.contains_key(&fingerprint) {
            return (&self.rules[&fingerprint], false);
        }

        let class = class_name(&self.prefix, 'a', fingerprint);
        let body = format!(
            ".{}{}{{{}:{};}}",
            class,
            decl.pseudo().unwrap_or(""),
            decl.property(),
            decl.value()
        );
        let css_text = match decl.screen() {
            Some(screen) => screens.wrap(screen, &body),
            None => body,
        };
        debug!("new atomic rule {class} ({})", decl.property());

        let rule = AtomicRule {
            class_name: class,
            css_text,
            screen: decl.screen().map(String::from),
            var_use: decl.var_use().map(|(n, v)| (n.to_string(), v.to_string())),
        };
        self.bucket_mut(decl.screen()).push(fingerprint);
        self.rules.insert(fingerprint, rule);
        (&self.rules[&fingerprint], true)
    }

    /// Insert a theme rule (one class grouping many variable
    /// redefinitions) under its own fingerprint namespace.
    pub fn get_or_create_theme(
        &mut self,
        fingerprint: Fingerprint,
        vars: &[(String, String)],
    ) -> (&AtomicRule, bool) {
        if self.rules.contains_key(&fingerprint) {
            return (&self.rules[&fingerprint], false);
        }

        let class = class_name(&self.prefix, 't', fingerprint);
        let mut body = format!(".{class}{{");
        for (name, value) in vars {
            body.push_str(name);
            body.push(':');
            body.push_str(value);
            body.push(';');
        }
        body.push('}');
        debug!("new theme class {class} ({} vars)", vars.len());

        let rule = AtomicRule {
            class_name: class,
            css_text: body,
            screen: None,
            var_use: None,
        };
        self.base.push(fingerprint);
        self.rules.insert(fingerprint, rule);
        (&self.rules[&fingerprint], true)
    }

    /// Register a root variable definition; true on first registration.
    pub fn register_var(&mut self, name: &str, value: &str) -> bool {
        if self.root_vars.contains_key(name) {
            return false;
        }
        self.root_vars.insert(name.to_string(), value.to_string());
        true
    }

    fn bucket_mut(&mut self, screen: Option<&str>) -> &mut Vec<Fingerprint> {
        match screen {
            Some(name) => self
                .screens
                .entry(name.to_string())
                .or_default(),
            None => &mut self.base,
        }
    }

    /// Render the whole sheet as `1 + screens` ordered blocks.
    pub fn render_blocks(&self) -> Vec<String> {
        let base: Vec<&str> = self
            .base
            .iter()
            .map(|fp| self.rules[fp].css_text.as_str())
            .collect();
        let screens = self.screens.iter().map(|(_, bucket)| {
            bucket
                .iter()
                .map(|fp| self.rules[fp].css_text.as_str())
                .collect::<Vec<&str>>()
        });
        render_grouped(&self.root_vars, &base, screens)
    }
}

/// Shared block formatting for the cache sheet and collection buffers:
/// root variables first (one `:root` rule), then the unscreened rules,
/// then one block per screen.
pub(crate) fn render_grouped<'a>(
    root_vars: &IndexMap<String, String>,
    base: &[&'a str],
    screens: impl Iterator<Item = Vec<&'a str>>,
) -> Vec<String> {
    let mut blocks = Vec::new();

    let mut first = String::new();
    if !root_vars.is_empty() {
        first.push_str(":root{");
        for (name, value) in root_vars {
            first.push_str(name);
            first.push(':');
            first.push_str(value);
            first.push(';');
        }
        first.push('}');
    }
    for text in base {
        if !first.is_empty() {
            first.push('\n');
        }
        first.push_str(text);
    }
    blocks.push(first);

    for bucket in screens {
        blocks.push(bucket.join("\n"));
    }
    blocks
}
