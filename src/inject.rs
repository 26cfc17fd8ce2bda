//! Rule injection strategies: direct stylesheet maintenance vs.
//! per-invocation collection.
//!
//! The strategy is fixed when the engine is created and never branched
//! on per call. Direct mode keeps an append-only drain of newly created
//! rules for a host that mirrors them into a live stylesheet. Collect
//! mode records every rule and variable *referenced* during a
//! `collect_styles` invocation into the top of a buffer stack, so
//! concurrent or sequential invocations never share state.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::trace;

use crate::cache::{render_grouped, AtomicRule};
use crate::style::Fingerprint;

/// Output mode of an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Maintain a live stylesheet; each new rule is appended exactly once.
    #[default]
    Direct,
    /// No live stylesheet; rules are captured per `collect_styles` call.
    Collect,
}

/// Result of a collection-mode execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<R> {
    /// The callback's return value.
    pub result: R,
    /// Ordered CSS blocks: unscreened first, then one per registered
    /// screen in registration order. Untouched groups are empty strings.
    pub styles: Vec<String>,
}

/// One `collect_styles` invocation's buffer.
#[derive(Debug)]
pub(crate) struct Buffer {
    seen: HashSet<Fingerprint>,
    root_vars: IndexMap<String, String>,
    base: Vec<String>,
    screens: IndexMap<String, Vec<String>>,
}

impl Buffer {
    fn new(screen_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            seen: HashSet::new(),
            root_vars: IndexMap::new(),
            base: Vec::new(),
            screens: screen_names.into_iter().map(|name| (name, Vec::new())).collect(),
        }
    }

    fn record_rule(&mut self, fingerprint: Fingerprint, rule: &AtomicRule) {
        if !self.seen.insert(fingerprint) {
            return;
        }
        if let Some((name, value)) = &rule.var_use {
            self.record_var(name, value);
        }
        match &rule.screen {
            Some(screen) => self
                .screens
                .entry(screen.clone())
                .or_default()
                .push(rule.css_text.clone()),
            None => self.base.push(rule.css_text.clone()),
        }
    }

    fn record_var(&mut self, name: &str, value: &str) {
        if !self.root_vars.contains_key(name) {
            self.root_vars.insert(name.to_string(), value.to_string());
        }
    }

    pub fn render(&self) -> Vec<String> {
        let base: Vec<&str> = self.base.iter().map(String::as_str).collect();
        let screens = self
            .screens
            .iter()
            .map(|(_, bucket)| bucket.iter().map(String::as_str).collect::<Vec<&str>>());
        render_grouped(&self.root_vars, &base, screens)
    }
}

/// Injection strategy, selected once at engine construction.
#[derive(Debug)]
pub(crate) enum Injector {
    Direct {
        /// Rule texts appended since the last flush.
        pending: Vec<String>,
    },
    Collect {
        /// Innermost active invocation last; empty outside `collect_styles`.
        stack: Vec<Buffer>,
    },
}

impl Injector {
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::Direct => Injector::Direct { pending: Vec::new() },
            Mode::Collect => Injector::Collect { stack: Vec::new() },
        }
    }

    /// Record a rule reference; `newly` is true when the cache just
    /// created the rule.
    pub fn record_rule(&mut self, fingerprint: Fingerprint, rule: &AtomicRule, newly: bool) {
        match self {
            Injector::Direct { pending } => {
                // cache hits never re-insert into the live sheet
                if newly {
                    pending.push(rule.css_text.clone());
                }
            }
            Injector::Collect { stack } => match stack.last_mut() {
                Some(buffer) => buffer.record_rule(fingerprint, rule),
                None => trace!("rule {} referenced outside collection", rule.class_name),
            },
        }
    }

    /// Record a root variable reference; `newly` is true on first
    /// registration with the cache.
    pub fn record_var(&mut self, name: &str, value: &str, newly: bool) {
        match self {
            Injector::Direct { pending } => {
                if newly {
                    pending.push(format!(":root{{{name}:{value};}}"));
                }
            }
            Injector::Collect { stack } => {
                if let Some(buffer) = stack.last_mut() {
                    buffer.record_var(name, value);
                }
            }
        }
    }

    /// Open a collection buffer; false when the engine is direct-mode.
    pub fn push_buffer(&mut self, screen_names: impl IntoIterator<Item = String>) -> bool {
        match self {
            Injector::Direct { .. } => false,
            Injector::Collect { stack } => {
                trace!("collection buffer opened (depth {})", stack.len() + 1);
                stack.push(Buffer::new(screen_names));
                true
            }
        }
    }

    pub fn pop_buffer(&mut self) -> Option<Buffer> {
        match self {
            Injector::Direct { .. } => None,
            Injector::Collect { stack } => {
                trace!("collection buffer closed (depth {})", stack.len());
                stack.pop()
            }
        }
    }

    /// Drain rule texts appended since the last flush (direct mode).
    pub fn take_pending(&mut self) -> Vec<String> {
        match self {
            Injector::Direct { pending } => std::mem::take(pending),
            Injector::Collect { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(class: &str, screen: Option<&str>) -> AtomicRule {
        AtomicRule {
            class_name: class.to_string(),
            css_text: format!(".{class}{{color:red;}}"),
            screen: screen.map(String::from),
            var_use: None,
        }
    }

    #[test]
    fn test_direct_pending_appends_once() {
        let mut injector = Injector::new(Mode::Direct);
        let r = rule("a1", None);
        injector.record_rule(Fingerprint(1), &r, true);
        injector.record_rule(Fingerprint(1), &r, false);
        let pending = injector.take_pending();
        assert_eq!(pending.len(), 1);
        assert!(injector.take_pending().is_empty());
    }

    #[test]
    fn test_buffer_dedups_by_fingerprint() {
        let mut injector = Injector::new(Mode::Collect);
        injector.push_buffer(["tablet".to_string()]);
        let r = rule("a1", None);
        injector.record_rule(Fingerprint(1), &r, true);
        injector.record_rule(Fingerprint(1), &r, false);
        let blocks = injector.pop_buffer().unwrap().render();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], ".a1{color:red;}");
        assert_eq!(blocks[1], "");
    }

    #[test]
    fn test_buffer_records_hits_not_just_creations() {
        let mut injector = Injector::new(Mode::Collect);
        injector.push_buffer([]);
        injector.record_rule(Fingerprint(1), &rule("a1", None), false);
        let blocks = injector.pop_buffer().unwrap().render();
        assert!(blocks[0].contains(".a1"));
    }

    #[test]
    fn test_buffer_carries_var_dependencies() {
        let mut injector = Injector::new(Mode::Collect);
        injector.push_buffer([]);
        let mut r = rule("a1", None);
        r.var_use = Some(("--colors-primary".to_string(), "tomato".to_string()));
        injector.record_rule(Fingerprint(1), &r, false);
        let blocks = injector.pop_buffer().unwrap().render();
        assert!(blocks[0].starts_with(":root{--colors-primary:tomato;}"));
    }

    #[test]
    fn test_stack_isolates_nested_buffers() {
        let mut injector = Injector::new(Mode::Collect);
        injector.push_buffer([]);
        injector.record_rule(Fingerprint(1), &rule("outer", None), true);
        injector.push_buffer([]);
        injector.record_rule(Fingerprint(2), &rule("inner", None), true);
        let inner = injector.pop_buffer().unwrap().render();
        let outer = injector.pop_buffer().unwrap().render();
        assert!(inner[0].contains("inner") && !inner[0].contains("outer"));
        assert!(outer[0].contains("outer") && !outer[0].contains("inner"));
    }
}
