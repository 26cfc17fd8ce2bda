//! Authored style input: ordered key/value entries.
//!
//! A [`Style`] is the object-syntax form of a style description: an
//! ordered list of entries whose keys are CSS properties, pseudo
//! selectors (`":hover"`), screen names, or registered util names, and
//! whose values are strings, numbers, or nested [`Style`]s. Entry order
//! is authoring order and is preserved through normalization.

/// A single authored value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Nested(Style),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<Style> for Value {
    fn from(s: Style) -> Self {
        Value::Nested(s)
    }
}

/// An ordered style description (the object syntax).
///
/// Styles are ephemeral: they are flattened into canonical declarations
/// by a composition call and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, Value)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping authoring order.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Single-declaration style (the functional syntax).
    pub fn decl(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().set(property, value)
    }

    /// Wrap a style in a pseudo-selector scope.
    pub fn pseudo(selector: impl Into<String>, inner: Style) -> Self {
        Self::new().set(selector, inner)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build a [`Style`] from `key => value` pairs in authoring order.
///
/// ```
/// use atomik::style;
///
/// let s = style! {
///     "color" => "tomato",
///     "padding" => 8,
///     ":hover" => style! { "color" => "black" },
/// };
/// assert!(!s.is_empty());
/// ```
#[macro_export]
macro_rules! style {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut style = $crate::Style::new();
        $( style = style.set($key, $value); )*
        style
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_authoring_order() {
        let s = style! {
            "color" => "red",
            "margin" => 4,
            "color" => "blue",
        };
        let keys: Vec<&str> = s.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "margin", "color"]);
    }

    #[test]
    fn test_value_conversions() {
        let s = Style::new().set("width", 10).set("opacity", 0.5).set("color", "red");
        let values: Vec<&Value> = s.entries().map(|(_, v)| v).collect();
        assert_eq!(values[0], &Value::Num(10.0));
        assert_eq!(values[1], &Value::Num(0.5));
        assert_eq!(values[2], &Value::Str("red".to_string()));
    }

    #[test]
    fn test_nested_style() {
        let s = style! { ":hover" => style! { "color" => "blue" } };
        let (key, value) = s.entries().next().unwrap();
        assert_eq!(key, ":hover");
        assert!(matches!(value, Value::Nested(inner) if !inner.is_empty()));
    }

    #[test]
    fn test_empty_macro() {
        let s = style! {};
        assert!(s.is_empty());
    }
}
