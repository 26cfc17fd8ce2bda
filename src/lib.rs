//! # atomik
//!
//! An atomic CSS composition engine. Declarative style descriptions
//! (property/value pairs, optionally scoped to a pseudo-selector or a
//! named responsive screen) become a minimal, deduplicated set of
//! single-property CSS rules referenced by stable class names, with
//! CSS-variable design tokens and theme overrides layered on top.
//!
//! ## Features
//!
//! - Semantically identical declarations always collapse to one rule
//!   and one class name (per engine instance)
//! - Composition order, not CSS specificity, decides which declaration
//!   wins when partial styles conflict
//! - Design tokens resolve to CSS variables; themes override them under
//!   a generated class and nest by ordinary variable scoping
//! - Two output modes fixed at construction: a live stylesheet that
//!   each new rule is appended to exactly once, or per-invocation
//!   collection for server-side rendering with no cross-request leakage
//!
//! ## Quick Start
//!
//! ```
//! use atomik::{min_width, Css, CssConfig, Tokens, style};
//!
//! let css = Css::new(
//!     CssConfig::new()
//!         .prefix("app")
//!         .tokens(Tokens::new().set("colors", "primary", "tomato"))
//!         .screen("tablet", min_width(768)),
//! )
//! .unwrap();
//!
//! let button = css.style(&style! {
//!     "color" => "primary",
//!     "padding" => 8,
//!     ":hover" => style! { "color" => "black" },
//!     "tablet" => style! { "padding" => 16 },
//! });
//!
//! // Later styles win over earlier ones when they collide:
//! let gray = css.style(&style! { "color" => "gray" });
//! let quiet = css.compose([&button, &gray]);
//! assert_ne!(button.class_name(), quiet.class_name());
//!
//! // The sheet renders as ordered blocks: base rules first, then one
//! // block per screen in registration order.
//! let blocks = css.styles();
//! assert!(blocks[0].contains("--app-colors-primary:tomato"));
//! ```

mod cache;
mod compose;
mod config;
mod engine;
mod error;
mod inject;
mod screen;
pub mod style;
mod theme;
mod token;
mod util;

pub use compose::{Composed, StyleArg};
pub use config::CssConfig;
pub use engine::Css;
pub use error::{Error, Result};
pub use inject::{Collected, Mode};
pub use screen::{min_width, ScreenFn};
pub use style::{Declaration, Fingerprint, Slot, Style, Value};
pub use token::{TokenCategory, Tokens};
pub use util::UtilFn;
