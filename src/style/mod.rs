//! Style input, canonical declarations, and normalization.
//!
//! This module contains:
//! - The authored object syntax ([`Style`], [`Value`], the `style!` macro)
//! - Canonical [`Declaration`]s with their identity keys
//! - The normalization pass from one to the other

pub(crate) mod declaration;
pub(crate) mod normalize;
mod value;

pub use declaration::{Declaration, Fingerprint, Slot};
pub use value::{Style, Value};

pub(crate) use normalize::Normalizer;
