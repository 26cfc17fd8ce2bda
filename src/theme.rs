//! Theme engine: token override sets rendered as variable-only classes.
//!
//! A theme redefines token variables under a generated class; attaching
//! that class to a subtree makes the overrides active for all
//! descendants through ordinary CSS variable scoping. Nesting needs no
//! merge logic here; the innermost definition wins in the cascade.

use crate::style::declaration::{hash64, Fingerprint};
use crate::token::{TokenStore, Tokens};

/// Flatten a token override set into `(--name, value)` pairs using the
/// store's variable naming. Unknown categories were already discarded
/// when the `Tokens` value was built.
pub(crate) fn theme_entries(store: &TokenStore, overrides: &Tokens) -> Vec<(String, String)> {
    overrides
        .iter()
        .map(|(category, name, value)| (store.var_name(category, name), value.to_string()))
        .collect()
}

/// Theme identity: a hash over the ordered override entries, in its own
/// namespace so theme classes never collide with atomic rules.
pub(crate) fn theme_fingerprint(entries: &[(String, String)]) -> Fingerprint {
    Fingerprint(hash64(
        b't',
        entries
            .iter()
            .flat_map(|(name, value)| [name.as_str(), value.as_str()]),
    ))
}
