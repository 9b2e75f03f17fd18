//! Component A: opaque placeholders for not-yet-computed command results.

use std::collections::HashSet;
use std::fmt;

/// The binding name the initial state is seeded with when a spec declares
/// a `setup` command (§4 data model, `Case` lifecycle note on `setup`).
pub const SETUP_HANDLE: &str = "setup";

/// A placeholder standing in for a command's not-yet-known result.
///
/// `SymbolicValue` never carries a real value — it is a name, resolved
/// later by whatever executes the case against the system under test.
/// The core only ever asks whether a name is *bound yet* (`is_valid`),
/// never what it's bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicValue(String);

impl SymbolicValue {
    /// Allocate a fresh root handle with the given name (e.g. `"1"`, `"3b"`).
    pub fn new_root(name: impl Into<String>) -> Self {
        SymbolicValue(name.into())
    }

    /// The distinguished handle bound to the result of a spec's `setup`.
    pub fn setup() -> Self {
        SymbolicValue(SETUP_HANDLE.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True if `bindings` already contains this handle's name — i.e. the
    /// command that produces it has already executed in every
    /// interleaving being checked (invariant I3).
    pub fn is_valid(&self, bindings: &HashSet<String>) -> bool {
        bindings.contains(&self.0)
    }
}

impl fmt::Display for SymbolicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_handle_is_invalid() {
        let bindings = HashSet::new();
        assert!(!SymbolicValue::new_root("1").is_valid(&bindings));
    }

    #[test]
    fn bound_handle_is_valid() {
        let mut bindings = HashSet::new();
        bindings.insert("1".to_string());
        assert!(SymbolicValue::new_root("1").is_valid(&bindings));
    }

    #[test]
    fn setup_handle_has_fixed_name() {
        assert_eq!(SymbolicValue::setup().name(), SETUP_HANDLE);
    }
}
