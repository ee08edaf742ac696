//! Structural snapshot of a database as delivered by the host.
//!
//! The snapshot is immutable from the engine's point of view: hosts replace it
//! wholesale on refresh and pass it by reference into every call. Field names
//! serialize in camelCase to match the host's JSON.

crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(foreign_key);
crate::reexport!(schema);

/// Case-insensitive identifier comparison used for every schema lookup.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || (!a.is_ascii() && a.to_lowercase() == b.to_lowercase())
}
