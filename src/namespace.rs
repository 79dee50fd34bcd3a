//! Hash container aliases.
//!
//! Keeping the hasher behind these aliases makes it possible to switch hash
//! backends in one place.

use rapidhash::RapidHashMap;

/// Map type used for name-keyed lookups (function table, aliases,
/// definitions).
pub type KeyMap<K, V> = RapidHashMap<K, V>;
