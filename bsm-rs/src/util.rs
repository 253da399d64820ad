//! Support definitions that don't belong anywhere else.

use fnv::FnvHasher;
use std::collections;
use std::hash::BuildHasherDefault;

/// Type alias for hashmaps to allow swapping out the implementation.
pub(crate) type HashMap<K, V> = collections::HashMap<K, V, BuildHasherDefault<FnvHasher>>;
/// Type alias for hashsets to allow swapping out the implementation.
pub(crate) type HashSet<K> = collections::HashSet<K, BuildHasherDefault<FnvHasher>>;
