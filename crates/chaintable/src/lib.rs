//! Separate-chaining hash tables whose bucket count is fixed for life.
//!
//! Two flavours share one chaining algorithm ([`ChainedTable`]):
//!
//! * [`ByteTable`] keeps a private copy of byte-string keys and hashes them
//!   with a built-in shift-add hash.
//! * [`FixedTable`] stores keys of one fixed type by value and takes its hash
//!   and equality from a [`KeyOps`] capability chosen by the instantiator.
//!
//! Inserts prepend to a bucket's chain and never deduplicate, so the newest
//! of several equal keys is the one lookups and removals see first.
//!
//! ```
//! use chaintable::ByteTable;
//!
//! let mut map = ByteTable::new_with_buckets(16)?;
//! map.insert("Yogaholic", "Anjali")?;
//! map.insert("pluto14", "Vartika")?;
//!
//! assert_eq!(map.get("Yogaholic"), Some(&"Anjali"));
//! assert_eq!(map.remove("pluto14"), Some("Vartika"));
//! assert_eq!(map.get("pluto14"), None);
//! assert_eq!(map.len(), 1);
//! # Ok::<(), chaintable::TableError>(())
//! ```

#[macro_use]
mod macros;

mod alloc;
pub mod hash;
pub mod hashmap;
pub mod linked_list;

pub use hashmap::{
    ByteKeys, ByteTable, ChainedTable, DEFAULT_BUCKET_COUNT, FixedTable, Fnv1a, HashFn, KeyFns,
    KeyOps, OwnedKey, ShiftAdd, TableError,
};
pub use linked_list::Node;
