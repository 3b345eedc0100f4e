use thiserror::Error;

mod byte_table;
mod chained;
mod fixed_table;
mod key_ops;

/// Bucket count used when the caller has no better estimate.
pub const DEFAULT_BUCKET_COUNT: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table needs at least one bucket to index into
    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    /// The allocator refused a request; the table was left as it was
    #[error("out of memory allocating {what} ({bytes} bytes)")]
    OutOfMemory { what: &'static str, bytes: usize },

    /// An explicit key length pointed past the end of the key buffer
    #[error("key length {len} exceeds the {available} bytes provided")]
    KeyLength { len: usize, available: usize },
}

pub use byte_table::{ByteTable, OwnedKey};
pub use chained::{ChainedTable, Iter};
pub use fixed_table::FixedTable;
pub use key_ops::{ByteKeys, Fnv1a, HashFn, KeyFns, KeyOps, ShiftAdd};
