//! Fallible allocation for chain nodes and key copies.
//!
//! Exhausting memory while inserting must leave the table untouched and be
//! reported to the caller, so nothing here goes through the aborting
//! `Box::new` / `Vec::push` paths.

use std::alloc::{self, Layout};

use crate::hashmap::TableError;

/// Moves `value` into a fresh heap allocation, or reports `OutOfMemory`.
pub(crate) fn try_box<T>(value: T, what: &'static str) -> Result<Box<T>, TableError> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc(layout) }.cast::<T>();
    if ptr.is_null() {
        return Err(TableError::OutOfMemory {
            what,
            bytes: layout.size(),
        });
    }

    // SAFETY: `ptr` is non-null and was allocated by the global allocator with
    // the layout of `T`, which is what `Box<T>` deallocates with.
    unsafe {
        ptr.write(value);
        Ok(Box::from_raw(ptr))
    }
}

/// Private copy of `bytes`, optionally followed by one `0` terminator byte.
pub(crate) fn try_copy_bytes(bytes: &[u8], terminate: bool) -> Result<Box<[u8]>, TableError> {
    let len = bytes.len() + usize::from(terminate);
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| TableError::OutOfMemory {
            what: "key copy",
            bytes: len,
        })?;

    buf.extend_from_slice(bytes);
    if terminate {
        buf.push(0);
    }
    Ok(buf.into_boxed_slice())
}
