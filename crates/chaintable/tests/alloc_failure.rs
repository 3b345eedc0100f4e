// Inserts that run out of memory must report it and leave the table as it was.
//
// The global allocator below counts down a per-thread budget; once it hits
// zero every further allocation on that thread returns null. Other test
// threads are unaffected.
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use chaintable::{ByteTable, FixedTable, TableError};

struct Budgeted;

thread_local! {
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

unsafe impl GlobalAlloc for Budgeted {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let refuse = BUDGET
            .try_with(|b| match b.get() {
                Some(0) => true,
                Some(n) => {
                    b.set(Some(n - 1));
                    false
                }
                None => false,
            })
            .unwrap_or(false);

        if refuse {
            std::ptr::null_mut()
        } else {
            unsafe { System.alloc(layout) }
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: Budgeted = Budgeted;

/// Runs `f` allowing only `allowed` allocations on this thread. The budget is
/// lifted before returning so assertions can allocate freely.
fn with_budget<T>(allowed: usize, f: impl FnOnce() -> T) -> T {
    BUDGET.with(|b| b.set(Some(allowed)));
    let out = f();
    BUDGET.with(|b| b.set(None));
    out
}

fn snapshot<V>(t: &ByteTable<V>) -> (usize, Vec<usize>) {
    (t.len(), t.chain_lens().collect())
}

#[test]
fn byte_insert_fails_on_key_copy() {
    let mut t = ByteTable::new_with_buckets(4).unwrap();
    t.insert("a", 1).unwrap();
    let before = snapshot(&t);

    let res = with_budget(0, || t.insert("a", 2));

    assert!(matches!(
        res,
        Err(TableError::OutOfMemory { what: "key copy", .. })
    ));
    assert_eq!(snapshot(&t), before);
    assert_eq!(t.get("a"), Some(&1));
}

#[test]
fn byte_insert_fails_on_node_after_key_copy() {
    let mut t = ByteTable::new_with_buckets(4).unwrap();
    t.insert("Yogaholic", 1).unwrap();
    let before = snapshot(&t);

    // the key copy succeeds, the node does not; the copy is released again
    let res = with_budget(1, || t.insert("Yogaholic", 2));

    assert!(matches!(
        res,
        Err(TableError::OutOfMemory { what: "chain node", .. })
    ));
    assert_eq!(snapshot(&t), before);
    assert_eq!(t.get("Yogaholic"), Some(&1));
}

#[test]
fn byte_insert_sized_fails_on_key_copy() {
    let mut t = ByteTable::new_with_buckets(4).unwrap();
    t.insert_sized(b"a\0b", 3, 1).unwrap();
    let before = snapshot(&t);

    let res = with_budget(0, || t.insert_sized(b"a\0b", 3, 2));

    assert!(matches!(
        res,
        Err(TableError::OutOfMemory { what: "key copy", .. })
    ));
    assert_eq!(snapshot(&t), before);
    assert_eq!(t.get_bytes(b"a\0b"), Some(&1));
}

#[test]
fn fixed_insert_fails_on_node() {
    let mut t = FixedTable::with_hash_fn(4, |k: &u32| u64::from(*k)).unwrap();
    t.insert(0, 15).unwrap();
    t.insert(5, 50).unwrap();
    let before: (usize, Vec<usize>) = (t.len(), t.chain_lens().collect());

    let res = with_budget(0, || t.insert(0, 16));

    assert!(matches!(
        res,
        Err(TableError::OutOfMemory { what: "chain node", .. })
    ));
    assert_eq!((t.len(), t.chain_lens().collect::<Vec<_>>()), before);
    assert_eq!(t.get(&0), Some(&15));
    assert_eq!(t.get(&5), Some(&50));
}

#[test]
fn insert_succeeds_once_memory_is_back() {
    let mut t = FixedTable::with_hash_fn(2, |k: &u32| u64::from(*k)).unwrap();
    assert!(with_budget(0, || t.insert(1, 1)).is_err());
    assert!(t.is_empty());

    t.insert(1, 2).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.get(&1), Some(&2));
}
