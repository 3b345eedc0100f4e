//! Key capabilities: how a table hashes and compares the keys it stores.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::hash::{Fnv1aHasher, ShiftAddHasher, shift_add_u32};

/// Hash and equality for one key type, supplied by whoever instantiates a table.
///
/// Implementations must be deterministic and pure, and must agree with each
/// other: `eq_key(a, b)` implies `hash_key(a) == hash_key(b)`. The table cannot
/// check this; a hash that breaks it makes lookups silently miss entries that
/// are stored.
pub trait KeyOps {
    type Key: ?Sized;

    fn hash_key(&self, key: &Self::Key) -> u64;

    fn eq_key(&self, stored: &Self::Key, probe: &Self::Key) -> bool;
}

/// Byte-string keys: 32 bit shift-add hash, byte-wise equality.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteKeys;

impl KeyOps for ByteKeys {
    type Key = [u8];

    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        u64::from(shift_add_u32(key))
    }

    #[inline]
    fn eq_key(&self, stored: &[u8], probe: &[u8]) -> bool {
        stored == probe
    }
}

/// A caller-supplied hash function, with `K`'s own `Eq` as the equality.
pub struct HashFn<K, F> {
    hash: F,
    _key: PhantomData<fn(&K)>,
}

impl<K, F> HashFn<K, F>
where
    F: Fn(&K) -> u64,
{
    pub fn new(hash: F) -> Self {
        Self {
            hash,
            _key: PhantomData,
        }
    }
}

impl<K, F> KeyOps for HashFn<K, F>
where
    K: Eq,
    F: Fn(&K) -> u64,
{
    type Key = K;

    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq_key(&self, stored: &K, probe: &K) -> bool {
        stored == probe
    }
}

impl<K, F: Clone> Clone for HashFn<K, F> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, F> fmt::Debug for HashFn<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashFn").finish_non_exhaustive()
    }
}

/// Caller-supplied hash and equality functions, for key types whose `Eq`
/// is not the equality the table should use.
pub struct KeyFns<K, H, E> {
    hash: H,
    eq: E,
    _key: PhantomData<fn(&K)>,
}

impl<K, H, E> KeyFns<K, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    pub fn new(hash: H, eq: E) -> Self {
        Self {
            hash,
            eq,
            _key: PhantomData,
        }
    }
}

impl<K, H: Clone, E: Clone> Clone for KeyFns<K, H, E> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash.clone(),
            eq: self.eq.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, H, E> KeyOps for KeyFns<K, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    type Key = K;

    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq_key(&self, stored: &K, probe: &K) -> bool {
        (self.eq)(stored, probe)
    }
}

impl<K, H, E> fmt::Debug for KeyFns<K, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFns").finish_non_exhaustive()
    }
}

macro_rules! def_hasher_ops {
    ( $name: ident, $hasher: ty, $doc: literal ) => {
        #[doc = $doc]
        pub struct $name<K: ?Sized>(PhantomData<fn(&K)>);

        impl<K: ?Sized> $name<K> {
            pub const fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<K: ?Sized> Default for $name<K> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<K: ?Sized> Clone for $name<K> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<K: ?Sized> Copy for $name<K> {}

        impl<K: ?Sized> fmt::Debug for $name<K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<K: Hash + Eq + ?Sized> KeyOps for $name<K> {
            type Key = K;

            fn hash_key(&self, key: &K) -> u64 {
                let mut h = <$hasher>::default();
                key.hash(&mut h);
                h.finish()
            }

            #[inline]
            fn eq_key(&self, stored: &K, probe: &K) -> bool {
                stored == probe
            }
        }
    };
}

def_hasher_ops!(
    ShiftAdd,
    ShiftAddHasher,
    "Any `Hash + Eq` key, hashed by feeding its `Hash` bytes through 64 bit shift-add."
);
def_hasher_ops!(
    Fnv1a,
    Fnv1aHasher,
    "Any `Hash + Eq` key, hashed by feeding its `Hash` bytes through 64 bit FNV-1a."
);

#[cfg(test)]
mod test {
    use super::*;

    /// equal keys must hash equal, whatever the capability
    fn assert_consistent<O: KeyOps>(ops: &O, a: &O::Key, b: &O::Key) {
        if ops.eq_key(a, b) {
            assert_eq!(ops.hash_key(a), ops.hash_key(b));
        }
    }

    #[test]
    fn byte_keys_hash_is_shift_add() {
        assert_eq!(ByteKeys.hash_key(&b"ab"[..]), 3202);
        assert!(ByteKeys.eq_key(&b"abc"[..], &b"abc"[..]));
        assert!(!ByteKeys.eq_key(&b"abc"[..], &b"abd"[..]));
        assert!(!ByteKeys.eq_key(&b"abc"[..], &b"abc\0"[..]));
        assert_consistent(&ByteKeys, &b"Yogaholic"[..], &b"Yogaholic"[..]);
    }

    #[test]
    fn hash_fn_uses_key_equality() {
        let ops = HashFn::new(|x: &i32| *x as u64);
        assert_eq!(ops.hash_key(&0), 0);
        assert_eq!(ops.hash_key(&17), 17);
        assert!(ops.eq_key(&3, &3));
        assert!(!ops.eq_key(&3, &4));
        for x in -5..5 {
            assert_consistent(&ops, &x, &x);
        }
    }

    #[test]
    fn key_fns_compare_by_content() {
        // case-insensitive keys: the hash must fold case the same way
        let ops = KeyFns::new(
            |k: &String| crate::hash::fnv1a_u64(k.to_ascii_lowercase().as_bytes()),
            |a: &String, b: &String| a.eq_ignore_ascii_case(b),
        );
        let (a, b) = ("Pluto14".to_string(), "pLUTO14".to_string());
        assert!(ops.eq_key(&a, &b));
        assert_consistent(&ops, &a, &b);
    }

    #[test]
    fn function_wrappers_clone_alike() {
        let hash_fn = HashFn::new(|k: &u32| u64::from(*k) * 3);
        let key_fns = KeyFns::new(|k: &u32| u64::from(*k) * 3, |a: &u32, b: &u32| a == b);

        let (hash_fn2, key_fns2) = (hash_fn.clone(), key_fns.clone());
        assert_eq!(hash_fn2.hash_key(&7), 21);
        assert_eq!(key_fns2.hash_key(&7), 21);
        assert!(key_fns2.eq_key(&7, &7));
        assert!(!key_fns2.eq_key(&7, &8));
    }

    #[test]
    fn hasher_ops_are_consistent_for_owned_and_borrowed_strings() {
        let fnv = Fnv1a::<str>::new();
        let sa = ShiftAdd::<str>::new();
        let owned = String::from("elite_Programmer");
        assert_consistent(&fnv, owned.as_str(), "elite_Programmer");
        assert_consistent(&sa, owned.as_str(), "elite_Programmer");
        assert_ne!(fnv.hash_key("GFG"), fnv.hash_key("GFH"));
    }
}
