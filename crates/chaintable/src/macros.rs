/// Generates the shift-add pair for one output width: a sized variant hashing
/// every byte, and a terminated variant stopping at the first `0` byte.
macro_rules! def_shift_add {
    ( $t: ty, $sized: ident, $nul: ident ) => {
        #[doc = concat!("Shift-add hash (`hash = (hash << 5) + byte`) over all of `bytes`, as `", stringify!($t), "`.")]
        #[inline]
        pub fn $sized(bytes: &[u8]) -> $t {
            bytes
                .iter()
                .fold(0, |hash: $t, &byte| (hash << 5).wrapping_add(byte as $t))
        }

        #[doc = concat!("Like [`", stringify!($sized), "`], but stops at the first `0` byte.")]
        #[inline]
        pub fn $nul(bytes: &[u8]) -> $t {
            $sized(&bytes[..$crate::hash::nul_len(bytes)])
        }
    };
}

/// Generates the FNV-1a pair for one output width from its offset basis and prime.
macro_rules! def_fnv1a {
    ( $t: ty, $offset: expr, $prime: expr, $buf: ident, $str: ident ) => {
        #[doc = concat!("FNV-1a over all of `bytes`, as `", stringify!($t), "`.")]
        #[inline]
        pub fn $buf(bytes: &[u8]) -> $t {
            bytes.iter().fold($offset, |hash: $t, &byte| {
                (hash ^ byte as $t).wrapping_mul($prime)
            })
        }

        #[doc = concat!("Like [`", stringify!($buf), "`], but stops at the first `0` byte.")]
        #[inline]
        pub fn $str(bytes: &[u8]) -> $t {
            $buf(&bytes[..$crate::hash::nul_len(bytes)])
        }
    };
}

/// Builds a boxed chain node with an explicit hash, `next` left empty
#[cfg(test)]
macro_rules! boxnode {
    ( $key: expr, $value: expr, $hash: expr ) => {
        Box::new($crate::linked_list::Node {
            key: $key,
            value: $value,
            hash: $hash,
            next: None,
        })
    };
}
