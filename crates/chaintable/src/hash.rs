//! Byte hashing primitives: shift-add and FNV-1a, in 32 and 64 bit widths.
//!
//! The `*_nul_*` / `fnv1a_str_*` variants treat their input as a
//! null-terminated string and ignore everything from the first `0` byte on.

use std::hash::Hasher;

pub const FNV1A_OFFSET_32: u32 = 0x811c_9dc5;
pub const FNV1A_PRIME_32: u32 = 0x0100_0193;
pub const FNV1A_OFFSET_64: u64 = 0xcbf2_9ce4_8422_2325;
pub const FNV1A_PRIME_64: u64 = 0x0000_0100_0000_01b3;

/// Length of a null-terminated byte string: the offset of the first `0`,
/// or the whole slice if there is none.
#[inline]
pub fn nul_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

def_shift_add!(u32, shift_add_u32, shift_add_nul_u32);
def_shift_add!(u64, shift_add_u64, shift_add_nul_u64);

def_fnv1a!(u32, FNV1A_OFFSET_32, FNV1A_PRIME_32, fnv1a_u32, fnv1a_str_u32);
def_fnv1a!(u64, FNV1A_OFFSET_64, FNV1A_PRIME_64, fnv1a_u64, fnv1a_str_u64);

/// [`Hasher`] running the 64 bit shift-add over everything written to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShiftAddHasher {
    state: u64,
}

impl Hasher for ShiftAddHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state << 5).wrapping_add(byte as u64);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

/// [`Hasher`] running 64 bit FNV-1a over everything written to it.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self {
            state: FNV1A_OFFSET_64,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(FNV1A_PRIME_64);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shift_add_small_inputs() {
        assert_eq!(shift_add_u32(b""), 0);
        assert_eq!(shift_add_u32(b"a"), 97);
        // (97 << 5) + 98
        assert_eq!(shift_add_u32(b"ab"), 3202);
        assert_eq!(shift_add_u64(b"ab"), 3202);
    }

    #[test]
    fn shift_add_wraps_instead_of_overflowing() {
        let long = [0xffu8; 64];
        // only the last few bytes survive the shifts, but it must not panic
        let _ = shift_add_u32(&long);
        let _ = shift_add_u64(&long);
        assert_eq!(shift_add_u32(&long), shift_add_u32(&long[50..]));
    }

    #[test]
    fn nul_variants_stop_at_terminator() {
        assert_eq!(nul_len(b"abc\0def"), 3);
        assert_eq!(nul_len(b"abc"), 3);
        assert_eq!(nul_len(b"\0"), 0);
        assert_eq!(shift_add_nul_u32(b"abc\0def"), shift_add_u32(b"abc"));
        assert_eq!(fnv1a_str_u64(b"abc\0zzz"), fnv1a_u64(b"abc"));
    }

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a_u32(b""), FNV1A_OFFSET_32);
        assert_eq!(fnv1a_u64(b""), FNV1A_OFFSET_64);
        assert_eq!(fnv1a_u32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_u64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a_u32(b"foobar"), 0xbf9c_f968);
        assert_eq!(fnv1a_u64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn hashers_match_free_functions() {
        let mut h = Fnv1aHasher::default();
        h.write(b"foo");
        h.write(b"bar");
        assert_eq!(h.finish(), fnv1a_u64(b"foobar"));

        let mut h = ShiftAddHasher::default();
        h.write(b"pluto14");
        assert_eq!(h.finish(), shift_add_u64(b"pluto14"));
    }
}
