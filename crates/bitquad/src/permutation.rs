//! Flag permutation generator
//!
//! Enumerates every boolean combination of `n` flags. Vector `i` holds the
//! bits of `i` least-significant first, so `vector[k]` is bit `k` of the
//! index. This is the reverse of reading the index as MSB-first binary:
//! index 3 with three flags is `[true, true, false]`.

use crate::codec::FlagCount;

/// Build the flag vector for a single permutation index.
///
/// Bits of `index` above `n` are ignored.
pub fn permutation(index: usize, n: FlagCount) -> Vec<bool> {
    let mut flags = Vec::with_capacity(n.get());
    let mut rest = index;
    while rest != 0 && flags.len() < n.get() {
        flags.push(rest & 1 == 1);
        rest >>= 1;
    }
    flags.resize(n.get(), false);
    flags
}

/// Enumerate all `2^n` flag vectors in index order.
pub fn permutations(n: FlagCount) -> Vec<Vec<bool>> {
    (0..n.permutation_count())
        .map(|index| permutation(index, n))
        .collect()
}
