//! Fixed lookup tables between DNA k-mers and URL-safe symbol triplets.
//!
//! Every 9-mer over `ACGT` has exactly one 3-symbol code over a 64-character
//! URL-safe alphabet, and vice versa (`4^9 == 64^3`). Both domains are
//! enumerated in lexicographic order and paired up by position, so the
//! mapping is stable across processes and releases.

use std::fmt;
use std::sync::OnceLock;

/// Length of the DNA words packed into one triplet.
pub const KMER_LEN: usize = 9;

/// Number of symbols emitted per k-mer.
pub const TRIPLET_LEN: usize = 3;

/// DNA alphabet in enumeration order.
pub const BASES: [u8; 4] = *b"ACGT";

/// URL-safe symbol alphabet in enumeration order. `_` is reserved as the
/// field delimiter and never appears here.
pub const SYMBOLS: [u8; 64] =
    *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-~";

/// Size of both domains.
pub const TABLE_SIZE: usize = 1 << (2 * KMER_LEN);

const _: () = assert!(BASES.len().pow(KMER_LEN as u32) == TABLE_SIZE);
const _: () = assert!(SYMBOLS.len().pow(TRIPLET_LEN as u32) == TABLE_SIZE);

const NO_RANK: u8 = u8::MAX;

const SYMBOL_RANKS: [u8; 256] = {
    let mut ranks = [NO_RANK; 256];
    let mut i = 0;
    while i < SYMBOLS.len() {
        ranks[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    ranks
};

/// Position of a base in [`BASES`]. Only upper-case `A/C/G/T` are accepted.
#[inline]
pub const fn base_rank(byte: u8) -> Option<usize> {
    match byte {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Position of a byte in [`SYMBOLS`].
#[inline]
pub const fn symbol_rank(byte: u8) -> Option<usize> {
    match SYMBOL_RANKS[byte as usize] {
        NO_RANK => None,
        rank => Some(rank as usize),
    }
}

/// Returns true if `byte` is one of `A/C/G/T`.
#[inline]
pub const fn is_base(byte: u8) -> bool {
    base_rank(byte).is_some()
}

/// Enumerates every word of length `N` over `alphabet`, counting with the
/// last position varying fastest.
fn enumerate_words<const N: usize>(alphabet: &[u8]) -> Vec<[u8; N]> {
    let base = alphabet.len();
    let total = base.pow(N as u32);
    let mut words = Vec::with_capacity(total);
    let mut digits = [0usize; N];

    for _ in 0..total {
        words.push(digits.map(|d| alphabet[d]));
        for pos in (0..N).rev() {
            digits[pos] += 1;
            if digits[pos] < base {
                break;
            }
            digits[pos] = 0;
        }
    }
    words
}

fn kmer_index(kmer: &[u8]) -> Option<usize> {
    if kmer.len() != KMER_LEN {
        return None;
    }
    kmer.iter()
        .try_fold(0usize, |acc, &b| Some((acc << 2) | base_rank(b)?))
}

fn triplet_index(triplet: &[u8]) -> Option<usize> {
    if triplet.len() != TRIPLET_LEN {
        return None;
    }
    triplet
        .iter()
        .try_fold(0usize, |acc, &b| Some((acc << 6) | symbol_rank(b)?))
}

/// Immutable two-way mapping between k-mers and symbol triplets.
pub struct KmerTable {
    to_triplet: Vec<[u8; TRIPLET_LEN]>,
    to_kmer: Vec<[u8; KMER_LEN]>,
}

static GLOBAL_TABLE: OnceLock<KmerTable> = OnceLock::new();

impl KmerTable {
    /// Builds both directions of the mapping.
    ///
    /// # Panics
    ///
    /// Panics if the two enumerated domains differ in size. That can only
    /// happen if `KMER_LEN` or `SYMBOLS` are edited inconsistently, and it
    /// must surface at startup rather than while serving a request.
    pub fn build() -> Self {
        let kmers = enumerate_words::<KMER_LEN>(&BASES);
        let triplets = enumerate_words::<TRIPLET_LEN>(&SYMBOLS);
        assert_eq!(
            kmers.len(),
            triplets.len(),
            "k-mer and triplet domains must have equal size"
        );

        let mut to_triplet = vec![[0u8; TRIPLET_LEN]; kmers.len()];
        let mut to_kmer = vec![[0u8; KMER_LEN]; triplets.len()];

        for (kmer, triplet) in kmers.into_iter().zip(triplets) {
            // Enumeration only produces valid words, so both indices exist.
            if let (Some(ki), Some(ti)) = (kmer_index(&kmer), triplet_index(&triplet)) {
                to_triplet[ki] = triplet;
                to_kmer[ti] = kmer;
            }
        }

        log::debug!("Built k-mer table with {} entries", to_kmer.len());
        Self {
            to_triplet,
            to_kmer,
        }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static KmerTable {
        GLOBAL_TABLE.get_or_init(KmerTable::build)
    }

    /// Triplet for a k-mer, or `None` if `kmer` is not exactly
    /// [`KMER_LEN`] upper-case bases.
    #[inline]
    pub fn triplet(&self, kmer: &[u8]) -> Option<[u8; TRIPLET_LEN]> {
        kmer_index(kmer).map(|i| self.to_triplet[i])
    }

    /// K-mer for a triplet, or `None` if `triplet` is not exactly
    /// [`TRIPLET_LEN`] alphabet symbols.
    #[inline]
    pub fn kmer(&self, triplet: &[u8]) -> Option<[u8; KMER_LEN]> {
        triplet_index(triplet).map(|i| self.to_kmer[i])
    }

    pub fn len(&self) -> usize {
        self.to_kmer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_kmer.is_empty()
    }
}

impl fmt::Debug for KmerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmerTable")
            .field("kmer_len", &KMER_LEN)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_excludes_delimiter() {
        assert!(!SYMBOLS.contains(&b'_'));
        let unique: HashSet<u8> = SYMBOLS.iter().copied().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_enumeration_order() {
        let words = enumerate_words::<2>(b"AB");
        assert_eq!(words, vec![*b"AA", *b"AB", *b"BA", *b"BB"]);
    }

    #[test]
    fn test_table_endpoints() {
        let table = KmerTable::build();
        assert_eq!(table.len(), TABLE_SIZE);
        assert_eq!(table.triplet(b"AAAAAAAAA"), Some(*b"000"));
        assert_eq!(table.triplet(b"AAAAAAAAC"), Some(*b"001"));
        assert_eq!(table.triplet(b"AAAAAAACA"), Some(*b"004"));
        assert_eq!(table.triplet(b"TTTTTTTTT"), Some(*b"~~~"));
        assert_eq!(table.kmer(b"~~~"), Some(*b"TTTTTTTTT"));
    }

    #[test]
    fn test_bijection_complete() {
        let table = KmerTable::build();
        let mut seen = HashSet::with_capacity(TABLE_SIZE);
        for kmer in enumerate_words::<KMER_LEN>(&BASES) {
            let triplet = table.triplet(&kmer).expect("every k-mer has a triplet");
            assert!(seen.insert(triplet), "duplicate triplet {triplet:?}");
            assert_eq!(table.kmer(&triplet), Some(kmer));
        }
        assert_eq!(seen.len(), TABLE_SIZE);
    }

    #[test]
    fn test_rejects_foreign_input() {
        let table = KmerTable::build();
        assert_eq!(table.triplet(b"AAAAAAAAN"), None);
        assert_eq!(table.triplet(b"aaaaaaaaa"), None);
        assert_eq!(table.triplet(b"AAAA"), None);
        assert_eq!(table.kmer(b"0_0"), None);
        assert_eq!(table.kmer(b"00"), None);
        assert_eq!(table.kmer(b"0.0"), None);
        assert_eq!(table.kmer("0é".as_bytes()), None);
    }

    #[test]
    fn test_global_is_shared() {
        let a = KmerTable::global() as *const KmerTable;
        let b = KmerTable::global() as *const KmerTable;
        assert_eq!(a, b);
    }
}
