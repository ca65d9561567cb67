use serde::{Deserialize, Serialize};

/// Number of allele bits per storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Packed diploid allele matrix.
///
/// Bits are laid out haplotype-major, then individual, then locus: the bit of
/// haplotype `h`, individual `i`, locus `l` sits at logical index
/// `h * P * L + i * L + l`. Logical bit `k` is bit `k % 64` (least significant
/// first) of word `k / 64`. The logical length is tracked separately from the
/// storage, and unused high bits of the last word are kept at zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawAlleleMatrix")]
pub struct AlleleMatrix {
    n_individuals: usize,
    n_loci: usize,
    len: usize,
    words: Vec<u64>,
}

/// Serialized form of `AlleleMatrix`, checked before it becomes one.
#[derive(Deserialize)]
struct RawAlleleMatrix {
    n_individuals: usize,
    n_loci: usize,
    len: usize,
    words: Vec<u64>,
}

impl TryFrom<RawAlleleMatrix> for AlleleMatrix {
    type Error = String;

    fn try_from(raw: RawAlleleMatrix) -> Result<Self, Self::Error> {
        let (n_individuals, n_loci) = (raw.n_individuals, raw.n_loci);
        let expected = n_individuals
            .checked_mul(n_loci)
            .and_then(|cells| cells.checked_mul(2))
            .ok_or_else(|| format!("{n_individuals} x {n_loci} allele matrix is too large"))?;
        if raw.len != expected {
            return Err(format!(
                "allele matrix of {n_individuals} x {n_loci} must hold {expected} bits, not {}",
                raw.len
            ));
        }
        let n_words = raw.words.len();
        Self::from_words(n_individuals, n_loci, raw.words).ok_or_else(|| {
            format!(
                "{n_words} words do not form a {n_individuals} x {n_loci} allele matrix \
                 with clear trailing bits"
            )
        })
    }
}

impl AlleleMatrix {
    /// Creates an all-zero matrix for `n_individuals` diploid individuals.
    #[must_use]
    pub fn new(n_individuals: usize, n_loci: usize) -> Self {
        let len = 2 * n_individuals * n_loci;
        Self {
            n_individuals,
            n_loci,
            len,
            words: vec![0; len.div_ceil(WORD_BITS)],
        }
    }

    /// Rebuilds a matrix from raw storage words.
    ///
    /// Returns `None` if the word count does not match the dimensions or if
    /// any unused trailing bit is set.
    #[must_use]
    pub fn from_words(n_individuals: usize, n_loci: usize, words: Vec<u64>) -> Option<Self> {
        let len = 2 * n_individuals * n_loci;
        if words.len() != len.div_ceil(WORD_BITS) {
            return None;
        }
        let matrix = Self {
            n_individuals,
            n_loci,
            len,
            words,
        };
        let last_ok = matrix
            .words
            .last()
            .map_or(true, |&w| w & !matrix.tail_mask() == 0);
        last_ok.then_some(matrix)
    }

    /// Total number of allele bits `N = 2 * P * L`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    #[must_use]
    pub fn n_loci(&self) -> usize {
        self.n_loci
    }

    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Logical index of an allele.
    #[must_use]
    pub fn index(&self, haplotype: usize, individual: usize, locus: usize) -> usize {
        debug_assert!(haplotype < 2 && individual < self.n_individuals && locus < self.n_loci);
        haplotype * self.n_individuals * self.n_loci + individual * self.n_loci + locus
    }

    #[must_use]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "allele index {i} out of range {}", self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "allele index {i} out of range {}", self.len);
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    pub fn flip(&mut self, i: usize) {
        assert!(i < self.len, "allele index {i} out of range {}", self.len);
        self.words[i / WORD_BITS] ^= 1u64 << (i % WORD_BITS);
    }

    /// Flips every allele, leaving the unused trailing bits at zero.
    pub fn flip_all(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        let mask = self.tail_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    /// Diploid dosage (0, 1 or 2) of an individual at a locus.
    #[must_use]
    pub fn genotype(&self, individual: usize, locus: usize) -> u8 {
        u8::from(self.get(self.index(0, individual, locus)))
            + u8::from(self.get(self.index(1, individual, locus)))
    }

    /// Number of alleles in state 1.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of positions at which two equally sized matrices differ.
    #[must_use]
    pub fn count_differences(&self, other: &Self) -> usize {
        assert_eq!(self.len, other.len, "allele matrices differ in length");
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum()
    }

    /// Whether the unused bits of the last word are all zero.
    #[must_use]
    pub fn trailing_bits_clear(&self) -> bool {
        self.words
            .last()
            .map_or(true, |&w| w & !self.tail_mask() == 0)
    }

    /// Mask of the bits of the last word that hold alleles.
    fn tail_mask(&self) -> u64 {
        match self.len % WORD_BITS {
            0 => u64::MAX,
            r => (1u64 << r) - 1,
        }
    }
}
