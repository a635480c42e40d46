use super::canonical::{canonical, char_to_code};
use super::int::KmerInt;

/// Rolls a window of `k` 2-bit DNA codes through a byte sequence, yielding
/// one canonical k-mer per valid window advance. A byte outside
/// {A,C,G,T,a,c,g,t} invalidates the window; it must re-fill `k` valid
/// characters before emitting again.
///
/// One `KmerWindow` is owned per worker/sequence and is never shared.
pub struct KmerWindow<T: KmerInt> {
    k: usize,
    mask: T,
    value: T,
    filled: usize,
}

impl<T: KmerInt> KmerWindow<T> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            mask: T::mask_for_k(k),
            value: T::ZERO,
            filled: 0,
        }
    }

    /// Resets the window so it must re-fill `k` valid bases before the next
    /// emission, as happens whenever a non-ACGT byte is encountered.
    pub fn invalidate(&mut self) {
        self.value = T::ZERO;
        self.filled = 0;
    }

    /// Feeds one DNA character through the window. Returns the canonical
    /// k-mer if this character completed a valid window of length `k`.
    pub fn push(&mut self, c: u8) -> Option<T> {
        match char_to_code(c) {
            Some(code) => {
                self.value = self
                    .value
                    .shl2()
                    .bitor(T::from_code(code))
                    .bitand(self.mask);
                if self.filled < self.k {
                    self.filled += 1;
                }
                if self.filled == self.k {
                    Some(canonical(self.value, self.k))
                } else {
                    None
                }
            }
            None => {
                self.invalidate();
                None
            }
        }
    }
}

/// Extracts every canonical k-mer occurring in `sequence`, skipping runs
/// that contain non-ACGT bytes. This is the reference (non-streaming)
/// extraction used by the naive oracle in tests and by the partition
/// writer's per-sequence scan.
pub fn canonical_kmers<T: KmerInt>(sequence: &[u8], k: usize) -> Vec<T> {
    let mut window = KmerWindow::<T>::new(k);
    let mut out = Vec::new();
    for &c in sequence {
        if let Some(kmer) = window.push(c) {
            out.push(kmer);
        }
    }
    out
}
