//! K-mer value representation: the packed 2-bit encoding, canonicalization,
//! and the rolling window that turns a sequence of bases into a stream of
//! canonical k-mers.

pub mod canonical;
pub mod int;
pub mod window;

pub use canonical::{canonical, char_to_code, reverse_complement};
pub use int::{KmerInt, KmerWidth, U192, U256};
pub use window::{canonical_kmers, KmerWindow};
