//! Sequence source: the external capability the engine consumes, given one
//! minimal file-backed implementation and an in-memory test double so the
//! engine is runnable end-to-end.

use std::io;
use std::path::{Path, PathBuf};

use seq_io::fasta::Record as FastaRecord;
use seq_io::fastq::Record as FastqRecord;

use crate::utils::open_file;

/// What the planner needs to know about a source before any bytes are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimate {
    pub count: u64,
    pub total_bytes: u64,
    pub max_sequence_bytes: u64,
}

/// A source of DNA sequences. The engine calls `estimate` once before
/// planning and `sequences` once per pass.
pub trait SequenceSource {
    fn estimate(&self) -> Estimate;
    fn sequences(&mut self) -> Box<dyn Iterator<Item = io::Result<Vec<u8>>> + '_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Fasta,
    Fastq,
}

fn detect_format(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("fq") || ext.eq_ignore_ascii_case("fastq") => {
            Format::Fastq
        }
        _ => Format::Fasta,
    }
}

fn sequences_of(path: &Path) -> Box<dyn Iterator<Item = io::Result<Vec<u8>>>> {
    // `open_file` gives a clearer "file not found" message than the bare
    // `io::Error` `Reader::from_path` would otherwise surface.
    match detect_format(path) {
        Format::Fasta => match open_file(path).map(seq_io::fasta::Reader::new) {
            Ok(reader) => Box::new(reader.into_records().map(|r| {
                r.map(|rec| rec.seq().to_vec())
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
        Format::Fastq => match open_file(path).map(seq_io::fastq::Reader::new) {
            Ok(reader) => Box::new(reader.into_records().map(|r| {
                r.map(|rec| rec.seq().to_vec())
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
    }
}

/// A single-pass, dependency-light FASTA/FASTQ reader over a set of paths,
/// re-opened from scratch on every `sequences()` call so each pass sees the
/// same data. No quality filtering, multi-record headers, or compression -
/// the engine only needs raw base runs.
pub struct FastxFileSource {
    paths: Vec<PathBuf>,
}

impl FastxFileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl SequenceSource for FastxFileSource {
    fn estimate(&self) -> Estimate {
        let mut est = Estimate::default();
        for path in &self.paths {
            for seq in sequences_of(path).flatten() {
                est.count += 1;
                est.total_bytes += seq.len() as u64;
                est.max_sequence_bytes = est.max_sequence_bytes.max(seq.len() as u64);
            }
        }
        est
    }

    fn sequences(&mut self) -> Box<dyn Iterator<Item = io::Result<Vec<u8>>> + '_> {
        let paths = self.paths.clone();
        Box::new(paths.into_iter().flat_map(|p| sequences_of(&p)))
    }
}

/// An in-memory sequence source for tests.
pub struct VecBank {
    sequences: Vec<Vec<u8>>,
}

impl VecBank {
    pub fn new<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            sequences: sequences.into_iter().map(Into::into).collect(),
        }
    }
}

impl SequenceSource for VecBank {
    fn estimate(&self) -> Estimate {
        let count = self.sequences.len() as u64;
        let total_bytes = self.sequences.iter().map(|s| s.len() as u64).sum();
        let max_sequence_bytes = self.sequences.iter().map(|s| s.len() as u64).max().unwrap_or(0);
        Estimate {
            count,
            total_bytes,
            max_sequence_bytes,
        }
    }

    fn sequences(&mut self) -> Box<dyn Iterator<Item = io::Result<Vec<u8>>> + '_> {
        Box::new(self.sequences.iter().cloned().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vecbank_estimate_matches_contents() {
        let bank = VecBank::new(["ACGT", "ACGTACGT"]);
        let est = bank.estimate();
        assert_eq!(est.count, 2);
        assert_eq!(est.total_bytes, 12);
        assert_eq!(est.max_sequence_bytes, 8);
    }

    #[test]
    fn vecbank_sequences_are_replayable() {
        let mut bank = VecBank::new(["ACGT", "TTTT"]);
        let first: Vec<_> = bank.sequences().map(|s| s.unwrap()).collect();
        let second: Vec<_> = bank.sequences().map(|s| s.unwrap()).collect();
        assert_eq!(first, second);
    }
}
