//! Histogram: tallies count multiplicities for diagnostics, serialized as a
//! plain two-column text report and merged across reducer workers through a
//! concurrent map rather than a final single-threaded pass.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use dashmap::DashMap;

/// A concurrent count -> multiplicity tally. Safe to share across reducer
/// workers without an external mutex.
#[derive(Default)]
pub struct Histogram {
    counts: DashMap<u32, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Records one occurrence of a run of length `count`.
    pub fn record(&self, count: u32) {
        *self.counts.entry(count).or_insert(0) += 1;
    }

    /// Writes `count\tmultiplicity` lines in ascending count order.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let mut entries: Vec<(u32, u64)> = self
            .counts
            .iter()
            .map(|e| (*e.key(), *e.value()))
            .collect();
        entries.sort_unstable_by_key(|(c, _)| *c);

        let mut out = BufWriter::new(File::create(path)?);
        for (count, multiplicity) in entries {
            writeln!(out, "{}\t{}", count, multiplicity)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_across_calls() {
        let h = Histogram::new();
        h.record(3);
        h.record(3);
        h.record(5);
        assert_eq!(*h.counts.get(&3).unwrap(), 2);
        assert_eq!(*h.counts.get(&5).unwrap(), 1);
    }
}
