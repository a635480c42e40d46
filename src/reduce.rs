//! Partition reducer: loads one partition into memory, sorts it, walks runs
//! of equal values, and emits solid ⟨K, C⟩ pairs.

use std::fs::{self, File};
use std::hash::Hasher;
use std::path::Path;

use bytemuck::cast_slice;
use memmap2::Mmap;

use crate::error::{DskError, Result};
use crate::histogram::Histogram;
use crate::kmer::KmerInt;

/// Bound on the recursive rehash-split a pathological partition can trigger
/// before the reducer gives up rather than spin forever.
const MAX_SPLIT_DEPTH: usize = 8;

/// Sub-buckets a pathological partition is rehashed into per split level.
const SPLIT_FANOUT: u64 = 8;

fn salted_hash<T: KmerInt>(kmer: &T, salt: u64) -> u64 {
    let mut hasher = seahash::SeaHasher::with_seeds(
        salt,
        salt ^ 0x9E37_79B9_7F4A_7C15,
        salt.rotate_left(17),
        salt.rotate_right(23),
    );
    hasher.write(bytemuck::bytes_of(kmer));
    hasher.finish()
}

/// Reads, sorts, and reduces one partition file, deleting it once its
/// contents have been consumed.
///
/// The file is memory-mapped rather than read into an owned buffer, so a
/// worker's resident footprint for one partition is the sorted `Vec<T>`
/// alone, not the mapping plus a second copy: `reduce_values` sorts in
/// place on a vector built directly from the mapped bytes.
pub fn reduce_partition<T: KmerInt>(
    path: &Path,
    threshold: u32,
    memory_budget: usize,
    histogram: Option<&Histogram>,
) -> Result<Vec<(T, u32)>> {
    let file = File::open(path)?;
    let data = if file.metadata()?.len() == 0 {
        Vec::new()
    } else {
        // SAFETY: the file is exclusively owned by this reducer (no other
        // process or thread writes to it once the writer pass has closed
        // it), so the mapping cannot observe concurrent truncation/growth.
        let mmap = unsafe { Mmap::map(&file)? };
        let width = std::mem::size_of::<T>();
        let usable_len = (mmap.len() / width) * width;
        let values: &[T] = cast_slice(&mmap[..usable_len]);
        values.to_vec()
    };
    drop(file);
    fs::remove_file(path)?;
    reduce_values(data, threshold, memory_budget, histogram, 0)
}

fn reduce_values<T: KmerInt>(
    mut data: Vec<T>,
    threshold: u32,
    memory_budget: usize,
    histogram: Option<&Histogram>,
    depth: usize,
) -> Result<Vec<(T, u32)>> {
    let width = std::mem::size_of::<T>();
    let estimated_bytes = data.len().saturating_mul(width);

    if estimated_bytes > memory_budget {
        if depth >= MAX_SPLIT_DEPTH {
            return Err(DskError::Internal(format!(
                "partition reduction exceeded the maximum recursive split depth ({})",
                MAX_SPLIT_DEPTH
            )));
        }

        let mut buckets: Vec<Vec<T>> = (0..SPLIT_FANOUT).map(|_| Vec::new()).collect();
        for v in data.drain(..) {
            let h = salted_hash(&v, depth as u64 + 1);
            buckets[(h % SPLIT_FANOUT) as usize].push(v);
        }

        let mut out = Vec::new();
        for bucket in buckets {
            out.extend(reduce_values(
                bucket,
                threshold,
                memory_budget,
                histogram,
                depth + 1,
            )?);
        }
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        return Ok(out);
    }

    data.sort_unstable();

    let mut out = Vec::new();
    let mut iter = data.into_iter().peekable();
    while let Some(value) = iter.next() {
        let mut count: u32 = 1;
        while iter.peek() == Some(&value) {
            iter.next();
            count = count.saturating_add(1);
        }
        if let Some(h) = histogram {
            h.record(count);
        }
        if count >= threshold {
            out.push((value, count));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_partition(path: &Path, values: &[u64]) {
        let mut f = fs::File::create(path).unwrap();
        for v in values {
            f.write_all(bytemuck::bytes_of(v)).unwrap();
        }
    }

    #[test]
    fn empty_partition_emits_nothing() {
        let path = std::env::temp_dir().join("dsk_engine_reduce_empty.bin");
        write_partition(&path, &[]);
        let out = reduce_partition::<u64>(&path, 1, 1 << 20, None).unwrap();
        assert!(out.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn counts_runs_and_filters_by_threshold() {
        let path = std::env::temp_dir().join("dsk_engine_reduce_basic.bin");
        write_partition(&path, &[5, 3, 3, 3, 7, 7, 1]);
        let out = reduce_partition::<u64>(&path, 2, 1 << 20, None).unwrap();
        assert_eq!(out, vec![(3u64, 3), (7u64, 2)]);
    }

    #[test]
    fn pathological_partition_splits_and_still_reduces_correctly() {
        let path = std::env::temp_dir().join("dsk_engine_reduce_split.bin");
        let values: Vec<u64> = (0..2000).map(|i| i % 50).collect();
        write_partition(&path, &values);
        // memory_budget tiny enough to force at least one split level.
        let out = reduce_partition::<u64>(&path, 1, 64, None).unwrap();
        assert_eq!(out.len(), 50);
        for (_, c) in &out {
            assert_eq!(*c, 40);
        }
        let mut sorted = out.clone();
        sorted.sort_by_key(|(v, _)| *v);
        assert_eq!(out, sorted);
    }

    #[test]
    fn histogram_records_each_run_length() {
        let path = std::env::temp_dir().join("dsk_engine_reduce_hist.bin");
        write_partition(&path, &[1, 1, 2]);
        let hist = Histogram::new();
        let _ = reduce_partition::<u64>(&path, 1, 1 << 20, Some(&hist)).unwrap();
        hist.write_to(&std::env::temp_dir().join("dsk_engine_reduce_hist.out"))
            .unwrap();
    }
}
