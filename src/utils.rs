use std::fs::{self, create_dir_all, File, OpenOptions};
use std::io::{self, BufWriter, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn format_bytes(size: f64) -> String {
    let suffixes = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
    let mut size = size;
    let mut current_suffix = &suffixes[0];

    for suffix in &suffixes[1..] {
        if size >= 1024.0 {
            current_suffix = suffix;
            size /= 1024.0;
        } else {
            break;
        }
    }

    format!("{:.2}{}", size, current_suffix)
}

/// Parses a size string such as "1.5G", "250M" or "1024K" into a byte count.
///
/// # Examples
///
/// ```
/// # use dsk_engine::utils::parse_size;
/// assert_eq!(parse_size("1K").unwrap(), 1024);
/// assert_eq!(parse_size("1M").unwrap(), 1_048_576);
/// ```
pub fn parse_size(s: &str) -> std::result::Result<usize, String> {
    let len = s.len();
    if len < 2 {
        return Err("size must be at least two characters".to_string());
    }

    let (num, suffix) = s.split_at(len - 1);
    let number: f64 = num.parse().map_err(|_| "invalid number".to_string())?;
    match suffix {
        "G" | "g" => Ok((number * 1_073_741_824.0) as usize),
        "M" | "m" => Ok((number * 1_048_576.0) as usize),
        "K" | "k" => Ok((number * 1_024.0) as usize),
        "B" | "b" => Ok(number as usize),
        _ => Err("invalid size suffix. use 'G', 'M', 'K' or 'B'".to_string()),
    }
}

#[cfg(unix)]
extern crate libc;

#[cfg(unix)]
use libc::{getrlimit, rlimit, RLIMIT_NOFILE};

/// Returns the current soft limit on open file descriptors for this process.
#[cfg(unix)]
pub fn get_file_limit() -> usize {
    let mut limits = rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    let result = unsafe { getrlimit(RLIMIT_NOFILE, &mut limits) };

    if result == 0 {
        limits.rlim_cur as usize
    } else {
        eprintln!("failed to get file limit");
        0
    }
}

#[cfg(windows)]
pub fn get_file_limit() -> usize {
    8192
}

/// Creates (or truncates, if already present) `partition` partition files
/// named `<prefix>partition.p<pass>.q<bucket>` under `base_path`.
pub fn create_partition_files(
    base_path: &Path,
    prefix: &str,
    pass: usize,
    partitions: usize,
) -> Result<Vec<PathBuf>> {
    create_dir_all(base_path)?;
    Ok((0..partitions)
        .map(|q| base_path.join(format!("{}partition.p{}.q{}", prefix, pass, q)))
        .collect())
}

pub fn create_partition_writers(partition_files: &[PathBuf]) -> Result<Vec<BufWriter<File>>> {
    partition_files
        .iter()
        .map(|path| {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
            Ok(BufWriter::new(file))
        })
        .collect()
}

pub fn open_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    File::open(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            io::Error::new(e.kind(), format!("file not found: {:?}", path.as_ref()))
        } else {
            e
        }
    })
}

/// Finds all partition/temp files left behind by a run sharing `prefix`,
/// so a fresh engine construction can remove garbage from an abnormal
/// termination of a previous run. No partition file should outlive a
/// successful run; this is also how a crashed run's debris gets swept up.
pub fn find_stale_partition_files(base_path: &Path, prefix: &str) -> Vec<PathBuf> {
    if !base_path.exists() {
        return Vec::new();
    }
    WalkDir::new(base_path)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&format!("{}partition.", prefix)))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

pub fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}
