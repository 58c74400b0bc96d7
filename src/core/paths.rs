//! File naming for pipeline intermediates and outputs.
//!
//! Every intermediate is named by appending a suffix to its input's full
//! file name, so `q.fasta` becomes `q.fasta.sto`, `q.fasta.sto.w`,
//! `q.fasta.sto.w.ic` and so on.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const ALIGNMENT_SUFFIX: &str = ".sto";
pub const SELECTION_SUFFIX: &str = ".ss";
pub const SAMPLE_SUFFIX: &str = ".sample";
pub const WEIGHTED_SUFFIX: &str = ".w";
pub const INFORMATION_CONTENT_SUFFIX: &str = ".ic";
pub const RESIDUE_INFO_SUFFIX: &str = ".r";

/// Append `suffix` to the last component of `path` without touching any
/// existing extension.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// `<working_dir>/<basename(fasta)>.sto`
pub fn alignment_path(working_dir: &Path, fasta: &Path) -> PathBuf {
    let basename = fasta.file_name().unwrap_or_default();
    with_suffix(&working_dir.join(basename), ALIGNMENT_SUFFIX)
}

pub fn selection_path(alignment: &Path) -> PathBuf {
    with_suffix(alignment, SELECTION_SUFFIX)
}

pub fn sample_path(alignment: &Path) -> PathBuf {
    with_suffix(alignment, SAMPLE_SUFFIX)
}

pub fn weighted_path(alignment: &Path) -> PathBuf {
    with_suffix(alignment, WEIGHTED_SUFFIX)
}

pub fn information_content_path(weighted: &Path) -> PathBuf {
    with_suffix(weighted, INFORMATION_CONTENT_SUFFIX)
}

pub fn residue_info_path(weighted: &Path) -> PathBuf {
    with_suffix(weighted, RESIDUE_INFO_SUFFIX)
}
