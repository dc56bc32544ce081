//! Input and output path defaults.

use std::path::{Path, PathBuf};

use dq_standards::paths::reference_root;

/// Suffix appended to the input file stem for the augmented table.
pub const OUTPUT_SUFFIX: &str = "_checked";

/// The reference directory: an explicit flag wins over
/// `DQ_REFERENCE_DIR`, which wins over the bundled directory.
pub fn resolve_reference_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(reference_root, Path::to_path_buf)
}

/// `<dir>/<stem>_checked.csv` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "customers".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.csv"))
}
