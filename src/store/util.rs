use std::path::{Path, PathBuf};

/// Returns `base` if nothing exists there yet, otherwise the first free
/// sibling named `<base>_1`, `<base>_2`, ...
pub fn unique_save_directory(base: impl AsRef<Path>) -> PathBuf {
    let base = base.as_ref();
    if !base.exists() {
        return base.to_path_buf();
    }
    let name = base
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    (1..)
        .map(|suffix| base.with_file_name(format!("{name}_{suffix}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| base.to_path_buf())
}
