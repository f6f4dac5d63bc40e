use std::path::{Path, PathBuf};

use tracing::warn;

/// Resolve the data file against the directory holding the running binary.
/// Absolute paths are returned unchanged.
pub fn resolve_data_path(data_file: &Path) -> PathBuf {
    if data_file.is_absolute() {
        return data_file.to_path_buf();
    }

    match executable_dir() {
        Ok(dir) => dir.join(data_file),
        Err(err) => {
            warn!(
                error = %err,
                data_file = %data_file.display(),
                "Failed to resolve executable dir, using working directory"
            );
            data_file.to_path_buf()
        }
    }
}

fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })
}
