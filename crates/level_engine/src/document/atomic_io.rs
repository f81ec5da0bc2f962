use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Stages `text` in a temp file next to `path`, then renames it over `path`.
/// The previous document stays in place until the rename succeeds; a failed
/// rename drops only the staged copy.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)?;

    let mut staged = Builder::new()
        .prefix(".level-")
        .suffix(".tmp")
        .tempfile_in(directory)?;
    staged.write_all(text.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|failed| failed.error)?;
    Ok(())
}
