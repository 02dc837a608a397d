//! Title list export.
//!
//! Writes the comparison names of a library's items, one per line, so
//! poster files can be named to match before running a sync.

use std::io::Write;
use std::path::Path;

use crate::candidates::library_identifier;
use crate::error::PosterError;
use crate::types::MediaItem;

/// File name of the exported list for `library`: `plex_<identifier>_list.txt`.
pub fn list_file_name(library: &str) -> String {
    format!("plex_{}_list.txt", library_identifier(library))
}

/// Writes one comparison name per line to `path`, in listing order.
///
/// Returns the number of lines written.
pub fn write_title_list(path: &Path, items: &[MediaItem]) -> Result<usize, PosterError> {
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    for item in items {
        writeln!(out, "{}", item.comparison_name())?;
    }
    out.flush()?;
    Ok(items.len())
}
