//! Case file reading.

use std::path::Path;

use casebrief_core::{Error, Result};

/// Read a case document as UTF-8 text.
///
/// A missing path is reported as [`Error::NotFound`] so batch callers can skip it.
pub fn read_case_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    // Editors on Windows like to leave a BOM on exported case files
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}
