use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use harvest_core::Entry;
use harvest_logging::harvest_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no entries to write")]
    EmptyResult,
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub output_path: PathBuf,
}

/// Write `entries` as CSV to `path`, replacing any existing file.
///
/// An empty slice is rejected before the file is touched. A failure midway
/// leaves whatever was already written in place.
pub fn write_entries(path: &Path, entries: &[Entry]) -> Result<ExportSummary, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::EmptyResult);
    }
    let write_err = |source: io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    ensure_parent_dir(path).map_err(write_err)?;
    let file = File::create(path).map_err(write_err)?;
    write_csv(file, entries).map_err(write_err)?;

    harvest_info!(
        "CSV file has been created successfully: {:?} ({} rows)",
        path,
        entries.len()
    );
    Ok(ExportSummary {
        rows: entries.len(),
        output_path: path.to_path_buf(),
    })
}

fn write_csv<W: io::Write>(sink: W, entries: &[Entry]) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);
    writer.write_record(Entry::COLUMNS)?;
    for entry in entries {
        writer.write_record(entry.to_record())?;
    }
    // Flush explicitly; dropping the writer would swallow the error.
    writer.flush()
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use harvest_core::{Entry, Rating};

    #[test]
    fn quotes_only_fields_that_need_it() {
        let entries = [Entry {
            source_url: "https://github.com/a/b".to_string(),
            title: "b".to_string(),
            description: "He said, \"hi\"".to_string(),
            rating: Rating::unavailable("timeout"),
        }];
        let mut out = Vec::new();
        write_csv(&mut out, &entries).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sourceURL,title,description,rating\n\
             https://github.com/a/b,b,\"He said, \"\"hi\"\"\",N/A\n"
        );
    }
}
