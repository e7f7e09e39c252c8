use std::fs;
use std::path::Path;

use harvest_core::{Entry, Rating};
use harvest_engine::{write_entries, ExportError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry {
            source_url: "https://github.com/spf13/cobra".to_string(),
            title: "cobra".to_string(),
            description: "cobra - Commander for modern Go CLI interactions.".to_string(),
            rating: Rating::Known("38.5k".to_string()),
        },
        Entry {
            source_url: "https://github.com/a/quoted".to_string(),
            title: "quoted".to_string(),
            description: r#"He said, "hi""#.to_string(),
            rating: Rating::unavailable("http status 404"),
        },
        Entry {
            source_url: "https://github.com/a/multiline".to_string(),
            title: "multi\nline".to_string(),
            description: "first line\nsecond line".to_string(),
            rating: Rating::Known("1,024".to_string()),
        },
    ]
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap()
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn round_trip_yields_header_plus_one_row_per_entry() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("libraries.csv");
    let entries = sample_entries();

    let summary = write_entries(&path, &entries).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.output_path, path);

    let rows = read_rows(&path);
    assert_eq!(rows.len(), entries.len() + 1);
    assert_eq!(rows[0], vec!["sourceURL", "title", "description", "rating"]);
    for (row, entry) in rows[1..].iter().zip(&entries) {
        assert_eq!(row, &entry.to_record().to_vec());
    }
    assert_eq!(rows[2][3], "N/A");
}

#[test]
fn embedded_quotes_and_commas_are_escaped() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("libraries.csv");

    write_entries(&path, &sample_entries()[1..2]).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(
        raw,
        "sourceURL,title,description,rating\n\
         https://github.com/a/quoted,quoted,\"He said, \"\"hi\"\"\",N/A\n"
    );
    assert_eq!(read_rows(&path)[1][2], r#"He said, "hi""#);
}

#[test]
fn empty_entries_fail_without_creating_a_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("libraries.csv");

    let err = write_entries(&path, &[]).unwrap_err();

    assert!(matches!(err, ExportError::EmptyResult));
    assert!(!path.exists());
}

#[test]
fn existing_file_is_truncated() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("libraries.csv");
    fs::write(&path, "stale content that is longer than the new file\n".repeat(100)).unwrap();

    write_entries(&path, &sample_entries()[..1]).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "https://github.com/spf13/cobra");
}

#[test]
fn missing_parent_directory_is_created() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out").join("nested").join("libraries.csv");

    write_entries(&path, &sample_entries()).unwrap();

    assert!(path.is_file());
}

#[test]
fn unwritable_target_reports_write_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();
    let path = blocker.join("libraries.csv");

    let err = write_entries(&path, &sample_entries()).unwrap_err();

    match err {
        ExportError::Write { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected write error, got {other:?}"),
    }
}
