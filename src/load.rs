//! Bulk load of books and students from delimited text files.
//!
//! One record per line, fields in fixed order, no header row, and no escaping
//! of the delimiter inside fields:
//! - books: `title,author,ISBN,numPages`
//! - students: `firstName,lastName,studentID`

use crate::catalog::{Catalog, CatalogError};
use log::warn;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to do when a line fails to parse.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LoadPolicy {
    /// Log the malformed line, count it as skipped, and keep going.
    SkipMalformed,
    /// Fail the whole load on the first malformed line.
    AbortOnError,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{source_name}:{line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },
}

/// Counters returned by a completed load.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Records added to the catalog.
    pub loaded: usize,
    /// Malformed lines skipped (SkipMalformed only).
    pub skipped: usize,
    /// Well-formed records rejected as duplicates. Duplicates never abort
    /// the load.
    pub duplicates: usize,
}

/// Loads book records from `path`.
pub fn load_books(
    catalog: &mut Catalog,
    path: &Path,
    delimiter: char,
    policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_books_from(
        catalog,
        BufReader::new(file),
        &path.display().to_string(),
        delimiter,
        policy,
    )
}

/// Loads book records from any buffered reader; `source_name` labels
/// diagnostics.
pub fn load_books_from(
    catalog: &mut Catalog,
    reader: impl BufRead,
    source_name: &str,
    delimiter: char,
    policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    load_lines(reader, source_name, policy, |line, number| {
        let fields: Vec<&str> = line.split(delimiter).collect();
        let &[title, author, isbn, pages] = fields.as_slice() else {
            return Err(format!(
                "expected 4 book fields, found {}",
                fields.len()
            ));
        };
        let pages: u32 = pages
            .trim()
            .parse()
            .map_err(|_| format!("page count '{pages}' is not an integer"))?;
        match catalog.add_book(title, author, isbn, pages) {
            Ok(()) => Ok(Outcome::Loaded),
            Err(CatalogError::DuplicateTitle(_)) => {
                warn!("{source_name}:{number}: duplicate book title '{title}', skipping");
                Ok(Outcome::Duplicate)
            }
            Err(other) => Err(other.to_string()),
        }
    })
}

/// Loads student records from `path`.
pub fn load_students(
    catalog: &mut Catalog,
    path: &Path,
    delimiter: char,
    policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_students_from(
        catalog,
        BufReader::new(file),
        &path.display().to_string(),
        delimiter,
        policy,
    )
}

/// Loads student records from any buffered reader.
pub fn load_students_from(
    catalog: &mut Catalog,
    reader: impl BufRead,
    source_name: &str,
    delimiter: char,
    policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    load_lines(reader, source_name, policy, |line, number| {
        let fields: Vec<&str> = line.split(delimiter).collect();
        let &[first, last, id] = fields.as_slice() else {
            return Err(format!(
                "expected 3 student fields, found {}",
                fields.len()
            ));
        };
        match catalog.add_student(first, last, id) {
            Ok(()) => Ok(Outcome::Loaded),
            Err(CatalogError::DuplicateStudent(_)) => {
                warn!("{source_name}:{number}: duplicate student ID '{id}', skipping");
                Ok(Outcome::Duplicate)
            }
            Err(other) => Err(other.to_string()),
        }
    })
}

enum Outcome {
    Loaded,
    Duplicate,
}

fn load_lines(
    reader: impl BufRead,
    source_name: &str,
    policy: LoadPolicy,
    mut parse: impl FnMut(&str, usize) -> Result<Outcome, String>,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| LoadError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line, number) {
            Ok(Outcome::Loaded) => report.loaded += 1,
            Ok(Outcome::Duplicate) => report.duplicates += 1,
            Err(reason) => match policy {
                LoadPolicy::SkipMalformed => {
                    warn!("{source_name}:{number}: {reason}, skipping line");
                    report.skipped += 1;
                }
                LoadPolicy::AbortOnError => {
                    return Err(LoadError::MalformedRecord {
                        source_name: source_name.to_string(),
                        line: number,
                        reason,
                    });
                }
            },
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Invariant: well-formed book lines load in order with availability
    /// defaulted to true.
    #[test]
    fn loads_books_from_reader() {
        let mut catalog = Catalog::new();
        let data = "Dune,Herbert,111,412\nThe Hobbit,Tolkien,222,310\n";
        let report = load_books_from(
            &mut catalog,
            Cursor::new(data),
            "books.txt",
            ',',
            LoadPolicy::AbortOnError,
        )
        .unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(catalog.book_count(), 2);
        assert!(catalog.book("The Hobbit").unwrap().available);
        assert_eq!(catalog.book("Dune").unwrap().pages, 412);
    }

    /// Invariant: under SkipMalformed a bad page count skips that line and
    /// the rest of the file still loads.
    #[test]
    fn skip_policy_continues_past_bad_integer() {
        let mut catalog = Catalog::new();
        let data = "Dune,Herbert,111,412\nBroken,Author,333,lots\nEmma,Austen,444,200\n";
        let report = load_books_from(
            &mut catalog,
            Cursor::new(data),
            "books.txt",
            ',',
            LoadPolicy::SkipMalformed,
        )
        .unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 1);
        assert!(catalog.book("Broken").is_none());
        assert!(catalog.book("Emma").is_some());
    }

    /// Invariant: under AbortOnError the first malformed line fails the
    /// whole load with its line number.
    #[test]
    fn abort_policy_stops_at_bad_integer() {
        let mut catalog = Catalog::new();
        let data = "Dune,Herbert,111,412\nBroken,Author,333,lots\n";
        let err = load_books_from(
            &mut catalog,
            Cursor::new(data),
            "books.txt",
            ',',
            LoadPolicy::AbortOnError,
        )
        .unwrap_err();
        match err {
            LoadError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        // Lines before the failure were already applied.
        assert_eq!(catalog.book_count(), 1);
    }

    /// Invariant: a wrong field count is malformed, same as a bad integer.
    #[test]
    fn wrong_field_count_is_malformed() {
        let mut catalog = Catalog::new();
        let data = "Dune,Herbert,111\n";
        let report = load_books_from(
            &mut catalog,
            Cursor::new(data),
            "books.txt",
            ',',
            LoadPolicy::SkipMalformed,
        )
        .unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(catalog.book_count(), 0);
    }

    /// Invariant: duplicate titles are counted, never abort, and keep the
    /// first record regardless of policy.
    #[test]
    fn duplicates_counted_not_fatal() {
        let mut catalog = Catalog::new();
        let data = "Dune,Herbert,111,412\ndune,Other,999,1\n";
        let report = load_books_from(
            &mut catalog,
            Cursor::new(data),
            "books.txt",
            ',',
            LoadPolicy::AbortOnError,
        )
        .unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(catalog.book("Dune").unwrap().isbn, "111");
    }

    /// Invariant: student lines load into the flat list and duplicate IDs
    /// are counted.
    #[test]
    fn loads_students_from_reader() {
        let mut catalog = Catalog::new();
        let data = "Amy,Lee,S1\nBo,Chen,S2\nAmy,Again,S1\n";
        let report = load_students_from(
            &mut catalog,
            Cursor::new(data),
            "students.txt",
            ',',
            LoadPolicy::SkipMalformed,
        )
        .unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(catalog.student_count(), 2);
        assert_eq!(catalog.student("S1").unwrap().last_name, "Lee");
    }

    /// Invariant: loading from a real path works and a missing file is an
    /// Io error.
    #[test]
    fn loads_from_path_and_missing_file_is_io_error() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "Dune,Herbert,111,412").unwrap();
        drop(f);

        let mut catalog = Catalog::new();
        let report =
            load_books(&mut catalog, &path, ',', LoadPolicy::AbortOnError).unwrap();
        assert_eq!(report.loaded, 1);

        let missing = dir.path().join("nope.txt");
        let err =
            load_books(&mut catalog, &missing, ',', LoadPolicy::AbortOnError).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
