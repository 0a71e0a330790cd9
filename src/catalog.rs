//! Catalog: the domain layer over [`ChainTable`].
//!
//! Owns three stores: the book table (keyed by title, case-insensitive), the
//! flat issued list, and the flat student list. The layer enforces the
//! domain invariants the table cannot see:
//! - a book is unavailable iff exactly one issued entry references its ISBN;
//! - an issued book cannot be removed;
//! - availability flips only through update-by-title writebacks, never
//!   through references leaked out of the table.
//!
//! Listing operations snapshot the underlying store and merge-sort the
//! snapshot; successive snapshots share no references.

use crate::chain_table::{ChainTable, TableError};
use crate::record::{by_issued_title, by_student_name, by_title, Book, IssuedEntry, Student};
use crate::sort::{merge_sort, Direction};
use thiserror::Error;

/// Domain-level failures. All of these are recovered by the caller and
/// reported to the user; none abort the program.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CatalogError {
    #[error("no book titled '{0}' in the catalog")]
    BookNotFound(String),
    #[error("a book titled '{0}' is already in the catalog")]
    DuplicateTitle(String),
    #[error("'{0}' is currently issued and cannot be removed")]
    BookIssued(String),
    #[error("'{0}' is not available to issue")]
    BookUnavailable(String),
    #[error("no student with ID '{0}' is registered")]
    StudentNotFound(String),
    #[error("a student with ID '{0}' is already registered")]
    DuplicateStudent(String),
    #[error("'{0}' has no issue record for student '{1}'")]
    NotIssued(String, String),
}

/// In-memory library catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    books: ChainTable<Book>,
    issued: Vec<IssuedEntry>,
    students: Vec<Student>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog whose book table uses `buckets` chains.
    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            books: ChainTable::with_buckets(buckets),
            issued: Vec::new(),
            students: Vec::new(),
        }
    }

    /// Resets the catalog to a blank state: book table, issued list, and
    /// student list all emptied.
    pub fn clear(&mut self) {
        self.books.clear();
        self.issued.clear();
        self.students.clear();
    }

    /// Adds a book with availability = true. Titles are unique
    /// case-insensitively.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        pages: u32,
    ) -> Result<(), CatalogError> {
        let book = Book::new(title, author, isbn, pages);
        let key = book.title.clone();
        match self.books.insert(key.clone(), book) {
            Ok(()) => Ok(()),
            Err(TableError::DuplicateKey | TableError::KeyNotFound) => {
                Err(CatalogError::DuplicateTitle(key))
            }
        }
    }

    /// Looks a book up by title (case-insensitive).
    pub fn book(&self, title: &str) -> Option<&Book> {
        self.books.get(title)
    }

    /// Removes a book by title. Rejected while the book is issued.
    pub fn remove_book(&mut self, title: &str) -> Result<Book, CatalogError> {
        let book = self
            .books
            .get(title)
            .ok_or_else(|| CatalogError::BookNotFound(title.to_string()))?;
        if !book.available {
            return Err(CatalogError::BookIssued(book.title.clone()));
        }
        self.books
            .remove(title)
            .map_err(|_| CatalogError::BookNotFound(title.to_string()))
    }

    /// Issues the titled book to the identified student: writes back an
    /// unavailable copy of the book and appends an issued entry. No state
    /// changes on failure.
    pub fn issue_book(&mut self, title: &str, student_id: &str) -> Result<(), CatalogError> {
        let mut book = self
            .books
            .get(title)
            .cloned()
            .ok_or_else(|| CatalogError::BookNotFound(title.to_string()))?;
        if !book.available {
            return Err(CatalogError::BookUnavailable(book.title.clone()));
        }
        let student = self
            .student(student_id)
            .cloned()
            .ok_or_else(|| CatalogError::StudentNotFound(student_id.to_string()))?;

        book.available = false;
        self.books
            .update(title, book.clone())
            .map_err(|_| CatalogError::BookNotFound(title.to_string()))?;
        self.issued.push(IssuedEntry { book, student });
        Ok(())
    }

    /// Returns a previously issued book: removes the matching
    /// (ISBN, student ID) entry and restores availability via writeback.
    pub fn return_book(&mut self, title: &str, student_id: &str) -> Result<(), CatalogError> {
        let book = self
            .books
            .get(title)
            .ok_or_else(|| CatalogError::BookNotFound(title.to_string()))?;
        let isbn = book.isbn.clone();
        let position = self
            .issued
            .iter()
            .position(|entry| entry.matches(&isbn, student_id))
            .ok_or_else(|| {
                CatalogError::NotIssued(book.title.clone(), student_id.to_string())
            })?;

        let entry = self.issued.remove(position);
        let mut returned = entry.book;
        returned.available = true;
        let key = returned.title.clone();
        self.books
            .update(&key, returned)
            .map_err(|_| CatalogError::BookNotFound(key))?;
        Ok(())
    }

    /// Registers a student. IDs are unique.
    pub fn add_student(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let student = Student::new(first_name, last_name, id);
        if self.student(&student.id).is_some() {
            return Err(CatalogError::DuplicateStudent(student.id));
        }
        self.students.push(student);
        Ok(())
    }

    /// Removes the first student with the given ID.
    pub fn remove_student(&mut self, id: &str) -> Result<Student, CatalogError> {
        let position = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CatalogError::StudentNotFound(id.to_string()))?;
        Ok(self.students.remove(position))
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Snapshot of every book, sorted by title.
    pub fn all_books(&self, direction: Direction) -> Vec<Book> {
        let snapshot: Vec<Book> = self.books.values().cloned().collect();
        merge_sort(snapshot, direction, by_title)
    }

    /// Snapshot of the issued list, sorted by the issued book's title.
    pub fn all_issued(&self, direction: Direction) -> Vec<IssuedEntry> {
        merge_sort(self.issued.clone(), direction, by_issued_title)
    }

    /// Snapshot of the student list, sorted by full name.
    pub fn all_students(&self, direction: Direction) -> Vec<Student> {
        merge_sort(self.students.clone(), direction, by_student_name)
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }
}
