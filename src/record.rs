//! Domain records stored by the catalog, their console renderings, and the
//! comparator functions the listing paths hand to [`crate::sort::merge_sort`].

use core::cmp::Ordering;
use core::fmt;

/// A catalog book. The ISBN is the identity key and is assumed globally
/// unique; the title keys the hash table. Books start out available.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub pages: u32,
    pub available: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        pages: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            pages,
            available: true,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.title,
            self.author,
            self.isbn,
            self.pages,
            if self.available {
                "Available"
            } else {
                "Unavailable"
            }
        )
    }
}

/// A registered student; the ID is the identity key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub id: String,
}

impl Student {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: id.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} - ID#: {})", self.full_name(), self.id)
    }
}

/// A checked-out book paired with the student holding it. Both sides are
/// snapshots taken at issue time; identity is (book ISBN, student ID).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuedEntry {
    pub book: Book,
    pub student: Student,
}

impl IssuedEntry {
    pub fn matches(&self, isbn: &str, student_id: &str) -> bool {
        self.book.isbn == isbn && self.student.id == student_id
    }
}

impl fmt::Display for IssuedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}' by {} - Issued to: {}, student ID#: {})",
            self.book.title,
            self.book.author,
            self.student.full_name(),
            self.student.id
        )
    }
}

/// Books order by title.
pub fn by_title(a: &Book, b: &Book) -> Ordering {
    a.title.cmp(&b.title)
}

/// Issued entries order by their book's title.
pub fn by_issued_title(a: &IssuedEntry, b: &IssuedEntry) -> Ordering {
    a.book.title.cmp(&b.book.title)
}

/// Students order by "first last" full name.
pub fn by_student_name(a: &Student, b: &Student) -> Ordering {
    a.full_name().cmp(&b.full_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: new books are available and render with all five fields.
    #[test]
    fn book_defaults_and_display() {
        let book = Book::new("Dune", "Herbert", "111", 412);
        assert!(book.available);
        assert_eq!(book.to_string(), "(Dune, Herbert, 111, 412, Available)");

        let mut issued = book;
        issued.available = false;
        assert_eq!(
            issued.to_string(),
            "(Dune, Herbert, 111, 412, Unavailable)"
        );
    }

    /// Invariant: student rendering concatenates first and last names.
    #[test]
    fn student_display_uses_full_name() {
        let s = Student::new("Amy", "Lee", "S1");
        assert_eq!(s.full_name(), "Amy Lee");
        assert_eq!(s.to_string(), "(Amy Lee - ID#: S1)");
    }

    /// Invariant: issued-entry identity is the (ISBN, student ID) pair, not
    /// the titles or names.
    #[test]
    fn issued_entry_identity() {
        let entry = IssuedEntry {
            book: Book::new("Dune", "Herbert", "111", 412),
            student: Student::new("Amy", "Lee", "S1"),
        };
        assert!(entry.matches("111", "S1"));
        assert!(!entry.matches("111", "S2"));
        assert!(!entry.matches("222", "S1"));
        assert_eq!(
            entry.to_string(),
            "('Dune' by Herbert - Issued to: Amy Lee, student ID#: S1)"
        );
    }

    /// Invariant: the comparators order by title, issued book title, and
    /// full student name respectively.
    #[test]
    fn comparator_orderings() {
        let a = Book::new("Apple", "A", "1", 1);
        let z = Book::new("Zed", "Z", "2", 2);
        assert_eq!(by_title(&a, &z), Ordering::Less);

        let s1 = Student::new("Amy", "Lee", "S1");
        let s2 = Student::new("Amy", "Zhao", "S2");
        assert_eq!(by_student_name(&s1, &s2), Ordering::Less);

        let e1 = IssuedEntry {
            book: a,
            student: s1,
        };
        let e2 = IssuedEntry {
            book: z,
            student: s2,
        };
        assert_eq!(by_issued_title(&e2, &e1), Ordering::Greater);
    }
}
