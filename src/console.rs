//! Console menu loop and command dispatch.
//!
//! There is no global state: [`run`] drives the 8-action home menu over any
//! `BufRead`/`Write` pair, and each menu action is a command function taking
//! the catalog and the input source and writing its report to the output
//! sink. That keeps every command scriptable from tests.
//!
//! Input validation policy: out-of-range or non-numeric menu input
//! re-prompts; it never exits. End-of-input on the reader terminates the
//! loop like quit.

use crate::catalog::Catalog;
use crate::record::Book;
use crate::sort::Direction;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// The 8 home-menu actions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MenuChoice {
    SearchBooks,
    IssueBook,
    ReturnBook,
    AddBook,
    DeleteBook,
    AddStudent,
    DeleteStudent,
    Quit,
}

impl MenuChoice {
    fn from_number(n: usize) -> Option<Self> {
        match n {
            1 => Some(Self::SearchBooks),
            2 => Some(Self::IssueBook),
            3 => Some(Self::ReturnBook),
            4 => Some(Self::AddBook),
            5 => Some(Self::DeleteBook),
            6 => Some(Self::AddStudent),
            7 => Some(Self::DeleteStudent),
            8 => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Runs the menu loop until quit or end of input.
pub fn run<R: BufRead, W: Write>(
    catalog: &mut Catalog,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        render_menu(output)?;
        let Some(n) = prompt_number(input, output, 1, 8)? else {
            break;
        };
        let Some(choice) = MenuChoice::from_number(n) else {
            continue;
        };
        match choice {
            MenuChoice::SearchBooks => search_books(catalog, input, output)?,
            MenuChoice::IssueBook => issue_book(catalog, input, output)?,
            MenuChoice::ReturnBook => return_book(catalog, input, output)?,
            MenuChoice::AddBook => add_book(catalog, input, output)?,
            MenuChoice::DeleteBook => delete_book(catalog, input, output)?,
            MenuChoice::AddStudent => add_student(catalog, input, output)?,
            MenuChoice::DeleteStudent => delete_student(catalog, input, output)?,
            MenuChoice::Quit => break,
        }
    }
    writeln!(output, "Catalog: End of program!")
}

fn render_menu(output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "{}", "Home Menu:".bold())?;
    writeln!(output, "1. Search Books")?;
    writeln!(output, "2. Issue Book")?;
    writeln!(output, "3. Return Book")?;
    writeln!(output, "4. Add Book")?;
    writeln!(output, "5. Delete Book")?;
    writeln!(output, "6. Add Student")?;
    writeln!(output, "7. Delete Student")?;
    writeln!(output, "8. Quit")?;
    write!(output, "Enter the number for your choice: ")?;
    output.flush()
}

/// Reads one line; `None` means end of input. The trailing newline is
/// stripped.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

fn prompt_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    read_line(input)
}

/// Reads a number in `min..=max`, re-prompting on anything else.
fn prompt_number(
    input: &mut impl BufRead,
    output: &mut impl Write,
    min: usize,
    max: usize,
) -> io::Result<Option<usize>> {
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(Some(n)),
            _ => {
                write!(output, "Please enter a value within range!: ")?;
                output.flush()?;
            }
        }
    }
}

fn display_book_info(output: &mut impl Write, book: &Book) -> io::Result<()> {
    writeln!(output, "Book info:")?;
    writeln!(output, "Title: {}", book.title)?;
    writeln!(output, "Author: {}", book.author)?;
    writeln!(output, "ISBN#: {}", book.isbn)?;
    writeln!(output, "Num Pages: {}", book.pages)?;
    writeln!(
        output,
        "Availability: {}",
        if book.available {
            "Available"
        } else {
            "Unavailable"
        }
    )
}

fn search_books(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if catalog.book_count() == 0 {
        return writeln!(output, "Catalog: No books to show or search for!");
    }
    writeln!(output, "Catalog: All Books:")?;
    for (i, book) in catalog.all_books(Direction::Ascending).iter().enumerate() {
        writeln!(output, "{}. {book}", i + 1)?;
    }
    let Some(title) = prompt_line(input, output, "Enter a book title to view it: ")? else {
        return Ok(());
    };
    match catalog.book(&title) {
        Some(book) => display_book_info(output, book),
        None => writeln!(
            output,
            "Catalog: Book titled '{title}' does not exist in this catalog!"
        ),
    }
}

fn issue_book(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if catalog.book_count() == 0 || catalog.student_count() == 0 {
        return writeln!(
            output,
            "Catalog: Can't issue books since there are either no books or no students!"
        );
    }
    let Some(title) = prompt_line(input, output, "Enter book title: ")? else {
        return Ok(());
    };
    let Some(book) = catalog.book(&title).cloned() else {
        return writeln!(output, "Catalog: Book with title '{title}' not found!");
    };
    display_book_info(output, &book)?;
    if !book.available {
        return writeln!(
            output,
            "Catalog: '{}' is currently not available to be issued!",
            book.title
        );
    }

    let students = catalog.all_students(Direction::Ascending);
    for (i, student) in students.iter().enumerate() {
        writeln!(output, "{}. {student}", i + 1)?;
    }
    write!(output, "Enter the number corresponding to the student: ")?;
    output.flush()?;
    let Some(choice) = prompt_number(input, output, 1, students.len())? else {
        return Ok(());
    };
    let student = &students[choice - 1];

    match catalog.issue_book(&book.title, &student.id) {
        Ok(()) => writeln!(
            output,
            "Catalog: Successfully issued '{}' to {student}!",
            book.title
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}

fn return_book(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if catalog.issued_count() == 0 {
        return writeln!(output, "Catalog: No books have been issued yet!");
    }
    let issued = catalog.all_issued(Direction::Ascending);
    writeln!(output, "Catalog: Issued Book Record:")?;
    for (i, entry) in issued.iter().enumerate() {
        writeln!(output, "{}. {entry}", i + 1)?;
    }
    write!(output, "Enter the number corresponding to the entry: ")?;
    output.flush()?;
    let Some(choice) = prompt_number(input, output, 1, issued.len())? else {
        return Ok(());
    };
    let entry = &issued[choice - 1];

    match catalog.return_book(&entry.book.title, &entry.student.id) {
        Ok(()) => writeln!(
            output,
            "Catalog: Successfully returned '{}' from {}!",
            entry.book.title, entry.student
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}

fn add_book(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(title) = prompt_line(input, output, "Enter book title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt_line(input, output, "Enter book author: ")? else {
        return Ok(());
    };
    let Some(isbn) = prompt_line(input, output, "Enter book ISBN: ")? else {
        return Ok(());
    };
    let Some(pages) = prompt_pages(input, output)? else {
        return Ok(());
    };
    match catalog.add_book(title.clone(), author, isbn, pages) {
        Ok(()) => writeln!(
            output,
            "Catalog: Successfully added '{title}' to the catalog!"
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}

/// Page-count prompt; re-prompts until a valid integer arrives.
fn prompt_pages(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Option<u32>> {
    write!(output, "Enter number of pages: ")?;
    output.flush()?;
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<u32>() {
            Ok(pages) => return Ok(Some(pages)),
            Err(_) => {
                write!(output, "Please enter a whole number of pages: ")?;
                output.flush()?;
            }
        }
    }
}

fn delete_book(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if catalog.book_count() == 0 {
        return writeln!(output, "Catalog: No books stored to delete!");
    }
    let Some(title) = prompt_line(input, output, "Enter book title: ")? else {
        return Ok(());
    };
    match catalog.remove_book(&title) {
        Ok(book) => writeln!(
            output,
            "Catalog: Successfully removed '{}' from the catalog!",
            book.title
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}

fn add_student(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(first) = prompt_line(input, output, "Enter student's first name: ")? else {
        return Ok(());
    };
    let Some(last) = prompt_line(input, output, "Enter student's last name: ")? else {
        return Ok(());
    };
    let Some(id) = prompt_line(input, output, "Enter student's ID number: ")? else {
        return Ok(());
    };
    match catalog.add_student(first.clone(), last.clone(), id) {
        Ok(()) => writeln!(
            output,
            "Catalog: Successfully added student {first} {last}!"
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}

fn delete_student(
    catalog: &mut Catalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if catalog.student_count() == 0 {
        return writeln!(output, "Catalog: There are no students registered!");
    }
    let students = catalog.all_students(Direction::Ascending);
    for (i, student) in students.iter().enumerate() {
        writeln!(output, "{}. {student}", i + 1)?;
    }
    write!(output, "Select student based on the menu number: ")?;
    output.flush()?;
    let Some(choice) = prompt_number(input, output, 1, students.len())? else {
        return Ok(());
    };
    let id = students[choice - 1].id.clone();

    match catalog.remove_student(&id) {
        Ok(student) => writeln!(
            output,
            "Catalog: Successfully deleted student {student} from the catalog!"
        ),
        Err(err) => writeln!(output, "Catalog: {err}"),
    }
}
