use cardcat::catalog::Catalog;
use cardcat::chain_table::DEFAULT_BUCKETS;
use cardcat::console;
use cardcat::load::{load_books, load_students, LoadError, LoadPolicy};
use clap::Parser;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Book records, one `title,author,ISBN,numPages` per line.
    #[arg(long, default_value = "bookData.txt")]
    books: PathBuf,

    /// Student records, one `firstName,lastName,studentID` per line.
    #[arg(long, default_value = "studentData.txt")]
    students: PathBuf,

    /// Field delimiter for both load files.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Bucket count for the book table.
    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Abort the load on the first malformed record instead of skipping it.
    #[arg(long)]
    strict_load: bool,
}

fn initialize_logger() {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env();
    let _ = builder.try_init();
}

fn main() -> ExitCode {
    initialize_logger();
    let args = Args::parse();
    let policy = if args.strict_load {
        LoadPolicy::AbortOnError
    } else {
        LoadPolicy::SkipMalformed
    };

    let mut catalog = Catalog::with_buckets(args.buckets);
    match load_books(&mut catalog, &args.books, args.delimiter, policy) {
        Ok(report) => info!(
            "loaded {} books from {} ({} skipped, {} duplicates)",
            report.loaded,
            args.books.display(),
            report.skipped,
            report.duplicates
        ),
        // A missing seed file just means an empty catalog.
        Err(LoadError::Io { path, source }) => {
            warn!("could not read book file {}: {source}", path.display());
        }
        Err(err @ LoadError::MalformedRecord { .. }) => {
            log::error!("book load failed: {err}");
            return ExitCode::FAILURE;
        }
    }
    match load_students(&mut catalog, &args.students, args.delimiter, policy) {
        Ok(report) => info!(
            "loaded {} students from {} ({} skipped, {} duplicates)",
            report.loaded,
            args.students.display(),
            report.skipped,
            report.duplicates
        ),
        Err(LoadError::Io { path, source }) => {
            warn!("could not read student file {}: {source}", path.display());
        }
        Err(err @ LoadError::MalformedRecord { .. }) => {
            log::error!("student load failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    if let Err(err) = console::run(&mut catalog, &mut input, &mut output) {
        log::error!("console loop failed: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
