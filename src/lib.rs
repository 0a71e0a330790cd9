//! cardcat: an in-memory library catalog backed by a separate-chaining
//! hash table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the associative storage engine, the ordering routine, and
//!   the domain rules in small layers that can be reasoned about (and
//!   tested) independently.
//! - Layers, leaf-first:
//!   - `sort`: top-down merge sort over an owned `Vec` with an explicit
//!     comparator and an ascending/descending direction flag; used by every
//!     user-facing listing.
//!   - `chain_table::ChainTable<V>`: string-keyed separate-chaining hash
//!     table with a fixed bucket count (17 by default), ASCII-sum modular
//!     hashing, and case-insensitive keys. Nodes live in a slot arena;
//!     chains are per-bucket vectors in insertion order.
//!   - `record`: the Book / Student / IssuedEntry value types, their
//!     console renderings, and the comparator functions the listings use.
//!   - `catalog::Catalog`: domain layer enforcing availability and
//!     issue/return bookkeeping over the table plus two flat lists.
//!   - `load` and `console`: delimited-file bulk load and the menu-driven
//!     command dispatch; both operate on caller-supplied readers/writers.
//!
//! Constraints
//! - Single-threaded and synchronous; the catalog has no internal
//!   synchronization. Embedders must wrap it in their own mutual-exclusion
//!   boundary.
//! - The bucket-index formula (lowercased ASCII byte sum mod bucket count)
//!   is part of the contract and intentionally weak; anagram keys collide.
//! - Mutating table operations fail with explicit errors on precondition
//!   violations and never leave the structure partially mutated.
//! - Nothing persists: state lives for the process, seeded by an optional
//!   bulk load from two delimited text files.
//!
//! Non-goals
//! - No durability, no concurrency, no network access, no schema
//!   evolution, and only ASCII case folding.

pub mod catalog;
pub mod chain_table;
pub mod console;
pub mod load;
pub mod record;
pub mod sort;

// Public surface
pub use catalog::{Catalog, CatalogError};
pub use chain_table::{ChainTable, TableError, DEFAULT_BUCKETS};
pub use load::{LoadError, LoadPolicy, LoadReport};
pub use record::{Book, IssuedEntry, Student};
pub use sort::{merge_sort, Direction};
