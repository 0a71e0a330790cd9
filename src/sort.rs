//! Top-down merge sort over an owned sequence with a caller-supplied
//! comparator and direction flag.
//!
//! Every user-facing listing in the catalog goes through this routine, so the
//! merge rule is pinned down precisely: an element of the first half is taken
//! only when it compares strictly less (ascending) or strictly greater
//! (descending) than the current second-half element; equal elements always
//! drain from the second half first. Callers pass ownership in and receive a
//! newly ordered `Vec` back.

use core::cmp::Ordering;

/// Listing order selected by the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sorts `items` by `cmp` in the given direction.
///
/// Sequences of length <= 1 are returned unchanged. The comparator is an
/// explicit strategy function rather than an `Ord` bound so each record type
/// can offer several orderings (see [`crate::record`]).
pub fn merge_sort<T, F>(items: Vec<T>, direction: Direction, cmp: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering + Copy,
{
    if items.len() <= 1 {
        return items;
    }
    let mut first = items;
    // Second half takes [mid..]; first keeps [..mid].
    let second = first.split_off(first.len() / 2);
    let first = merge_sort(first, direction, cmp);
    let second = merge_sort(second, direction, cmp);
    merge(first, second, direction, cmp)
}

fn merge<T, F>(first: Vec<T>, second: Vec<T>, direction: Direction, cmp: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering + Copy,
{
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut a = first.into_iter().peekable();
    let mut b = second.into_iter().peekable();
    loop {
        let take_first = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => match direction {
                Direction::Ascending => cmp(x, y) == Ordering::Less,
                Direction::Descending => cmp(x, y) == Ordering::Greater,
            },
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_first { a.next() } else { b.next() };
        if let Some(item) = next {
            merged.push(item);
        }
    }
    merged
}
