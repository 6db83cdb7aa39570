//! Page arithmetic over an ordered match list.
//!
//! There is always at least one page, even with no matches, so "nothing
//! found" is still an ordinary (empty) page. Moving past either end is a no-op.

use std::num::NonZeroUsize;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// `max(ceil(len / page_size), 1)`
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Move one page in `direction`, saturating at `[0, total_pages - 1]`.
#[must_use]
pub fn move_page(current: usize, direction: Direction, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1);
    match direction {
        Direction::Next => current.saturating_add(1).min(last),
        Direction::Prev => current.saturating_sub(1).min(last),
    }
}

/// Index range of `page` within a list of `len` items. Empty past the end.
#[must_use]
pub fn page_range(page: usize, page_size: NonZeroUsize, len: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size.get()).min(len);
    let end = start.saturating_add(page_size.get()).min(len);
    start..end
}
