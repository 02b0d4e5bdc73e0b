//! Fixed-size pagination over an ordered result set.

use std::fmt;

/// Number of questions served per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number. Zero and negative values cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(page: i64) -> Option<Self> {
        if page < 1 {
            return None;
        }
        usize::try_from(page).ok().map(PageNumber)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the items on `page`, or an empty slice when the page lies past the end.
pub fn paginate<T>(page: PageNumber, items: &[T]) -> &[T] {
    let start = (page.get() - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
