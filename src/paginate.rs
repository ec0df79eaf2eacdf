// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Items `[(page - 1) * size, page * size)`; pages are 1-based.
///
/// No bounds checking beyond the slice itself: an out-of-range page is empty.
pub fn page<T>(items: &[T], size: usize, number: usize) -> &[T] {
    if size == 0 || number == 0 {
        return &[];
    }
    let start = (number - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, size: usize) -> usize {
    if size == 0 { 0 } else { count.div_ceil(size) }
}

/// Caller-side page state for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Pager {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn new(page: usize, per_page: usize) -> Self {
        Pager {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Back to the first page; required whenever filters or page size change.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.reset();
    }

    /// Pull the current page back inside `1..=total_pages` after the collection shrinks.
    pub fn clamp(&mut self, count: usize) {
        let pages = total_pages(count, self.per_page);
        if pages > 0 && self.page > pages {
            self.page = pages;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }

    pub fn next(&mut self, count: usize) -> bool {
        if self.page < total_pages(count, self.per_page) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.per_page, self.page)
    }
}
