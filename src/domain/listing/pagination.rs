use serde::Serialize;

/// `max(1, ceil(len / page_size))`. A zero page size counts as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Caller-side correction of the current page: anything outside `[1, total_pages]` goes back to 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if page == 0 || page > total_pages.max(1) { 1 } else { page }
}

/// Page numbers shown as buttons: up to `max_visible`, centred on `current`
/// and shifted to stay inside `[1, total_pages]`.
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let max_visible = max_visible.max(1);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total_pages);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start..=end).collect()
}

/// "Showing `first`-`last` of `total` results"; all zero for an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageRange {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let start = page.saturating_sub(1) * page_size;
        if total == 0 || start >= total {
            return Self { first: 0, last: 0, total };
        }
        Self { first: start + 1, last: (start + page_size).min(total), total }
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {}-{} of {} results", self.first, self.last, self.total)
    }
}
