use super::pagination::total_pages;
use super::record::{Record, compare_optional};
use super::view_state::{SortDirection, ViewState};

#[cfg(feature = "parallel")]
const PARALLEL_SORT_THRESHOLD: usize = 4_096;

/// Records that satisfy `filter`, in collection order.
pub fn apply_filter<'a, R: Record>(collection: &'a [R], filter: &R::Filter) -> Vec<&'a R> {
    collection.iter().filter(|record| record.matches_filter(filter)).collect()
}

/// Stable sort by one field. Equal keys keep their relative order in both directions.
pub fn apply_sort<'a, R: Record>(
    mut items: Vec<&'a R>,
    field: R::SortField,
    direction: SortDirection,
) -> Vec<&'a R> {
    let compare = |a: &&'a R, b: &&'a R| {
        let ordering = compare_optional(a.sort_value(field), b.sort_value(field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    };

    stable_sort(&mut items, compare);
    items
}

#[cfg(feature = "parallel")]
fn stable_sort<T, F>(items: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> std::cmp::Ordering + Sync,
{
    use rayon::slice::ParallelSliceMut;
    if items.len() >= PARALLEL_SORT_THRESHOLD {
        items.par_sort_by(compare);
    } else {
        items.sort_by(compare);
    }
}

#[cfg(not(feature = "parallel"))]
fn stable_sort<T, F>(items: &mut [T], compare: F)
where
    F: Fn(&T, &T) -> std::cmp::Ordering,
{
    items.sort_by(compare);
}

/// Lowercases and trims a raw search box value.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Records whose search fields contain `query` (case-insensitive). An empty query keeps all.
pub fn apply_search<'a, R: Record>(items: Vec<&'a R>, query: &str) -> Vec<&'a R> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|record| {
            record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The `page`-th window of `page_size` items plus the page count.
/// Does not clamp: a page past the end yields an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let pages = total_pages(items.len(), page_size);
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    (&items[start..end], pages)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<'a, R> {
    pub rows: Vec<&'a R>,
    pub total_pages: usize,
    /// Records left after filter and search, across all pages.
    pub total_matches: usize,
}

/// Filter, search, sort, paginate; recomputed from the full collection every call.
pub fn compose_pipeline<'a, R: Record>(
    collection: &'a [R],
    view: &ViewState<R::Filter, R::SortField>,
) -> PipelineOutput<'a, R> {
    let filtered = apply_filter(collection, &view.filter);
    let matched = apply_search(filtered, &view.query);
    let ordered = match view.sort {
        Some(spec) => apply_sort(matched, spec.field, spec.direction),
        None => matched,
    };
    let (page, total_pages) = paginate(&ordered, view.page, view.page_size);
    PipelineOutput { rows: page.to_vec(), total_pages, total_matches: ordered.len() }
}
