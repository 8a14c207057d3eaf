/// Number of pages a sequence of `len` items spans. An empty sequence
/// still displays as one page so the empty state never reads "page 1 of 0".
pub fn page_count(len: usize, page_size: usize) -> usize {
    if len == 0 {
        return 1;
    }
    (len + page_size - 1) / page_size
}

/// The 1-based `page` slice of `items`. Callers are expected to pass a
/// page inside `[1, page_count]`; out-of-range pages come back empty
/// rather than clamped — clamping is the console's job, not this
/// function's.
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let start = match page.checked_sub(1) {
        Some(p) => p * page_size,
        None => return &[],
    };
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
