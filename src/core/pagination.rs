/// One page cut out of a longer sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page number after clamping, 1-based. Zero when there are no pages.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 0-based index of the first item of this page in the full sequence
    pub start_index: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Number of pages needed for `len` items
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Clamps a requested page number into `[1, total_pages]`
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    if total_pages == 0 {
        return 1;
    }
    requested.clamp(1, total_pages as i64) as usize
}

/// Slices out page `page_number`, clamping out-of-range requests
pub fn paginate<T: Clone>(items: &[T], page_number: i64, page_size: usize) -> Page<T> {
    let total = total_pages(items.len(), page_size);
    if total == 0 {
        return Page {
            items: Vec::new(),
            number: 0,
            total_pages: 0,
            total_items: items.len(),
            start_index: 0,
        };
    }

    let number = clamp_page(page_number, total);
    let start_index = (number - 1) * page_size;
    let end_index = (start_index + page_size).min(items.len());

    Page {
        items: items[start_index..end_index].to_vec(),
        number,
        total_pages: total,
        total_items: items.len(),
        start_index,
    }
}
