//! Pure pagination math and page-window shaping helpers.

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = (start + safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Single navigation step toward page 1.
///
/// At the lower boundary this is a no-op unless `wrap` re-enters at the
/// last page.
pub fn step_back(page: usize, total_pages: usize, wrap: bool) -> usize {
    if page > 1 {
        page - 1
    } else if wrap {
        total_pages.max(1)
    } else {
        page
    }
}

/// Single navigation step toward the last page.
///
/// At the upper boundary this is a no-op unless `wrap` re-enters at page 1.
pub fn step_forward(page: usize, total_pages: usize, wrap: bool) -> usize {
    if page < total_pages {
        page + 1
    } else if wrap {
        1
    } else {
        page
    }
}

/// Bulk step of `skip` pages toward page 1.
///
/// With `wrap` the result is modular, so a skip larger than the page count
/// lands where that many single wrapped steps would. Without `wrap` the
/// step stops at page 1.
pub fn bulk_back(page: usize, total_pages: usize, wrap: bool, skip: usize) -> usize {
    let total = total_pages.max(1);
    if wrap {
        let offset = (page as i64 - 1 - skip as i64).rem_euclid(total as i64);
        offset as usize + 1
    } else {
        page.saturating_sub(skip).max(1)
    }
}

/// Bulk step of `skip` pages toward the last page.
///
/// Same boundary rule as [`bulk_back`], mirrored: modular with `wrap`,
/// clamped at the last page without.
pub fn bulk_forward(page: usize, total_pages: usize, wrap: bool, skip: usize) -> usize {
    let total = total_pages.max(1);
    if wrap {
        (page - 1 + skip) % total + 1
    } else {
        page.saturating_add(skip).min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn clamp_keeps_pages_in_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
    }

    #[test]
    fn page_window_covers_partial_last_page() {
        assert_eq!(page_window(25, 10, 1), (0, 10));
        assert_eq!(page_window(25, 10, 3), (20, 25));
    }

    #[test]
    fn single_steps_stop_at_boundaries_without_wrap() {
        assert_eq!(step_forward(3, 3, false), 3);
        assert_eq!(step_back(1, 3, false), 1);
        assert_eq!(step_forward(2, 3, false), 3);
        assert_eq!(step_back(2, 3, false), 1);
    }

    #[test]
    fn single_steps_wrap_when_enabled() {
        assert_eq!(step_forward(3, 3, true), 1);
        assert_eq!(step_back(1, 3, true), 3);
    }

    #[test]
    fn right_then_left_round_trips_off_boundary() {
        for page in 1..5 {
            let there = step_forward(page, 5, false);
            assert_eq!(step_back(there, 5, false), page);
        }
    }

    #[test]
    fn bulk_steps_clamp_without_wrap() {
        assert_eq!(bulk_forward(2, 10, false, 3), 5);
        assert_eq!(bulk_back(5, 10, false, 3), 2);
        assert_eq!(bulk_forward(8, 10, false, 5), 10);
        assert_eq!(bulk_back(3, 10, false, 5), 1);
    }

    #[test]
    fn bulk_steps_are_modular_with_wrap() {
        assert_eq!(bulk_forward(9, 10, true, 3), 2);
        assert_eq!(bulk_back(2, 10, true, 3), 9);
        // Skip larger than the page count lands where that many single
        // wrapped steps would.
        assert_eq!(bulk_forward(1, 3, true, 7), 2);
        assert_eq!(bulk_back(1, 3, true, 7), 3);
    }
}
