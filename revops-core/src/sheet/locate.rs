//! Column location: mapping calendar dates to sheet column indices.
//!
//! Date labels are assumed monotonically non-decreasing left-to-right. That
//! is a precondition of the source sheet, not verified here.

use chrono::NaiveDate;

use super::SheetGrid;
use super::cell::parse_date;

/// Column whose date label equals `target`, if any. Unparseable or empty
/// labels are skipped, not errors.
pub fn column_for_date(grid: &SheetGrid, target: NaiveDate) -> Option<usize> {
    (0..grid.columns()).find(|&col| parse_date(grid.date_label(col)) == Some(target))
}

/// Rightmost column with a non-empty date label, regardless of whether it
/// parses as a date. The caller must re-validate parseability before
/// extracting from it.
pub fn last_populated_column(grid: &SheetGrid) -> Option<usize> {
    (0..grid.columns()).rev().find(|&col| !grid.date_label(col).is_empty())
}

/// Last column whose parsed date is on or before `target`, scanning
/// left-to-right and stopping as soon as a parsed date exceeds the target.
pub fn last_column_on_or_before(grid: &SheetGrid, target: NaiveDate) -> Option<usize> {
    let mut last_valid = None;

    for col in 0..grid.columns() {
        let Some(date) = parse_date(grid.date_label(col)) else {
            continue;
        };

        if date <= target {
            last_valid = Some(col);
        } else {
            break;
        }
    }

    last_valid
}

/// Leftmost column whose date label parses as a valid date; where the
/// historical series begins.
pub fn first_dated_column(grid: &SheetGrid) -> Option<usize> {
    (0..grid.columns()).find(|&col| parse_date(grid.date_label(col)).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_labels(labels: &[&str]) -> SheetGrid {
        SheetGrid::new(vec![
            vec![],
            labels.iter().map(|s| s.to_string()).collect(),
        ])
    }

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_lookup_skips_blank_and_bad_labels() {
        let grid = grid_with_labels(&["", "01/01/2026", "02/01/2026", "bad", "03/01/2026"]);

        assert_eq!(column_for_date(&grid, date(2, 1, 2026)), Some(2));
        assert_eq!(column_for_date(&grid, date(3, 1, 2026)), Some(4));
        assert_eq!(column_for_date(&grid, date(4, 1, 2026)), None);
    }

    #[test]
    fn test_last_populated_column_accepts_unparseable_labels() {
        let grid = grid_with_labels(&["", "01/01/2026", "02/01/2026", "bad", "03/01/2026"]);
        assert_eq!(last_populated_column(&grid), Some(4));

        // Rightmost non-empty label wins even when it is not a date.
        let grid = grid_with_labels(&["01/01/2026", "notas", ""]);
        assert_eq!(last_populated_column(&grid), Some(1));

        let grid = grid_with_labels(&["", "", ""]);
        assert_eq!(last_populated_column(&grid), None);
    }

    #[test]
    fn test_up_to_lookup_tracks_last_date_at_or_before_target() {
        let grid = grid_with_labels(&["", "01/01/2026", "02/01/2026", "bad", "03/01/2026"]);

        assert_eq!(last_column_on_or_before(&grid, date(2, 1, 2026)), Some(2));
        assert_eq!(last_column_on_or_before(&grid, date(10, 1, 2026)), Some(4));
        assert_eq!(last_column_on_or_before(&grid, date(31, 12, 2025)), None);
    }

    #[test]
    fn test_up_to_lookup_stops_at_first_future_column() {
        // Labels after the first future date are never scanned; monotonicity
        // is a precondition.
        let grid = grid_with_labels(&["01/01/2026", "05/01/2026", "02/01/2026"]);

        assert_eq!(last_column_on_or_before(&grid, date(2, 1, 2026)), Some(0));
    }

    #[test]
    fn test_first_dated_column_skips_headers() {
        let grid = grid_with_labels(&["", "Totales", "01/01/2026", "02/01/2026"]);

        assert_eq!(first_dated_column(&grid), Some(2));
        assert_eq!(first_dated_column(&grid_with_labels(&["", "x"])), None);
    }
}
