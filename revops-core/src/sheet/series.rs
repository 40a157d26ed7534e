//! Multi-day series: the full historical range of the sheet, in column
//! order.

use chrono::NaiveDate;

use super::SheetGrid;
use super::extract::build_record;
use super::locate;
use crate::error::{RevopsError, RevopsResult};
use crate::report::DailyRecord;

/// Records for every column in the inclusive range `[first, last]`.
///
/// Columns that yield no record (blank or unparseable date label) are
/// skipped. Output order is column order: no re-sorting, no dedup —
/// duplicate date labels both appear.
pub fn build_series(grid: &SheetGrid, first: usize, last: usize) -> Vec<DailyRecord> {
    (first..=last).filter_map(|col| build_record(grid, col)).collect()
}

/// The full series from the first dated column up to and including the last
/// column dated on or before `target`.
///
/// Having no dated column at all, or none on or before the target, is a
/// structural failure.
pub fn series_until(grid: &SheetGrid, target: NaiveDate) -> RevopsResult<Vec<DailyRecord>> {
    let first = locate::first_dated_column(grid).ok_or(RevopsError::NoDataColumns)?;
    let last = locate::last_column_on_or_before(grid, target).ok_or(RevopsError::NoDataColumns)?;

    log::info!("Extracting sheet columns {} through {}", first, last);
    Ok(build_series(grid, first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn grid_with_labels(labels: &[&str]) -> SheetGrid {
        let cols = labels.len();
        let mut rows = vec![vec![String::new(); cols]; 25];
        rows[1] = labels.iter().map(|s| s.to_string()).collect();
        // Give every column a lead count equal to its index, to check order.
        for col in 0..cols {
            rows[20][col] = col.to_string();
        }
        SheetGrid::new(rows)
    }

    #[test]
    fn test_series_skips_blank_columns_and_keeps_order() {
        let grid = grid_with_labels(&[
            "x",
            "x",
            "01/01/2026",
            "02/01/2026",
            "",
            "03/01/2026",
        ]);

        let series = build_series(&grid, 2, 5);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, date(1));
        assert_eq!(series[1].date, date(2));
        assert_eq!(series[2].date, date(3));
        assert_eq!(series[2].leads_created, 5);
    }

    #[test]
    fn test_series_keeps_duplicate_dates() {
        let grid = grid_with_labels(&["01/01/2026", "01/01/2026"]);

        let series = build_series(&grid, 0, 1);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, series[1].date);
        assert_eq!(series[0].leads_created, 0);
        assert_eq!(series[1].leads_created, 1);
    }

    #[test]
    fn test_series_until_spans_first_dated_to_target() {
        let grid = grid_with_labels(&[
            "",
            "Totales",
            "01/01/2026",
            "02/01/2026",
            "03/01/2026",
            "04/01/2026",
        ]);

        let series = series_until(&grid, date(3)).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap().date, date(3));
    }

    #[test]
    fn test_series_until_without_dated_columns_fails() {
        let grid = grid_with_labels(&["", "Totales"]);

        assert!(matches!(
            series_until(&grid, date(3)),
            Err(RevopsError::NoDataColumns)
        ));
    }
}
