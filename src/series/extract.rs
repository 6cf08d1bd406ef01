//! CSV extraction and normalization.
//!
//! This module turns the published cumulative CSV (one date column, one count
//! column per country) into a clean `ObservationSeries` that is safe to fit.
//!
//! Design goals:
//! - **Explicit preconditions**: the forward-fill relies on strictly
//!   chronological, gap-free rows; violations are reported as typed errors
//!   instead of surfacing as lookup failures deep in the pipeline.
//! - **Row-level context** in every error (line number + cause)
//! - **Separation of concerns**: no fitting or plotting logic here

use std::collections::HashMap;
use std::io::Read;

use chrono::{Days, NaiveDate};
use csv::StringRecord;

/// Date-ordered cumulative counts for one (country, quantity) pair.
///
/// Invariant: dates are strictly increasing with no gaps; consecutive entries
/// are exactly one calendar day apart. Construction enforces this, so the
/// day index of entry `i` is always `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSeries {
    points: Vec<(NaiveDate, u64)>,
}

impl ObservationSeries {
    /// Build a series from pre-sorted points, validating contiguity.
    pub fn from_points(points: Vec<(NaiveDate, u64)>) -> Result<Self, ExtractError> {
        for pair in points.windows(2) {
            let (prev, next) = (pair[0].0, pair[1].0);
            if next <= prev {
                return Err(ExtractError::NotChronological { prev, next });
            }
            if next != prev + Days::new(1) {
                return Err(ExtractError::DateGap { prev, next });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[(NaiveDate, u64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|&(d, _)| d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|&(d, _)| d)
    }

    /// True when the series carries no information to fit (empty or all-zero
    /// counts, e.g. a country with no deaths reported yet).
    pub fn is_all_zero(&self) -> bool {
        self.points.iter().all(|&(_, count)| count == 0)
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|&(_, count)| count)
    }
}

/// Typed extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The requested country label is not in the header row.
    ColumnNotFound { column: String },
    /// An empty cell needs the previous day's value, but that day was never
    /// inserted (first kept row, or the file skipped it).
    MissingPriorValue { date: NaiveDate },
    /// A row's date is not strictly after the previous kept row's date.
    NotChronological { prev: NaiveDate, next: NaiveDate },
    /// A row's date jumps more than one calendar day ahead.
    DateGap { prev: NaiveDate, next: NaiveDate },
    /// A row could not be parsed (CSV error, bad date, bad count).
    BadRow { line: usize, message: String },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::ColumnNotFound { column } => {
                write!(f, "Country '{column}' not found in the header row.")
            }
            ExtractError::MissingPriorValue { date } => {
                write!(
                    f,
                    "Empty cell on {date}, but no value for the preceding day to carry forward."
                )
            }
            ExtractError::NotChronological { prev, next } => {
                write!(f, "Rows are not chronological: {next} follows {prev}.")
            }
            ExtractError::DateGap { prev, next } => {
                write!(f, "Missing row(s) between {prev} and {next}; the file must be gap-free.")
            }
            ExtractError::BadRow { line, message } => {
                write!(f, "Line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extract the observation series for one country column.
///
/// Rows dated before `start_date` are skipped. Empty cells carry forward the
/// previous day's count (the source publishes no value on days without an
/// update).
pub fn extract_series<R: Read>(
    reader: R,
    column: &str,
    start_date: NaiveDate,
) -> Result<ObservationSeries, ExtractError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ExtractError::BadRow {
            line: 1,
            message: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let header_map = build_header_map(&headers);
    let column_idx = *header_map
        .get(column)
        .ok_or_else(|| ExtractError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut points: Vec<(NaiveDate, u64)> = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;

        let record = result.map_err(|e| ExtractError::BadRow {
            line,
            message: format!("CSV parse error: {e}"),
        })?;

        let date = parse_row_date(&record, line)?;
        if date < start_date {
            continue;
        }

        if let Some(&(prev, _)) = points.last() {
            if date <= prev {
                return Err(ExtractError::NotChronological { prev, next: date });
            }
            if date != prev + Days::new(1) {
                return Err(ExtractError::DateGap { prev, next: date });
            }
        }

        let cell = record.get(column_idx).unwrap_or("");
        let count = if cell.is_empty() {
            forward_fill(&points, date)?
        } else {
            cell.parse::<u64>().map_err(|e| ExtractError::BadRow {
                line,
                message: format!("Invalid count '{cell}': {e}"),
            })?
        };

        points.push((date, count));
    }

    Ok(ObservationSeries { points })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, the date column (and any country
    // whose label lands first) would never match.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row_date(record: &StringRecord, line: usize) -> Result<NaiveDate, ExtractError> {
    let raw = record.get(0).unwrap_or("");
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ExtractError::BadRow {
        line,
        message: format!("Invalid date '{raw}': {e}"),
    })
}

/// Carry forward the count recorded for the day before `date`.
///
/// The chronology checks above guarantee the last inserted point is exactly
/// one day earlier whenever any point exists; the only way this fails is an
/// empty cell on the first kept row.
fn forward_fill(points: &[(NaiveDate, u64)], date: NaiveDate) -> Result<u64, ExtractError> {
    match points.last() {
        Some(&(prev, count)) if prev + Days::new(1) == date => Ok(count),
        _ => Err(ExtractError::MissingPriorValue { date }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const CSV: &str = "\
date,Germany,Italy
2020-02-28,10,200
2020-02-29,12,300
2020-03-01,100,400
2020-03-02,,500
2020-03-03,150,600
";

    #[test]
    fn truncates_to_start_date_in_order() {
        let series = extract_series(CSV.as_bytes(), "Germany", d(2020, 3, 1)).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(d(2020, 3, 1)));
        assert_eq!(series.last_date(), Some(d(2020, 3, 3)));
        for pair in series.points().windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn forward_fills_empty_cells() {
        let series = extract_series(CSV.as_bytes(), "Germany", d(2020, 3, 1)).unwrap();
        assert_eq!(
            series.points(),
            &[
                (d(2020, 3, 1), 100),
                (d(2020, 3, 2), 100),
                (d(2020, 3, 3), 150),
            ]
        );
    }

    #[test]
    fn selects_the_requested_column() {
        let series = extract_series(CSV.as_bytes(), "Italy", d(2020, 3, 1)).unwrap();
        assert_eq!(series.counts().collect::<Vec<_>>(), vec![400, 500, 600]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = extract_series(CSV.as_bytes(), "France", d(2020, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            ExtractError::ColumnNotFound {
                column: "France".to_string()
            }
        );
        assert!(err.to_string().contains("France"));
    }

    #[test]
    fn empty_cell_on_first_kept_row_is_an_error() {
        // Start date lands exactly on the empty cell; there is no prior value.
        let err = extract_series(CSV.as_bytes(), "Germany", d(2020, 3, 2)).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingPriorValue {
                date: d(2020, 3, 2)
            }
        );
    }

    #[test]
    fn non_chronological_rows_are_an_error() {
        let csv = "date,Germany\n2020-03-02,5\n2020-03-01,6\n";
        let err = extract_series(csv.as_bytes(), "Germany", d(2020, 3, 1)).unwrap_err();
        assert!(matches!(err, ExtractError::NotChronological { .. }));
    }

    #[test]
    fn skipped_days_are_an_error() {
        let csv = "date,Germany\n2020-03-01,5\n2020-03-03,6\n";
        let err = extract_series(csv.as_bytes(), "Germany", d(2020, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            ExtractError::DateGap {
                prev: d(2020, 3, 1),
                next: d(2020, 3, 3)
            }
        );
    }

    #[test]
    fn bad_count_reports_the_line() {
        let csv = "date,Germany\n2020-03-01,abc\n";
        let err = extract_series(csv.as_bytes(), "Germany", d(2020, 3, 1)).unwrap_err();
        match err {
            ExtractError::BadRow { line, .. } => assert_eq!(line, 2),
            other => panic!("expected BadRow, got {other:?}"),
        }
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let csv = "\u{feff}date,Germany\n2020-03-01,5\n";
        let series = extract_series(csv.as_bytes(), "Germany", d(2020, 3, 1)).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn all_zero_detection() {
        let zeros =
            ObservationSeries::from_points(vec![(d(2020, 3, 1), 0), (d(2020, 3, 2), 0)]).unwrap();
        assert!(zeros.is_all_zero());

        let empty = ObservationSeries::from_points(vec![]).unwrap();
        assert!(empty.is_all_zero());

        let series = extract_series(CSV.as_bytes(), "Germany", d(2020, 3, 1)).unwrap();
        assert!(!series.is_all_zero());
    }

    #[test]
    fn from_points_rejects_gaps() {
        let err = ObservationSeries::from_points(vec![(d(2020, 3, 1), 1), (d(2020, 3, 4), 2)])
            .unwrap_err();
        assert!(matches!(err, ExtractError::DateGap { .. }));
    }
}
