//! Built-in country configuration.
//!
//! Cumulative-count growth can change regime significantly over time; the fit
//! start date pins the window to the current growth phase. To pick one for a
//! new country, start early and move the date forward until the model tracks
//! the recent observations. Adding a country means adding one record here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One analyzed country: fit window start and population for normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConfig {
    /// Column label in the source CSV (exact match).
    pub name: String,
    /// First date included in the fit window.
    pub start_date: NaiveDate,
    /// Population size, used to normalize counts to a rate.
    pub population: f64,
}

impl CountryConfig {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, population: f64) -> Self {
        Self {
            name: name.into(),
            start_date,
            population,
        }
    }
}

/// The built-in country table.
pub fn builtin_countries() -> Vec<CountryConfig> {
    let entries: [(&str, (i32, u32, u32), f64); 5] = [
        ("Germany", (2020, 3, 2), 8e7),
        ("United States", (2020, 3, 3), 3.25e8),
        ("Switzerland", (2020, 3, 7), 8.5e6),
        ("Italy", (2020, 3, 1), 6e7),
        ("South Africa", (2020, 3, 10), 6e7),
    ];

    entries
        .into_iter()
        .filter_map(|(name, (y, m, d), population)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|start_date| CountryConfig::new(name, start_date, population))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_complete() {
        let countries = builtin_countries();
        assert_eq!(countries.len(), 5);

        let germany = countries.iter().find(|c| c.name == "Germany").unwrap();
        assert_eq!(
            germany.start_date,
            NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()
        );
        assert!((germany.population - 8e7).abs() < 1.0);
    }

    #[test]
    fn builtin_table_has_no_duplicates() {
        let countries = builtin_countries();
        for (i, a) in countries.iter().enumerate() {
            for b in &countries[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
