// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolution of ordinal dates.
//!
//! The date of flight is encoded as the day of the year and the date of issue
//! adds only the last digit of the year. The calendar date is inferred from a
//! known flight date, the date of issue or the current date.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::Error;

pub(crate) const DATE_FORMAT: &str = "%a %-d %b %Y";

/// The search windows used if no anchor is known.
///
/// The defaults assume that a boarding pass is at most two years old and
/// issued at most a year ahead.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateWindows {
    /// Years before today to search for the date of flight.
    pub past_years: u32,
    /// Years after today to search for the date of flight.
    pub future_years: u32,
    /// Years before the anchor to search for the date of issue.
    pub issue_years: u32,
    /// Years before today to search for a 366th day of a year.
    pub leap_day_years: u32,
}

impl Default for DateWindows {
    fn default() -> Self {
        Self {
            past_years: 2,
            future_years: 1,
            issue_years: 10,
            // 2100 is no leap year
            leap_day_years: 8,
        }
    }
}

/// The calendar date(s) matching an ordinal date.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OrdinalMatch {
    /// A single date was inferred.
    Exact(NaiveDate),
    /// All dates within the search window, oldest first.
    Candidates(Vec<NaiveDate>),
}

impl OrdinalMatch {
    pub fn dates(&self) -> &[NaiveDate] {
        match self {
            Self::Exact(date) => std::slice::from_ref(date),
            Self::Candidates(dates) => dates,
        }
    }
}

impl fmt::Display for OrdinalMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, date) in self.dates().iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", date.format(DATE_FORMAT))?;
        }
        Ok(())
    }
}

/// Parses a three digit day of the year.
///
/// # Errors
///
/// Returns an error if the bytes are no three digits or the day is not in the
/// range from 1 to 366.
pub fn parse_day_of_year(bytes: &[u8]) -> Result<u16, Error> {
    if bytes.len() != 3 {
        return Err(Error::InvalidFieldLength {
            expected: 3,
            actual: bytes.len(),
        });
    }

    let day = parse_numeric!(3, u16, bytes)?;

    if (1..=366).contains(&day) {
        Ok(day)
    } else {
        Err(Error::DayOutOfRange { day })
    }
}

/// Parses the last digit of the year followed by the day of the year.
///
/// # Errors
///
/// Returns an error if the bytes are no four digits or the day is out of range.
pub fn parse_issue_date(bytes: &[u8]) -> Result<(u8, u16), Error> {
    if bytes.len() != 4 {
        return Err(Error::InvalidFieldLength {
            expected: 4,
            actual: bytes.len(),
        });
    }

    let year = parse_numeric!(1, u8, &bytes[..1])?;
    let day = parse_day_of_year(&bytes[1..])?;
    Ok((year, day))
}

/// Infers calendar dates relative to today.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct OrdinalResolver {
    today: NaiveDate,
    windows: DateWindows,
}

impl OrdinalResolver {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            windows: DateWindows::default(),
        }
    }

    pub fn with_windows(mut self, windows: DateWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Resolves the date of flight from its `day` of the year.
    ///
    /// If the real flight date is known as `anchor`, the day is searched in
    /// the anchor's year. Otherwise the first match within a year of the
    /// `issue` date is returned. Without either, all matches around today are
    /// returned except for the 366th day, which resolves to the most recent
    /// leap year's last day.
    pub fn resolve_flight_date(
        &self,
        day: u16,
        anchor: Option<NaiveDate>,
        issue: Option<NaiveDate>,
    ) -> Option<OrdinalMatch> {
        if !(1..=366).contains(&day) {
            return None;
        }

        if let Some(anchor) = anchor {
            return from_yo(anchor.year(), day).map(OrdinalMatch::Exact);
        }

        if let Some(issue) = issue {
            let end = issue.checked_add_days(Days::new(365))?;
            return (issue.year()..=end.year())
                .filter_map(|year| from_yo(year, day))
                .find(|date| (issue..=end).contains(date))
                .map(OrdinalMatch::Exact);
        }

        if day == 366 {
            let start = years_before(self.today, self.windows.leap_day_years)?;
            return (start.year()..=self.today.year())
                .rev()
                .filter_map(|year| from_yo(year, day))
                .find(|date| (start..=self.today).contains(date))
                .map(OrdinalMatch::Exact);
        }

        let start = years_before(self.today, self.windows.past_years)?;
        let end = self
            .today
            .checked_add_months(Months::new(12 * self.windows.future_years))?;

        let candidates: Vec<NaiveDate> = (start.year()..=end.year())
            .filter_map(|year| from_yo(year, day))
            .filter(|date| (start..=end).contains(date))
            .collect();

        (!candidates.is_empty()).then_some(OrdinalMatch::Candidates(candidates))
    }

    /// Resolves the date of issue from the last digit of its year and the
    /// `day` of the year.
    ///
    /// The most recent match within the years before the `anchor` (or today)
    /// is returned.
    pub fn resolve_issue_date(
        &self,
        year_digit: u8,
        day: u16,
        anchor: Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        if year_digit > 9 || !(1..=366).contains(&day) {
            return None;
        }

        let reference = anchor.unwrap_or(self.today);
        let start = years_before(reference, self.windows.issue_years)?;
        let decade = reference.year() - reference.year().rem_euclid(10);
        let digit = i32::from(year_digit);

        [decade + digit, decade - 10 + digit]
            .into_iter()
            .filter_map(|year| from_yo(year, day))
            .filter(|date| (start..=reference).contains(date))
            .max()
    }
}

fn from_yo(year: i32, day: u16) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, u32::from(day))
}

fn years_before(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(12 * years))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date should be valid")
    }

    fn resolver() -> OrdinalResolver {
        OrdinalResolver::new(date(2026, 10, 19))
    }

    #[test]
    fn parses_day_of_year() {
        assert_eq!(parse_day_of_year(b"346"), Ok(346));
        assert_eq!(parse_day_of_year(b"001"), Ok(1));
        assert_eq!(
            parse_day_of_year(b"367"),
            Err(Error::DayOutOfRange { day: 367 })
        );
        assert_eq!(
            parse_day_of_year(b"000"),
            Err(Error::DayOutOfRange { day: 0 })
        );
        assert_eq!(
            parse_day_of_year(b"34 "),
            Err(Error::NotANumber {
                bytes: b"34 ".to_vec()
            })
        );
    }

    #[test]
    fn parses_issue_date() {
        assert_eq!(parse_issue_date(b"5346"), Ok((5, 346)));
        assert!(parse_issue_date(b"    ").is_err());
        assert!(parse_issue_date(b"534").is_err());
    }

    #[test]
    fn resolves_within_anchor_year() {
        let r = resolver();
        assert_eq!(
            r.resolve_flight_date(346, Some(date(2026, 3, 1)), None),
            Some(OrdinalMatch::Exact(date(2026, 12, 12)))
        );
        assert_eq!(
            r.resolve_flight_date(346, Some(date(2024, 3, 1)), None),
            Some(OrdinalMatch::Exact(date(2024, 12, 11)))
        );
        assert_eq!(
            r.resolve_flight_date(366, Some(date(2025, 6, 1)), None),
            None
        );
    }

    #[test]
    fn resolves_first_match_after_issue() {
        let r = resolver();
        assert_eq!(
            r.resolve_flight_date(10, None, Some(date(2025, 12, 20))),
            Some(OrdinalMatch::Exact(date(2026, 1, 10)))
        );
        assert_eq!(
            r.resolve_flight_date(354, None, Some(date(2025, 12, 20))),
            Some(OrdinalMatch::Exact(date(2025, 12, 20)))
        );
    }

    #[test]
    fn resolves_all_candidates_around_today() {
        let r = resolver();
        assert_eq!(
            r.resolve_flight_date(346, None, None),
            Some(OrdinalMatch::Candidates(vec![
                date(2024, 12, 11),
                date(2025, 12, 12),
                date(2026, 12, 12),
            ]))
        );
        assert_eq!(
            r.resolve_flight_date(100, None, None)
                .map(|m| m.dates().to_vec()),
            Some(vec![date(2025, 4, 10), date(2026, 4, 10), date(2027, 4, 10)])
        );
    }

    #[test]
    fn resolves_leap_day_to_most_recent() {
        let r = resolver();
        assert_eq!(
            r.resolve_flight_date(366, None, None),
            Some(OrdinalMatch::Exact(date(2024, 12, 31)))
        );

        let r = OrdinalResolver::new(date(2024, 12, 31));
        assert_eq!(
            r.resolve_flight_date(366, None, None),
            Some(OrdinalMatch::Exact(date(2024, 12, 31)))
        );

        let r = OrdinalResolver::new(date(2024, 12, 30));
        assert_eq!(
            r.resolve_flight_date(366, None, None),
            Some(OrdinalMatch::Exact(date(2020, 12, 31)))
        );
    }

    #[test]
    fn rejects_days_out_of_range() {
        let r = resolver();
        assert_eq!(r.resolve_flight_date(0, None, None), None);
        assert_eq!(r.resolve_flight_date(367, None, None), None);
        assert_eq!(r.resolve_issue_date(6, 367, None), None);
        assert_eq!(r.resolve_issue_date(10, 1, None), None);
    }

    #[test]
    fn resolves_issue_date_in_recent_decades() {
        let r = resolver();
        assert_eq!(r.resolve_issue_date(6, 290, None), Some(date(2026, 10, 17)));
        assert_eq!(r.resolve_issue_date(5, 1, None), Some(date(2025, 1, 1)));
        assert_eq!(r.resolve_issue_date(6, 300, None), Some(date(2016, 10, 26)));
        assert_eq!(
            r.resolve_issue_date(5, 346, Some(date(2025, 12, 20))),
            Some(date(2025, 12, 12))
        );
    }

    #[test]
    fn custom_windows_narrow_the_search() {
        let r = resolver().with_windows(DateWindows {
            past_years: 0,
            future_years: 0,
            ..DateWindows::default()
        });
        assert_eq!(r.resolve_flight_date(346, None, None), None);
        assert_eq!(
            r.resolve_flight_date(292, None, None),
            Some(OrdinalMatch::Candidates(vec![date(2026, 10, 19)]))
        );
    }

    #[test]
    fn displays_dates() {
        assert_eq!(
            OrdinalMatch::Exact(date(2026, 12, 12)).to_string(),
            "Sat 12 Dec 2026"
        );
        assert_eq!(
            OrdinalMatch::Candidates(vec![date(2025, 12, 12), date(2026, 12, 12)]).to_string(),
            "Fri 12 Dec 2025 or Sat 12 Dec 2026"
        );
    }
}
