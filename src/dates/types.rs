use std::fmt;

/// A fully specified calendar date, always rendered as `DD/MM/YYYY`.
///
/// Only constructible with every component in range, so a partially filled
/// date cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalDate {
    day: u8,
    month: u8,
    year: u16,
}

impl CanonicalDate {
    /// Build a date from its parts; `None` unless day is 1-31, month 1-12 and
    /// year has four digits.
    pub fn new(day: u32, month: u32, year: u32) -> Option<Self> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(1000..=9999).contains(&year)
        {
            return None;
        }
        Some(CanonicalDate {
            day: day as u8,
            month: month as u8,
            year: year as u16,
        })
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Outcome of normalising a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Date(CanonicalDate),
    NoMatch,
}

impl ParsedDate {
    pub fn date(self) -> Option<CanonicalDate> {
        match self {
            ParsedDate::Date(date) => Some(date),
            ParsedDate::NoMatch => None,
        }
    }

    /// The `DD/MM/YYYY` form, or `None` for `NoMatch`.
    pub fn canonical(&self) -> Option<String> {
        self.date().map(|date| date.to_string())
    }
}

/// The date grammars, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateGrammar {
    /// `1er juillet 2023`, `10 FÉVRIER 2024`
    DayMonthName,
    /// `02/02/2023`, `2 / 2 / 20`
    DayMonthYearSlash,
    /// `02-02-2023`, `27-02/20`
    DayMonthYearMixed,
    /// `2023-10-01`, `2023/10/1`
    YearMonthDay,
    /// `OCTOBRE 2022`
    MonthNameYear,
}

impl DateGrammar {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateGrammar::DayMonthName => "day_month_name",
            DateGrammar::DayMonthYearSlash => "day_month_year_slash",
            DateGrammar::DayMonthYearMixed => "day_month_year_mixed",
            DateGrammar::YearMonthDay => "year_month_day",
            DateGrammar::MonthNameYear => "month_name_year",
        }
    }
}

impl fmt::Display for DateGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_date_zero_pads() {
        let date = CanonicalDate::new(1, 7, 2023).unwrap();
        assert_eq!(date.to_string(), "01/07/2023");
    }

    #[test]
    fn test_canonical_date_rejects_out_of_range() {
        assert!(CanonicalDate::new(0, 1, 2023).is_none());
        assert!(CanonicalDate::new(32, 1, 2023).is_none());
        assert!(CanonicalDate::new(1, 13, 2023).is_none());
        assert!(CanonicalDate::new(1, 1, 202).is_none());
    }

    #[test]
    fn test_parsed_date_canonical() {
        let parsed = ParsedDate::Date(CanonicalDate::new(31, 1, 2024).unwrap());
        assert_eq!(parsed.canonical().as_deref(), Some("31/01/2024"));
        assert!(ParsedDate::NoMatch.canonical().is_none());
    }
}
