use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use super::months::{resolve_month, DAY_MONTH_NAMES, MONTH_YEAR_NAMES};
use super::types::{CanonicalDate, DateGrammar, ParsedDate};
use super::TARGET_DATES;

/// Components captured by a grammar, before any conversion.
struct DateParts<'t> {
    day: Option<&'t str>,
    month: &'t str,
    year: Option<&'t str>,
}

/// A grammar paired with the function that reads its capture groups.
struct DateRule {
    grammar: DateGrammar,
    pattern: Regex,
    parts: for<'t> fn(&Captures<'t>) -> Option<DateParts<'t>>,
}

fn day_month_year<'t>(caps: &Captures<'t>) -> Option<DateParts<'t>> {
    Some(DateParts {
        day: Some(caps.get(1)?.as_str()),
        month: caps.get(2)?.as_str(),
        year: caps.get(3).map(|m| m.as_str()),
    })
}

fn year_month_day<'t>(caps: &Captures<'t>) -> Option<DateParts<'t>> {
    Some(DateParts {
        day: Some(caps.get(3)?.as_str()),
        month: caps.get(2)?.as_str(),
        year: Some(caps.get(1)?.as_str()),
    })
}

fn month_year<'t>(caps: &Captures<'t>) -> Option<DateParts<'t>> {
    Some(DateParts {
        day: None,
        month: caps.get(1)?.as_str(),
        year: Some(caps.get(2)?.as_str()),
    })
}

fn rule(
    grammar: DateGrammar,
    pattern: &str,
    parts: for<'t> fn(&Captures<'t>) -> Option<DateParts<'t>>,
) -> DateRule {
    DateRule {
        grammar,
        pattern: Regex::new(pattern).expect("date grammar must compile"),
        parts,
    }
}

lazy_static! {
    // Order matters: the first grammar with any match decides the result.
    static ref RULES: Vec<DateRule> = vec![
        rule(
            DateGrammar::DayMonthName,
            &format!(r"\b(\d{{1,2}})(?:\s*er)?\s*({})\s*(\d{{4}})?\b", DAY_MONTH_NAMES),
            day_month_year,
        ),
        rule(
            DateGrammar::DayMonthYearSlash,
            r"\b(\d{1,2})\s*/\s*(\d{1,2})\s*/\s*(\d{2,4})\b",
            day_month_year,
        ),
        rule(
            DateGrammar::DayMonthYearMixed,
            r"\b(\d{1,2})\s*[-/]\s*(\d{1,2})\s*[-/]\s*(\d{2}|\d{4})\b",
            day_month_year,
        ),
        rule(
            DateGrammar::YearMonthDay,
            r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b",
            year_month_day,
        ),
        rule(
            DateGrammar::MonthNameYear,
            &format!(r"\b({})\s+(\d{{4}})\b", MONTH_YEAR_NAMES),
            month_year,
        ),
    ];
}

/// A date-like substring located by one of the grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan<'t> {
    pub grammar: DateGrammar,
    pub text: &'t str,
    pub start: usize,
    pub end: usize,
}

/// Parses free-form French date strings into [`CanonicalDate`]s.
///
/// Grammars are evaluated in a fixed priority order and the first one that
/// matches anywhere in the input decides the outcome, using its leftmost match.
/// A grammar that matches but yields an unusable day, month or year produces
/// [`ParsedDate::NoMatch`]; later grammars are not consulted.
#[derive(Clone, Copy)]
pub struct DateNormalizer {
    rules: &'static [DateRule],
}

impl Default for DateNormalizer {
    fn default() -> Self {
        DateNormalizer {
            rules: RULES.as_slice(),
        }
    }
}

impl DateNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the date substring the normaliser would use, without converting it.
    pub fn extract_span<'t>(&self, text: &'t str) -> Option<DateSpan<'t>> {
        self.rules.iter().find_map(|rule| {
            rule.pattern.find(text).map(|m| DateSpan {
                grammar: rule.grammar,
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
        })
    }

    pub fn normalize(&self, text: &str) -> ParsedDate {
        for rule in self.rules {
            if let Some(caps) = rule.pattern.captures(text) {
                let parsed = (rule.parts)(&caps)
                    .map(assemble)
                    .unwrap_or(ParsedDate::NoMatch);
                debug!(
                    target: TARGET_DATES,
                    "'{}' matched {} -> {:?}", text, rule.grammar, parsed
                );
                return parsed;
            }
        }
        ParsedDate::NoMatch
    }

    /// `DD/MM/YYYY` for `text`, or `None` when no date could be read.
    pub fn canonicalize(&self, text: &str) -> Option<String> {
        self.normalize(text).canonical()
    }

    /// Every non-overlapping span any grammar matches, in text order.
    ///
    /// Where spans overlap, the one starting first wins, then the longest.
    pub fn find_spans<'t>(&self, text: &'t str) -> Vec<DateSpan<'t>> {
        let mut spans: Vec<DateSpan<'t>> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.pattern.find_iter(text).map(move |m| DateSpan {
                    grammar: rule.grammar,
                    text: m.as_str(),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();
        spans.sort_by_key(|span| (span.start, std::cmp::Reverse(span.end)));

        let mut kept = Vec::with_capacity(spans.len());
        let mut last_end = 0;
        for span in spans {
            if span.start >= last_end {
                last_end = span.end;
                kept.push(span);
            }
        }
        kept
    }
}

fn assemble(parts: DateParts<'_>) -> ParsedDate {
    let day = match parts.day {
        Some(token) => match token.parse::<u32>() {
            Ok(day) => day,
            Err(_) => return ParsedDate::NoMatch,
        },
        None => 1,
    };

    let month = match resolve_month(parts.month).parse::<u32>() {
        Ok(month) => month,
        Err(_) => return ParsedDate::NoMatch,
    };

    let year = match parts.year {
        Some(year) if year.chars().count() == 2 => format!("20{}", year),
        Some(year) => year.to_string(),
        None => return ParsedDate::NoMatch,
    };
    if year.chars().count() != 4 {
        return ParsedDate::NoMatch;
    }
    let year = match year.parse::<u32>() {
        Ok(year) => year,
        Err(_) => return ParsedDate::NoMatch,
    };

    CanonicalDate::new(day, month, year)
        .map(ParsedDate::Date)
        .unwrap_or(ParsedDate::NoMatch)
}
