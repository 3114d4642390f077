use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Candidates must be strictly longer than this many characters.
pub const MIN_CANDIDATE_CHARS: usize = 5;
/// Candidates must be strictly shorter than this many characters.
pub const MAX_CANDIDATE_CHARS: usize = 20;
/// At most this many candidates are kept per document.
pub const MAX_CANDIDATES: usize = 15;
/// A UTF-8 non-breaking space that was decoded as Latin-1.
pub const MISENCODING_MARKER: &str = "\u{c3}\u{a0}";

lazy_static! {
    static ref DECIMAL_DIGIT: Regex = Regex::new(r"\d").expect("digit pattern");
    static ref QUOTED_ITEM: Regex =
        Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).expect("quoted item pattern");
}

fn is_plausible_date(span: &str) -> bool {
    let length = span.chars().count();
    length > MIN_CANDIDATE_CHARS
        && length < MAX_CANDIDATE_CHARS
        && !span.contains(MISENCODING_MARKER)
        && DECIMAL_DIGIT.is_match(span)
}

/// Reduce raw DATE spans to a short, ordered, duplicate-free shortlist.
pub fn filter_dates<I, S>(spans: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for span in spans {
        let span = span.as_ref();
        if !is_plausible_date(span) || !seen.insert(span.to_string()) {
            continue;
        }
        kept.push(span.to_string());
        if kept.len() == MAX_CANDIDATES {
            break;
        }
    }
    kept
}

/// Serialise a candidate list for storage in a table cell.
pub fn encode_candidate_list(candidates: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(candidates)
}

/// Read a candidate list back from a table cell.
///
/// Accepts JSON arrays as well as the `['a', "l'an"]` literal form. Anything
/// else reads as an empty list.
pub fn parse_candidate_list(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    if !cell.starts_with('[') {
        return Vec::new();
    }
    if let Ok(list) = serde_json::from_str::<Vec<String>>(cell) {
        return list;
    }

    QUOTED_ITEM
        .captures_iter(cell)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| unescape(m.as_str()))
        .collect()
}

fn unescape(item: &str) -> String {
    let mut out = String::with_capacity(item.len());
    let mut chars = item.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render candidates the way they are shown to the language model: `['a', 'b']`.
pub fn render_candidate_list(candidates: &[String]) -> String {
    let items: Vec<String> = candidates.iter().map(|c| quote_item(c)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_plausible_dates_in_order() {
        let spans = ["2 février 2024", "hier", "31 janvier 2024", "2 février 2024"];
        assert_eq!(
            filter_dates(spans),
            vec!["2 février 2024".to_string(), "31 janvier 2024".to_string()]
        );
    }

    #[test]
    fn test_filter_length_bounds_are_strict() {
        // 5 characters: too short; 6: kept.
        assert!(filter_dates(["2 mai"]).is_empty());
        assert_eq!(filter_dates(["12 mai"]), vec!["12 mai".to_string()]);
        // 20 characters: too long; 19: kept.
        let twenty = "le 1er septembre 202";
        let nineteen = "le 1er septembre 20";
        assert_eq!(twenty.chars().count(), 20);
        assert!(filter_dates([twenty]).is_empty());
        assert_eq!(filter_dates([nineteen]).len(), 1);
    }

    #[test]
    fn test_filter_counts_characters_not_bytes() {
        // Six characters, eight bytes.
        assert_eq!(filter_dates(["1 août"]), vec!["1 août".to_string()]);
    }

    #[test]
    fn test_filter_requires_a_digit() {
        assert!(filter_dates(["janvier dernier"]).is_empty());
        assert!(filter_dates(["Article \u{2163} du code", "\u{bd} janvier dernier"]).is_empty());
        assert_eq!(filter_dates(["le \u{663} mars"]), vec!["le \u{663} mars"]);
    }

    #[test]
    fn test_filter_drops_misencoded_spans() {
        assert!(filter_dates(["12\u{c3}\u{a0}mars 2023"]).is_empty());
    }

    #[test]
    fn test_filter_caps_list_length() {
        let spans: Vec<String> = (1..=20).map(|d| format!("{} mars 2024", d)).collect();
        let kept = filter_dates(&spans);
        assert_eq!(kept.len(), MAX_CANDIDATES);
        assert_eq!(kept[0], "1 mars 2024");
        assert_eq!(kept[14], "15 mars 2024");
    }

    #[test]
    fn test_parse_json_list() {
        let encoded = encode_candidate_list(&["1er juillet 2023".to_string()]).unwrap();
        assert_eq!(parse_candidate_list(&encoded), vec!["1er juillet 2023"]);
    }

    #[test]
    fn test_parse_literal_list() {
        assert_eq!(
            parse_candidate_list(r#"['31 janvier 2024', "l'an 2023", '02/02/2024']"#),
            vec!["31 janvier 2024", "l'an 2023", "02/02/2024"]
        );
        assert!(parse_candidate_list("[]").is_empty());
        assert!(parse_candidate_list("").is_empty());
        assert!(parse_candidate_list("nan").is_empty());
    }

    #[test]
    fn test_render_candidate_list() {
        let candidates = vec!["31 janvier 2024".to_string(), "l'an 2023".to_string()];
        assert_eq!(
            render_candidate_list(&candidates),
            r#"['31 janvier 2024', "l'an 2023"]"#
        );
        assert_eq!(render_candidate_list(&[]), "[]");
    }

    #[test]
    fn test_rendered_list_parses_back() {
        let candidates = vec!["le 5 mai 2023".to_string(), "l'an 2023".to_string()];
        assert_eq!(
            parse_candidate_list(&render_candidate_list(&candidates)),
            candidates
        );
    }
}
