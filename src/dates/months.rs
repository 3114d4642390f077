use lazy_static::lazy_static;
use std::collections::HashMap;

/// Month spellings accepted after a day number (`1er juillet 2023`).
pub const DAY_MONTH_NAMES: &str = "janvier|Janvier|février|Février|mars|avril|mai|juin|Juin|\
juillet|août|septembre|octobre|Octobre|novembre|Novembre|décembre|JANVIER|FÉVRIER|FEVRIER|\
MARS|AVRIL|MAI|JUIN|JUILLET|AOÛT|SEPTEMBRE|OCTOBRE|NOVEMBRE|DÉCEMBRE|DECEMBRE";

/// Month spellings accepted in a bare month/year pair (`OCTOBRE 2022`).
pub const MONTH_YEAR_NAMES: &str = "janvier|février|mars|avril|mai|juin|juillet|août|\
septembre|octobre|Octobre|novembre|Novembre|décembre|JANVIER|FÉVRIER|MARS|AVRIL|MAI|JUIN|\
JUILLET|AOÛT|SEPTEMBRE|OCTOBRE|NOVEMBRE|DÉCEMBRE";

lazy_static! {
    /// Case-sensitive spelling → two-digit month code.
    static ref MONTH_CODES: HashMap<&'static str, &'static str> = {
        let table: [(&str, &str); 38] = [
            ("janvier", "01"), ("Janvier", "01"), ("JANVIER", "01"),
            ("février", "02"), ("Février", "02"), ("FÉVRIER", "02"), ("FEVRIER", "02"),
            ("mars", "03"), ("Mars", "03"), ("MARS", "03"),
            ("avril", "04"), ("Avril", "04"), ("AVRIL", "04"),
            ("mai", "05"), ("Mai", "05"), ("MAI", "05"),
            ("juin", "06"), ("Juin", "06"), ("JUIN", "06"),
            ("juillet", "07"), ("Juillet", "07"), ("JUILLET", "07"),
            ("août", "08"), ("Août", "08"), ("AOÛT", "08"),
            ("septembre", "09"), ("Septembre", "09"), ("SEPTEMBRE", "09"),
            ("octobre", "10"), ("Octobre", "10"), ("OCTOBRE", "10"),
            ("novembre", "11"), ("Novembre", "11"), ("NOVEMBRE", "11"),
            ("décembre", "12"), ("Décembre", "12"), ("DÉCEMBRE", "12"), ("DECEMBRE", "12"),
        ];
        table.into_iter().collect()
    };
}

/// Look up the two-digit code of a French month spelling.
pub fn month_code(name: &str) -> Option<&'static str> {
    MONTH_CODES.get(name).copied()
}

/// Resolve a month token, passing unknown tokens through unchanged.
pub fn resolve_month(token: &str) -> &str {
    month_code(token).unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_spelling_resolves() {
        for name in DAY_MONTH_NAMES.split('|').chain(MONTH_YEAR_NAMES.split('|')) {
            assert!(month_code(name).is_some(), "unmapped month spelling {}", name);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(month_code("juillet"), Some("07"));
        assert_eq!(month_code("AOÛT"), Some("08"));
        assert_eq!(month_code("jUILLET"), None);
    }

    #[test]
    fn test_unknown_month_passes_through() {
        assert_eq!(resolve_month("brumaire"), "brumaire");
        assert_eq!(resolve_month("DECEMBRE"), "12");
    }
}
