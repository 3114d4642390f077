/// Character cap for document text embedded in a selection prompt.
pub const PROMPT_TEXT_LIMIT: usize = 4000;

/// Character cap for the archived raw text column.
pub const ARCHIVE_TEXT_LIMIT: usize = 8000;

/// Collapse a document to a single quoted line.
///
/// Each line is stripped and its internal whitespace runs collapsed to one
/// space; empty lines are dropped and the rest joined with single spaces. The
/// result is wrapped in literal double quotes.
pub fn clean_text(text: &str) -> String {
    let cleaned_lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();

    format!("\"{}\"", cleaned_lines.join(" "))
}

/// Return at most `max_chars` characters of `text`, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Clean a document and cap it for use inside a prompt.
pub fn prompt_context(text: &str) -> String {
    truncate_chars(&clean_text(text), PROMPT_TEXT_LIMIT).to_string()
}

/// Split `text` into consecutive slices of at most `max_chars` characters.
pub fn chunk_chars(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = url::Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_lines_and_spaces() {
        let raw = "  COMMUNE DE   TRONGET \n\n\t EXTRAIT  du registre\r\n   \nfin ";
        assert_eq!(
            clean_text(raw),
            "\"COMMUNE DE TRONGET EXTRAIT du registre fin\""
        );
    }

    #[test]
    fn test_clean_text_empty_input() {
        assert_eq!(clean_text(""), "\"\"");
        assert_eq!(clean_text("\n  \n"), "\"\"");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("décembre", 3), "déc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_prompt_context_caps_length() {
        let long = "mot ".repeat(3000);
        let context = prompt_context(&long);
        assert_eq!(context.chars().count(), PROMPT_TEXT_LIMIT);
        assert!(context.starts_with("\"mot mot"));
    }

    #[test]
    fn test_chunk_chars() {
        assert_eq!(chunk_chars("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_chars("août", 2), vec!["ao", "ût"]);
        assert!(chunk_chars("", 4).is_empty());
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://mairie.fr/deliberation.pdf"));
        assert!(!is_valid_url("ftp://mairie.fr/file"));
        assert!(!is_valid_url("not a url"));
    }
}
