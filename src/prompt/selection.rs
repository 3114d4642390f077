use crate::dates::render_candidate_list;
use crate::prompt::exemplars::{Exemplar, EXEMPLARS};

/// Output constraints appended after the task.
pub const SELECTION_RULES: &str = r#"Rules:
1. Output exactly one date
2. Must be a date from the Date List
3. No explanations, no prefix, Only return result after assistant!
4. Keep original date format"#;

fn render_exemplar(number: usize, exemplar: &Exemplar) -> String {
    let candidates: Vec<String> = exemplar.candidates.iter().map(|c| c.to_string()).collect();
    format!(
        r#"Example {number}:
[Date List]
{candidates}
[Reference Text]
"{text}"
Answer: {answer}
"#,
        number = number,
        candidates = render_candidate_list(&candidates),
        text = exemplar.reference_text,
        answer = exemplar.answer,
    )
}

/// Generate the prompt asking the model to pick the publication date of a
/// document out of its candidate list.
///
/// `context` is expected to be cleaned and length-capped already.
pub fn date_selection_prompt(candidates: &[String], context: &str) -> String {
    let examples: Vec<String> = EXEMPLARS
        .iter()
        .enumerate()
        .map(|(idx, exemplar)| render_exemplar(idx + 1, exemplar))
        .collect();

    format!(
        r#"Select and Return ONLY EXACTLY ONE the most accurate publication date from the given date list and reference text, THE DATE YOU CHOOSE SHOULD APPEAR IN THE Date List:

{count} examples:

{examples}
Current Task:
[Date List]
{candidates}
[Reference Text]
{context}

{rules}
"#,
        count = EXEMPLARS.len(),
        examples = examples.join("\n"),
        candidates = render_candidate_list(candidates),
        context = context,
        rules = SELECTION_RULES,
    )
}
