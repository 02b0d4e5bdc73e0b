//! Case-insensitive substring search over question text.

use crate::domain::model::Question;

/// Returns the questions whose text contains `term`, ignoring case, ordered by id.
pub fn search<'a, I>(term: &str, items: I) -> Vec<Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    let needle = term.to_lowercase();
    let mut matches: Vec<Question> = items
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    matches.sort_by_key(|q| q.id);
    matches
}

/// Escapes `LIKE` wildcards so `term` matches literally inside `'%' || $1 || '%'`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
