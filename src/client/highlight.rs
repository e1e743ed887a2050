//! Search-term highlighting.
//!
//! The term is treated as a literal: it passes through `regex::escape`
//! before compilation, so user input like `a.b*` can neither panic the
//! build nor act as a wildcard.

use regex::RegexBuilder;

/// Wrap every case-insensitive occurrence of `term` in `open`/`close`
/// markers. Non-matching text is returned byte-identical; an empty or
/// whitespace-only term returns the content unchanged.
pub fn highlight(content: &str, term: &str, open: &str, close: &str) -> String {
    if term.trim().is_empty() {
        return content.to_string();
    }

    let re = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .expect("escaped term is a valid pattern");

    re.replace_all(content, |caps: &regex::Captures| {
        format!("{open}{}{close}", &caps[0])
    })
    .into_owned()
}
