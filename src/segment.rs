//! Placeholder-aware phrase segmentation.
//!
//! Game dialogue strings carry tokens that must survive translation
//! byte-for-byte: `${variable}` interpolations, `[Choice]` markers and
//! `$speaker$` substitutions. [`split`] cuts a phrase into translatable text
//! spans and verbatim placeholder tokens; [`recombine`] is the inverse.
//! Concatenating the segments of `split(phrase)` always reproduces `phrase`
//! exactly.

use std::sync::LazyLock;

use regex::Regex;

// One alternation per token shape. `\w*` is deliberate: `[]` and `$$` are
// valid (empty) markers in the dialogue files.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}|\[\w*\]|\$\w*\$").unwrap());

/// One piece of a phrase: either text the provider may rewrite or a
/// placeholder token that passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Placeholder(text) => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder(_))
    }
}

/// Split a phrase into an ordered sequence of segments.
///
/// Text between placeholder tokens is kept as-is, including surrounding
/// whitespace, so the caller decides what is worth sending to a translator.
/// An empty phrase yields a single empty text segment; otherwise empty gaps
/// between adjacent tokens produce no segment at all.
pub fn split(phrase: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for token in PLACEHOLDER_REGEX.find_iter(phrase) {
        if token.start() > last {
            segments.push(Segment::Text(phrase[last..token.start()].to_string()));
        }
        segments.push(Segment::Placeholder(token.as_str().to_string()));
        last = token.end();
    }

    if last < phrase.len() || segments.is_empty() {
        segments.push(Segment::Text(phrase[last..].to_string()));
    }

    segments
}

/// Reassemble segments into a single phrase.
pub fn recombine(segments: &[Segment]) -> String {
    segments.iter().map(Segment::as_str).collect()
}
