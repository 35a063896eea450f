use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Sentences and person names found in a block of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAnalysis {
    /// Sentences in text order
    pub sentences: Vec<String>,
    /// Person names in text order, duplicates preserved
    pub person_names: Vec<String>,
}

/// Text understanding collaborator: sentence spans and person-name spans
pub trait TextAnalyzer: Send + Sync {
    /// Analyze the text of a whole page
    fn analyze(&self, text: &str) -> Result<TextAnalysis>;
}

/// Titles that introduce a name and never end a sentence
const HONORIFICS: &[&str] = &["Mr", "Mrs", "Ms", "Miss", "Dr", "Prof", "Sir", "Dame"];

/// Capitalized words that are almost never part of a name
const STOP_WORDS: &[&str] = &[
    "The", "A", "An", "And", "Or", "But", "In", "On", "At", "To", "Of", "By", "For", "From",
    "With", "This", "That", "These", "Those", "Our", "Your", "My", "His", "Her", "Their", "Contact",
    "Meet", "About", "Home", "Welcome", "Please", "Call", "Email", "Phone", "Read", "More", "Dear",
    "Hello", "Thanks", "Later", "Today", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday", "January", "February", "March", "April", "May", "June", "July",
    "August", "September", "October", "November", "December", "Team", "News",
];

/// Trailing words that turn a capitalized run into an organisation or place
const ORGANISATION_WORDS: &[&str] = &[
    "Party", "Council", "Committee", "Association", "University", "College", "School", "Street",
    "Avenue", "Road", "Company", "Inc", "Ltd", "Foundation", "Institute", "Department", "Ministry",
    "Church", "Hospital", "Club", "Society", "Union", "League", "County",
];

/// Longest run of capitalized words still treated as a name
const MAX_NAME_WORDS: usize = 4;

static NAME_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{Lu}['’])?\p{Lu}\p{Ll}+(?:\p{Lu}\p{Ll}+)?(?:-\p{Lu}?\p{Ll}+)*$")
        .expect("valid regex")
});

/// Rule-based analyzer used when no language model is wired in
///
/// Sentences end at `.`, `!` or `?` followed by whitespace, except after an
/// honorific or a single-letter initial. Names are runs of two to four
/// capitalized words, or a single one after an honorific.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl TextAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        let normalized = normalize_whitespace_in_segment(text);
        Ok(TextAnalysis {
            sentences: split_sentences(&normalized),
            person_names: detect_person_names(&normalized),
        })
    }
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits text into trimmed, non-empty sentences
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }

        // "?!" and "..." end a sentence once
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
        if at_boundary && !(c == '.' && ends_with_abbreviation(&text[start..i])) {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Whether the word right before a period is a title or an initial
fn ends_with_abbreviation(prefix: &str) -> bool {
    let last = prefix
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    is_honorific(last) || (last.chars().count() == 1 && last.chars().all(char::is_uppercase))
}

fn is_honorific(word: &str) -> bool {
    HONORIFICS.iter().any(|h| *h == word)
}

/// Finds person-name candidates in text order
pub fn detect_person_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut titled = false;

    for raw in text.split_whitespace() {
        if raw.starts_with(|c: char| !c.is_alphanumeric()) {
            flush_run(&mut run, titled, &mut names);
            titled = false;
        }

        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let possessive = trimmed
            .strip_suffix("'s")
            .or_else(|| trimmed.strip_suffix("’s"));
        let word = possessive.unwrap_or(trimmed);

        if is_honorific(word) {
            flush_run(&mut run, titled, &mut names);
            titled = true;
            continue;
        }

        if NAME_WORD_RE.is_match(word) {
            run.push(word);
        } else {
            flush_run(&mut run, titled, &mut names);
            titled = false;
        }

        if possessive.is_some() || raw.ends_with(|c: char| !c.is_alphanumeric()) {
            flush_run(&mut run, titled, &mut names);
            titled = false;
        }
    }

    flush_run(&mut run, titled, &mut names);
    names
}

fn flush_run(run: &mut Vec<&str>, titled: bool, names: &mut Vec<String>) {
    let words = std::mem::take(run);

    let is_stop = |w: &&str| STOP_WORDS.iter().any(|s| s == w);
    let start = words.iter().position(|w| !is_stop(w)).unwrap_or(words.len());
    let end = words.iter().rposition(|w| !is_stop(w)).map_or(start, |i| i + 1);
    let core = &words[start..end.max(start)];

    let min_words = if titled { 1 } else { 2 };
    if core.len() < min_words || core.len() > MAX_NAME_WORDS {
        return;
    }
    if core
        .last()
        .is_some_and(|w| ORGANISATION_WORDS.iter().any(|o| o == w))
    {
        return;
    }

    names.push(core.join(" "));
}
