use crate::patterns::{find_email, find_phone};
use crate::results::PersonRecord;

/// Lowercase substrings that mark a sentence as describing family
pub const FAMILY_KEYWORDS: [&str; 7] = [
    "son", "daughter", "wife", "husband", "father", "mother", "spouse",
];

/// Lowercase substrings that mark a sentence as describing an affiliation
pub const PARTY_KEYWORDS: [&str; 4] = ["party", "political party", "member of", "affiliation"];

/// Builds one record per detected name from the page's sentences and images
///
/// For each name only the first sentence containing it is consulted. Inside
/// that sentence an email match sets the contact, then a phone match
/// overwrites it. Family and party keywords are plain substring tests against
/// the lowercased sentence. Every record gets the page's first image.
pub fn associate(sentences: &[String], names: &[String], images: &[String]) -> Vec<PersonRecord> {
    let image = images.first();

    names
        .iter()
        .map(|name| {
            let mut person = PersonRecord::new(name.as_str());

            if let Some(sentence) = sentences.iter().find(|s| s.contains(name.as_str())) {
                apply_sentence(&mut person, sentence);
            }

            person.image = image.cloned();
            person
        })
        .collect()
}

fn apply_sentence(person: &mut PersonRecord, sentence: &str) {
    if let Some(email) = find_email(sentence) {
        person.contact_information = Some(email.to_string());
    }
    // Phone wins over email when both appear
    if let Some(phone) = find_phone(sentence) {
        person.contact_information = Some(phone.to_string());
    }

    let lowered = sentence.to_lowercase();
    if contains_any(&lowered, &FAMILY_KEYWORDS) {
        person.family_detail = Some(sentence.to_string());
    }
    if contains_any(&lowered, &PARTY_KEYWORDS) {
        person.political_party_affiliation = Some(sentence.to_string());
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
