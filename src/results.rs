use serde::{Deserialize, Serialize};

/// One detected person and whatever the association pass could bind to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Name as reported by the text analyzer
    pub name: String,

    /// Email address or phone number found in the name's sentence
    #[serde(rename = "contact-information")]
    pub contact_information: Option<String>,

    /// First image of the page the name was found on
    pub image: Option<String>,

    /// Sentence mentioning a family relation
    #[serde(rename = "family-detail")]
    pub family_detail: Option<String>,

    /// Sentence mentioning a party or affiliation
    pub political_party_affiliation: Option<String>,
}

impl PersonRecord {
    /// Create a record with only the name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_information: None,
            image: None,
            family_detail: None,
            political_party_affiliation: None,
        }
    }
}

/// Everything extracted from one fetched page
///
/// Lives only for the duration of that page's processing.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    /// URL the page was fetched from
    pub url: String,

    /// Sentences in document order
    pub sentences: Vec<String>,

    /// Person names in detection order, duplicates preserved
    pub person_names: Vec<String>,

    /// Absolute outbound links in document order
    pub links: Vec<String>,

    /// Absolute image URLs in document order
    pub images: Vec<String>,

    /// Email-like tokens found anywhere in the page text
    pub emails: Vec<String>,

    /// Phone-like digit runs found anywhere in the page text
    pub phone_numbers: Vec<String>,
}
