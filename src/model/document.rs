//! Document-level types.

use super::{ContentRecord, ContentType};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Identity of the newspaper page the records came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Newspaper title
    #[serde(default)]
    pub newspaper_name: String,

    /// Publication date (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,

    /// Edition number
    #[serde(default, deserialize_with = "lenient_issue")]
    pub issue_number: Option<u32>,

    /// City and country of publication
    #[serde(default)]
    pub location: String,
}

impl PageMetadata {
    /// Create metadata for a page.
    pub fn new(
        newspaper_name: impl Into<String>,
        date: Option<NaiveDate>,
        issue_number: Option<u32>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            newspaper_name: newspaper_name.into(),
            date,
            issue_number,
            location: location.into(),
        }
    }

    /// Copy of this metadata with a different issue number.
    pub fn with_issue_number(mut self, issue_number: u32) -> Self {
        self.issue_number = Some(issue_number);
        self
    }

    /// Date formatted as `YYYY-MM-DD`, or empty when unknown.
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// File name stem for this page's outputs, e.g. `el_martillo_1609`.
    ///
    /// The newspaper name is lower-cased with accents removed and every run of
    /// other characters collapsed to `_`; the issue number is appended when
    /// known.
    pub fn file_stem(&self) -> String {
        let folded: String = self
            .newspaper_name
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let mut stem = folded
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if stem.is_empty() {
            stem.push_str("page");
        }
        if let Some(issue) = self.issue_number {
            stem = format!("{}_{}", stem, issue);
        }
        stem
    }

    /// Short caption used in banners and chart titles.
    pub fn caption(&self) -> String {
        match self.issue_number {
            Some(issue) => format!("{} - Edition {}", self.newspaper_name, issue),
            None => self.newspaper_name.clone(),
        }
    }
}

impl Default for PageMetadata {
    /// The known page identity: El Martillo, issue 1609 of 5 August 1916.
    fn default() -> Self {
        Self {
            newspaper_name: "El Martillo".to_string(),
            date: NaiveDate::from_ymd_opt(1916, 8, 5),
            issue_number: Some(1609),
            location: "Chiclayo, Perú".to_string(),
        }
    }
}

/// Structured representation of one newspaper page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Page identity shared by every record
    #[serde(default)]
    pub metadata: PageMetadata,

    /// Records in order of appearance
    #[serde(default)]
    pub content: Vec<ContentRecord>,
}

impl StructuredDocument {
    /// Create a document from metadata and records.
    pub fn new(metadata: PageMetadata, content: Vec<ContentRecord>) -> Self {
        Self { metadata, content }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the document has no records.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of records of the given type.
    pub fn count_of(&self, content_type: ContentType) -> usize {
        self.content
            .iter()
            .filter(|r| r.content_type == content_type)
            .count()
    }

    /// Re-apply record length caps after reading from an external source.
    pub fn normalized(self) -> Self {
        Self {
            metadata: self.metadata,
            content: self
                .content
                .into_iter()
                .map(ContentRecord::normalized)
                .collect(),
        }
    }
}

/// Accept `null`, `""` and unparseable strings as an unknown date.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = parse_page_date(raw);
    if date.is_none() {
        log::warn!("Ignoring unparseable publication date {:?}", raw);
    }
    Ok(date)
}

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parse a publication date as the service tends to write it.
///
/// Accepts ISO `1916-08-05`, Spanish `5 de agosto de 1916`, English
/// `August 5, 1916` / `5 August 1916` and day-first `05/08/1916`.
pub fn parse_page_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d", "%B %d, %Y", "%d %B %Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    parse_spanish_date(raw)
}

/// `D de <mes> de YYYY`, month name in any case; `setiembre` is accepted.
fn parse_spanish_date(raw: &str) -> Option<NaiveDate> {
    let lower = raw.to_lowercase();
    let parts: Vec<&str> = lower.split_whitespace().collect();
    let [day, "de", month, "de", year] = parts.as_slice() else {
        return None;
    };
    let month = match *month {
        "setiembre" => 9,
        name => SPANISH_MONTHS.iter().position(|m| *m == name)? + 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month as u32, day.parse().ok()?)
}

/// Accept the issue number as a JSON number or a numeric string.
fn lenient_issue<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Issue {
        Number(u64),
        Text(String),
    }

    let issue = match Option::<Issue>::deserialize(deserializer)? {
        Some(Issue::Number(n)) => u32::try_from(n).ok(),
        Some(Issue::Text(s)) => s.trim().parse::<u32>().ok(),
        None => None,
    };
    Ok(issue.filter(|n| *n > 0))
}
