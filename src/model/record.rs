//! Content records: one detected article or advertisement.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum headline length in characters.
pub const HEADLINE_MAX_CHARS: usize = 100;

/// Maximum excerpt length in characters.
pub const EXCERPT_MAX_CHARS: usize = 300;

/// Section label given to advertisements.
pub const SECTION_ADVERTISEMENTS: &str = "Advertisements";

/// Section label given to articles.
pub const SECTION_MAIN_ARTICLE: &str = "Main article";

/// Kind of content unit found on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ContentType {
    /// Editorial text
    #[default]
    Article,
    /// Commercial notice
    Advertisement,
}

impl ContentType {
    /// Lowercase label used in JSON and CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Advertisement => "advertisement",
        }
    }

    /// Section label that goes with this content type.
    pub fn section_label(&self) -> &'static str {
        match self {
            ContentType::Article => SECTION_MAIN_ARTICLE,
            ContentType::Advertisement => SECTION_ADVERTISEMENTS,
        }
    }

    /// Parse a label, accepting the Spanish names the service may answer with.
    ///
    /// Anything that is not recognisably an advertisement is an article.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "advertisement" | "ad" | "anuncio" => ContentType::Advertisement,
            _ => ContentType::Article,
        }
    }
}

impl From<String> for ContentType {
    fn from(label: String) -> Self {
        ContentType::from_label(&label)
    }
}

impl From<Option<String>> for ContentType {
    fn from(label: Option<String>) -> Self {
        label.map(ContentType::from).unwrap_or_default()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete unit of page content.
///
/// Records are built through [`ContentRecord::new`], which enforces the
/// headline and excerpt length caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// First meaningful line, at most 100 characters
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headline: String,

    /// Section label ("Main article", "Advertisements", ...)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub section: String,

    /// Article or advertisement
    #[serde(rename = "type", default)]
    pub content_type: ContentType,

    /// Byline, empty when none was found
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,

    /// Leading text of the unit, at most 300 characters
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_excerpt: String,
}

impl ContentRecord {
    /// Create a record, truncating headline and excerpt to their caps.
    pub fn new(
        headline: impl AsRef<str>,
        section: impl Into<String>,
        content_type: ContentType,
        author: impl Into<String>,
        text_excerpt: impl AsRef<str>,
    ) -> Self {
        Self {
            headline: truncate_chars(headline.as_ref(), HEADLINE_MAX_CHARS).to_string(),
            section: section.into(),
            content_type,
            author: author.into(),
            text_excerpt: truncate_chars(text_excerpt.as_ref(), EXCERPT_MAX_CHARS).to_string(),
        }
    }

    /// Re-apply the length caps to a record read from elsewhere.
    pub fn normalized(self) -> Self {
        Self::new(
            self.headline,
            self.section,
            self.content_type,
            self.author,
            self.text_excerpt,
        )
    }

    /// Whether this record is an advertisement.
    pub fn is_advertisement(&self) -> bool {
        self.content_type == ContentType::Advertisement
    }

    /// Excerpt length in characters.
    pub fn text_length(&self) -> usize {
        self.text_excerpt.chars().count()
    }
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("Perú", 3), "Per");
        assert_eq!(truncate_chars("ÑÑÑÑ", 2), "ÑÑ");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_record_caps() {
        let long = "Á".repeat(500);
        let record = ContentRecord::new(&long, SECTION_MAIN_ARTICLE, ContentType::Article, "", &long);
        assert_eq!(record.headline.chars().count(), HEADLINE_MAX_CHARS);
        assert_eq!(record.text_length(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_content_type_labels() {
        assert_eq!(ContentType::from_label("anuncio"), ContentType::Advertisement);
        assert_eq!(ContentType::from_label("Advertisement"), ContentType::Advertisement);
        assert_eq!(ContentType::from_label("artículo"), ContentType::Article);
        assert_eq!(ContentType::from_label("editorial"), ContentType::Article);
        assert_eq!(ContentType::Advertisement.section_label(), "Advertisements");
    }

    #[test]
    fn test_record_json_shape() {
        let record = ContentRecord::new("SINGER", SECTION_ADVERTISEMENTS, ContentType::Advertisement, "", "Máquinas");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "advertisement");
        assert_eq!(json["text_excerpt"], "Máquinas");
    }

    #[test]
    fn test_record_tolerates_nulls_and_aliases() {
        let json = r#"{"headline": "EL PERIODISMO", "section": "Artículo principal",
                       "type": "artículo", "author": null, "text_excerpt": "En ninguna"}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.author, "");
        assert_eq!(record.content_type, ContentType::Article);
    }
}
