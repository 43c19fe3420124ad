//! Offline, rule-based structuring of raw page text.
//!
//! The segmenter cuts the transcript at the page's own visual delimiters
//! (long rule lines and all-capitals headings), drops fragments too short to
//! be content, and labels each remaining section as an article or an
//! advertisement. It never fails: text with no usable sections still yields a
//! single record built from the start of the transcript.

use super::SegmenterRules;
use crate::error::Result;
use crate::model::{
    truncate_chars, ContentRecord, ContentType, PageMetadata, StructuredDocument,
    EXCERPT_MAX_CHARS, SECTION_MAIN_ARTICLE,
};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters of raw text the fallback record is drawn from.
const FALLBACK_WINDOW_CHARS: usize = 500;

/// Headline of the fallback record.
const FALLBACK_HEADLINE: &str = "Full content";

/// Heuristic segmenter compiled from a [`SegmenterRules`] table.
#[derive(Debug, Clone)]
pub struct HeuristicSegmenter {
    rules: SegmenterRules,
    boundary: Regex,
    author: Option<Regex>,
    issue: Regex,
    date: Regex,
    keywords: Vec<String>,
}

impl HeuristicSegmenter {
    /// Compile a segmenter from rules.
    pub fn new(rules: SegmenterRules) -> Result<Self> {
        let boundary = Regex::new(&boundary_pattern(&rules))?;
        let author = author_pattern(&rules.author_markers)
            .map(|p| Regex::new(&p))
            .transpose()?;
        let issue = Regex::new(&format!(r"{}\s*(\d+)", regex::escape(&rules.issue_marker)))?;
        let date = Regex::new(r"\d{1,2}\s+de\s+\w+\s+de\s+\d{4}")?;
        let keywords = rules
            .ad_keywords
            .iter()
            .map(|k| k.trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Self {
            rules,
            boundary,
            author,
            issue,
            date,
            keywords,
        })
    }

    /// The rules this segmenter was built from.
    pub fn rules(&self) -> &SegmenterRules {
        &self.rules
    }

    /// Structure raw page text into a document with at least one record.
    pub fn segment(&self, text: &str) -> StructuredDocument {
        let text = normalize(text);
        let metadata = self.extract_metadata(&text);

        let sections = self.split_sections(&text);
        log::debug!("Found {} candidate sections", sections.len());

        let mut content: Vec<ContentRecord> = sections
            .into_iter()
            .filter_map(|section| self.classify_section(section))
            .collect();

        if content.is_empty() {
            log::warn!("No sections detected; keeping the start of the text as one record");
            content.push(fallback_record(&text));
        }

        log::info!(
            "Segmented {} records ({} advertisements)",
            content.len(),
            content.iter().filter(|r| r.is_advertisement()).count()
        );

        StructuredDocument::new(metadata, content)
    }

    /// Read page metadata from the header lines, starting from the rule identity.
    ///
    /// Only the issue number is ever overridden. Header dates are recognised
    /// but left unapplied.
    pub fn extract_metadata(&self, text: &str) -> PageMetadata {
        let mut metadata = self.rules.identity.clone();

        for line in text.trim().lines().take(self.rules.metadata_scan_lines) {
            let is_edition_line = self
                .rules
                .edition_markers
                .iter()
                .any(|marker| line.contains(marker.as_str()));

            if is_edition_line {
                let issue = self
                    .issue
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .filter(|n| *n > 0);
                if let Some(issue) = issue {
                    log::debug!("Issue number {} read from header", issue);
                    metadata.issue_number = Some(issue);
                }
            }

            if let Some(found) = self.date.find(line) {
                log::debug!("Header date {:?} recognised, not applied", found.as_str());
            }
        }

        metadata
    }

    /// Split text at separator runs and heading lines, discarding the boundaries.
    pub fn split_sections<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.boundary.split(text).collect()
    }

    /// Turn one candidate section into a record, or `None` if it is noise.
    pub fn classify_section(&self, section: &str) -> Option<ContentRecord> {
        let section = section.trim();
        if section.chars().count() < self.rules.min_section_len {
            return None;
        }

        let headline = section.lines().map(str::trim).find(|l| !l.is_empty())?;
        let content_type = self.classify(section);
        let author = self.find_author(section).unwrap_or_default();
        let excerpt = truncate_chars(section, EXCERPT_MAX_CHARS).trim_end();

        Some(ContentRecord::new(
            headline,
            content_type.section_label(),
            content_type,
            author,
            excerpt,
        ))
    }

    /// Advertisement if any keyword occurs in the upper-cased text.
    pub fn classify(&self, section: &str) -> ContentType {
        let upper = section.to_uppercase();
        if self.keywords.iter().any(|k| upper.contains(k.as_str())) {
            ContentType::Advertisement
        } else {
            ContentType::Article
        }
    }

    /// Name following the first byline marker in the section.
    pub fn find_author(&self, section: &str) -> Option<String> {
        self.author
            .as_ref()?
            .captures(section)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|a| !a.is_empty())
    }
}

impl Default for HeuristicSegmenter {
    fn default() -> Self {
        Self::new(SegmenterRules::default()).expect("default segmenter rules compile")
    }
}

/// NFC-normalize and unify line endings.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").nfc().collect()
}

/// `={10,}|-{10,}|(?m:^[A-ZÁÉ... \t]{10,}$)` for the default rules.
fn boundary_pattern(rules: &SegmenterRules) -> String {
    let mut alternatives: Vec<String> = rules
        .separator_chars
        .iter()
        .map(|c| {
            format!(
                "{}{{{},}}",
                regex::escape(&c.to_string()),
                rules.min_separator_run.max(1)
            )
        })
        .collect();

    let extra: String = rules
        .heading_extra_letters
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    alternatives.push(format!(
        r"(?m:^[A-Z{} \t]{{{},}}$)",
        extra,
        rules.min_heading_len.max(1)
    ));

    alternatives.join("|")
}

/// Byline pattern: a marker word, then a capitalised name on the same line.
fn author_pattern(markers: &[String]) -> Option<String> {
    let markers: Vec<String> = markers
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(regex::escape)
        .collect();
    if markers.is_empty() {
        return None;
    }
    Some(format!(
        r"\b(?:{})[ \t]+(\p{{Lu}}[\p{{L}}. \t]*)",
        markers.join("|")
    ))
}

fn fallback_record(text: &str) -> ContentRecord {
    let window = truncate_chars(text, FALLBACK_WINDOW_CHARS).trim();
    ContentRecord::new(
        FALLBACK_HEADLINE,
        SECTION_MAIN_ARTICLE,
        ContentType::Article,
        "",
        window,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HEADLINE_MAX_CHARS, SECTION_ADVERTISEMENTS};

    fn segmenter() -> HeuristicSegmenter {
        HeuristicSegmenter::default()
    }

    #[test]
    fn test_article_then_advertisement() {
        let text = "HEADER\nfoo bar baz qux content here enough chars\n==========\nSINGER machine seller content here enough chars";
        let doc = segmenter().segment(text);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.content[0].content_type, ContentType::Article);
        assert_eq!(doc.content[0].headline, "HEADER");
        assert_eq!(doc.content[0].section, SECTION_MAIN_ARTICLE);
        assert_eq!(doc.content[1].content_type, ContentType::Advertisement);
        assert_eq!(doc.content[1].section, SECTION_ADVERTISEMENTS);
    }

    // Nine `=` is one short of the separator run and `HEADER` is too short
    // for a heading, so the whole text is one section. See "Separator run
    // length" in DESIGN.md.
    #[test]
    fn test_nine_equals_is_not_a_separator() {
        let text = "HEADER\nfoo bar baz qux content here enough chars\n=========\nSINGER machine seller content here enough chars";
        let doc = segmenter().segment(text);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.content[0].content_type, ContentType::Advertisement);
        assert_eq!(doc.content[0].headline, "HEADER");
        assert!(doc.content[0].text_excerpt.contains("=========\nSINGER"));
    }

    #[test]
    fn test_empty_text_fallback() {
        let doc = segmenter().segment("");
        assert_eq!(doc.len(), 1);
        let record = &doc.content[0];
        assert_eq!(record.content_type, ContentType::Article);
        assert_eq!(record.headline, "Full content");
        assert_eq!(record.text_excerpt, "");
        assert_eq!(record.author, "");
    }

    #[test]
    fn test_separators_only_fallback() {
        let doc = segmenter().segment("====================\n--------------------");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.content[0].headline, "Full content");
    }

    #[test]
    fn test_issue_number_override() {
        let text = "PERIÓDICO EL MARTILLO\nEdición No. 1700 - 5 de agosto de 1916\nChiclayo, Perú";
        let metadata = segmenter().extract_metadata(text);
        assert_eq!(metadata.issue_number, Some(1700));
        assert_eq!(metadata.newspaper_name, "El Martillo");
        // the header date is recognised but never applied
        assert_eq!(metadata.date_label(), "1916-08-05");
    }

    #[test]
    fn test_issue_number_requires_edition_marker() {
        let metadata = segmenter().extract_metadata("Calle No. 18\nPrecio 4 centavos");
        assert_eq!(metadata.issue_number, Some(1609));
    }

    #[test]
    fn test_issue_number_only_in_header_lines() {
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!("line {}\n", i));
        }
        text.push_str("Edición No. 42\n");
        let metadata = segmenter().extract_metadata(&text);
        assert_eq!(metadata.issue_number, Some(1609));
    }

    #[test]
    fn test_heading_lines_split_sections() {
        let text = "PERIÓDICOS HISTÓRICOS DE CHICLAYO\nHan existido numerosos periódicos en Chiclayo.\nPERIODISMO EN MONSEFÚ\nEn Monsefú se han editado varios periódicos.";
        let doc = segmenter().segment(text);
        assert_eq!(doc.len(), 2);
        assert!(doc.content[0].headline.starts_with("Han existido"));
        assert!(doc.content[1].headline.starts_with("En Monsefú"));
    }

    #[test]
    fn test_decomposed_accents_still_form_headings() {
        // "PERIÓDICOS" with a combining acute accent
        let text = "PERIO\u{301}DICOS DE FERREN\u{303}AFE\nEntre los pueblos de la vecina Provincia solo Ferreñafe.";
        let doc = segmenter().segment(text);
        assert_eq!(doc.len(), 1);
        assert!(doc.content[0].headline.starts_with("Entre los pueblos"));
    }

    #[test]
    fn test_short_sections_dropped() {
        let text = "short bit\n==========\nThis section is comfortably long enough\n==========\ntiny";
        let doc = segmenter().segment(text);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.content[0].headline, "This section is comfortably long enough");
    }

    #[test]
    fn test_author_extraction() {
        let text = "Crónica de la semana en la ciudad\nPor F. A. Herrera\nEl texto continúa aquí.";
        let doc = segmenter().segment(text);
        assert_eq!(doc.content[0].author, "F. A. Herrera");
    }

    #[test]
    fn test_author_lowercase_marker_ignored() {
        let segmenter = segmenter();
        assert_eq!(segmenter.find_author("fundado por el señor Carmona"), None);
        assert_eq!(
            segmenter.find_author("By John Smith\nand more"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_fixture_keywords() {
        let rules = SegmenterRules::default().with_ad_keywords(["precio"]);
        let segmenter = HeuristicSegmenter::new(rules).unwrap();
        assert_eq!(
            segmenter.classify("Precio: 4 centavos por número"),
            ContentType::Advertisement
        );
        assert_eq!(
            segmenter.classify("Máquinas Singer de coser"),
            ContentType::Article
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let segmenter = segmenter();
        assert_eq!(
            segmenter.classify("las afamadas máquinas singer"),
            ContentType::Advertisement
        );
    }

    #[test]
    fn test_caps_hold() {
        let long_line = "palabra ".repeat(80);
        let text = format!("{}\n{}", long_line, long_line);
        let doc = segmenter().segment(&text);
        for record in &doc.content {
            assert!(record.headline.chars().count() <= HEADLINE_MAX_CHARS);
            assert!(record.text_length() <= EXCERPT_MAX_CHARS);
        }
    }

    #[test]
    fn test_fallback_excerpt_capped() {
        let text = "x".repeat(19);
        let rules = SegmenterRules::default().with_min_section_len(1000);
        let segmenter = HeuristicSegmenter::new(rules).unwrap();
        let doc = segmenter.segment(&format!("{}{}", text, "y".repeat(600)));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.content[0].text_length(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_crlf_input() {
        let text = "Primer artículo con bastante texto\r\n==========\r\nSegundo artículo con bastante texto";
        let doc = segmenter().segment(text);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.content[0].headline, "Primer artículo con bastante texto");
    }

    #[test]
    fn test_deterministic() {
        let text = "HEADER\nfoo bar baz qux content here enough chars\n==========\nSINGER machine seller content here enough chars";
        let segmenter = segmenter();
        assert_eq!(segmenter.segment(text), segmenter.segment(text));
    }

    #[test]
    fn test_boundary_pattern_default() {
        let pattern = boundary_pattern(&SegmenterRules::default());
        assert!(pattern.starts_with(r"={10,}|\-{10,}|"));
        assert!(pattern.ends_with(r" \t]{10,}$)"));
    }

    #[test]
    fn test_no_author_markers() {
        let rules = SegmenterRules::default().with_author_markers(Vec::<String>::new());
        let segmenter = HeuristicSegmenter::new(rules).unwrap();
        assert_eq!(segmenter.find_author("Por F. A. Herrera"), None);
    }
}
