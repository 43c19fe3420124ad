//! Pattern and keyword table driving the heuristic segmenter.

use crate::model::PageMetadata;

/// Rules for splitting page text into sections and classifying them.
///
/// The defaults describe the known page: Spanish-language headings with
/// accented capitals, `=`/`-` rule lines, and the sewing-machine dealer
/// advertisement vocabulary. Tests and other editions can substitute their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterRules {
    /// Characters whose long runs act as section separators
    pub separator_chars: Vec<char>,

    /// Minimum run length of a separator character
    pub min_separator_run: usize,

    /// Capitals accepted in heading lines besides `A`-`Z`
    pub heading_extra_letters: String,

    /// Minimum length of an all-capitals heading line
    pub min_heading_len: usize,

    /// Sections shorter than this (trimmed, in characters) are noise
    pub min_section_len: usize,

    /// Words marking a section as an advertisement (case-insensitive)
    pub ad_keywords: Vec<String>,

    /// Byline markers that precede an author name ("Por", "By")
    pub author_markers: Vec<String>,

    /// Words identifying the edition line in the page header
    pub edition_markers: Vec<String>,

    /// Marker immediately preceding the issue number
    pub issue_marker: String,

    /// Number of leading lines searched for page metadata
    pub metadata_scan_lines: usize,

    /// Page identity used where the text does not override it
    pub identity: PageMetadata,
}

impl SegmenterRules {
    /// Create the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the advertisement keyword set.
    pub fn with_ad_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ad_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the byline markers.
    pub fn with_author_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the separator characters.
    pub fn with_separator_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.separator_chars = chars.into_iter().collect();
        self
    }

    /// Set the minimum separator run length (at least 1).
    pub fn with_min_separator_run(mut self, run: usize) -> Self {
        self.min_separator_run = run.max(1);
        self
    }

    /// Set the minimum heading line length (at least 1).
    pub fn with_min_heading_len(mut self, len: usize) -> Self {
        self.min_heading_len = len.max(1);
        self
    }

    /// Set the noise threshold for sections.
    pub fn with_min_section_len(mut self, len: usize) -> Self {
        self.min_section_len = len;
        self
    }

    /// Set the default page identity.
    pub fn with_identity(mut self, identity: PageMetadata) -> Self {
        self.identity = identity;
        self
    }
}

impl Default for SegmenterRules {
    fn default() -> Self {
        Self {
            separator_chars: vec!['=', '-'],
            min_separator_run: 10,
            heading_extra_letters: "ÁÉÍÓÚÑÜ".to_string(),
            min_heading_len: 10,
            min_section_len: 20,
            ad_keywords: ["VENDEDOR", "COBRADOR", "MÁQUINA", "SINGER", "RÓMULO"]
                .into_iter()
                .map(String::from)
                .collect(),
            author_markers: vec!["Por".to_string(), "By".to_string()],
            edition_markers: ["Edición", "Edicion", "Edition"]
                .into_iter()
                .map(String::from)
                .collect(),
            issue_marker: "No.".to_string(),
            metadata_scan_lines: 10,
            identity: PageMetadata::default(),
        }
    }
}
