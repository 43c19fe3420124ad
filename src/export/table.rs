//! Flat tabular view of a structured document.

use crate::model::{ContentRecord, ContentType, StructuredDocument};

/// Table column, in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Date,
    IssueNumber,
    Headline,
    Section,
    Type,
    Author,
    TextExcerpt,
}

impl Column {
    /// Every column, in canonical order.
    pub const ALL: [Column; 7] = [
        Column::Date,
        Column::IssueNumber,
        Column::Headline,
        Column::Section,
        Column::Type,
        Column::Author,
        Column::TextExcerpt,
    ];

    /// Header name of the column.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::IssueNumber => "issue_number",
            Column::Headline => "headline",
            Column::Section => "section",
            Column::Type => "type",
            Column::Author => "author",
            Column::TextExcerpt => "text_excerpt",
        }
    }

    /// Look a column up by header name.
    pub fn from_name(name: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.name() == name.trim())
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One record with the page's date and issue number attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Publication date as `YYYY-MM-DD`, empty when unknown
    pub date: String,
    pub issue_number: Option<u32>,
    pub headline: String,
    pub section: String,
    pub content_type: ContentType,
    pub author: String,
    pub text_excerpt: String,
    /// Character count of the excerpt
    pub text_length: usize,
}

impl TableRow {
    /// Build a row from a record and the shared page values.
    pub fn new(date: impl Into<String>, issue_number: Option<u32>, record: &ContentRecord) -> Self {
        Self {
            date: date.into(),
            issue_number,
            headline: record.headline.clone(),
            section: record.section.clone(),
            content_type: record.content_type,
            author: record.author.clone(),
            text_excerpt: record.text_excerpt.clone(),
            text_length: record.text_length(),
        }
    }

    /// Cell text for a column.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Date => self.date.clone(),
            Column::IssueNumber => self
                .issue_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            Column::Headline => self.headline.clone(),
            Column::Section => self.section.clone(),
            Column::Type => self.content_type.as_str().to_string(),
            Column::Author => self.author.clone(),
            Column::TextExcerpt => self.text_excerpt.clone(),
        }
    }

    /// Whether this row is an advertisement.
    pub fn is_advertisement(&self) -> bool {
        self.content_type == ContentType::Advertisement
    }
}

/// Uniform table of content rows with a fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Create a table with every column.
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            columns: Column::ALL.to_vec(),
            rows,
        }
    }

    /// Flatten a document: one row per record, in record order.
    pub fn from_document(doc: &StructuredDocument) -> Self {
        let date = doc.metadata.date_label();
        let issue = doc.metadata.issue_number;
        let rows = doc
            .content
            .iter()
            .map(|record| TableRow::new(date.clone(), issue, record))
            .collect();
        Self::new(rows)
    }

    /// Restrict output to the named columns.
    ///
    /// The canonical order is kept whatever order the names come in; unknown
    /// names are skipped.
    pub fn with_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<Column> = names
            .into_iter()
            .filter_map(|name| {
                let column = Column::from_name(name.as_ref());
                if column.is_none() {
                    log::debug!("Ignoring unknown column {:?}", name.as_ref());
                }
                column
            })
            .collect();
        columns.sort();
        columns.dedup();
        self.columns = columns;
        self
    }

    /// Output columns, in canonical order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in record order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows per content type, in order of first appearance.
    pub fn type_counts(&self) -> Vec<(ContentType, usize)> {
        let mut counts: Vec<(ContentType, usize)> = Vec::new();
        for row in &self.rows {
            match counts.iter_mut().find(|(t, _)| *t == row.content_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((row.content_type, 1)),
            }
        }
        counts
    }

    /// Sum of excerpt lengths.
    pub fn total_text_length(&self) -> usize {
        self.rows.iter().map(|r| r.text_length).sum()
    }
}
