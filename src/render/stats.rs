//! Summary figures shown on the statistics chart.

use crate::export::Table;

/// Aggregate counts over a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryStats {
    pub total_items: usize,
    pub articles: usize,
    pub advertisements: usize,
    /// Mean excerpt length, rounded down; zero for an empty table
    pub average_chars: usize,
    pub total_chars: usize,
}

impl SummaryStats {
    /// Compute the figures for a table.
    pub fn from_table(table: &Table) -> Self {
        let total_items = table.len();
        let advertisements = table.rows().iter().filter(|r| r.is_advertisement()).count();
        let total_chars = table.total_text_length();
        let average_chars = if total_items == 0 {
            0
        } else {
            total_chars / total_items
        };

        Self {
            total_items,
            articles: total_items - advertisements,
            advertisements,
            average_chars,
            total_chars,
        }
    }

    /// Labelled values in chart order.
    pub fn entries(&self) -> [(&'static str, usize); 5] {
        [
            ("Total items", self.total_items),
            ("Articles", self.articles),
            ("Advertisements", self.advertisements),
            ("Average characters", self.average_chars),
            ("Total characters", self.total_chars),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentRecord, ContentType, PageMetadata, StructuredDocument};

    #[test]
    fn test_summary_stats() {
        let doc = StructuredDocument::new(
            PageMetadata::default(),
            vec![
                ContentRecord::new("A", "Main article", ContentType::Article, "", "12345"),
                ContentRecord::new("B", "Main article", ContentType::Article, "", "1234"),
                ContentRecord::new("C", "Advertisements", ContentType::Advertisement, "", "1"),
            ],
        );
        let stats = SummaryStats::from_table(&Table::from_document(&doc));
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.articles, 2);
        assert_eq!(stats.advertisements, 1);
        assert_eq!(stats.total_chars, 10);
        assert_eq!(stats.average_chars, 3);
        assert_eq!(stats.entries()[2], ("Advertisements", 1));
    }

    #[test]
    fn test_empty_table_stats() {
        let stats = SummaryStats::from_table(&Table::new(Vec::new()));
        assert_eq!(stats, SummaryStats::default());
    }
}
