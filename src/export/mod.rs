//! Writing page text, documents and tables to disk.
//!
//! The in-memory encoders ([`to_json`], [`to_csv`], [`to_transcript`]) are
//! wrapped by `write_*` helpers that write whole files.

mod csv;
mod json;
mod table;
mod transcript;

pub use csv::{csv_escape, from_csv, to_csv};
pub use json::{from_json, to_json, JsonFormat};
pub use table::{Column, Table, TableRow};
pub use transcript::{to_transcript, transcript_title};

use crate::error::Result;
use crate::model::StructuredDocument;
use std::path::Path;

/// Write the transcript file, stamped with the current local time.
pub fn write_transcript<P: AsRef<Path>>(path: P, text: &str, title: &str) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    std::fs::write(path.as_ref(), to_transcript(text, title, now))?;
    log::info!("Wrote transcript to {}", path.as_ref().display());
    Ok(())
}

/// Write a document as pretty-printed JSON.
pub fn write_json<P: AsRef<Path>>(path: P, doc: &StructuredDocument) -> Result<()> {
    std::fs::write(path.as_ref(), to_json(doc, JsonFormat::Pretty)?)?;
    log::info!("Wrote {} records to {}", doc.len(), path.as_ref().display());
    Ok(())
}

/// Write a table as CSV.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    std::fs::write(path.as_ref(), to_csv(table))?;
    log::info!("Wrote {} rows to {}", table.len(), path.as_ref().display());
    Ok(())
}

impl Table {
    /// Encode this table as CSV text.
    pub fn to_csv(&self) -> String {
        to_csv(self)
    }

    /// Read a CSV file written by [`write_csv`].
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
        let text = std::fs::read_to_string(path.as_ref())?;
        from_csv(&text)
    }
}

/// Read a JSON document file.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    from_json(&std::fs::read_to_string(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentRecord, ContentType, PageMetadata};

    #[test]
    fn test_csv_file_round_trip_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structured.csv");
        let doc = StructuredDocument::new(
            PageMetadata::default(),
            vec![
                ContentRecord::new("Uno", "Main article", ContentType::Article, "", "Perú, \"1916\"\nsegunda línea"),
                ContentRecord::new("Dos", "Advertisements", ContentType::Advertisement, "", "máquinas Singer"),
            ],
        );
        let table = Table::from_document(&doc);
        write_csv(&path, &table).unwrap();

        let read = Table::read_csv(&path).unwrap();
        assert_eq!(read, table);
        for (row, record) in read.rows().iter().zip(&doc.content) {
            assert_eq!(row.text_length, record.text_excerpt.chars().count());
        }
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structured.json");
        let doc = StructuredDocument::new(PageMetadata::default(), Vec::new());
        write_json(&path, &doc).unwrap();
        assert_eq!(read_json(&path).unwrap(), doc);
    }

    #[test]
    fn test_write_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_text.txt");
        write_transcript(&path, "texto", "TITLE").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(&"=".repeat(80)));
        assert!(written.contains("Extraction date: "));
        assert!(written.ends_with("\n\ntexto"));
    }
}
