//! Data model for a structured newspaper page.
//!
//! A [`StructuredDocument`] is the unit that is persisted and exported: the
//! page's [`PageMetadata`] plus its [`ContentRecord`]s in reading order.

mod document;
mod record;

pub use document::{parse_page_date, PageMetadata, StructuredDocument};
pub use record::{
    truncate_chars, ContentRecord, ContentType, HEADLINE_MAX_CHARS, SECTION_ADVERTISEMENTS,
    SECTION_MAIN_ARTICLE, EXCERPT_MAX_CHARS,
};
