pub mod error;
pub mod local;
pub mod remote;

use bgate_protocol::{BookEntry, RangeQuery, VerseRecord};

pub use crate::error::{CorpusError, Result};
pub use crate::local::{has_translation, translation_path, LocalCorpus};
pub use crate::remote::RemoteCorpus;

/// A source of verse records for one translation.
///
/// Records come back in canonical sequence order. Spans are bounded by that
/// order; the corpus never compares book numbers to decide what lies between.
pub trait Corpus {
    fn query(&self, range: &RangeQuery) -> Result<Vec<VerseRecord>>;

    /// Books present in this translation, in canonical order.
    fn booklist(&self) -> Result<Vec<BookEntry>>;

    fn query_text(&self, text: &str) -> Result<Vec<VerseRecord>> {
        let range = bgate_parser::parse_query(text)?;
        self.query(&range)
    }
}
