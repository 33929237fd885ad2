use anyhow::Result;
use bgate_protocol::BookEntry;

use super::open_corpus;
use crate::settings::Settings;

pub fn run(settings: &Settings, filter: &str) -> Result<()> {
    let corpus = open_corpus(settings)?;
    let books = corpus.booklist()?;

    for line in format(&books, filter, settings.padding) {
        println!("{line}");
    }
    Ok(())
}

/// `Name (chapters)` lines for books whose name contains `filter`,
/// ignoring case.
pub fn format(books: &[BookEntry], filter: &str, padding: usize) -> Vec<String> {
    let filter = filter.to_lowercase();
    let pad = " ".repeat(padding);

    books
        .iter()
        .filter(|book| book.name.to_lowercase().contains(&filter))
        .map(|book| format!("{pad}{book}"))
        .collect()
}
