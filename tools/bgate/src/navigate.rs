use bgate_protocol::{BookEntry, VerseRecord};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("book not found in book list: {0}")]
    BookNotFound(String),
}

/// A chapter to read next, as a query the parser accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub book: String,
    pub chapter: u32,
}

impl Chapter {
    pub fn query(&self) -> String {
        format!("{} {}", self.book, self.chapter)
    }
}

fn position(books: &[BookEntry], name: &str) -> Result<usize, NavigationError> {
    books
        .iter()
        .position(|entry| entry.name == name)
        .ok_or_else(|| NavigationError::BookNotFound(name.to_string()))
}

/// The chapter after the one `last` belongs to. Past the end of the last
/// book this wraps to the first chapter of the first book.
pub fn next_chapter(books: &[BookEntry], last: &VerseRecord) -> Result<Chapter, NavigationError> {
    let index = position(books, &last.book)?;

    if last.chapter < books[index].chapters {
        return Ok(Chapter { book: last.book.clone(), chapter: last.chapter + 1 });
    }

    let next = &books[(index + 1) % books.len()];
    Ok(Chapter { book: next.name.clone(), chapter: 1 })
}

/// The chapter before the one `first` belongs to. Before the first chapter
/// of the first book this wraps to the last chapter of the last book.
pub fn previous_chapter(books: &[BookEntry], first: &VerseRecord) -> Result<Chapter, NavigationError> {
    let index = position(books, &first.book)?;

    if first.chapter > 1 {
        return Ok(Chapter { book: first.book.clone(), chapter: first.chapter - 1 });
    }

    let previous = &books[(index + books.len() - 1) % books.len()];
    Ok(Chapter { book: previous.name.clone(), chapter: previous.chapters })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> Vec<BookEntry> {
        [("Genesis", 50), ("Exodus", 40), ("Revelation", 22)]
            .into_iter()
            .map(|(name, chapters)| BookEntry { name: name.to_string(), chapters })
            .collect()
    }

    fn at(book: &str, chapter: u32) -> VerseRecord {
        VerseRecord {
            book: book.to_string(),
            chapter,
            verse: 1,
            part: 1,
            text: String::new(),
            title: None,
        }
    }

    fn chapter(book: &str, chapter: u32) -> Chapter {
        Chapter { book: book.to_string(), chapter }
    }

    #[test]
    fn test_next_within_and_across_books() {
        assert_eq!(next_chapter(&books(), &at("Genesis", 1)), Ok(chapter("Genesis", 2)));
        assert_eq!(next_chapter(&books(), &at("Genesis", 50)), Ok(chapter("Exodus", 1)));
    }

    #[test]
    fn test_next_wraps_to_start() {
        assert_eq!(next_chapter(&books(), &at("Revelation", 22)), Ok(chapter("Genesis", 1)));
    }

    #[test]
    fn test_previous_within_and_across_books() {
        assert_eq!(previous_chapter(&books(), &at("Exodus", 3)), Ok(chapter("Exodus", 2)));
        assert_eq!(previous_chapter(&books(), &at("Exodus", 1)), Ok(chapter("Genesis", 50)));
    }

    #[test]
    fn test_previous_wraps_to_end() {
        assert_eq!(previous_chapter(&books(), &at("Genesis", 1)), Ok(chapter("Revelation", 22)));
    }

    #[test]
    fn test_unknown_book() {
        let err = NavigationError::BookNotFound("Tobit".to_string());
        assert_eq!(next_chapter(&books(), &at("Tobit", 1)), Err(err.clone()));
        assert_eq!(previous_chapter(&books(), &at("Tobit", 1)), Err(err));
        assert_eq!(next_chapter(&[], &at("Genesis", 1)), Err(NavigationError::BookNotFound("Genesis".to_string())));
    }

    #[test]
    fn test_query_text() {
        assert_eq!(chapter("1 John", 4).query(), "1 John 4");
    }
}
