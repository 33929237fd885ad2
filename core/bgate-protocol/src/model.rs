use crate::book::Book;
use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A resolved book + chapter (+ verse). `verse: None` means the whole chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Reference {
    pub book: Book,
    pub chapter: u32,
    pub verse: Option<u32>,
}

impl Reference {
    pub const fn chapter(book: Book, chapter: u32) -> Self {
        Self { book, chapter, verse: None }
    }

    pub const fn verse(book: Book, chapter: u32, verse: u32) -> Self {
        Self { book, chapter, verse: Some(verse) }
    }

    pub const fn has_verse(&self) -> bool {
        self.verse.is_some()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verse {
            Some(verse) => write!(f, "{} {}:{}", self.book, self.chapter, verse),
            None => write!(f, "{} {}", self.book, self.chapter),
        }
    }
}

/// What a corpus is asked for.
///
/// A `Span` is bounded by corpus sequence position, never by comparing
/// book/chapter/verse numbers, because canonical order is not numeric
/// across books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum RangeQuery {
    Point(Reference),
    Span { start: Reference, end: Reference },
}

/// Renders the compact search string a passage service understands:
/// `John 3:16`, `John 3:1-5`, `John 3:1-4:5`, `1 John 1-2`, `Genesis 50 - Exodus 2`.
impl fmt::Display for RangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = match self {
            RangeQuery::Point(reference) => return write!(f, "{}", reference),
            RangeQuery::Span { start, end } => (start, end),
        };

        // "John 3:1-4" would read as verses 1-4, so spell the end out
        let ambiguous = start.verse.is_some() && end.verse.is_none();
        if start.book != end.book || ambiguous {
            return write!(f, "{} - {}", start, end);
        }

        write!(f, "{}-", start)?;
        match end.verse {
            Some(verse) if end.chapter == start.chapter => write!(f, "{}", verse),
            Some(verse) => write!(f, "{}:{}", end.chapter, verse),
            None => write!(f, "{}", end.chapter),
        }
    }
}

/// One stored row of verse text. A verse broken by inline markup is stored
/// as several records with increasing `part`, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub part: u32,
    pub text: String,
    pub title: Option<String>,
}

impl VerseRecord {
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }

    pub fn is_first_part(&self) -> bool {
        self.part == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct BookEntry {
    pub name: String,
    pub chapters: u32,
}

impl fmt::Display for BookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chapters)
    }
}
