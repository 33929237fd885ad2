use bgate_protocol::{Book, RangeQuery, Reference};

use crate::error::QueryError;
use crate::reference::{parse_book, parse_chapter, parse_verse, starts_book, Step};
use crate::token::{Token, TokenKind};

/// Right-hand side of a dash, before it is completed against the left side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    /// A chapter was written out, optionally with a book and a verse.
    Explicit { book: Option<Book>, chapter: u32, verse: Option<u32> },
    /// A bare number: a verse if the left side has one, a chapter otherwise.
    Bare(u32),
    /// `:N` with no chapter.
    VerseOnly(u32),
}

/// Turns the first reference and whatever followed it into a `RangeQuery`.
///
/// No tail gives a `Point`. A tail must be `'-'` followed by a continuation,
/// completed by this table (first matching row wins):
///
/// | left verse | right chapter | right verse | end                                  |
/// |------------|---------------|-------------|--------------------------------------|
/// | yes        | no            | yes         | left book + chapter, right verse     |
/// | yes        | yes           | yes         | right book (or left), chapter, verse |
/// | any        | yes           | no          | right book (or left), chapter        |
///
/// Anything else is `InvalidRangeContinuation`. The two ends are never
/// compared; ordering belongs to the corpus.
pub fn resolve(first: Reference, tail: &[Token]) -> Result<RangeQuery, QueryError> {
    let rest = match tail {
        [] => return Ok(RangeQuery::Point(first)),
        [Token { kind: TokenKind::Dash, .. }, rest @ ..] => rest,
        _ => return Err(QueryError::InvalidRangeContinuation),
    };

    let (continuation, rest) = parse_continuation(rest)?;
    if !rest.is_empty() {
        return Err(QueryError::InvalidRangeContinuation);
    }

    let end = complete(&first, continuation)?;
    Ok(RangeQuery::Span { start: first, end })
}

fn parse_continuation<'t, 'a>(tokens: &'t [Token<'a>]) -> Step<'t, 'a, Continuation> {
    if starts_book(tokens) {
        let (book, rest) = parse_book(tokens)?;
        // A missing chapter is an unfinished range, not a bad chapter
        let (chapter, rest) = match rest {
            [Token { kind: TokenKind::Number, .. }, ..] => parse_chapter(rest)?,
            _ => return Err(QueryError::InvalidRangeContinuation),
        };
        let (verse, rest) = parse_verse(rest)?;
        return Ok((Continuation::Explicit { book: Some(book), chapter, verse }, rest));
    }

    match tokens {
        [Token { kind: TokenKind::Number, .. }, Token { kind: TokenKind::Colon, .. }, ..] => {
            let (chapter, rest) = parse_chapter(tokens)?;
            let (verse, rest) = parse_verse(rest)?;
            Ok((Continuation::Explicit { book: None, chapter, verse }, rest))
        }
        [Token { kind: TokenKind::Number, value }, rest @ ..] => {
            // Zero is rejected later, once we know whether it is a chapter or a verse
            let n = value.parse::<u32>().unwrap_or(0);
            Ok((Continuation::Bare(n), rest))
        }
        [Token { kind: TokenKind::Colon, .. }, ..] => match parse_verse(tokens)? {
            (Some(verse), rest) => Ok((Continuation::VerseOnly(verse), rest)),
            (None, _) => Err(QueryError::InvalidVerse),
        },
        _ => Err(QueryError::InvalidRangeContinuation),
    }
}

fn complete(first: &Reference, continuation: Continuation) -> Result<Reference, QueryError> {
    let left_has_verse = first.has_verse();

    match continuation {
        Continuation::Bare(n) if left_has_verse => {
            let verse = nonzero(n).ok_or(QueryError::InvalidVerse)?;
            Ok(Reference::verse(first.book, first.chapter, verse))
        }
        Continuation::Bare(n) => {
            let chapter = nonzero(n).ok_or(QueryError::InvalidChapter)?;
            Ok(Reference::chapter(first.book, chapter))
        }
        Continuation::VerseOnly(verse) if left_has_verse => {
            Ok(Reference::verse(first.book, first.chapter, verse))
        }
        Continuation::Explicit { book, chapter, verse: Some(verse) } if left_has_verse => {
            Ok(Reference::verse(book.unwrap_or(first.book), chapter, verse))
        }
        Continuation::Explicit { book, chapter, verse: None } => {
            Ok(Reference::chapter(book.unwrap_or(first.book), chapter))
        }
        _ => Err(QueryError::InvalidRangeContinuation),
    }
}

fn nonzero(n: u32) -> Option<u32> {
    Some(n).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::parse_reference;
    use crate::token::tokenize;

    fn run(query: &str) -> Result<RangeQuery, QueryError> {
        let tokens = tokenize(query)?;
        let (first, tail) = parse_reference(&tokens)?;
        resolve(first, tail)
    }

    fn span(start: Reference, end: Reference) -> RangeQuery {
        RangeQuery::Span { start, end }
    }

    #[test]
    fn test_point() {
        assert_eq!(run("1john1:1"), Ok(RangeQuery::Point(Reference::verse(Book::FirstJohn, 1, 1))));
        assert_eq!(run("ps 23"), Ok(RangeQuery::Point(Reference::chapter(Book::Psalms, 23))));
    }

    #[test]
    fn test_chapter_to_chapter() {
        assert_eq!(
            run("1john1-2"),
            Ok(span(Reference::chapter(Book::FirstJohn, 1), Reference::chapter(Book::FirstJohn, 2)))
        );
    }

    #[test]
    fn test_verse_to_verse_same_chapter() {
        assert_eq!(
            run("john3:1-5"),
            Ok(span(Reference::verse(Book::John, 3, 1), Reference::verse(Book::John, 3, 5)))
        );
        assert_eq!(
            run("john 3:1 - :5"),
            Ok(span(Reference::verse(Book::John, 3, 1), Reference::verse(Book::John, 3, 5)))
        );
    }

    #[test]
    fn test_verse_to_verse_across_chapters() {
        assert_eq!(
            run("john3:1-4:5"),
            Ok(span(Reference::verse(Book::John, 3, 1), Reference::verse(Book::John, 4, 5)))
        );
    }

    #[test]
    fn test_across_books() {
        assert_eq!(
            run("gen 50 - exodus 2"),
            Ok(span(Reference::chapter(Book::Genesis, 50), Reference::chapter(Book::Exodus, 2)))
        );
        assert_eq!(
            run("mal 4:5 - matt 1:2"),
            Ok(span(Reference::verse(Book::Malachi, 4, 5), Reference::verse(Book::Matthew, 1, 2)))
        );
        assert_eq!(
            run("2 john 1 - 3 john 1"),
            Ok(span(Reference::chapter(Book::SecondJohn, 1), Reference::chapter(Book::ThirdJohn, 1)))
        );
    }

    #[test]
    fn test_verse_to_whole_chapter() {
        // Explicit book makes the right side a chapter even though the left has a verse
        assert_eq!(
            run("john 3:16 - john 4"),
            Ok(span(Reference::verse(Book::John, 3, 16), Reference::chapter(Book::John, 4)))
        );
    }

    #[test]
    fn test_verse_without_chapter_after_chapter() {
        assert_eq!(run("john 3 - :5"), Err(QueryError::InvalidRangeContinuation));
    }

    #[test]
    fn test_chapter_to_verse_not_listed() {
        assert_eq!(run("john 3-4:5"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3 - acts 2:1"), Err(QueryError::InvalidRangeContinuation));
    }

    #[test]
    fn test_incomplete_continuations() {
        assert_eq!(run("john 3-"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3 - acts"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3 -- 4"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3:1 - 4:"), Err(QueryError::InvalidVerse));
        assert_eq!(run("john 3:1 - :"), Err(QueryError::InvalidVerse));
        assert_eq!(run("john 3 - xyz 4"), Err(QueryError::BookNotFound("xyz".to_string())));
    }

    #[test]
    fn test_zero_on_the_right() {
        assert_eq!(run("john 3:1-0"), Err(QueryError::InvalidVerse));
        assert_eq!(run("john 3-0"), Err(QueryError::InvalidChapter));
        // Same error whether or not the book is repeated
        assert_eq!(run("john 3 - acts 0"), Err(QueryError::InvalidChapter));
        assert_eq!(run("john 3:1 - acts 0:1"), Err(QueryError::InvalidChapter));
        assert_eq!(run("john 3 - acts 99999999999"), Err(QueryError::InvalidChapter));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(run("john 3:16 17"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3:16 :"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3-4 5"), Err(QueryError::InvalidRangeContinuation));
        assert_eq!(run("john 3-4-5"), Err(QueryError::InvalidRangeContinuation));
    }
}
