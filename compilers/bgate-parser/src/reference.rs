use bgate_protocol::{Book, Reference};

use crate::abbreviations;
use crate::error::QueryError;
use crate::token::{Token, TokenKind};

/// Result of one grammar step: the parsed value plus the unconsumed tokens.
pub type Step<'t, 'a, T> = Result<(T, &'t [Token<'a>]), QueryError>;

/// `Book Chapter (":" Verse)?`, in that fixed order.
pub fn parse_reference<'t, 'a>(tokens: &'t [Token<'a>]) -> Step<'t, 'a, Reference> {
    let (book, rest) = parse_book(tokens)?;
    let (chapter, rest) = parse_chapter(rest)?;
    let (verse, rest) = parse_verse(rest)?;

    Ok((Reference { book, chapter, verse }, rest))
}

/// True when the tokens open with something `parse_book` would attempt:
/// a word, or a number directly followed by a word ("1 john").
pub fn starts_book(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [Token { kind: TokenKind::Word, .. }, ..]
            | [Token { kind: TokenKind::Number, .. }, Token { kind: TokenKind::Word, .. }, ..]
    )
}

/// Looks the leading word (or number + word) up in the abbreviation table.
///
/// Consecutive words are joined before lookup and the longest joined run that
/// names a book wins, so "song of songs" resolves even though "song" alone is
/// also a spelling. With a single word this is exactly a direct lookup.
pub fn parse_book<'t, 'a>(tokens: &'t [Token<'a>]) -> Step<'t, 'a, Book> {
    let (prefix, words) = match tokens {
        [Token { kind: TokenKind::Number, value }, rest @ ..] => (*value, rest),
        _ => ("", tokens),
    };

    let run = words
        .iter()
        .take_while(|token| token.kind == TokenKind::Word)
        .count();
    if run == 0 {
        let attempted = tokens.first().map(|token| token.value).unwrap_or_default();
        return Err(QueryError::BookNotFound(attempted.to_string()));
    }

    for len in (1..=run).rev() {
        let key = spelling(prefix, &words[..len]);
        if let Some(book) = abbreviations::lookup(&key) {
            return Ok((book, &words[len..]));
        }
    }

    Err(QueryError::BookNotFound(spelling(prefix, &words[..1])))
}

fn spelling(prefix: &str, words: &[Token]) -> String {
    let mut key = String::from(prefix);
    for word in words {
        key.push_str(word.value);
    }
    key
}

pub fn parse_chapter<'t, 'a>(tokens: &'t [Token<'a>]) -> Step<'t, 'a, u32> {
    match tokens {
        [Token { kind: TokenKind::Number, value }, rest @ ..] => {
            let chapter = positive(value).ok_or(QueryError::InvalidChapter)?;
            Ok((chapter, rest))
        }
        _ => Err(QueryError::InvalidChapter),
    }
}

/// Optional `':' Number`. No colon means a whole-chapter reference.
pub fn parse_verse<'t, 'a>(tokens: &'t [Token<'a>]) -> Step<'t, 'a, Option<u32>> {
    match tokens {
        [Token { kind: TokenKind::Colon, .. }, rest @ ..] => match rest {
            [Token { kind: TokenKind::Number, value }, rest @ ..] => {
                let verse = positive(value).ok_or(QueryError::InvalidVerse)?;
                Ok((Some(verse), rest))
            }
            _ => Err(QueryError::InvalidVerse),
        },
        _ => Ok((None, tokens)),
    }
}

/// Decimal digit run as a strictly positive `u32`. Leading zeros are plain
/// decimal; zero, overflow and non-ASCII digits are rejected.
pub(crate) fn positive(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}
