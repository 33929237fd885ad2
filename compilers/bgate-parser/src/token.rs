use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::map,
    IResult,
};
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Contiguous run of digits
    Number,
    /// Contiguous run of letters
    Word,
    Colon,
    Dash,
}

/// A typed slice of the query. Equality ignores position, so whitespace
/// between tokens never changes a token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, value: &'a str) -> Self {
        Self { kind, value }
    }
}

/// Decimal digits only (`Nd`): fractions, superscripts and roman numerals
/// are not digits.
fn is_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

/// Letters only (`L*`): letter-like numbers and combining marks are not.
fn is_letter(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

fn scan_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(take_while1(is_digit), |s| Token::new(TokenKind::Number, s)),
        map(take_while1(is_letter), |s| Token::new(TokenKind::Word, s)),
        map(char(':'), |_| Token::new(TokenKind::Colon, ":")),
        map(char('-'), |_| Token::new(TokenKind::Dash, "-")),
    ))(input)
}

/// Splits a trimmed, lower-cased query into tokens.
///
/// Whitespace separates nothing: `"1 john 1:1"` and `"1john1:1"` produce the
/// same sequence. Any rune that is not whitespace, a letter, a digit, `:` or
/// `-` rejects the whole query.
pub fn tokenize(query: &str) -> Result<Vec<Token<'_>>, QueryError> {
    let mut input = query;
    let mut tokens = Vec::new();

    loop {
        // 1. Skip whitespace (Unicode-aware, unlike multispace0)
        let (rest, _) = match whitespace(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = rest;

        if input.is_empty() {
            break;
        }

        // 2. Maximal munch on the next token
        match scan_token(input) {
            Ok((rest, token)) => {
                tokens.push(token);
                input = rest;
            }
            Err(_) => {
                let offset = query.len() - input.len();
                let ch = input.chars().next().unwrap_or('\0');
                return Err(QueryError::InvalidCharacter { ch, offset });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_numbered_book_verse() {
        let tokens = tokenize("1john1:1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(Number, "1"),
                Token::new(Word, "john"),
                Token::new(Number, "1"),
                Token::new(Colon, ":"),
                Token::new(Number, "1"),
            ]
        );
    }

    #[test]
    fn test_dash_range() {
        let tokens = tokenize("1john1-2").unwrap();
        assert_eq!(kinds(&tokens), vec![Number, Word, Number, Dash, Number]);
        assert_eq!(tokens[4].value, "2");
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        assert_eq!(tokenize("1 john 1:1").unwrap(), tokenize("1john1:1").unwrap());
        assert_eq!(tokenize("john 3 : 1 - 4 : 5").unwrap(), tokenize("john3:1-4:5").unwrap());
    }

    #[test]
    fn test_maximal_munch() {
        let tokens = tokenize("psalm119:176").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(Word, "psalm"),
                Token::new(Number, "119"),
                Token::new(Colon, ":"),
                Token::new(Number, "176"),
            ]
        );
    }

    #[test]
    fn test_unicode_letters() {
        let tokens = tokenize("ésaïe 53").unwrap();
        assert_eq!(tokens[0], Token::new(Word, "ésaïe"));
        assert_eq!(tokens[1], Token::new(Number, "53"));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            tokenize("john 3.16"),
            Err(QueryError::InvalidCharacter { ch: '.', offset: 6 })
        );
        assert_eq!(
            tokenize("john 3:16, 17"),
            Err(QueryError::InvalidCharacter { ch: ',', offset: 9 })
        );
    }

    #[test]
    fn test_non_digit_numerals() {
        assert_eq!(tokenize("john ½"), Err(QueryError::InvalidCharacter { ch: '½', offset: 5 }));
        assert_eq!(tokenize("john 3:²"), Err(QueryError::InvalidCharacter { ch: '²', offset: 7 }));
        assert!(matches!(tokenize("ps Ⅻ"), Err(QueryError::InvalidCharacter { ch: 'Ⅻ', .. })));
        // Combining acute accent after a plain "e"
        assert!(matches!(tokenize("e\u{301}saie 53"), Err(QueryError::InvalidCharacter { .. })));
    }

    #[test]
    fn test_other_decimal_digits() {
        // Arabic-Indic digits are decimal digits, so they still form a Number
        let tokens = tokenize("john ٣").unwrap();
        assert_eq!(tokens[1], Token::new(Number, "٣"));
    }
}
