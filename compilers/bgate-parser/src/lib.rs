pub mod abbreviations;
pub mod error;
pub mod range;
pub mod reference;
pub mod token;

use bgate_protocol::RangeQuery;
use tracing::debug;

pub use crate::abbreviations::resolve_name;
pub use crate::error::QueryError;
pub use crate::range::resolve;
pub use crate::reference::parse_reference;
pub use crate::token::{tokenize, Token, TokenKind};

/// Primary entry point: free-form reference text -> `RangeQuery`.
///
/// Case and surrounding whitespace are normalized here; the tokenizer and
/// grammar only ever see lower-case input.
pub fn parse_query(query: &str) -> Result<RangeQuery, QueryError> {
    let normalized = query.trim().to_lowercase();

    let tokens = tokenize(&normalized)?;
    debug!(?tokens, "tokenized query");

    let (first, tail) = parse_reference(&tokens)?;
    let range = resolve(first, tail)?;
    debug!(%range, "resolved query");

    Ok(range)
}
