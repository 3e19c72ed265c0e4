//! Locality search-term validation.
//!
//! # Responsibility
//! - Enforce minimum length and allowed characters for locality terms.
//! - Render the user-facing validation messages.
//!
//! # Invariants
//! - Length is checked before the character class; first failure wins.
//! - Length counts characters, not bytes.
//! - Digits are rejected; postcode-number search is not supported.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shortest accepted locality term.
pub const MIN_LOCALITY_LENGTH: usize = 3;

static LOCALITY_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ,'-]+$").expect("valid locality term regex"));

/// Rejected locality term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalityQueryError {
    TooShort { min: usize, term: String },
    InvalidCharacters { term: String },
}

impl Display for LocalityQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { min, term } => {
                write!(f, "Must have at least {min} characters: {}", quote_term(term))
            }
            Self::InvalidCharacters { term } => write!(
                f,
                "{} is invalid. Accept only letters, space, hyphen and single quote characters.",
                quote_term(term)
            ),
        }
    }
}

impl Error for LocalityQueryError {}

/// Validates a raw locality term.
pub fn validate_locality_term(term: &str) -> Result<(), LocalityQueryError> {
    if term.chars().count() < MIN_LOCALITY_LENGTH {
        return Err(LocalityQueryError::TooShort {
            min: MIN_LOCALITY_LENGTH,
            term: term.to_string(),
        });
    }

    if !LOCALITY_TERM_RE.is_match(term) {
        return Err(LocalityQueryError::InvalidCharacters {
            term: term.to_string(),
        });
    }

    Ok(())
}

/// Quotes a term for messages: `'term'`, or `"term"` when it holds a
/// single quote but no double quote.
///
/// Backslashes, the active quote and control characters are escaped
/// (`\t`, `\n`, `\r`, otherwise `\xNN`).
pub fn quote_term(term: &str) -> String {
    let quote = if term.contains('\'') && !term.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(term.len() + 2);
    quoted.push(quote);
    for ch in term.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\t' => quoted.push_str("\\t"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c if c == quote => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push(quote);
    quoted
}
