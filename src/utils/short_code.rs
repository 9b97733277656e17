//! Base62 short code codec.
//!
//! Short codes are the positional base62 rendering of a URL record's numeric
//! identifier. They are never stored: the redirect handler decodes the code
//! back into the identifier and the listing endpoints re-encode identifiers
//! when rendering short URLs.

use thiserror::Error;

/// Digits of the numeral system, in value order.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const BASE: u64 = ALPHABET.len() as u64;

/// Placeholder domain used when the caller does not supply one.
///
/// Deployments set `SHORT_URL_DOMAIN` instead of relying on this value.
pub const DEFAULT_SHORT_DOMAIN: &str = "short.url";

/// Path segment between the domain and the code in a rendered short URL.
const REDIRECT_PATH: &str = "/r/";

/// Error returned when a string cannot be decoded as a short code.
///
/// Callers resolving redirects treat every variant as "not found": a
/// malformed code is indistinguishable from one that was never issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidShortCode {
    #[error("Invalid character in short code: {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Short code is empty")]
    Empty,

    #[error("Short code exceeds the identifier range")]
    Overflow,
}

/// Encodes an identifier as a base62 short code.
///
/// Zero encodes to the first alphabet character rather than an empty string.
/// No padding is added, so the code is `ceil(log62(id + 1))` characters long.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::short_code::encode;
///
/// assert_eq!(encode(0), "A");
/// assert_eq!(encode(61), "9");
/// assert_eq!(encode(62), "BA");
/// ```
pub fn encode(id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // u64::MAX needs 11 base62 digits.
    let mut digits = Vec::with_capacity(11);
    let mut remaining = id;
    while remaining > 0 {
        digits.push(ALPHABET[(remaining % BASE) as usize]);
        remaining /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a short code back into its identifier.
///
/// # Errors
///
/// - [`InvalidShortCode::Empty`] for an empty string
/// - [`InvalidShortCode::InvalidCharacter`] naming the first character outside
///   the alphabet
/// - [`InvalidShortCode::Overflow`] if the value does not fit in `u64`
pub fn decode(code: &str) -> Result<u64, InvalidShortCode> {
    if code.is_empty() {
        return Err(InvalidShortCode::Empty);
    }

    code.chars()
        .enumerate()
        .try_fold(0u64, |id, (position, character)| {
            let digit = digit_value(character).ok_or(InvalidShortCode::InvalidCharacter {
                character,
                position,
            })?;

            id.checked_mul(BASE)
                .and_then(|shifted| shifted.checked_add(digit))
                .ok_or(InvalidShortCode::Overflow)
        })
}

/// Builds the public short URL for an identifier.
///
/// `domain` falls back to [`DEFAULT_SHORT_DOMAIN`] when `None`; production
/// callers pass the configured domain. A trailing slash on the domain is
/// ignored.
pub fn build_short_url(id: u64, domain: Option<&str>) -> String {
    let domain = domain.unwrap_or(DEFAULT_SHORT_DOMAIN);
    format!(
        "{}{}{}",
        domain.trim_end_matches('/'),
        REDIRECT_PATH,
        encode(id)
    )
}

fn digit_value(character: char) -> Option<u64> {
    let value = match character {
        'A'..='Z' => character as u64 - 'A' as u64,
        'a'..='z' => character as u64 - 'a' as u64 + 26,
        '0'..='9' => character as u64 - '0' as u64 + 52,
        _ => return None,
    };
    Some(value)
}
