//! Whitespace flattening.

use super::ParseError;

/// Remove every whitespace character and line break.
///
/// The roster layout is positional once whitespace is gone, so every later
/// pattern works on this single run of text.
pub fn normalize(raw: Option<&str>) -> Result<String, ParseError> {
    let text: String = raw
        .ok_or(ParseError::EmptyInput)?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    Ok(text)
}
