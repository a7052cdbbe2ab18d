//! The `~!~` field encoding used by the QA-SRL tabular format.
//!
//! One field packs either a list of answer strings or a list of spans.
//! The two shapes have separate encode/decode pairs on purpose: a range
//! field must never be read as plain strings or the other way around.
//!
//! ```text
//! encoded      = item *( SEP item )
//! SEP          = "~!~"
//! range-item   = start ":" end
//! string-item  = *CHAR            ; never contains SEP
//! ```
//!
//! The empty string is the empty list for both shapes. There is no escaping.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};

use crate::argument::Argument;
use crate::error::{DecodeError, EncodeError};

/// Separates list items inside one encoded field.
pub const SEPARATOR: &str = "~!~";

/// Joins answer strings with [`SEPARATOR`].
///
/// Rejects any list that would not decode back to itself: an item holding
/// the separator, or items whose edges combine into one (`"a~!"`, `"~b"`),
/// or a lone empty item.
pub fn encode_answers<S: AsRef<str>>(items: &[S]) -> Result<String, EncodeError> {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();

    if let Some(index) = items.iter().position(|item| item.contains(SEPARATOR)) {
        return Err(EncodeError::ContainsSeparator { index });
    }

    let encoded = items.join(SEPARATOR);

    let pieces = split(&encoded);
    if pieces != items {
        let index = pieces
            .iter()
            .zip(&items)
            .position(|(piece, item)| piece != item)
            .unwrap_or_else(|| pieces.len().min(items.len()));
        return Err(EncodeError::Ambiguous { index });
    }

    Ok(encoded)
}

/// Splits an encoded answer field back into its strings.
pub fn decode_answers(encoded: &str) -> Vec<String> {
    split(encoded).into_iter().map(ToString::to_string).collect()
}

/// Renders each span as `<start>:<end>` and joins with [`SEPARATOR`].
pub fn encode_answer_ranges(items: &[Argument]) -> String {
    items
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(SEPARATOR)
}

/// Parses an encoded range field. Any malformed piece fails the whole field.
pub fn decode_answer_ranges(encoded: &str) -> Result<Vec<Argument>, DecodeError> {
    split(encoded)
        .into_iter()
        .enumerate()
        .map(|(index, piece)| {
            let (_, (start, end)) = all_consuming(range_item)(piece).map_err(|_| {
                DecodeError::Malformed {
                    index,
                    piece: piece.to_string(),
                }
            })?;
            Argument::new(start, end).map_err(|_| DecodeError::Reversed { index, start, end })
        })
        .collect()
}

fn split(encoded: &str) -> Vec<&str> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded.split(SEPARATOR).collect()
}

fn offset(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn range_item(input: &str) -> IResult<&str, (usize, usize)> {
    separated_pair(offset, char(':'), offset)(input)
}
