use core::fmt;
use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::ProtocolError;

/// Half-open token span `[start, end)` into an externally owned sentence.
///
/// `start <= end` always holds; `start == end` is a valid empty span.
///
/// Not archived directly: archives store the encoded `answer_range` text,
/// and spans only come back through [`crate::decode_answer_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(usize, usize)", into = "(usize, usize)"))]
pub struct Argument {
    start: usize,
    end: usize,
}

impl Argument {
    pub fn new(start: usize, end: usize) -> Result<Self, ProtocolError> {
        if start > end {
            return Err(ProtocolError::ReversedSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl TryFrom<(usize, usize)> for Argument {
    type Error = ProtocolError;

    fn try_from((start, end): (usize, usize)) -> Result<Self, Self::Error> {
        Argument::new(start, end)
    }
}

impl From<Argument> for (usize, usize) {
    fn from(arg: Argument) -> (usize, usize) {
        (arg.start, arg.end)
    }
}

/// Same shape as one `range-item` of the encoded field.
impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_reversed_span_rejected() {
        assert_eq!(
            Argument::new(5, 2),
            Err(ProtocolError::ReversedSpan { start: 5, end: 2 })
        );
        assert!(Argument::try_from((9, 8)).is_err());
    }

    #[test]
    fn test_empty_span_allowed() {
        let arg = Argument::new(4, 4).unwrap();
        assert!(arg.is_empty());
        assert_eq!(arg.len(), 0);
        assert_eq!(arg.as_range(), 4..4);
    }

    #[test]
    fn test_display_matches_range_item() {
        let arg = Argument::new(3, 4).unwrap();
        assert_eq!(arg.to_string(), "3:4");
        assert_eq!(<(usize, usize)>::from(arg), (3, 4));
    }
}
