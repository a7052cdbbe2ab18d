use alloc::string::String;
use core::fmt;

/// A required question slot was never supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFieldError {
    pub field: &'static str,
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required field '{}'", self.field)
    }
}

/// Failure to pack a list of answer strings into one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The item at `index` contains the separator itself.
    ContainsSeparator { index: usize },
    /// The joined string would not split back into the same items.
    Ambiguous { index: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::ContainsSeparator { index } => {
                write!(f, "answer {} contains the answer separator", index)
            }
            EncodeError::Ambiguous { index } => {
                write!(f, "answer {} would not survive separator encoding", index)
            }
        }
    }
}

/// Failure to unpack an encoded answer-range field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Piece `index` is not `<start>:<end>` with two unsigned integers.
    Malformed { index: usize, piece: String },
    /// Piece `index` parsed, but `start > end`.
    Reversed { index: usize, start: usize, end: usize },
    /// The field decoded to no spans where at least one is required.
    Empty,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed { index, piece } => {
                write!(f, "malformed answer range {} at position {}", piece, index)
            }
            DecodeError::Reversed { index, start, end } => write!(
                f,
                "answer range at position {} ends before it starts ({}:{})",
                index, start, end
            ),
            DecodeError::Empty => write!(f, "answer range field holds no spans"),
        }
    }
}

/// Errors raised while constructing protocol values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    MissingField(MissingFieldError),
    Encode(EncodeError),
    Decode(DecodeError),
    ReversedSpan { start: usize, end: usize },
    /// Alternative `index` of a role has no spans.
    EmptyAnswer { index: usize },
    /// Slots offered for a record belong to a question with other text.
    QuestionMismatch { record: String, question: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MissingField(e) => e.fmt(f),
            ProtocolError::Encode(e) => e.fmt(f),
            ProtocolError::Decode(e) => e.fmt(f),
            ProtocolError::ReversedSpan { start, end } => {
                write!(f, "span ends before it starts ({}:{})", start, end)
            }
            ProtocolError::EmptyAnswer { index } => {
                write!(f, "answer {} of the role has no spans", index)
            }
            ProtocolError::QuestionMismatch { record, question } => write!(
                f,
                "slots of '{}' cannot describe the record question '{}'",
                question, record
            ),
        }
    }
}

impl From<MissingFieldError> for ProtocolError {
    fn from(e: MissingFieldError) -> Self {
        ProtocolError::MissingField(e)
    }
}

impl From<EncodeError> for ProtocolError {
    fn from(e: EncodeError) -> Self {
        ProtocolError::Encode(e)
    }
}

impl From<DecodeError> for ProtocolError {
    fn from(e: DecodeError) -> Self {
        ProtocolError::Decode(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MissingFieldError {}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::MissingField(e) => Some(e),
            ProtocolError::Encode(e) => Some(e),
            ProtocolError::Decode(e) => Some(e),
            _ => None,
        }
    }
}
