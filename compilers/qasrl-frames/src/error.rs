use qasrl_protocol::{DecodeError, MissingFieldError, ProtocolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("record {qasrl_id} / '{question}' cannot build a question: {source}")]
    Question {
        qasrl_id: String,
        question: String,
        #[source]
        source: MissingFieldError,
    },

    #[error("record {qasrl_id} / '{question}' has an unreadable answer range: {source}")]
    Decode {
        qasrl_id: String,
        question: String,
        #[source]
        source: DecodeError,
    },

    #[error("span {start}:{end} is outside a sentence of {len} tokens")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
