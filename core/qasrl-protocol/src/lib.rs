#![no_std] // No runtime requirements beyond an allocator

#[cfg_attr(test, macro_use)]
extern crate alloc;

// Enable std for error trait impls and for tests
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod argument;
pub mod encoding;
pub mod error;
pub mod question;
pub mod record;
pub mod role;

// Re-export core types for convenience
pub use argument::Argument;
pub use encoding::{
    decode_answer_ranges, decode_answers, encode_answer_ranges, encode_answers, SEPARATOR,
};
pub use error::{DecodeError, EncodeError, MissingFieldError, ProtocolError};
pub use question::{Question, QuestionBuilder, QuestionFlags, QuestionSlots, QUESTION_FIELDS};
pub use record::{QuestionAnswer, RecordArchive};
pub use role::Role;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_archived_reversed_range_still_rejected() {
        // Spans are archived as text, so the decoder re-checks start <= end
        let mut qa = QuestionAnswer::new("id", 0, "ran", "Who ran?", "Bob", "0:1").unwrap();
        qa.answer_range = "5:2".to_string();

        let bytes = to_bytes::<_, 256>(&qa).expect("Failed to serialize QuestionAnswer");
        let deserialized: QuestionAnswer =
            from_bytes(&bytes).expect("Failed to deserialize QuestionAnswer");

        assert_eq!(
            deserialized.arguments(),
            Err(DecodeError::Reversed { index: 0, start: 5, end: 2 })
        );
    }

    #[test]
    fn test_record_archive() {
        // Optional columns must come back as None, not as empty strings
        let qa = QuestionAnswer::new("wiki1:0:3", 4, "ate", "Who ate?", "The cat", "0:2")
            .unwrap()
            .with_verb_form("past");
        let archive = RecordArchive::new(vec![qa]);

        let bytes = to_bytes::<_, 1024>(&archive).expect("Failed to serialize RecordArchive");
        let deserialized: RecordArchive =
            from_bytes(&bytes).expect("Failed to deserialize RecordArchive");

        assert_eq!(deserialized, archive);
        assert_eq!(deserialized.version, RecordArchive::VERSION);
        assert_eq!(deserialized.records[0].wh, None);
        assert_eq!(deserialized.records[0].verb_form.as_deref(), Some("past"));
    }

    #[test]
    fn test_archived_record_reads_without_copy() {
        let qa = QuestionAnswer::new("id", 0, "ran", "Who ran?", "Bob", "0:1~!~4:5").unwrap();
        let bytes = to_bytes::<_, 256>(&RecordArchive::new(vec![qa])).unwrap();

        let archived = rkyv::check_archived_root::<RecordArchive>(&bytes).unwrap();
        let spans = decode_answer_ranges(archived.records[0].answer_range.as_str()).unwrap();
        assert_eq!(spans.len(), 2);
    }
}
