use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::argument::Argument;
use crate::encoding;
use crate::error::{DecodeError, EncodeError, MissingFieldError, ProtocolError};
use crate::question::{Question, QuestionBuilder};

/// One row of the qasrl-gs CSV convention: a question and one answer.
///
/// `answer` and `answer_range` hold the encoded forms (see [`encoding`]).
/// The optional slot columns are `None` when the question was never
/// decomposed; `Some("")` is a different, present value.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct QuestionAnswer {
    pub qasrl_id: String,
    pub verb_idx: usize,
    pub verb: String,
    pub question: String,
    pub answer: String,
    pub answer_range: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub verb_form: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub wh: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub aux: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub subj: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub obj: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub prep: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub obj2: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_negated: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_passive: Option<bool>,
}

impl QuestionAnswer {
    /// Deserialization path: fields arrive already encoded.
    ///
    /// `answer_range` must decode to at least one span. The answer text is
    /// taken as is; its item count is not compared with the range count.
    pub fn new(
        qasrl_id: impl Into<String>,
        verb_idx: usize,
        verb: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        answer_range: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        let record = Self {
            qasrl_id: qasrl_id.into(),
            verb_idx,
            verb: verb.into(),
            question: question.into(),
            answer: answer.into(),
            answer_range: answer_range.into(),
            verb_form: None,
            wh: None,
            aux: None,
            subj: None,
            obj: None,
            prep: None,
            obj2: None,
            is_negated: None,
            is_passive: None,
        };
        record.arguments()?;
        Ok(record)
    }

    /// Serialization path: encodes `answers` and `ranges` into the record.
    pub fn from_answers<S: AsRef<str>>(
        qasrl_id: impl Into<String>,
        verb_idx: usize,
        verb: impl Into<String>,
        question: impl Into<String>,
        answers: &[S],
        ranges: &[Argument],
    ) -> Result<Self, ProtocolError> {
        if ranges.is_empty() {
            return Err(DecodeError::Empty.into());
        }
        let answer = Self::encode_answers(answers)?;
        let answer_range = Self::encode_answer_ranges(ranges);
        Self::new(qasrl_id, verb_idx, verb, question, answer, answer_range)
    }

    pub fn encode_answers<S: AsRef<str>>(answers: &[S]) -> Result<String, EncodeError> {
        encoding::encode_answers(answers)
    }

    pub fn encode_answer_ranges(ranges: &[Argument]) -> String {
        encoding::encode_answer_ranges(ranges)
    }

    pub fn with_verb_form(mut self, verb_form: impl Into<String>) -> Self {
        self.verb_form = Some(verb_form.into());
        self
    }

    /// Copies every slot of `question` into the optional columns.
    ///
    /// The question text must be the record's `question` column.
    pub fn with_question(mut self, question: &Question) -> Result<Self, ProtocolError> {
        if question.text() != self.question {
            return Err(ProtocolError::QuestionMismatch {
                record: self.question,
                question: question.text().into(),
            });
        }
        self.wh = Some(question.wh().into());
        self.aux = Some(question.aux().into());
        self.subj = Some(question.subj().into());
        self.obj = Some(question.obj().into());
        self.prep = Some(question.prep().into());
        self.obj2 = Some(question.obj2().into());
        self.is_negated = Some(question.is_negated());
        self.is_passive = Some(question.is_passive());
        Ok(self)
    }

    pub fn answers(&self) -> Vec<String> {
        encoding::decode_answers(&self.answer)
    }

    /// Decoded spans of this answer; an empty field is an error here.
    pub fn arguments(&self) -> Result<Vec<Argument>, DecodeError> {
        let args = encoding::decode_answer_ranges(&self.answer_range)?;
        if args.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(args)
    }

    /// A builder preloaded with whichever slot columns are present.
    pub fn question_builder(&self) -> QuestionBuilder {
        let mut builder = QuestionBuilder::new(self.question.clone());
        builder.wh = self.wh.clone();
        builder.subj = self.subj.clone();
        builder.obj = self.obj.clone();
        builder.aux = self.aux.clone();
        builder.prep = self.prep.clone();
        builder.obj2 = self.obj2.clone();
        builder.is_passive = self.is_passive;
        builder.is_negated = self.is_negated;
        builder
    }

    pub fn to_question(&self) -> Result<Question, MissingFieldError> {
        self.question_builder().build()
    }

    /// True when any slot column is set.
    pub fn has_slots(&self) -> bool {
        self.wh.is_some()
            || self.aux.is_some()
            || self.subj.is_some()
            || self.obj.is_some()
            || self.prep.is_some()
            || self.obj2.is_some()
            || self.is_negated.is_some()
            || self.is_passive.is_some()
    }
}

/// Binary container written by the compiler tool.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RecordArchive {
    pub version: u32,
    pub records: Vec<QuestionAnswer>,
}

impl RecordArchive {
    pub const VERSION: u32 = 1;

    pub fn new(records: Vec<QuestionAnswer>) -> Self {
        Self {
            version: Self::VERSION,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionSlots;
    use alloc::string::ToString;

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    fn record() -> QuestionAnswer {
        QuestionAnswer::from_answers(
            "wiki1:0:3",
            4,
            "ate",
            "Who ate something?",
            &["The cat", "its owner"],
            &[arg(0, 2), arg(7, 9)],
        )
        .unwrap()
    }

    #[test]
    fn test_serialization_path() {
        let qa = record();
        assert_eq!(qa.answer, "The cat~!~its owner");
        assert_eq!(qa.answer_range, "0:2~!~7:9");
        assert_eq!(qa.answers(), vec!["The cat", "its owner"]);
        assert_eq!(qa.arguments().unwrap(), vec![arg(0, 2), arg(7, 9)]);
        assert!(!qa.has_slots());
    }

    #[test]
    fn test_deserialization_path_validates_ranges() {
        assert!(QuestionAnswer::new("id", 1, "ran", "Who ran?", "Bob", "0:1").is_ok());
        assert_eq!(
            QuestionAnswer::new("id", 1, "ran", "Who ran?", "", "").unwrap_err(),
            ProtocolError::Decode(DecodeError::Empty)
        );
        assert!(matches!(
            QuestionAnswer::new("id", 1, "ran", "Who ran?", "Bob", "0-1"),
            Err(ProtocolError::Decode(DecodeError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_count_mismatch_is_not_rejected() {
        let qa = QuestionAnswer::new("id", 1, "ran", "Who ran?", "Bob", "0:1~!~3:4").unwrap();
        assert_eq!(qa.answers().len(), 1);
        assert_eq!(qa.arguments().unwrap().len(), 2);
    }

    #[test]
    fn test_serialization_path_rejects_bad_input() {
        let empty: [Argument; 0] = [];
        assert_eq!(
            QuestionAnswer::from_answers("id", 0, "v", "q", &["a"], &empty).unwrap_err(),
            ProtocolError::Decode(DecodeError::Empty)
        );
        let err = QuestionAnswer::from_answers("id", 0, "v", "q", &["a~!~b"], &[arg(0, 1)]);
        assert_eq!(
            err.unwrap_err(),
            ProtocolError::Encode(EncodeError::ContainsSeparator { index: 0 })
        );
    }

    #[test]
    fn test_slots_of_another_question_rejected() {
        let other = Question::builder("What did someone eat?")
            .wh("what")
            .subj("someone")
            .obj("_")
            .aux("did")
            .prep("_")
            .obj2("_")
            .passive(false)
            .negated(false)
            .build()
            .unwrap();

        let err = record().with_question(&other).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::QuestionMismatch {
                record: "Who ate something?".to_string(),
                question: "What did someone eat?".to_string(),
            }
        );
    }

    #[test]
    fn test_question_slots_round_trip_through_record() {
        let question = Question::new(
            "Who was something eaten by?",
            QuestionSlots {
                wh: "Who".into(),
                subj: "something".into(),
                obj: "_".into(),
                aux: "was".into(),
                prep: "by".into(),
                obj2: "_".into(),
                is_passive: true,
                is_negated: false,
            },
        );
        let qa = QuestionAnswer::new("id", 2, "eaten", question.text(), "the cat", "0:2")
            .unwrap()
            .with_question(&question)
            .unwrap()
            .with_verb_form("pastParticiple");
        assert_eq!(qa.wh.as_deref(), Some("who"));
        assert_eq!(qa.verb_form.as_deref(), Some("pastParticiple"));

        let rebuilt = qa.to_question().unwrap();
        assert_eq!(rebuilt.slots(), question.slots());
    }

    #[test]
    fn test_partial_slots_fail_question() {
        let mut qa = record();
        qa.wh = Some("who".into());
        qa.subj = Some(String::new());
        let err = qa.to_question().unwrap_err();
        assert_eq!(err.field, "obj");
        assert!(qa.has_slots());
    }
}
