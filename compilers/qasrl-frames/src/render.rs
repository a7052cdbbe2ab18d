use qasrl_protocol::{Argument, QuestionAnswer};

use crate::error::FrameError;
use crate::frame::VerbFrame;

/// Surface text of `arg`: its tokens joined by single spaces.
pub fn span_text(tokens: &[&str], arg: &Argument) -> Result<String, FrameError> {
    tokens
        .get(arg.as_range())
        .map(|span| span.join(" "))
        .ok_or(FrameError::SpanOutOfBounds {
            start: arg.start(),
            end: arg.end(),
            len: tokens.len(),
        })
}

impl VerbFrame {
    /// Flattens the frame back into records, one per alternative answer.
    ///
    /// Empty spans keep their place in `answer_range` but add no text to
    /// `answer`, so an answer made only of empty spans has an empty field.
    pub fn to_records(&self, tokens: &[&str]) -> Result<Vec<QuestionAnswer>, FrameError> {
        let mut records = Vec::new();

        for role in &self.roles {
            for answer in role.arguments() {
                let mut texts = Vec::new();
                for arg in answer {
                    let text = span_text(tokens, arg)?;
                    if !arg.is_empty() {
                        texts.push(text);
                    }
                }

                let mut record = QuestionAnswer::from_answers(
                    &self.qasrl_id,
                    self.verb_idx,
                    &self.verb,
                    role.text(),
                    &texts,
                    answer,
                )?
                .with_question(role.question())?;

                if let Some(form) = &self.verb_form {
                    record = record.with_verb_form(form.clone());
                }
                records.push(record);
            }
        }

        Ok(records)
    }
}
