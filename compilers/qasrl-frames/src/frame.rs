use std::collections::BTreeMap;
use std::sync::Arc;

use qasrl_protocol::{Argument, Question, QuestionAnswer, Role};
use tracing::{debug, warn};

use crate::error::FrameError;

/// Every role annotated for one verb occurrence of one sentence.
#[derive(Debug, Clone)]
pub struct VerbFrame {
    pub qasrl_id: String,
    pub verb_idx: usize,
    pub verb: String,
    pub verb_form: Option<String>,
    /// Sorted by question text.
    pub roles: Vec<Role>,
}

impl VerbFrame {
    pub fn role(&self, question: &str) -> Option<&Role> {
        self.roles
            .binary_search_by(|role| role.text().cmp(question))
            .ok()
            .map(|idx| &self.roles[idx])
    }
}

struct FrameAccumulator {
    qasrl_id: String,
    verb_idx: usize,
    verb: String,
    verb_form: Option<String>,
    // Keyed by question text, which is also the Role order
    questions: BTreeMap<String, (Arc<Question>, Vec<Vec<Argument>>)>,
}

impl FrameAccumulator {
    fn new(first: &QuestionAnswer) -> Self {
        Self {
            qasrl_id: first.qasrl_id.clone(),
            verb_idx: first.verb_idx,
            verb: first.verb.clone(),
            verb_form: first.verb_form.clone(),
            questions: BTreeMap::new(),
        }
    }

    fn add(&mut self, record: &QuestionAnswer) -> Result<(), FrameError> {
        if record.verb != self.verb {
            warn!(
                "{}:{} mixes verbs '{}' and '{}', keeping the first",
                self.qasrl_id, self.verb_idx, self.verb, record.verb
            );
        }
        if record.verb_form.is_some() && record.verb_form != self.verb_form {
            if self.verb_form.is_none() {
                self.verb_form = record.verb_form.clone();
            } else {
                warn!(
                    "{}:{} mixes verb forms {:?} and {:?}, keeping the first",
                    self.qasrl_id, self.verb_idx, self.verb_form, record.verb_form
                );
            }
        }

        let answer = record.arguments().map_err(|source| FrameError::Decode {
            qasrl_id: record.qasrl_id.clone(),
            question: record.question.clone(),
            source,
        })?;

        if let Some((_, answers)) = self.questions.get_mut(&record.question) {
            answers.push(answer);
            return Ok(());
        }

        let question = record.to_question().map_err(|source| FrameError::Question {
            qasrl_id: record.qasrl_id.clone(),
            question: record.question.clone(),
            source,
        })?;
        self.questions
            .insert(record.question.clone(), (Arc::new(question), vec![answer]));
        Ok(())
    }

    fn finish(self) -> Result<VerbFrame, FrameError> {
        let roles = self
            .questions
            .into_values()
            .map(|(question, answers)| Role::new(question, answers))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Frame {}:{} ({}) has {} roles",
            self.qasrl_id,
            self.verb_idx,
            self.verb,
            roles.len()
        );

        Ok(VerbFrame {
            qasrl_id: self.qasrl_id,
            verb_idx: self.verb_idx,
            verb: self.verb,
            verb_form: self.verb_form,
            roles,
        })
    }
}

/// Groups flat records into one frame per `(qasrl_id, verb_idx)`.
///
/// Each record becomes one alternative answer of its question's role. All
/// records of a question share the question built from the first of them.
pub fn collect_frames<'a, I>(records: I) -> Result<Vec<VerbFrame>, FrameError>
where
    I: IntoIterator<Item = &'a QuestionAnswer>,
{
    let mut frames: BTreeMap<(String, usize), FrameAccumulator> = BTreeMap::new();
    let mut count = 0usize;

    for record in records {
        count += 1;
        frames
            .entry((record.qasrl_id.clone(), record.verb_idx))
            .or_insert_with(|| FrameAccumulator::new(record))
            .add(record)?;
    }

    let frames = frames
        .into_values()
        .map(FrameAccumulator::finish)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Collected {} frames from {} records", frames.len(), count);
    Ok(frames)
}
