use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::argument::Argument;
use crate::error::ProtocolError;
use crate::question::Question;

/// One question together with every answer it was given.
///
/// Each entry of `arguments` is one acceptable answer; the spans inside
/// an entry are the disjoint pieces of that single answer. A role may
/// have no answers at all, but an answer never has zero spans.
#[derive(Debug, Clone)]
pub struct Role {
    question: Arc<Question>,
    arguments: Vec<Vec<Argument>>,
}

impl Role {
    pub fn new<A, I>(
        question: impl Into<Arc<Question>>,
        arguments: I,
    ) -> Result<Self, ProtocolError>
    where
        I: IntoIterator<Item = A>,
        A: IntoIterator<Item = Argument>,
    {
        let arguments: Vec<Vec<Argument>> = arguments
            .into_iter()
            .map(|answer| answer.into_iter().collect())
            .collect();

        if let Some(index) = arguments.iter().position(Vec::is_empty) {
            return Err(ProtocolError::EmptyAnswer { index });
        }

        Ok(Self {
            question: question.into(),
            arguments,
        })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Handle to the shared question, for building sibling roles.
    pub fn shared_question(&self) -> Arc<Question> {
        Arc::clone(&self.question)
    }

    pub fn text(&self) -> &str {
        self.question.text()
    }

    pub fn arguments(&self) -> &[Vec<Argument>] {
        &self.arguments
    }
}

// Comparison delegates to the question, which itself only compares text.
impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.question == other.question
    }
}

impl Eq for Role {}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.question.cmp(&other.question)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ==> ", self.text())?;
        for (i, answer) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            f.write_str("(")?;
            for (j, arg) in answer.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
