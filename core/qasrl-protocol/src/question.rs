use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::MissingFieldError;

/// Slot names in the order they are checked when building a [`Question`].
pub const QUESTION_FIELDS: [&str; 8] = [
    "wh",
    "subj",
    "obj",
    "aux",
    "prep",
    "obj2",
    "is_passive",
    "is_negated",
];

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct QuestionFlags: u8 {
        const PASSIVE = 1;
        const NEGATED = 2;
    }
}

impl QuestionFlags {
    pub fn from_bools(is_passive: bool, is_negated: bool) -> Self {
        let mut flags = QuestionFlags::empty();
        flags.set(QuestionFlags::PASSIVE, is_passive);
        flags.set(QuestionFlags::NEGATED, is_negated);
        flags
    }
}

/// The full set of decomposed slots of a question template.
///
/// Every slot must be written out; there is no default to fall back on.
///
/// ```compile_fail
/// use qasrl_protocol::QuestionSlots;
///
/// let slots = QuestionSlots { wh: "who".into(), ..Default::default() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSlots {
    pub wh: String,
    pub subj: String,
    pub obj: String,
    pub aux: String,
    pub prep: String,
    pub obj2: String,
    pub is_passive: bool,
    pub is_negated: bool,
}

/// A QA-SRL question: surface text plus its slot decomposition.
///
/// # Identity
///
/// Equality, hashing and ordering look at `text` and nothing else. Two
/// questions with the same text are the same key in any set or map, even
/// when their slots differ. The slots are denormalized metadata carried
/// alongside the text. Do not derive these traits.
#[derive(Debug, Clone)]
pub struct Question {
    text: String,
    wh: String,
    subj: String,
    obj: String,
    aux: String,
    prep: String,
    obj2: String,
    flags: QuestionFlags,
}

impl Question {
    /// `wh` is lower-cased; every other slot is stored as given.
    pub fn new(text: impl Into<String>, slots: QuestionSlots) -> Self {
        Self {
            text: text.into(),
            wh: slots.wh.to_lowercase(),
            subj: slots.subj,
            obj: slots.obj,
            aux: slots.aux,
            prep: slots.prep,
            obj2: slots.obj2,
            flags: QuestionFlags::from_bools(slots.is_passive, slots.is_negated),
        }
    }

    pub fn builder(text: impl Into<String>) -> QuestionBuilder {
        QuestionBuilder::new(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn wh(&self) -> &str {
        &self.wh
    }

    pub fn subj(&self) -> &str {
        &self.subj
    }

    pub fn obj(&self) -> &str {
        &self.obj
    }

    pub fn aux(&self) -> &str {
        &self.aux
    }

    pub fn prep(&self) -> &str {
        &self.prep
    }

    pub fn obj2(&self) -> &str {
        &self.obj2
    }

    pub fn flags(&self) -> QuestionFlags {
        self.flags
    }

    pub fn is_passive(&self) -> bool {
        self.flags.contains(QuestionFlags::PASSIVE)
    }

    pub fn is_negated(&self) -> bool {
        self.flags.contains(QuestionFlags::NEGATED)
    }

    pub fn slots(&self) -> QuestionSlots {
        QuestionSlots {
            wh: self.wh.clone(),
            subj: self.subj.clone(),
            obj: self.obj.clone(),
            aux: self.aux.clone(),
            prep: self.prep.clone(),
            obj2: self.obj2.clone(),
            is_passive: self.is_passive(),
            is_negated: self.is_negated(),
        }
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for Question {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Question {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Runtime path to a [`Question`] when slots arrive one at a time
/// (e.g. from the optional columns of a record).
#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    text: String,
    pub(crate) wh: Option<String>,
    pub(crate) subj: Option<String>,
    pub(crate) obj: Option<String>,
    pub(crate) aux: Option<String>,
    pub(crate) prep: Option<String>,
    pub(crate) obj2: Option<String>,
    pub(crate) is_passive: Option<bool>,
    pub(crate) is_negated: Option<bool>,
}

impl QuestionBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn wh(mut self, wh: impl Into<String>) -> Self {
        self.wh = Some(wh.into());
        self
    }

    pub fn subj(mut self, subj: impl Into<String>) -> Self {
        self.subj = Some(subj.into());
        self
    }

    pub fn obj(mut self, obj: impl Into<String>) -> Self {
        self.obj = Some(obj.into());
        self
    }

    pub fn aux(mut self, aux: impl Into<String>) -> Self {
        self.aux = Some(aux.into());
        self
    }

    pub fn prep(mut self, prep: impl Into<String>) -> Self {
        self.prep = Some(prep.into());
        self
    }

    pub fn obj2(mut self, obj2: impl Into<String>) -> Self {
        self.obj2 = Some(obj2.into());
        self
    }

    pub fn passive(mut self, is_passive: bool) -> Self {
        self.is_passive = Some(is_passive);
        self
    }

    pub fn negated(mut self, is_negated: bool) -> Self {
        self.is_negated = Some(is_negated);
        self
    }

    /// Fails on the first absent slot, in [`QUESTION_FIELDS`] order.
    pub fn build(self) -> Result<Question, MissingFieldError> {
        let slots = QuestionSlots {
            wh: required(self.wh, QUESTION_FIELDS[0])?,
            subj: required(self.subj, QUESTION_FIELDS[1])?,
            obj: required(self.obj, QUESTION_FIELDS[2])?,
            aux: required(self.aux, QUESTION_FIELDS[3])?,
            prep: required(self.prep, QUESTION_FIELDS[4])?,
            obj2: required(self.obj2, QUESTION_FIELDS[5])?,
            is_passive: required(self.is_passive, QUESTION_FIELDS[6])?,
            is_negated: required(self.is_negated, QUESTION_FIELDS[7])?,
        };
        Ok(Question::new(self.text, slots))
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MissingFieldError> {
    value.ok_or(MissingFieldError { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn full(text: &str) -> QuestionBuilder {
        Question::builder(text)
            .wh("What")
            .subj("someone")
            .obj("_")
            .aux("did")
            .prep("_")
            .obj2("_")
            .passive(false)
            .negated(false)
    }

    fn hash_of(q: &Question) -> u64 {
        let mut hasher = DefaultHasher::new();
        q.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_identity_is_text_only() {
        let a = full("What did someone eat?").build().unwrap();
        let b = full("What did someone eat?")
            .subj("the cat")
            .obj("something")
            .passive(true)
            .build()
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(!(a < b) && !(b < a));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_ordering_follows_text() {
        let who = full("Who ate something?").build().unwrap();
        let what = full("What did someone eat?").build().unwrap();
        assert!(what < who);
    }

    #[test]
    fn test_wh_lowercased() {
        let q = full("WHO ate?").wh("WHO").build().unwrap();
        assert_eq!(q.wh(), "who");
        // No other slot is normalized
        let q = full("Who ate?").subj("The Cat").build().unwrap();
        assert_eq!(q.subj(), "The Cat");
        assert_eq!(q.text(), "Who ate?");
    }

    #[test]
    fn test_missing_slot_rejected() {
        let mut builder = full("What did someone eat?");
        builder.obj2 = None;
        assert_eq!(builder.build().unwrap_err(), MissingFieldError { field: "obj2" });

        let err = Question::builder("Who?").build().unwrap_err();
        assert_eq!(err.field, "wh");

        let err = Question::builder("Who?")
            .wh("who")
            .subj("_")
            .obj("_")
            .aux("_")
            .prep("_")
            .obj2("_")
            .passive(false)
            .build()
            .unwrap_err();
        assert_eq!(err.field, "is_negated");
    }

    #[test]
    fn test_flags() {
        let q = full("What was eaten?").passive(true).negated(true).build().unwrap();
        assert!(q.is_passive());
        assert!(q.is_negated());
        assert_eq!(q.flags(), QuestionFlags::PASSIVE | QuestionFlags::NEGATED);
        assert_eq!(q.to_string(), "What was eaten?");
        assert!(q.slots().is_passive);
    }
}
