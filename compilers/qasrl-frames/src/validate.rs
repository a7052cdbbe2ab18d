use qasrl_protocol::{DecodeError, QuestionAnswer};
use tracing::warn;

/// Something a producer probably got wrong. Never a reason to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// `ranges` counts only non-empty spans, which are the ones with text.
    AnswerCountMismatch { answers: usize, ranges: usize },
    UnnormalizedWh(String),
    /// Some slot columns are set but this one is not.
    PartialSlots { missing: &'static str },
    UnreadableRange(DecodeError),
}

pub fn check_record(record: &QuestionAnswer) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    match record.arguments() {
        Ok(ranges) => {
            let answers = record.answers().len();
            let ranges = ranges.iter().filter(|arg| !arg.is_empty()).count();
            if answers != ranges {
                issues.push(RecordIssue::AnswerCountMismatch { answers, ranges });
            }
        }
        Err(e) => issues.push(RecordIssue::UnreadableRange(e)),
    }

    if let Some(wh) = &record.wh {
        if wh.to_lowercase() != *wh {
            issues.push(RecordIssue::UnnormalizedWh(wh.clone()));
        }
    }

    if record.has_slots() {
        if let Err(e) = record.to_question() {
            issues.push(RecordIssue::PartialSlots { missing: e.field });
        }
    }

    issues
}

/// Runs [`check_record`] over `records`, logging each finding.
pub fn check_records(records: &[QuestionAnswer]) -> Vec<(usize, RecordIssue)> {
    let mut findings = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        for issue in check_record(record) {
            warn!(
                "record {} ({} / '{}'): {:?}",
                idx, record.qasrl_id, record.question, issue
            );
            findings.push((idx, issue));
        }
    }
    findings
}
