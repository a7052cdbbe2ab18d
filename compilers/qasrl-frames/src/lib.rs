pub mod error;
pub mod frame;
pub mod render;
pub mod validate;

pub use error::FrameError;
pub use frame::{collect_frames, VerbFrame};
pub use render::span_text;
pub use validate::{check_record, check_records, RecordIssue};
