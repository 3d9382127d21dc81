pub mod record;
pub mod status;

pub use record::{CandidatureRecord, NewRecord, RecordId, RecordPatch};
pub use status::{Priority, Status};
