// Data Models
pub mod entry;
pub mod operation;

pub use entry::{CompressedSize, Entry};
pub use operation::{ExtractDecision, ExtractOutcome};
