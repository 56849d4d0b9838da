// System Layer
pub mod conflict;
pub mod executor;
pub mod listing;
pub mod manifest;
pub mod tool;

pub use conflict::ExtractPlan;
pub use manifest::Manifest;
pub use tool::ArchiveTool;
