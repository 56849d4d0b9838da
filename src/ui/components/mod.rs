// UI Components
pub mod command_bar;
pub mod dialog;
pub mod manifest_table;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::CommandBar;
pub use dialog::{Dialog, DialogKind, InputPurpose};
pub use manifest_table::ManifestTable;
pub use status_bar::{MessageLevel, StatusBar};
pub use warning::WarningScreen;
