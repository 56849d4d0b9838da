// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use layout::{LayoutManager, LayoutMode};
pub use theme::{Theme, ThemeManager};

// Re-export components
pub use components::{
    CommandBar, Dialog, DialogKind, InputPurpose, ManifestTable, MessageLevel, StatusBar,
    WarningScreen,
};
