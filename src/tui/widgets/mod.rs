//! Dashboard widgets

pub mod analysis;
pub mod dashboard;
pub mod entry_form;
pub mod help;
pub mod records;
pub mod settings;
pub mod tabs;

pub use analysis::AnalysisView;
pub use dashboard::DashboardView;
pub use entry_form::{AddView, EntryForm, FormOutcome};
pub use help::HelpPopup;
pub use records::{FilterForm, RecordsView};
pub use settings::SettingsView;
pub use tabs::{Tab, TabBar};
