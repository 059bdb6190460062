pub mod data;
pub mod error;
pub mod export;
pub mod geometry;
pub mod integrity;
pub mod listeners;
pub mod models;
pub mod positioner;
pub mod settings;
pub mod view;

// Re-export commonly used types
pub use error::{OrganizerError, Result};
pub use export::ExportFormat;
pub use geometry::{Rect, Size};
pub use integrity::{check, IntegrityIssue};
pub use listeners::{ListenerGuard, ViewportEvent, ViewportListeners};
pub use models::{
    ComparisonCell, ComparisonRow, Methodology, MethodologyKind, NonFunctionalRequirement, Phase,
    ReferenceData, Requirement, Role, PHASE_SUMMARY_CHARS,
};
pub use positioner::{
    ElementHandle, LayoutProbe, OverlayPosition, OverlayPositioner, PlacementConfig, Side,
};
pub use settings::{Settings, ThemePreference, DATA_ENV_VAR};
pub use view::{reduce, BrowserState, BrowserTab, ViewController, ViewEvent, ViewState};
