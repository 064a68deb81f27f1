// marbles-view - presentation logic for the supply-chain-finance marbles UI
// Decodes workflow stage/status codes, resolves who holds a marble and formats
// dates and text for display.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use crate::config::{config, init_config, MarblesViewConfig};
pub use error::{FormatError, MarbleError, WorkflowError};
pub use format::{
    escape_text, format_date, random_int, random_token, title_case, zero_pad, DateFormatter,
    IntoInstant, MillisPadding,
};
pub use telemetry::{create_render_span, init_telemetry};
pub use workflow::{
    translate_action, CheckRecord, HistoryEntry, Marble, PendingAction, StageRole, StageStatus,
    WorkflowStage,
};
