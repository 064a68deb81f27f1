// Supply-chain-finance approval workflow
// The ledger owns the transitions; this side only decodes what it reports.

pub mod marble;
pub mod stage;

pub use marble::{CheckRecord, HistoryEntry, Marble, PendingAction, UserRelation};
pub use stage::{translate_action, StageRole, StageStatus, WorkflowStage, STAGE_COUNT};
