use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Number of approval stages every marble moves through
pub const STAGE_COUNT: usize = 8;

/// Action labels indexed by `[stage][status]`.
/// The `Created` row has no rejection label.
const ACTION_LABELS: [&[&str]; STAGE_COUNT] = [
    &["", "wait", "create"],
    &["", "wait", "confirm", "reject"],
    &["", "wait", "loan", "reject"],
    &["", "wait", "receive", "reject"],
    &["", "wait", "pay", "reject"],
    &["", "wait", "pay", "reject"],
    &["", "wait", "confirm", "reject"],
    &["", "wait", "successed", "failed"],
];

/// Party expected to act while a stage is waiting
const STAGE_ROLES: [StageRole; STAGE_COUNT] = [
    StageRole::Supplier,
    StageRole::CoreEnterprise,
    StageRole::Bank,
    StageRole::Supplier,
    StageRole::CoreEnterprise,
    StageRole::Supplier,
    StageRole::Bank,
    StageRole::Bank,
];

/// Approval stages of a financing instrument, in workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkflowStage {
    /// Marble has been created (0)
    Created = 0,
    /// Supplier applies for financing (1)
    SupplierApply = 1,
    /// Core enterprise reviews the application (2)
    CompanyCheck = 2,
    /// Bank reviews and lends (3)
    BankCheck = 3,
    /// Supplier confirms receipt of the loan (4)
    SupplierReceive = 4,
    /// Core enterprise repays (5)
    CompanyRepayment = 5,
    /// Supplier repays (6)
    SupplierRepayment = 6,
    /// Bank confirms receipt; terminal for both outcomes (7)
    BankReceive = 7,
}

/// Review state of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageStatus {
    /// Stage does not apply yet (0)
    Disabled = 0,
    /// Waiting for the acting party (1)
    Wait = 1,
    /// Confirmed (2)
    Success = 2,
    /// Rejected (3)
    Failure = 3,
}

/// Party that acts at a given stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageRole {
    Supplier,
    CoreEnterprise,
    Bank,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; STAGE_COUNT] = [
        WorkflowStage::Created,
        WorkflowStage::SupplierApply,
        WorkflowStage::CompanyCheck,
        WorkflowStage::BankCheck,
        WorkflowStage::SupplierReceive,
        WorkflowStage::CompanyRepayment,
        WorkflowStage::SupplierRepayment,
        WorkflowStage::BankReceive,
    ];

    /// Stage at a given position in the check sequence
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this stage defines a rejection action
    pub fn can_reject(self) -> bool {
        ACTION_LABELS[self.index()].len() > StageStatus::Failure.index()
    }

    pub fn role(self) -> StageRole {
        STAGE_ROLES[self.index()]
    }

    /// Label of the action this stage takes for `status`
    pub fn action_label(self, status: StageStatus) -> Result<&'static str, WorkflowError> {
        translate_action(self.index(), status.index())
    }
}

impl StageStatus {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StageStatus::Disabled),
            1 => Some(StageStatus::Wait),
            2 => Some(StageStatus::Success),
            3 => Some(StageStatus::Failure),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl StageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StageRole::Supplier => "supplier",
            StageRole::CoreEnterprise => "core-enterprise",
            StageRole::Bank => "bank",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkflowStage::Created => "created",
            WorkflowStage::SupplierApply => "supplier apply",
            WorkflowStage::CompanyCheck => "company check",
            WorkflowStage::BankCheck => "bank check",
            WorkflowStage::SupplierReceive => "supplier receive",
            WorkflowStage::CompanyRepayment => "company repayment",
            WorkflowStage::SupplierRepayment => "supplier repayment",
            WorkflowStage::BankReceive => "bank receive",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for StageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a raw `(stage, status)` pair into its action label.
///
/// Stages run 0..=7 and statuses 0..=3; the created stage has no
/// rejection entry. Anything outside the table is an error rather than a
/// fallback label.
pub fn translate_action(stage: usize, status: usize) -> Result<&'static str, WorkflowError> {
    ACTION_LABELS
        .get(stage)
        .and_then(|row| row.get(status))
        .copied()
        .ok_or(WorkflowError::InvalidStageOrStatus { stage, status })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_action_table() {
        let expected: [[&str; 3]; STAGE_COUNT] = [
            ["wait", "create", ""],
            ["wait", "confirm", "reject"],
            ["wait", "loan", "reject"],
            ["wait", "receive", "reject"],
            ["wait", "pay", "reject"],
            ["wait", "pay", "reject"],
            ["wait", "confirm", "reject"],
            ["wait", "successed", "failed"],
        ];

        for (stage, row) in expected.iter().enumerate() {
            assert_eq!(translate_action(stage, 0).unwrap(), "");
            for (offset, label) in row.iter().enumerate() {
                let status = offset + 1;
                if stage == 0 && status == 3 {
                    continue;
                }
                assert_eq!(translate_action(stage, status).unwrap(), *label, "stage {stage} status {status}");
            }
        }
    }

    #[test]
    fn test_created_stage_has_no_reject() {
        assert_eq!(
            translate_action(0, 3),
            Err(WorkflowError::InvalidStageOrStatus { stage: 0, status: 3 })
        );
        assert!(!WorkflowStage::Created.can_reject());
        assert!(WorkflowStage::SupplierApply.can_reject());
        assert!(WorkflowStage::Created.action_label(StageStatus::Failure).is_err());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(translate_action(8, 1).is_err());
        assert!(translate_action(3, 4).is_err());
        assert!(translate_action(usize::MAX, 0).is_err());
    }

    #[test]
    fn test_typed_lookup_matches_raw() {
        assert_eq!(
            WorkflowStage::BankReceive.action_label(StageStatus::Failure).unwrap(),
            "failed"
        );
        assert_eq!(
            WorkflowStage::CompanyCheck.action_label(StageStatus::Success).unwrap(),
            "loan"
        );
    }

    #[test]
    fn test_stage_roles() {
        let roles: Vec<&str> = WorkflowStage::ALL.iter().map(|s| s.role().as_str()).collect();
        assert_eq!(
            roles,
            vec!["supplier", "core-enterprise", "bank", "supplier", "core-enterprise", "supplier", "bank", "bank"]
        );
    }

    #[test]
    fn test_index_conversions() {
        assert_eq!(WorkflowStage::from_index(4), Some(WorkflowStage::SupplierReceive));
        assert_eq!(WorkflowStage::from_index(8), None);
        assert_eq!(StageStatus::from_code(2), Some(StageStatus::Success));
        assert_eq!(StageStatus::from_code(4), None);
    }
}
