use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::error::MarbleError;
use crate::format::date::{parse_timestamp, DateFormatter};
use crate::workflow::stage::{translate_action, StageRole, StageStatus, WorkflowStage, STAGE_COUNT};

/// Review outcome recorded for one stage of a marble
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Acting user, when the ledger records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "name")]
    pub company: String,
    /// Raw status code; see [`StageStatus`]
    #[serde(default, alias = "Review")]
    pub review: u8,
    /// When the stage was acted on. `None` while it is still pending.
    #[serde(default, alias = "Date", deserialize_with = "deserialize_check_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: String,
}

impl CheckRecord {
    pub fn pending(company: impl Into<String>, review: StageStatus) -> Self {
        Self {
            company: company.into(),
            review: review as u8,
            ..Self::default()
        }
    }

    pub fn resolved(
        company: impl Into<String>,
        review: StageStatus,
        date: DateTime<Utc>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            company: company.into(),
            review: review as u8,
            date: Some(date),
            comment: comment.into(),
        }
    }

    pub fn status(&self) -> Option<StageStatus> {
        StageStatus::from_code(self.review)
    }

    pub fn is_resolved(&self) -> bool {
        self.date.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRelation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub company: String,
}

/// A financing instrument and its eight-stage approval trail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marble {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub balance: i64,
    #[serde(default, alias = "user")]
    pub owner: UserRelation,
    #[serde(deserialize_with = "deserialize_checks")]
    pub check: [CheckRecord; STAGE_COUNT],
}

/// The confirm/reject pair offered to whoever holds a marble
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAction {
    pub stage: WorkflowStage,
    pub company: String,
    pub confirm: &'static str,
    /// Absent for the created stage, which cannot be rejected
    pub reject: Option<&'static str>,
}

/// One resolved stage, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub stage: WorkflowStage,
    pub company: String,
    pub action: &'static str,
    pub date: String,
    pub comment: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} with comment: {}",
            self.company, self.action, self.date, self.comment
        )
    }
}

impl Marble {
    /// Build a marble from a check trail, which must hold one record per stage
    pub fn with_checks(id: impl Into<String>, checks: Vec<CheckRecord>) -> Result<Self, MarbleError> {
        let check = checks_from_vec(checks)?;
        Ok(Self {
            id: id.into(),
            check,
            ..Self::default()
        })
    }

    /// First stage that has not been acted on yet
    pub fn pending_stage(&self) -> Option<WorkflowStage> {
        self.check
            .iter()
            .position(|record| !record.is_resolved())
            .and_then(WorkflowStage::from_index)
    }

    /// Company holding the marble, `None` once every stage is resolved
    pub fn current_owner(&self) -> Option<&str> {
        self.pending_stage()
            .map(|stage| self.check[stage.index()].company.as_str())
    }

    pub fn pending_action(&self) -> Result<Option<PendingAction>, MarbleError> {
        let Some(stage) = self.pending_stage() else {
            trace!(marble = %self.id, "no pending stage");
            return Ok(None);
        };

        let confirm = stage.action_label(StageStatus::Success)?;
        let reject = if stage.can_reject() {
            Some(stage.action_label(StageStatus::Failure)?)
        } else {
            None
        };

        trace!(marble = %self.id, stage = %stage, confirm, "resolved pending action");
        Ok(Some(PendingAction {
            stage,
            company: self.check[stage.index()].company.clone(),
            confirm,
            reject,
        }))
    }

    /// Role of the first stage whose review is waiting
    pub fn awaiting_role(&self) -> Option<StageRole> {
        self.check
            .iter()
            .position(|record| record.status() == Some(StageStatus::Wait))
            .and_then(WorkflowStage::from_index)
            .map(WorkflowStage::role)
    }

    /// Resolved stages in order, each labelled and dated with `pattern`
    pub fn history(
        &self,
        formatter: &DateFormatter,
        pattern: &str,
    ) -> Result<Vec<HistoryEntry>, MarbleError> {
        let mut entries = Vec::new();

        for (stage, record) in WorkflowStage::ALL.iter().zip(self.check.iter()) {
            let Some(date) = record.date else {
                continue;
            };
            let action = translate_action(stage.index(), record.review as usize)?;
            entries.push(HistoryEntry {
                stage: *stage,
                company: record.company.clone(),
                action,
                date: formatter.format(date, pattern)?,
                comment: record.comment.clone(),
            });
        }

        Ok(entries)
    }
}

fn checks_from_vec(checks: Vec<CheckRecord>) -> Result<[CheckRecord; STAGE_COUNT], MarbleError> {
    let len = checks.len();
    checks
        .try_into()
        .map_err(|_| MarbleError::InvalidCheckCount(len))
}

fn deserialize_checks<'de, D>(deserializer: D) -> Result<[CheckRecord; STAGE_COUNT], D::Error>
where
    D: Deserializer<'de>,
{
    let checks = Vec::<CheckRecord>::deserialize(deserializer)?;
    checks_from_vec(checks).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    Text(String),
}

// The ledger writes its zero time (year 1) for stages nobody has touched.
fn deserialize_check_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let instant = match Option::<RawDate>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawDate::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(RawDate::Text(text)) => parse_timestamp(&text).map_err(serde::de::Error::custom)?,
        Some(RawDate::Millis(millis)) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {millis}")))?,
    };

    if instant.year() <= 1 {
        return Ok(None);
    }
    Ok(Some(instant))
}
