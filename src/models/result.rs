// Netprofile - Application Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Result types for applying a plan of operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operation::Operation;

/// Why a single operation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The tool did not finish within the configured timeout.
    Timeout,
    /// The tool ran and reported an error.
    Rejected {
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<i32>,
        diagnostic: String,
    },
    /// The tool could not be run at all.
    Unavailable { diagnostic: String },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Rejected {
                code: Some(code),
                diagnostic,
            } => write!(f, "exit code {}: {}", code, diagnostic),
            Self::Rejected {
                code: None,
                diagnostic,
            } => write!(f, "{}", diagnostic),
            Self::Unavailable { diagnostic } => write!(f, "unavailable: {}", diagnostic),
        }
    }
}

/// Outcome of a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationOutcome {
    Success,
    Failed(FailureReason),
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of a single executed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// The operation that was executed.
    pub operation: Operation,
    /// Execution outcome.
    pub outcome: OperationOutcome,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
}

/// Overall status of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Every operation was attempted.
    Completed,
    /// Execution stopped after the operation at this index failed.
    AbortedAt(usize),
}

/// Ordered record of a plan execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResult {
    /// Profile the plan was built from; `None` for a direct DHCP switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Adapter the plan targeted.
    pub adapter: String,
    /// Per-operation results, in execution order.
    pub steps: Vec<StepResult>,
    /// Overall status.
    pub status: ApplicationStatus,
    /// Summary message.
    pub message: String,
    /// Execution start timestamp.
    pub started_at: DateTime<Utc>,
    /// Execution end timestamp.
    pub completed_at: DateTime<Utc>,
}

impl ApplicationResult {
    /// Create an empty result for a plan against `adapter`.
    pub fn new(adapter: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            profile: None,
            adapter: adapter.into(),
            steps: Vec::new(),
            status: ApplicationStatus::Completed,
            message: String::new(),
            started_at: now,
            completed_at: now,
        }
    }

    /// Record a step.
    pub fn record(&mut self, operation: Operation, outcome: OperationOutcome, duration_ms: u64) {
        self.steps.push(StepResult {
            operation,
            outcome,
            duration_ms,
        });
    }

    /// Stop the plan at `index`.
    pub fn abort_at(&mut self, index: usize) {
        self.status = ApplicationStatus::AbortedAt(index);
    }

    /// Finalize the result, computing the summary message.
    pub fn finalize(&mut self) {
        self.completed_at = Utc::now();
        self.message = match self.status {
            ApplicationStatus::AbortedAt(index) => {
                let reason = self
                    .steps
                    .get(index)
                    .map(|s| match &s.outcome {
                        OperationOutcome::Failed(reason) => reason.to_string(),
                        OperationOutcome::Success => "unknown".to_string(),
                    })
                    .unwrap_or_else(|| "unknown".to_string());
                format!("Aborted at step {}: {}", index + 1, reason)
            }
            ApplicationStatus::Completed if self.failure_count() > 0 => format!(
                "Completed with {} failed operation(s)",
                self.failure_count()
            ),
            ApplicationStatus::Completed => {
                format!("{} operation(s) completed successfully", self.steps.len())
            }
        };
    }

    /// Check whether every operation was attempted.
    pub fn is_completed(&self) -> bool {
        self.status == ApplicationStatus::Completed
    }

    /// Check whether every operation was attempted and succeeded.
    pub fn is_success(&self) -> bool {
        self.is_completed() && self.failure_count() == 0
    }

    /// Index of the step that aborted the plan, if any.
    pub fn aborted_at(&self) -> Option<usize> {
        match self.status {
            ApplicationStatus::AbortedAt(index) => Some(index),
            ApplicationStatus::Completed => None,
        }
    }

    /// Count failed steps.
    pub fn failure_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| !s.outcome.is_success())
            .count()
    }

    /// Iterate over failed steps.
    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.outcome.is_success())
    }
}
