// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The single status every run ends with.

use std::fmt;

use tracing::{error, info};

use crate::error::PipelineError;

/// `stepStatus` output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
	Success,
	Failed,
	ApprovalRequired,
}

impl StepStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			StepStatus::Success => "success",
			StepStatus::Failed => "failed",
			StepStatus::ApprovalRequired => "approvalRequired",
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, StepStatus::Success)
	}
}

impl fmt::Display for StepStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A successful invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invited {
	pub email: String,
	pub message: String,
}

/// The `message` / `stepStatus` pair handed to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalStatus {
	pub message: String,
	pub step_status: StepStatus,
}

/// Map the end of a run to its status. Total over every terminal path.
pub fn report(result: Result<Invited, PipelineError>) -> FinalStatus {
	match result {
		Ok(invited) => {
			info!(email = %invited.email, "Access request completed");
			FinalStatus {
				message: invited.message,
				step_status: StepStatus::Success,
			}
		}
		Err(err) => {
			let step_status = err.step_status();
			error!(error = ?err, status = %step_status, "Access request failed");
			FinalStatus {
				message: err.to_string(),
				step_status,
			}
		}
	}
}
