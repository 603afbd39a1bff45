// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Every way an access request can end without an invitation.

use porter_github::GithubError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::email::EmailError;
use crate::outcome::StepStatus;

/// Terminal failures of the pipeline. `Display` is the message reported to
/// the workflow, so it never includes more than a one-line cause.
#[derive(Debug, Error)]
pub enum PipelineError {
	/// The GitHub client could not be built (token missing, TLS init failed).
	#[error("Failed to get a proper GitHub client.")]
	ClientInit {
		#[source]
		source: GithubError,
	},

	#[error("Failed to fetch config from {path}: {source}")]
	ConfigFetch {
		path: String,
		#[source]
		source: GithubError,
	},

	#[error(transparent)]
	ConfigValidation(#[from] ConfigError),

	#[error("User that opened issue, {login} not a trusted user")]
	Trust { login: String },

	/// `status` carries the operator's mismatch policy.
	#[error("{error}")]
	Email { error: EmailError, status: StepStatus },

	/// Recoverable by the external retry job.
	#[error("{message}")]
	InvitationRateLimit { message: String },

	/// Needs a human.
	#[error("{message}")]
	InvitationOther {
		message: String,
		#[source]
		source: GithubError,
	},
}

impl PipelineError {
	/// Status reported for this failure.
	pub fn step_status(&self) -> StepStatus {
		match self {
			PipelineError::Email { status, .. } => *status,
			_ => StepStatus::Failed,
		}
	}
}
