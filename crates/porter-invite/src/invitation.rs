// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The invitation call and the classification of its result.

use porter_github::GithubError;
use tracing::{error, info, instrument, warn};

use crate::api::AccessApi;
use crate::error::PipelineError;
use crate::outcome::Invited;

/// Vocabulary GitHub uses when an organization has sent too many
/// invitations recently (`"Over invitation rate limit"`).
const INVITATION_RATE_LIMIT_MARKER: &str = "invitation rate limit";

/// Result of the single invitation attempt.
#[derive(Debug)]
pub enum InvitationOutcome {
	Success { email: String, message: String },
	/// GitHub refused because of the invitation rate limit. Recoverable by the
	/// overnight retry job.
	RateLimited { message: String },
	/// Anything else, timeouts included. Needs a human.
	OtherFailure { message: String, source: GithubError },
}

impl InvitationOutcome {
	pub fn message(&self) -> &str {
		match self {
			InvitationOutcome::Success { message, .. }
			| InvitationOutcome::RateLimited { message }
			| InvitationOutcome::OtherFailure { message, .. } => message,
		}
	}

	/// Split into the pipeline's success or terminal error.
	pub fn into_result(self) -> Result<Invited, PipelineError> {
		match self {
			InvitationOutcome::Success { email, message } => Ok(Invited { email, message }),
			InvitationOutcome::RateLimited { message } => {
				Err(PipelineError::InvitationRateLimit { message })
			}
			InvitationOutcome::OtherFailure { message, source } => {
				Err(PipelineError::InvitationOther { message, source })
			}
		}
	}
}

/// Whether `err` is GitHub's invitation rate limit, judged by the messages
/// of its error entries.
pub fn is_invitation_rate_limit(err: &GithubError) -> bool {
	err
		.messages()
		.iter()
		.any(|message| message.to_lowercase().contains(INVITATION_RATE_LIMIT_MARKER))
}

/// Invite `email` to `organization`. Called once per run; never retried here.
#[instrument(skip(api))]
pub async fn attempt_invitation<A>(
	api: &A,
	organization: &str,
	email: &str,
	role: &str,
) -> InvitationOutcome
where
	A: AccessApi + ?Sized,
{
	match api.create_invitation(organization, email, role).await {
		Ok(()) => {
			let message = format!("User with email {email} has been invited into the org.");
			info!("{message}");
			InvitationOutcome::Success {
				email: email.to_string(),
				message,
			}
		}
		Err(err) if is_invitation_rate_limit(&err) => {
			warn!(error = %err, "Invitation rate limit reached");
			InvitationOutcome::RateLimited {
				message: format!(
					"Invitation rate limit reached while inviting {email}. The request has been labeled for retry."
				),
			}
		}
		Err(err) => {
			error!(error = %err, "Invitation failed");
			InvitationOutcome::OtherFailure {
				message: format!("Failed to invite {email} into the org: {err}"),
				source: err,
			}
		}
	}
}
