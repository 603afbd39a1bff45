// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Labels and comments left on the issue when an invitation fails.
//!
//! Rate-limited requests get the [`RETRY_LABEL`] so the overnight job picks
//! them up again. Every other failure gets [`AUTOMATION_FAILED_LABEL`] and a
//! comment asking the owners to look at it. Side effects are best-effort:
//! a failed label or comment is logged and recorded but never changes the
//! reported status.

use porter_github::GithubError;
use tracing::{info, instrument, warn};

use crate::api::AccessApi;
use crate::context::RequestContext;
use crate::invitation::InvitationOutcome;

pub const RETRY_LABEL: &str = "retry";
pub const AUTOMATION_FAILED_LABEL: &str = "automation-failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
	Label(&'static str),
	Comment,
}

/// What escalation did, and which side effects GitHub refused.
#[derive(Debug, Default)]
pub struct EscalationReport {
	pub applied: Vec<SideEffect>,
	pub failures: Vec<(SideEffect, GithubError)>,
}

impl EscalationReport {
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}

	fn record(&mut self, effect: SideEffect, result: Result<(), GithubError>) {
		match result {
			Ok(()) => self.applied.push(effect),
			Err(err) => {
				warn!(effect = ?effect, error = %err, "Escalation side effect failed");
				self.failures.push((effect, err));
			}
		}
	}
}

pub(crate) fn rate_limit_comment() -> String {
	format!(
		"GitHub's invitation rate limit was reached while processing this request. \
		 It has been labeled `{RETRY_LABEL}` and will be retried automatically overnight."
	)
}

pub(crate) fn manual_review_comment(ctx: &RequestContext, message: &str) -> String {
	format!(
		"{} the automated invitation for this request failed and needs a manual review.\n\n> {message}",
		ctx.owner_mentions()
	)
}

/// Apply the side effects for `outcome` to the request's issue. Label first,
/// then comment; a no-op on success.
#[instrument(skip_all, fields(issue = ctx.issue_number))]
pub async fn apply_escalation<A>(
	api: &A,
	outcome: &InvitationOutcome,
	ctx: &RequestContext,
) -> EscalationReport
where
	A: AccessApi + ?Sized,
{
	let mut report = EscalationReport::default();
	let owner = ctx.organization.as_str();
	let repo = ctx.repository.as_str();

	match outcome {
		InvitationOutcome::Success { .. } => {}
		InvitationOutcome::RateLimited { .. } => {
			info!("Labeling request for retry");
			let labeled = api.add_label(owner, repo, ctx.issue_number, RETRY_LABEL).await;
			report.record(SideEffect::Label(RETRY_LABEL), labeled);

			let commented = api
				.create_comment(owner, repo, ctx.issue_number, &rate_limit_comment())
				.await;
			report.record(SideEffect::Comment, commented);
		}
		InvitationOutcome::OtherFailure { message, .. } => {
			info!("Flagging request for manual review");
			let labeled = api
				.add_label(owner, repo, ctx.issue_number, AUTOMATION_FAILED_LABEL)
				.await;
			report.record(SideEffect::Label(AUTOMATION_FAILED_LABEL), labeled);

			let commented = api
				.create_comment(
					owner,
					repo,
					ctx.issue_number,
					&manual_review_comment(ctx, message),
				)
				.await;
			report.record(SideEffect::Comment, commented);
		}
	}

	report
}
