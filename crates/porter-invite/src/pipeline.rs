// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stage sequencing from client construction to the final status.

use porter_github::GithubError;
use tracing::{debug, info, instrument, warn};

use crate::api::AccessApi;
use crate::config::{parse_config, validate_config};
use crate::context::{EmailSource, RequestContext};
use crate::email::{extract_group, resolve_email, EmailError};
use crate::error::PipelineError;
use crate::escalation::apply_escalation;
use crate::invitation::attempt_invitation;
use crate::outcome::{report, FinalStatus, Invited, StepStatus};
use crate::trust::check_trust;

/// Run one access request end to end.
///
/// `connect` builds the API client; if it fails nothing else happens and the
/// run reports a client initialization failure.
pub async fn run<A, F>(connect: F, ctx: &RequestContext) -> FinalStatus
where
	A: AccessApi,
	F: FnOnce() -> Result<A, GithubError>,
{
	let api = match connect() {
		Ok(api) => api,
		Err(source) => return report(Err(PipelineError::ClientInit { source })),
	};

	report(process(&api, ctx).await)
}

/// The pipeline proper. Each stage may end the run; escalation side effects
/// are applied before a failed invitation is returned.
#[instrument(
	skip_all,
	fields(
		org = %ctx.organization,
		repo = %ctx.repository,
		issue = ctx.issue_number,
		requester = %ctx.requester_login,
	)
)]
pub async fn process<A>(api: &A, ctx: &RequestContext) -> Result<Invited, PipelineError>
where
	A: AccessApi + ?Sized,
{
	let text = api
		.fetch_config(&ctx.organization, &ctx.repository, &ctx.config_path)
		.await
		.map_err(|source| PipelineError::ConfigFetch {
			path: ctx.config_path.clone(),
			source,
		})?;

	let raw = parse_config(&text)?;
	let config = validate_config(&raw, &ctx.email_source)?;
	debug!("Config validated");

	check_trust(&ctx.requester_login, config.trusted_user_rule())?;

	if let (Some(parser), EmailSource::IssueBody { body, .. }) =
		(config.username_parser(), &ctx.email_source)
	{
		match extract_group(body, parser, "username") {
			Some(name) => info!(name = %name, "Requester name from issue"),
			None => debug!("No requester name in issue"),
		}
	}

	let email = resolve_email(&ctx.email_source, &config).map_err(|error| {
		let status = match error {
			EmailError::NotFound => StepStatus::Failed,
			EmailError::Rejected { .. } => config.on_email_mismatch(),
		};
		PipelineError::Email { error, status }
	})?;

	let outcome =
		attempt_invitation(api, &ctx.organization, &email, &ctx.desired_role).await;

	let escalation = apply_escalation(api, &outcome, ctx).await;
	if !escalation.is_clean() {
		warn!(
			applied = escalation.applied.len(),
			failed = escalation.failures.len(),
			"Escalation incomplete"
		);
	}

	outcome.into_result()
}
