// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Porter - organization access requests from GitHub issues.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use porter_github::{GithubClient, GithubConfig};
use porter_invite::{
	parse_owner_contacts, run, EmailSource, FinalStatus, RequestContext, StepStatus,
	DEFAULT_EMAIL_CAPTURE, DEFAULT_ROLE,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod event;
mod output;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
	Pretty,
	Compact,
	Json,
}

/// Porter - invite the author of an access request issue into the organization
#[derive(Parser, Debug)]
#[command(name = "porter", version, about, long_about = None)]
struct Args {
	/// Path of the rules file inside the repository
	#[arg(long, env = "INPUT_PARSING_RULES_PATH")]
	config_path: String,

	/// Organization role for the invitation
	#[arg(long, env = "INPUT_USER_ROLE", default_value = DEFAULT_ROLE)]
	role: String,

	/// Owners to ping when a request needs manual review (comma or space separated)
	#[arg(long, env = "INPUT_OWNER_CONTACTS", default_value = "")]
	owner_contacts: String,

	/// Already screened email address; skips parsing the issue body
	#[arg(long, env = "INPUT_EMAIL")]
	email: Option<String>,

	/// Capture pattern for the email when the rules file has no parser rule
	#[arg(long, env = "INPUT_EMAIL_CAPTURE", default_value = DEFAULT_EMAIL_CAPTURE)]
	email_capture: String,

	/// Repository holding the issue and the rules file (`owner/repo`)
	#[arg(long, env = "GITHUB_REPOSITORY")]
	repository: String,

	/// Issue event payload
	#[arg(long, env = "GITHUB_EVENT_PATH")]
	event_path: PathBuf,

	/// Step output file; workflow commands go to stdout when unset
	#[arg(long, env = "GITHUB_OUTPUT")]
	output_path: Option<PathBuf>,

	#[arg(long, value_enum, env = "PORTER_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
	log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("porter=info"));

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn split_repository(repository: &str) -> Result<(String, String)> {
	match repository.split_once('/') {
		Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
			Ok((owner.to_string(), repo.to_string()))
		}
		_ => Err(anyhow!("repository must be owner/repo, got {repository:?}")),
	}
}

/// Action inputs arrive as empty strings when unset.
fn non_blank_or(value: &str, default: &str) -> String {
	match value.trim() {
		"" => default.to_string(),
		value => value.to_string(),
	}
}

fn build_context(args: &Args) -> Result<RequestContext> {
	let (organization, repository) = split_repository(&args.repository)?;
	let issue = event::load_event(&args.event_path)?;

	let email_source = match args.email.as_deref().map(str::trim) {
		Some(email) if !email.is_empty() => EmailSource::Direct(email.to_string()),
		_ => EmailSource::IssueBody {
			body: issue.body,
			capture_pattern: Some(non_blank_or(&args.email_capture, DEFAULT_EMAIL_CAPTURE)),
		},
	};

	Ok(RequestContext {
		requester_login: issue.requester_login,
		email_source,
		organization,
		repository,
		issue_number: issue.issue_number,
		config_path: args.config_path.trim().to_string(),
		desired_role: non_blank_or(&args.role, DEFAULT_ROLE),
		owner_contacts: parse_owner_contacts(&args.owner_contacts),
	})
}

fn connect() -> Result<GithubClient, porter_github::GithubError> {
	GithubClient::new(&GithubConfig::from_env()?)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();
	init_tracing(args.log_format);

	tracing::info!(
		repository = %args.repository,
		config_path = %args.config_path,
		"starting porter"
	);

	let status = match build_context(&args) {
		Ok(ctx) => run(connect, &ctx).await,
		Err(err) => {
			tracing::error!(error = ?err, "Invalid access request event");
			FinalStatus {
				message: format!("{err:#}"),
				step_status: StepStatus::Failed,
			}
		}
	};

	output::publish(&status, args.output_path.as_deref()).context("failed to publish step outputs")?;

	if status.step_status.is_success() {
		Ok(ExitCode::SUCCESS)
	} else {
		println!("{}", output::error_annotation(&status.message));
		Ok(ExitCode::FAILURE)
	}
}
