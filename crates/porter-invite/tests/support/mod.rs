// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recording stand-in for the GitHub API.

#![allow(dead_code)]

use async_trait::async_trait;
use porter_github::GithubError;
use porter_invite::{AccessApi, EmailSource, RequestContext, DEFAULT_ROLE};
use tokio::sync::Mutex;

pub const RULES_PATH: &str = ".github/porter.json";

type ErrorFactory = Box<dyn Fn() -> GithubError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	FetchConfig { path: String },
	Invite { org: String, email: String, role: String },
	Label { issue: u64, label: String },
	Comment { issue: u64, body: String },
}

#[derive(Default)]
pub struct MockApi {
	config: Option<String>,
	fetch_error: Option<ErrorFactory>,
	invite_error: Option<ErrorFactory>,
	label_error: Option<ErrorFactory>,
	comment_error: Option<ErrorFactory>,
	calls: Mutex<Vec<Call>>,
}

impl MockApi {
	pub fn with_config(config: serde_json::Value) -> Self {
		Self {
			config: Some(config.to_string()),
			..Self::default()
		}
	}

	pub fn with_raw_config(text: &str) -> Self {
		Self {
			config: Some(text.to_string()),
			..Self::default()
		}
	}

	pub fn failing_fetch(error: impl Fn() -> GithubError + Send + Sync + 'static) -> Self {
		Self {
			fetch_error: Some(Box::new(error)),
			..Self::default()
		}
	}

	pub fn failing_invite(mut self, error: impl Fn() -> GithubError + Send + Sync + 'static) -> Self {
		self.invite_error = Some(Box::new(error));
		self
	}

	pub fn failing_label(mut self, error: impl Fn() -> GithubError + Send + Sync + 'static) -> Self {
		self.label_error = Some(Box::new(error));
		self
	}

	pub fn failing_comment(mut self, error: impl Fn() -> GithubError + Send + Sync + 'static) -> Self {
		self.comment_error = Some(Box::new(error));
		self
	}

	pub async fn calls(&self) -> Vec<Call> {
		self.calls.lock().await.clone()
	}

	pub async fn fetch_count(&self) -> usize {
		self.count(|c| matches!(c, Call::FetchConfig { .. })).await
	}

	pub async fn invite_count(&self) -> usize {
		self.count(|c| matches!(c, Call::Invite { .. })).await
	}

	pub async fn labels(&self) -> Vec<String> {
		self
			.calls()
			.await
			.into_iter()
			.filter_map(|c| match c {
				Call::Label { label, .. } => Some(label),
				_ => None,
			})
			.collect()
	}

	pub async fn comments(&self) -> Vec<String> {
		self
			.calls()
			.await
			.into_iter()
			.filter_map(|c| match c {
				Call::Comment { body, .. } => Some(body),
				_ => None,
			})
			.collect()
	}

	async fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
		self.calls.lock().await.iter().filter(|c| pred(c)).count()
	}

	async fn record(&self, call: Call) {
		self.calls.lock().await.push(call);
	}
}

fn scripted(error: &Option<ErrorFactory>) -> Result<(), GithubError> {
	match error {
		Some(make) => Err(make()),
		None => Ok(()),
	}
}

#[async_trait]
impl AccessApi for MockApi {
	async fn fetch_config(&self, _owner: &str, _repo: &str, path: &str) -> Result<String, GithubError> {
		self
			.record(Call::FetchConfig {
				path: path.to_string(),
			})
			.await;
		scripted(&self.fetch_error)?;
		Ok(self.config.clone().unwrap_or_default())
	}

	async fn create_invitation(&self, org: &str, email: &str, role: &str) -> Result<(), GithubError> {
		self
			.record(Call::Invite {
				org: org.to_string(),
				email: email.to_string(),
				role: role.to_string(),
			})
			.await;
		scripted(&self.invite_error)
	}

	async fn add_label(
		&self,
		_owner: &str,
		_repo: &str,
		issue_number: u64,
		label: &str,
	) -> Result<(), GithubError> {
		self
			.record(Call::Label {
				issue: issue_number,
				label: label.to_string(),
			})
			.await;
		scripted(&self.label_error)
	}

	async fn create_comment(
		&self,
		_owner: &str,
		_repo: &str,
		issue_number: u64,
		body: &str,
	) -> Result<(), GithubError> {
		self
			.record(Call::Comment {
				issue: issue_number,
				body: body.to_string(),
			})
			.await;
		scripted(&self.comment_error)
	}
}

pub fn issue_context(login: &str, body: &str) -> RequestContext {
	RequestContext {
		requester_login: login.to_string(),
		email_source: EmailSource::IssueBody {
			body: body.to_string(),
			capture_pattern: None,
		},
		organization: "octo-org".to_string(),
		repository: "access".to_string(),
		issue_number: 42,
		config_path: RULES_PATH.to_string(),
		desired_role: DEFAULT_ROLE.to_string(),
		owner_contacts: vec!["alice".to_string(), "@bob".to_string()],
	}
}

pub fn rate_limit_error() -> GithubError {
	GithubError::ApiError {
		status: 422,
		message: "Validation Failed".to_string(),
		errors: vec!["Over invitation rate limit".to_string()],
	}
}
