// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `issues` webhook payload written to `GITHUB_EVENT_PATH`.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IssueEvent {
	pub issue: Option<Issue>,
	pub sender: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
	pub number: u64,
	#[serde(default)]
	pub body: Option<String>,
	pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct User {
	pub login: String,
}

/// The parts of the event the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
	pub requester_login: String,
	pub issue_number: u64,
	pub body: String,
}

impl IssueEvent {
	/// Requester is the issue author, or the event sender when the payload
	/// carries no author. A missing body reads as empty.
	pub fn into_request(self) -> Result<IssueRequest> {
		let issue = self
			.issue
			.ok_or_else(|| anyhow!("event payload has no issue"))?;

		let requester_login = issue
			.user
			.or(self.sender)
			.map(|user| user.login)
			.filter(|login| !login.is_empty())
			.ok_or_else(|| anyhow!("event payload has no issue author or sender"))?;

		Ok(IssueRequest {
			requester_login,
			issue_number: issue.number,
			body: issue.body.unwrap_or_default(),
		})
	}
}

pub fn parse_event(text: &str) -> Result<IssueEvent> {
	serde_json::from_str(text).context("event payload is not a valid issue event")
}

pub fn load_event(path: &Path) -> Result<IssueRequest> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read event payload {}", path.display()))?;
	parse_event(&text)?.into_request()
}
