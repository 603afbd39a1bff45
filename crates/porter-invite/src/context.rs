// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-invocation request data, built once by the entry point.

/// Organization role used when no role input is given.
pub const DEFAULT_ROLE: &str = "direct_member";

/// Capture pattern matching the access request issue template.
pub const DEFAULT_EMAIL_CAPTURE: &str = r"<p>Email of Requester:\s*(?<email>.+?)</p>";

/// Where to get the requester's email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSource {
	/// Free-form issue body. The email is captured with `parserRules.email`
	/// from the rules file, or with `capture_pattern` when the file has none.
	IssueBody {
		body: String,
		capture_pattern: Option<String>,
	},
	/// An address that an upstream step already screened.
	Direct(String),
}

/// Everything the pipeline knows about the request. Immutable once built.
#[derive(Debug, Clone)]
pub struct RequestContext {
	/// Login of the issue author.
	pub requester_login: String,
	pub email_source: EmailSource,
	/// Organization to invite into; also owns the repository.
	pub organization: String,
	pub repository: String,
	pub issue_number: u64,
	/// Path of the rules file inside the repository.
	pub config_path: String,
	pub desired_role: String,
	/// Logins to ping when a request needs a human.
	pub owner_contacts: Vec<String>,
}

impl RequestContext {
	/// Owner contacts as `@login` mentions: trimmed, deduplicated, with any
	/// leading `@` normalized. Falls back to a generic phrase when empty.
	pub fn owner_mentions(&self) -> String {
		let mut seen: Vec<&str> = Vec::new();
		for contact in &self.owner_contacts {
			let login = contact.trim().trim_start_matches('@').trim();
			if !login.is_empty() && !seen.contains(&login) {
				seen.push(login);
			}
		}

		if seen.is_empty() {
			return "Organization owners".to_string();
		}

		seen
			.iter()
			.map(|login| format!("@{login}"))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// Split a raw contact list on commas and whitespace.
pub fn parse_owner_contacts(raw: &str) -> Vec<String> {
	raw
		.split(|c: char| c == ',' || c.is_whitespace())
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}
