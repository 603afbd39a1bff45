// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Finding the requester's email and checking it against the email rule.

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{compile_email_pattern, AccessConfig};
use crate::context::EmailSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
	#[error("Parsing error: email not found.")]
	NotFound,

	#[error("Email {email} not from a valid domain")]
	Rejected { email: String },
}

/// Compile `pattern` case-insensitively and test `email` against it.
pub fn validate_email(email: &str, pattern: &str) -> Result<bool, regex::Error> {
	Ok(compile_email_pattern(pattern)?.is_match(email))
}

/// Capture the email from free-form text.
///
/// Uses the `email` named group if the pattern has one, otherwise the first
/// capture group, otherwise the whole match. Surrounding whitespace is
/// dropped and an empty capture counts as no email.
pub fn extract_email(text: &str, capture: &Regex) -> Option<String> {
	extract_group(text, capture, "email")
}

pub(crate) fn extract_group(text: &str, capture: &Regex, group: &str) -> Option<String> {
	let caps = capture.captures(text)?;
	let matched = caps
		.name(group)
		.or_else(|| caps.get(1))
		.or_else(|| caps.get(0))?;

	let value = matched.as_str().trim();
	(!value.is_empty()).then(|| value.to_string())
}

/// Obtain the candidate email from `source` and check it against the
/// configured email rule.
pub fn resolve_email(source: &EmailSource, config: &AccessConfig) -> Result<String, EmailError> {
	let candidate = match source {
		EmailSource::Direct(email) => {
			let email = email.trim();
			(!email.is_empty()).then(|| email.to_string())
		}
		EmailSource::IssueBody { body, .. } => {
			debug!(body = %body, "Extracting email from issue body");
			config
				.email_parser()
				.and_then(|capture| extract_email(body, capture))
		}
	};

	let email = candidate.ok_or_else(|| {
		warn!("No email found in request");
		EmailError::NotFound
	})?;

	if config.email_rule().is_match(&email) {
		debug!(email = %email, "Email accepted");
		Ok(email)
	} else {
		warn!(email = %email, "Email rejected by email rule");
		Err(EmailError::Rejected { email })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::validate_config;
	use proptest::prelude::*;
	use serde_json::json;

	const BODY_CAPTURE: &str = r"<p>Email of Requester:\s*(?<email>.+?)<\/p>";

	fn issue(body: &str) -> EmailSource {
		EmailSource::IssueBody {
			body: body.to_string(),
			capture_pattern: Some(BODY_CAPTURE.to_string()),
		}
	}

	fn config_for(source: &EmailSource) -> AccessConfig {
		validate_config(&json!({ "emailRule": { "regex": ".*@gmail.com$" } }), source).unwrap()
	}

	#[test]
	fn validate_email_accepts_matching_domain() {
		assert!(validate_email("user@email.com", ".*@email.com$").unwrap());
	}

	#[test]
	fn validate_email_rejects_other_domain() {
		assert!(!validate_email("user@gmail.com", ".*@email.com$").unwrap());
	}

	#[test]
	fn validate_email_ignores_case() {
		assert_eq!(
			validate_email("a@B.com", ".*@b.com$").unwrap(),
			validate_email("a@b.com", ".*@b.com$").unwrap()
		);
	}

	#[test]
	fn validate_email_reports_bad_pattern() {
		assert!(validate_email("a@b.com", "(").is_err());
	}

	#[test]
	fn extract_prefers_named_group() {
		let capture = Regex::new(BODY_CAPTURE).unwrap();
		assert_eq!(
			extract_email("<p>Email of Requester:  user@gmail.com </p>", &capture).as_deref(),
			Some("user@gmail.com")
		);
	}

	#[test]
	fn extract_falls_back_to_first_group_then_whole_match() {
		let grouped = Regex::new(r"mail: (\S+)").unwrap();
		assert_eq!(
			extract_email("mail: a@b.com", &grouped).as_deref(),
			Some("a@b.com")
		);

		let bare = Regex::new(r"\S+@\S+").unwrap();
		assert_eq!(
			extract_email("reach me at a@b.com", &bare).as_deref(),
			Some("a@b.com")
		);
	}

	#[test]
	fn extract_without_match_is_none() {
		let capture = Regex::new(BODY_CAPTURE).unwrap();
		assert!(extract_email("Any test data without an email", &capture).is_none());
	}

	#[test]
	fn resolve_accepts_valid_issue_email() {
		let source = issue("<p>Email of Requester: user@gmail.com</p>");
		assert_eq!(
			resolve_email(&source, &config_for(&source)).unwrap(),
			"user@gmail.com"
		);
	}

	#[test]
	fn resolve_rejects_other_domain() {
		let source = issue("<p>Email of Requester: user@email.com</p>");
		let err = resolve_email(&source, &config_for(&source)).unwrap_err();
		assert_eq!(err.to_string(), "Email user@email.com not from a valid domain");
	}

	#[test]
	fn resolve_reports_missing_email() {
		let source = issue("Any test data without an email");
		let err = resolve_email(&source, &config_for(&source)).unwrap_err();
		assert_eq!(err, EmailError::NotFound);
		assert_eq!(err.to_string(), "Parsing error: email not found.");
	}

	#[test]
	fn resolve_direct_email_trims() {
		let source = EmailSource::Direct("  user@gmail.com\n".to_string());
		assert_eq!(
			resolve_email(&source, &config_for(&source)).unwrap(),
			"user@gmail.com"
		);
	}

	#[test]
	fn resolve_blank_direct_email_is_not_found() {
		let source = EmailSource::Direct("   ".to_string());
		assert_eq!(
			resolve_email(&source, &config_for(&source)).unwrap_err(),
			EmailError::NotFound
		);
	}

	proptest! {
		#[test]
		fn validation_is_case_insensitive(local in "[a-z0-9.]{1,12}", domain in "[a-z]{1,10}") {
			let pattern = format!(".*@{domain}\\.com$");
			let lower = format!("{local}@{domain}.com");
			let upper = lower.to_uppercase();
			prop_assert_eq!(
				validate_email(&lower, &pattern).unwrap(),
				validate_email(&upper, &pattern).unwrap()
			);
			prop_assert!(validate_email(&upper, &pattern).unwrap());
		}
	}
}
